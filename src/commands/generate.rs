//! The generation pipeline shared by every `generate-*` command.
//!
//! prompt → AI → artifacts → validation → guide → disk. Each stage either
//! returns its output or aborts the whole run; nothing is written until the
//! AI response has been turned into at least one artifact.

use crate::ai::TextGenerator;
use crate::artifacts::extract_artifacts;
use crate::error::Result;
use crate::fs::write_artifacts;
use crate::guide::{GUIDE_FILENAME, GuideFile, render_guide};
use crate::prompt::build_prompt;
use crate::request::{GeneratedArtifact, GenerationRequest};
use crate::validate::{ValidationResult, validate_artifact};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Generated artifacts, in output order (the guide is not included).
    pub artifacts: Vec<GeneratedArtifact>,
    /// Validation per artifact; `None` for static companion files.
    pub validations: Vec<Option<ValidationResult>>,
    /// Paths written, artifacts first and the guide last.
    pub written: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn guide_path(&self) -> Option<&PathBuf> {
        self.written.last()
    }

    /// Artifacts paired with their validation.
    pub fn files(&self) -> impl Iterator<Item = (&GeneratedArtifact, Option<&ValidationResult>)> {
        self.artifacts
            .iter()
            .zip(self.validations.iter().map(Option::as_ref))
    }
}

/// Run the full pipeline for `request`.
pub fn run_generation(
    request: &GenerationRequest,
    generator: &dyn TextGenerator,
    generated_at: DateTime<Utc>,
) -> Result<GenerationReport> {
    let prompt = build_prompt(request)?;

    log::info!("generating {} with {}", request.kind().title(), generator.describe());
    let raw = generator.generate(&prompt.text)?;
    log::debug!("AI response: {} chars", raw.len());

    let artifacts = extract_artifacts(request, &raw)?;
    let validations: Vec<Option<ValidationResult>> = artifacts.iter().map(validate_artifact).collect();

    for (artifact, validation) in artifacts.iter().zip(&validations) {
        if let Some(result) = validation
            && !result.ok()
        {
            log::warn!("{} has validation errors: {}", artifact.filename, result.summary());
        }
    }

    let guide_files: Vec<GuideFile<'_>> = artifacts
        .iter()
        .zip(&validations)
        .map(|(artifact, validation)| GuideFile {
            artifact,
            validation: validation.as_ref(),
        })
        .collect();
    let guide = render_guide(request, &prompt.requirements, &guide_files, generated_at);

    let mut outputs = artifacts.clone();
    outputs.push(GeneratedArtifact::companion(GUIDE_FILENAME, guide, request.kind()));

    let written = write_artifacts(request.output_dir(), &outputs)?;

    Ok(GenerationReport {
        artifacts,
        validations,
        written,
    })
}
