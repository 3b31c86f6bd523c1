//! Static validation of generated artifacts.
//!
//! Each kind gets a format-specific parse attempt plus the pattern rules in
//! [`rules`]. Validation only reports; it never blocks writing and never
//! panics on malformed input.

mod cicd;
mod dockerfile;
mod kubernetes;
mod rules;
mod terraform;
mod types;
mod yaml;


pub use types::ValidationResult;

use crate::request::{ArtifactOrigin, GeneratedArtifact, Kind};

/// Validate `content` as an artifact of `kind`.
///
/// `filename` selects per-file rules: the `main.tf` block checks and the
/// GitHub/GitLab split for pipelines.
pub fn validate(kind: Kind, filename: &str, content: &str) -> ValidationResult {
    let result = match kind {
        Kind::K8s => kubernetes::validate_manifests(content),
        Kind::Terraform => terraform::validate_terraform(filename, content),
        Kind::Docker => dockerfile::validate_dockerfile(content),
        Kind::Cicd => cicd::validate_pipeline(filename, content),
    };

    log::debug!("validated {} ({}): {}", filename, kind, result.summary());
    result
}

/// Validate a generated artifact. Static companion files are skipped.
pub fn validate_artifact(artifact: &GeneratedArtifact) -> Option<ValidationResult> {
    match artifact.origin {
        ArtifactOrigin::Static => None,
        ArtifactOrigin::Generated => Some(validate(
            artifact.source_kind,
            &artifact.filename,
            &artifact.content,
        )),
    }
}
