//! Writing artifacts into the output directory.

use super::atomic::atomic_write;
use crate::error::{InfraError, Result};
use crate::request::GeneratedArtifact;
use std::path::{Component, Path, PathBuf};

/// Write every artifact under `output_dir`, in order.
///
/// Existing files with the same name are replaced. Returns the written paths.
pub fn write_artifacts(output_dir: &Path, artifacts: &[GeneratedArtifact]) -> Result<Vec<PathBuf>> {
    // Reject every unsafe name before touching the disk.
    let targets = artifacts
        .iter()
        .map(|artifact| resolve_target(output_dir, &artifact.filename))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(targets.len());
    for (artifact, target) in artifacts.iter().zip(targets) {
        atomic_write(&target, artifact.content.as_bytes())?;
        log::info!("wrote {} ({} bytes)", target.display(), artifact.content.len());
        written.push(target);
    }

    Ok(written)
}

/// Join a relative artifact name onto `output_dir`.
///
/// Absolute names, `..` components and empty names are refused so a model
/// response can never write outside the output directory.
pub fn resolve_target(output_dir: &Path, filename: &str) -> Result<PathBuf> {
    let name = filename.trim();
    let relative = Path::new(name);

    if name.is_empty() {
        return Err(InfraError::FilesystemWriteFailure(
            "artifact has an empty filename".to_string(),
        ));
    }

    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(InfraError::FilesystemWriteFailure(format!(
                    "refusing to write '{}': path escapes the output directory",
                    filename
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(InfraError::FilesystemWriteFailure(format!(
                    "refusing to write '{}': absolute paths are not allowed",
                    filename
                )));
            }
        }
    }

    Ok(output_dir.join(relative))
}
