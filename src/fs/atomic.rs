//! Atomic file writes.
//!
//! Content goes to a hidden temp file next to the target, is synced to disk,
//! then renamed over the target. A crash leaves either the old file or the
//! new one, plus at worst a stray `.{name}.tmp`.
//!
//! `std::fs::rename` replaces an existing target on both POSIX and Windows,
//! as long as source and target share a filesystem.

use crate::error::{InfraError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write `content` to `path`, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            InfraError::FilesystemWriteFailure(format!(
                "cannot create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        InfraError::FilesystemWriteFailure(format!("cannot replace '{}': {}", path.display(), e))
    })?;

    sync_parent(path);
    Ok(())
}

/// Persist the directory entry of a freshly renamed file.
#[cfg(unix)]
fn sync_parent(path: &Path) {
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) {}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            InfraError::FilesystemWriteFailure(format!("invalid file path '{}'", target.display()))
        })?;

    let parent = target.parent().unwrap_or(Path::new("."));
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        InfraError::FilesystemWriteFailure(format!("cannot create '{}': {}", path.display(), e))
    })?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(InfraError::FilesystemWriteFailure(format!(
            "cannot write '{}': {}",
            path.display(),
            e
        )));
    }

    Ok(())
}
