//! Pre-flight checks performed before synchronizing a manifest.
//!
//! Unlike `rules`, these functions touch the filesystem.

use crate::error::{Result, SyncError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Checks that both input files exist before anything is read or written.
///
/// # Errors
///
/// - `ReadmeNotFound`: documentation file is missing or not a file
/// - `ManifestNotFound`: `package.json` is missing or not a file
pub fn preflight_checks(readme_path: &Path, manifest_path: &Path) -> Result<()> {
    if !readme_path.is_file() {
        return Err(SyncError::ReadmeNotFound(readme_path.to_path_buf()));
    }

    if !manifest_path.is_file() {
        return Err(SyncError::ManifestNotFound(manifest_path.to_path_buf()));
    }

    if let Ok(metadata) = fs::metadata(manifest_path)
        && metadata.permissions().readonly()
    {
        log::warn!("{} is read-only", manifest_path.display());
    }

    Ok(())
}

/// Reads the documentation file, reporting a missing file distinctly.
pub fn read_readme(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SyncError::ReadmeNotFound(path.to_path_buf()),
        _ => SyncError::Io(e),
    })
}
