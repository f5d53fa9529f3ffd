//! Selection rules for the documentation path.
//!
//! Pure functions with no I/O or side effects.

use crate::error::{Result, SyncError};
use std::path::{Path, PathBuf};

/// Used when no markdown path is given.
pub const DEFAULT_README: &str = "README.md";

/// Returns true if `path` ends in `.md`, ignoring case.
pub fn is_markdown_path(path: &Path) -> bool {
    path.to_string_lossy().to_ascii_lowercase().ends_with(".md")
}

/// Picks the documentation file to publish.
///
/// ## Rules
/// - A path ending in `.md` (any case) is used as given
/// - Anything else, or nothing, falls back to [`DEFAULT_README`]
pub fn select_readme_path(arg: Option<&Path>) -> PathBuf {
    match arg {
        Some(path) if is_markdown_path(path) => path.to_path_buf(),
        _ => PathBuf::from(DEFAULT_README),
    }
}

/// Selects the documentation path and anchors it at `cwd`.
///
/// # Errors
///
/// - `MissingPath`: the selected path names no file
pub fn resolve_readme_path(arg: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let selected = select_readme_path(arg);
    let resolved = cwd.join(selected);

    if resolved.file_name().is_none() || resolved.parent().is_none() {
        return Err(SyncError::MissingPath);
    }

    Ok(resolved)
}
