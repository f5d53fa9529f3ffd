//! Error types for readme-sync.
//!
//! All operations return `Result<T>` which aliases `Result<T, SyncError>`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from readme synchronization.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No documentation path could be resolved.
    #[error("No README path given and none could be resolved")]
    MissingPath,

    /// Documentation file does not exist.
    #[error("README not found: {0}")]
    ReadmeNotFound(PathBuf),

    /// No package.json next to the documentation file.
    #[error("Manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Manifest lacks a usable `name` field.
    #[error("Manifest {0} has no package name")]
    MissingPackageName(PathBuf),

    /// Generated backup path is already taken.
    #[error("Backup file already exists: {0}")]
    BackupExists(PathBuf),

    /// Rollback failed after commit error.
    #[error("Rollback failed: {0}")]
    RollbackFailed(String),

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON parse or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation failed (indicates bug).
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for readme-sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
