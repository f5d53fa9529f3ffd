//! Backup-then-replace file operations with rollback support.
//!
//! Coordinates the backup copy and rewrite of a manifest so that they
//! succeed or fail as a unit.
//!
//! ## Execution Guarantees
//!
//! - **Ordering**: Backups are copied before any file is replaced
//! - **Durability**: Replacements are written to a sibling temp file and
//!   renamed over the target, so a reader never sees a half-written file.
//!   Symlinks are followed and the target keeps its permissions
//! - **Validation**: Pre-flight checks before any mutations
//! - **Idempotency**: Files with unchanged content are skipped
//! - **Rollback**: A failed commit restores executed operations in LIFO order
//!
//! ## Example
//!
//! ```no_run
//! # use readme_sync::fs::Transaction;
//! # use std::path::PathBuf;
//! # fn example() -> readme_sync::error::Result<()> {
//! let mut txn = Transaction::new(false);
//!
//! txn.backup_file(
//!     PathBuf::from("package.json"),
//!     PathBuf::from("/tmp/tmp-package-json-1234"),
//! )?;
//! txn.update_file(PathBuf::from("package.json"), "{}\n".into())?;
//!
//! txn.commit()?; // Rolls back on error
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SyncError};

use colored::Colorize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A file system operation that can be committed or rolled back.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Copy a file to a backup location.
    BackupFile { source: PathBuf, backup: PathBuf },
    /// Replace file contents.
    ///
    /// Stores original content for rollback.
    UpdateFile {
        path: PathBuf,
        original: String,
        new: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionState {
    /// Staging operations.
    Building,
    /// All operations succeeded.
    Committed,
    /// Validation or execution failed.
    Failed,
}

/// Transaction coordinating backup copies and file replacements.
///
/// Must be explicitly committed. If dropped without committing, logs a warning
/// but doesn't roll back (since operations weren't applied).
///
/// ## Dry-Run Mode
///
/// When `dry_run = true`, operations are staged but not executed.
#[must_use = "Transaction must be committed"]
pub struct Transaction {
    operations: Vec<Operation>,
    dry_run: bool,
    state: TransactionState,
    executed_indices: Vec<usize>,
}

impl Transaction {
    /// Creates a new transaction.
    pub fn new(dry_run: bool) -> Self {
        Self {
            operations: Vec::new(),
            dry_run,
            state: TransactionState::Building,
            executed_indices: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn ensure_building(&self) -> Result<()> {
        if self.state != TransactionState::Building {
            return Err(SyncError::Other(anyhow::anyhow!(
                "Cannot modify transaction after commit"
            )));
        }
        Ok(())
    }

    /// Stages a backup copy of `source`.
    ///
    /// Not executed until `commit()`. Backups execute before any update.
    pub fn backup_file(&mut self, source: PathBuf, backup: PathBuf) -> Result<()> {
        self.ensure_building()?;

        if !source.is_file() {
            return Err(SyncError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Cannot back up missing file: {}", source.display()),
            )));
        }

        if backup.exists() {
            return Err(SyncError::BackupExists(backup));
        }

        if self.dry_run {
            log::info!("Would back up: {} → {}", source.display(), backup.display());
        }

        self.operations.push(Operation::BackupFile { source, backup });
        Ok(())
    }

    /// Stages a file update.
    ///
    /// Reads current content and compares to `new_content`. If identical,
    /// skips (idempotent). Otherwise stages for commit.
    pub fn update_file(&mut self, path: PathBuf, new_content: String) -> Result<()> {
        self.ensure_building()?;

        log::debug!("Staging update for: {}", path.display());

        let original = fs::read_to_string(&path).map_err(|e| {
            log::error!("Failed to read {}: {}", path.display(), e);
            SyncError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;

        if original == new_content {
            log::debug!("Content unchanged, skipping: {}", path.display());
            return Ok(());
        }

        if self.dry_run {
            log::info!("Would update: {}", path.display());
        }

        self.operations.push(Operation::UpdateFile {
            path,
            original,
            new: new_content,
        });

        Ok(())
    }

    /// Validates all staged operations.
    ///
    /// Checks:
    /// - No duplicate file operations
    /// - Source paths still exist
    /// - Files are writable
    /// - Backup targets are still free
    fn validate(&self) -> Result<()> {
        let mut updated = HashSet::new();
        let mut backups = HashSet::new();

        for op in &self.operations {
            match op {
                Operation::BackupFile { source, backup } => {
                    if !source.exists() {
                        return Err(SyncError::Io(std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            format!("File no longer exists: {}", source.display()),
                        )));
                    }

                    if backup.exists() || !backups.insert(backup.clone()) {
                        return Err(SyncError::BackupExists(backup.clone()));
                    }
                }
                Operation::UpdateFile { path, .. } => {
                    if !updated.insert(path.clone()) {
                        return Err(SyncError::Other(anyhow::anyhow!(
                            "Duplicate file operation: {}",
                            path.display()
                        )));
                    }

                    if !path.exists() {
                        return Err(SyncError::Io(std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            format!("File no longer exists: {}", path.display()),
                        )));
                    }

                    if let Ok(metadata) = fs::metadata(path)
                        && metadata.permissions().readonly()
                    {
                        return Err(SyncError::Io(std::io::Error::new(
                            std::io::ErrorKind::PermissionDenied,
                            format!("File is read-only: {}", path.display()),
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Commits all staged operations.
    ///
    /// Order:
    /// 1. Validate
    /// 2. Copy backups
    /// 3. Replace files
    ///
    /// On failure, executed operations are rolled back and the original
    /// error is returned.
    pub fn commit(&mut self) -> Result<()> {
        if self.state != TransactionState::Building {
            return Err(SyncError::Other(anyhow::anyhow!(
                "Transaction already committed"
            )));
        }

        if self.dry_run {
            self.state = TransactionState::Committed;
            return Ok(());
        }

        if let Err(e) = self.validate() {
            self.state = TransactionState::Failed;
            return Err(e);
        }

        if let Err(e) = self.execute() {
            log::warn!("Commit failed, rolling back: {}", e);
            if let Err(rollback_err) = self.rollback_partial() {
                log::error!("{}", rollback_err);
            }
            self.state = TransactionState::Failed;
            return Err(e);
        }

        self.state = TransactionState::Committed;
        Ok(())
    }

    fn execute(&mut self) -> Result<()> {
        let mut backup_ops = Vec::new();
        let mut file_ops = Vec::new();

        for (idx, op) in self.operations.iter().enumerate() {
            match op {
                Operation::BackupFile { .. } => backup_ops.push(idx),
                Operation::UpdateFile { .. } => file_ops.push(idx),
            }
        }

        // Backups FIRST
        for &idx in &backup_ops {
            if let Some(Operation::BackupFile { source, backup }) = self.operations.get(idx) {
                if let Some(parent) = backup.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(source, backup).map_err(|e| {
                    SyncError::Io(std::io::Error::new(
                        e.kind(),
                        format!(
                            "Failed to back up {} → {}: {}",
                            source.display(),
                            backup.display(),
                            e
                        ),
                    ))
                })?;
                self.executed_indices.push(idx);
                log::debug!("Backed up: {} → {}", source.display(), backup.display());
            }
        }

        // Replacements SECOND
        for &idx in &file_ops {
            if let Some(Operation::UpdateFile { path, new, .. }) = self.operations.get(idx) {
                Self::write_replacing(path, new).map_err(|e| {
                    SyncError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to write {}: {}", path.display(), e),
                    ))
                })?;
                self.executed_indices.push(idx);
                log::debug!("Updated: {}", path.display());
            }
        }

        Ok(())
    }

    /// Rolls back executed operations only.
    ///
    /// Backups are deleted only once every replaced file has been restored;
    /// otherwise they are kept as the last good copy.
    fn rollback_partial(&mut self) -> Result<()> {
        let mut errors = Vec::new();

        for &idx in self.executed_indices.iter().rev() {
            if let Some(op) = self.operations.get(idx) {
                let result = match op {
                    Operation::UpdateFile { path, original, .. } => {
                        Self::write_replacing(path, original)
                            .map_err(|e| format!("Failed to restore {}: {}", path.display(), e))
                    }
                    Operation::BackupFile { backup, .. } if errors.is_empty() => {
                        fs::remove_file(backup).map_err(|e| {
                            format!("Failed to remove backup {}: {}", backup.display(), e)
                        })
                    }
                    Operation::BackupFile { backup, .. } => {
                        log::warn!("Keeping backup {}", backup.display());
                        Ok(())
                    }
                };

                if let Err(e) = result {
                    errors.push(e);
                }
            }
        }

        self.executed_indices.clear();

        if errors.is_empty() {
            log::info!("Rollback completed");
            Ok(())
        } else {
            Err(SyncError::RollbackFailed(errors.join("; ")))
        }
    }

    /// Writes `content` next to the file `path` resolves to and renames it
    /// into place with the file's current permissions.
    fn write_replacing(path: &Path, content: &str) -> std::io::Result<()> {
        let target = fs::canonicalize(path)?;
        let permissions = fs::metadata(&target)?.permissions();

        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let staging = target.with_file_name(format!(".{file_name}.readme-sync.tmp"));

        let result = fs::write(&staging, content)
            .and_then(|()| fs::set_permissions(&staging, permissions))
            .and_then(|()| fs::rename(&staging, &target));
        if result.is_err() {
            let _ = fs::remove_file(&staging);
        }
        result
    }

    /// Prints the outcome to stdout.
    ///
    /// Paths under `base` are shown relative to it with forward slashes.
    pub fn print_summary(&self, base: &Path) {
        if self.operations.is_empty() {
            println!("{:>12} readme already up to date", "Unchanged".yellow().bold());
            return;
        }

        let display_path = |path: &Path| -> String {
            match pathdiff::diff_paths(path, base) {
                Some(relative) if !relative.starts_with("..") => {
                    relative.to_string_lossy().replace('\\', "/")
                }
                _ => path.display().to_string(),
            }
        };

        if self.dry_run {
            println!("{}", "DRY RUN - No changes will be made".yellow().bold());
        }

        for op in &self.operations {
            match op {
                Operation::BackupFile { source, backup } => {
                    let verb = if self.dry_run {
                        "Pending".blue().bold()
                    } else {
                        "Backed up".green().bold()
                    };
                    println!(
                        "{:>12} {} to {}",
                        verb,
                        display_path(source),
                        display_path(backup).dimmed()
                    );
                }
                Operation::UpdateFile { path, .. } => {
                    let verb = if self.dry_run {
                        "Pending".blue().bold()
                    } else {
                        "Updated".green().bold()
                    };
                    println!("{:>12} {}", verb, display_path(path));
                }
            }
        }

        if self.dry_run {
            println!("Run without {} to apply.", "--dry-run".cyan());
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if self.state == TransactionState::Building && !self.operations.is_empty() && !self.dry_run
        {
            log::warn!("Transaction dropped without commit");
        }
    }
}
