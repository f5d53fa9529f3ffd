//! File system operations with transaction support.
//!
//! Provides backup naming and a backup-then-replace transaction that can be
//! committed or rolled back as a unit.

pub mod backup;
pub mod transaction;

pub use backup::{BackupNamer, default_backup_dir};
pub use transaction::{Operation, Transaction};
