//! Backup file naming.
//!
//! A manifest at `/work/pkg/package.json` backed up by process 4242 lands at
//! `/tmp/tmp--work-pkg-package-json-4242`.

use std::path::{Path, PathBuf};

/// Generates backup paths for files about to be replaced.
///
/// Names are unique per source path and process. Two runs on the same file
/// from the same process id would collide; the transaction refuses to
/// overwrite an existing backup in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupNamer {
    dir: PathBuf,
    pid: u32,
}

impl BackupNamer {
    pub fn new(dir: impl Into<PathBuf>, pid: u32) -> Self {
        Self {
            dir: dir.into(),
            pid,
        }
    }

    /// Platform temp directory and the current process id.
    pub fn from_process() -> Self {
        Self::new(default_backup_dir(), std::process::id())
    }

    /// Custom directory and the current process id.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, std::process::id())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the backup location for `original`.
    ///
    /// Separators, dots and colons in the path become `-`.
    pub fn backup_path(&self, original: &Path) -> PathBuf {
        let flattened: String = original
            .to_string_lossy()
            .chars()
            .map(|c| match c {
                '/' | '\\' | '.' | ':' => '-',
                other => other,
            })
            .collect();

        self.dir.join(format!("tmp-{}-{}", flattened, self.pid))
    }
}

/// `C:\Temp` on Windows, `/tmp` elsewhere.
pub fn default_backup_dir() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Temp")
    } else {
        PathBuf::from("/tmp")
    }
}
