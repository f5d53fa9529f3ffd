//! Package manifest (`package.json`) access.
//!
//! The manifest is kept as an order-preserving JSON object so that a
//! parse → edit → serialize cycle leaves every unrelated field exactly where
//! it was. Typed accessors cover the three fields this tool cares about:
//!
//! ```json
//! {
//!   "name": "my-pkg",
//!   "publishConfig": { "registry": "https://npm.example.com" },
//!   "readme": "..."
//! }
//! ```

use crate::error::{Result, SyncError};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name looked up next to the documentation file.
pub const MANIFEST_FILE_NAME: &str = "package.json";

const NAME_FIELD: &str = "name";
const PUBLISH_CONFIG_FIELD: &str = "publishConfig";
const REGISTRY_FIELD: &str = "registry";
const README_FIELD: &str = "readme";

/// A loaded `package.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
    trailing_newline: bool,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// - `ManifestNotFound`: No file at `path`
    /// - `Io`: File exists but cannot be read
    /// - `Json`: Content is not a JSON object
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SyncError::ManifestNotFound(path.to_path_buf()),
            _ => SyncError::Io(e),
        })?;

        Self::from_json(path, &content)
    }

    /// Parses manifest content that was read from `path`.
    pub fn from_json(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let document: Map<String, Value> = serde_json::from_str(content)?;

        Ok(Self {
            path: path.into(),
            document,
            trailing_newline: content.ends_with('\n'),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Package name, if present and non-blank.
    pub fn name(&self) -> Option<&str> {
        self.document
            .get(NAME_FIELD)
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// Like [`Manifest::name`], but a missing name is an error.
    pub fn require_name(&self) -> Result<&str> {
        self.name()
            .ok_or_else(|| SyncError::MissingPackageName(self.path.clone()))
    }

    /// `publishConfig.registry`, if present and non-empty.
    pub fn registry(&self) -> Option<&str> {
        self.document
            .get(PUBLISH_CONFIG_FIELD)
            .and_then(|config| config.get(REGISTRY_FIELD))
            .and_then(Value::as_str)
            .filter(|registry| !registry.is_empty())
    }

    /// Current readme snapshot.
    pub fn readme(&self) -> Option<&str> {
        self.document.get(README_FIELD).and_then(Value::as_str)
    }

    /// Replaces the readme snapshot. Returns `false` if it was already equal.
    ///
    /// A manifest without a `readme` field gets one appended at the end.
    pub fn set_readme(&mut self, readme: &str) -> bool {
        if self.readme() == Some(readme) {
            return false;
        }

        self.document
            .insert(README_FIELD.to_string(), Value::String(readme.to_string()));
        true
    }

    /// Serializes with 2-space indentation, keeping the original trailing
    /// newline if there was one.
    pub fn to_json_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.document)?;
        if self.trailing_newline {
            out.push('\n');
        }
        Ok(out)
    }
}

/// Path of the manifest that belongs to `readme_path`.
pub fn manifest_path_for(readme_path: &Path) -> Result<PathBuf> {
    let dir = readme_path.parent().ok_or(SyncError::MissingPath)?;
    Ok(dir.join(MANIFEST_FILE_NAME))
}
