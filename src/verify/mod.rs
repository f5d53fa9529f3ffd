//! Validation before a manifest is synchronized.

pub mod preflight;
pub mod rules;

pub use preflight::{preflight_checks, read_readme};
pub use rules::{DEFAULT_README, is_markdown_path, resolve_readme_path, select_readme_path};
