//! npm package metadata.
//!
//! - **`manifest`**: Loading, editing and serializing `package.json`
//! - **`registry`**: Detail-page base addresses for intra-document links

pub mod manifest;
pub mod registry;

pub use manifest::{MANIFEST_FILE_NAME, Manifest, manifest_path_for};
pub use registry::{BaseHref, DEFAULT_REGISTRY, WEB_DETAIL_PATH};
