//! Markdown rewriting for registry readme snapshots.
//!
//! - **`mask`**: Generic regex-driven placeholder masking
//! - **`links`**: Intra-document link absolutization built on `mask`

pub mod links;
pub mod mask;

pub use links::{LINK_TAG, LinkRewriter, PREFORMATTED_TAG, rewrite_links};
pub use mask::{MARKER_PREFIX, Masked, MaskedRegion, MaskedRegions, mask};
