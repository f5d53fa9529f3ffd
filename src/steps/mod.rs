//! High-level workflows.

pub mod sync;

pub use sync::{SyncArgs, SyncOutcome, execute, stage_manifest_update, sync_manifest};
