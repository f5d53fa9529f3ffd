use crate::steps::SyncArgs;
use clap::Parser;

/// Copy README.md into package.json's readme field with intra-document
/// links pointing at the registry's package page.
#[derive(Parser)]
#[command(name = "readme-sync", version)]
pub struct Cli {
    #[command(flatten)]
    pub args: SyncArgs,
}
