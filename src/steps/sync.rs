//! Orchestration logic for readme synchronization.
//!
//! All file system modifications go through a `Transaction`.

use crate::error::{Result, SyncError};
use crate::fs::{BackupNamer, Transaction};
use crate::npm::{BaseHref, Manifest, manifest_path_for};
use crate::rewrite::LinkRewriter;
use crate::verify::{is_markdown_path, preflight_checks, read_readme, resolve_readme_path};

use clap::Parser;
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

/// Arguments for a synchronization run.
#[derive(Parser, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Markdown file to publish (only used if it ends in `.md`; defaults to ./README.md)
    #[arg(value_name = "README")]
    pub readme: Option<PathBuf>,

    /// Path to package.json (defaults to the one next to the README)
    #[arg(long, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Directory for the package.json backup (defaults to /tmp, or C:\Temp on Windows)
    #[arg(long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Preview changes without applying them
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Print debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl SyncArgs {
    /// Resolves the README and manifest locations against `cwd`.
    pub fn resolve_paths(&self, cwd: &Path) -> Result<(PathBuf, PathBuf)> {
        if let Some(arg) = &self.readme
            && !is_markdown_path(arg)
        {
            log::warn!(
                "Ignoring '{}' (not a .md file), using README.md",
                arg.display()
            );
        }

        let readme_path = resolve_readme_path(self.readme.as_deref(), cwd)?;
        let manifest_path = match &self.manifest_path {
            Some(path) => cwd.join(path),
            None => manifest_path_for(&readme_path)?,
        };

        Ok((readme_path, manifest_path))
    }

    pub fn backup_namer(&self, cwd: &Path) -> BackupNamer {
        match &self.backup_dir {
            Some(dir) => BackupNamer::in_dir(cwd.join(dir)),
            None => BackupNamer::from_process(),
        }
    }
}

/// Where a synchronization left things.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub manifest_path: PathBuf,
    /// `None` when the readme snapshot was already current.
    pub backup_path: Option<PathBuf>,
}

/// Executes a synchronization run.
///
/// ## Phases
///
/// 1. Resolve README and manifest paths
/// 2. Pre-flight checks (both files exist)
/// 3. Load manifest and derive the registry base address
/// 4. Rewrite intra-document links in the README
/// 5. Stage backup and manifest update in a transaction
/// 6. Commit (rolls back on failure)
pub fn execute(args: SyncArgs) -> Result<()> {
    let cwd = env::current_dir()?;
    let (readme_path, manifest_path) = args.resolve_paths(&cwd)?;

    log::debug!("README: {}", readme_path.display());
    log::debug!("Manifest: {}", manifest_path.display());

    preflight_checks(&readme_path, &manifest_path)?;

    let readme = read_readme(&readme_path)?;
    let mut manifest = Manifest::load(&manifest_path)?;
    let base = BaseHref::from_manifest(&manifest)?;
    log::debug!("Base href: {}", base.html_tag());

    let rewritten = LinkRewriter::new()?.rewrite(&readme, base.as_str());

    let namer = args.backup_namer(&cwd);
    let mut txn = Transaction::new(args.dry_run);

    if let Err(e) = stage_manifest_update(&mut manifest, &rewritten, &namer, &mut txn) {
        return handle_staging_error(e, &txn);
    }

    if let Err(e) = txn.commit() {
        return handle_commit_error(e, &args);
    }

    txn.print_summary(&cwd);
    Ok(())
}

/// Replaces the manifest's readme with `readme`, backing up the file first.
///
/// Returns the backup location, or `None` if the readme was already current
/// and nothing was written.
pub fn sync_manifest(
    manifest_path: &Path,
    readme: &str,
    namer: &BackupNamer,
) -> Result<SyncOutcome> {
    let mut manifest = Manifest::load(manifest_path)?;
    let mut txn = Transaction::new(false);

    let backup_path = stage_manifest_update(&mut manifest, readme, namer, &mut txn)?;
    txn.commit()?;

    Ok(SyncOutcome {
        manifest_path: manifest_path.to_path_buf(),
        backup_path,
    })
}

/// Stages the backup copy and rewrite of `manifest` with a new readme.
pub fn stage_manifest_update(
    manifest: &mut Manifest,
    readme: &str,
    namer: &BackupNamer,
    txn: &mut Transaction,
) -> Result<Option<PathBuf>> {
    if !manifest.set_readme(readme) {
        log::info!("Readme in {} already up to date", manifest.path().display());
        return Ok(None);
    }

    let path = manifest.path().to_path_buf();
    let backup = namer.backup_path(&path);

    txn.backup_file(path.clone(), backup.clone())?;
    txn.update_file(path, manifest.to_json_string()?)?;

    log::debug!("Staged {} operations", txn.len());
    Ok(Some(backup))
}

fn handle_staging_error(e: SyncError, txn: &Transaction) -> Result<()> {
    if !txn.is_dry_run() && !txn.is_empty() {
        eprintln!("{} No changes were committed.", "ℹ".blue().bold());
    }

    Err(e)
}

fn handle_commit_error(e: SyncError, args: &SyncArgs) -> Result<()> {
    if !args.dry_run {
        eprintln!(
            "{} Staged changes were rolled back; see log output for details.",
            "ℹ".blue().bold()
        );
    }

    Err(e)
}
