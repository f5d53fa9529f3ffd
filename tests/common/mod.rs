//! Integration tests for readme-sync
//!
//! These tests verify end-to-end behavior by creating real package
//! directories and running the binary against them.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(unused)]
pub const README: &str = r#"# my-pkg

- [Install](#install)
- [Usage](#usage)

## Install

<pre>
See [Usage](#usage) after installing.
</pre>

## Usage

Back to [Install](#install). External: [npm](https://www.npmjs.com/#top).
"#;

#[allow(unused)]
pub const MANIFEST: &str = r#"{
  "name": "my-pkg",
  "version": "1.2.3",
  "description": "Test package",
  "readme": "outdated",
  "publishConfig": {
    "registry": "https://npm.example.com"
  },
  "scripts": {
    "test": "node test.js"
  }
}
"#;

/// Helper to create a package directory with a README and package.json
#[allow(unused)]
pub fn create_test_package() -> TempDir {
    create_package_with(README, MANIFEST)
}

#[allow(unused)]
pub fn create_package_with(readme: &str, manifest: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), readme).unwrap();
    fs::write(temp.path().join("package.json"), manifest).unwrap();
    fs::create_dir(temp.path().join("backups")).unwrap();
    temp
}

#[allow(unused)]
pub fn backup_dir(root: &Path) -> PathBuf {
    root.join("backups")
}

/// Files currently in the backup directory
#[allow(unused)]
pub fn backups(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = fs::read_dir(backup_dir(root))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    files.sort();
    files
}

#[allow(unused)]
pub fn read_manifest(root: &Path) -> serde_json::Value {
    let content = fs::read_to_string(root.join("package.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Helper to run readme-sync with backups kept inside the test directory
pub fn run_sync(root: &Path, extra_args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("readme-sync");
    cmd.arg("--backup-dir")
        .arg(backup_dir(root))
        .args(extra_args)
        .env("NO_COLOR", "1")
        .current_dir(root);

    cmd.assert()
}
