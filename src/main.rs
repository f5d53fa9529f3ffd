//! Binary entry point for `readme-sync`.

use std::process;

fn main() {
    if let Err(e) = readme_sync::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
