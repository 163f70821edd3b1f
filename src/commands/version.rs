//! Version command implementation

use crate::config::options::{DEFAULT_FRAMEWORK, DEFAULT_RUNNER_VERSION};
use crate::error::Result;
use crate::runner::NG_THRESHOLD;

/// Run version command
pub fn run() -> Result<()> {
    println!("pax {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Defaults:");
    println!("  Framework: {DEFAULT_FRAMEWORK}");
    println!("  Pax Runner: {DEFAULT_RUNNER_VERSION} (NG calling convention from {NG_THRESHOLD})");
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
