//! Remove-bundle command implementation

use console::style;

use crate::cli::RemoveBundleArgs;
use crate::error::{self, Result};
use crate::scaffold::remove_bundle;

/// Run remove-bundle command
pub fn run(args: RemoveBundleArgs) -> Result<()> {
    let dir = match args.dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| error::fs::read_failed(".", e.to_string()))?,
    };

    let report = remove_bundle(&args.request(dir))?;

    println!(
        "{} {}",
        style("Removed bundle").green().bold(),
        style(&report.coordinates).cyan()
    );
    println!("  module of     {}", report.parent.display());
    for dependent in &report.dependents {
        println!("  dependency dropped from {}", dependent.display());
    }
    Ok(())
}
