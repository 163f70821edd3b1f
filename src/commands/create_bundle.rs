//! Create-bundle command implementation

use console::style;

use crate::cli::CreateBundleArgs;
use crate::error::{self, Result};
use crate::scaffold::create_bundle;

/// Run create-bundle command
pub fn run(args: CreateBundleArgs) -> Result<()> {
    let dir = match args.dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| error::fs::read_failed(".", e.to_string()))?,
    };

    let report = create_bundle(&args.request(dir))?;

    println!(
        "{} {}",
        style("Created bundle").green().bold(),
        style(&report.coordinates).cyan()
    );
    println!("  descriptor    {}", report.descriptor.display());
    println!("  symbolic name {}", report.symbolic_name);
    match &report.parent {
        Some(parent) => println!("  module of     {}", parent.display()),
        None => println!("  standalone"),
    }
    Ok(())
}
