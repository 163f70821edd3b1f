//! Pax Construct - OSGi project tooling
//!
//! Scaffolds bundle modules inside Maven-style multi-module builds and
//! provisions the bundles of such a build onto an OSGi framework through
//! Pax Runner.

use clap::Parser;

mod bundle;
mod cli;
mod commands;
mod config;
mod descriptor;
mod error;
mod logging;
mod progress;
mod provision;
mod repository;
mod runner;
mod scaffold;
mod transaction;

use cli::{Cli, Commands};
use logging::{LoggingConfig, init_logging};

fn main() {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.global.verbose));

    let result = match cli.command {
        Commands::Provision(args) => commands::provision::run(&cli.global, args),
        Commands::CreateBundle(args) => commands::create_bundle::run(args),
        Commands::RemoveBundle(args) => commands::remove_bundle::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
