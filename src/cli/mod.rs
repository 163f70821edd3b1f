//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - provision: Provision command arguments
//! - create_bundle: Create-bundle command arguments
//! - remove_bundle: Remove-bundle command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod create_bundle;
pub mod provision;
pub mod remove_bundle;

pub use completions::CompletionsArgs;
pub use create_bundle::CreateBundleArgs;
pub use provision::ProvisionArgs;
pub use remove_bundle::RemoveBundleArgs;

/// Pax Construct - OSGi project tooling
///
/// Scaffold bundle projects and provision their bundles onto an OSGi framework.
#[derive(Parser, Debug)]
#[command(
    name = "pax",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Scaffold OSGi bundle projects and provision them onto a framework",
    long_about = "Pax Construct collects the bundles of a multi-module build, resolves them \
                  against local and remote repositories, writes a deployment descriptor and \
                  hands it to Pax Runner.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  pax provision                          \x1b[90m# Provision the project in the current directory\x1b[0m\n   \
                  pax provision --framework equinox      \x1b[90m# Provision onto Equinox\x1b[0m\n   \
                  pax provision --no-deploy              \x1b[90m# Only install the deployment descriptor\x1b[0m\n   \
                  pax create-bundle org.example.api      \x1b[90m# Add a bundle module\x1b[0m\n   \
                  pax remove-bundle api                  \x1b[90m# Unlink a bundle module\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Settings file (defaults to <config dir>/pax-construct/settings.yaml)
    #[arg(long, short = 's', global = true, env = "PAX_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Local repository (defaults to ~/.m2/repository)
    #[arg(long, global = true, env = "PAX_LOCAL_REPOSITORY")]
    pub local_repository: Option<PathBuf>,

    /// Class version of the Java runtime that will launch the runner
    #[arg(long, global = true, hide = true, env = "PAX_JAVA_CLASS_VERSION")]
    pub java_class_version: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect bundles of a build and deploy them with Pax Runner
    Provision(ProvisionArgs),

    /// Create a new bundle module
    CreateBundle(CreateBundleArgs),

    /// Unlink a bundle module from its project
    RemoveBundle(RemoveBundleArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
