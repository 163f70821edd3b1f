//! Provision command implementation
//!
//! The provisioning process:
//! 1. Load settings and the reactor rooted at the chosen directory
//! 2. Build the repository resolver from settings and the root descriptor
//! 3. Visit every project, collecting bundle dependencies
//! 4. Resolve bundles, write and install the deployment descriptor
//! 5. Hand the descriptor to Pax Runner (unless `--no-deploy`)

use std::path::PathBuf;

use console::style;

use crate::cli::{GlobalArgs, ProvisionArgs};
use crate::config::Settings;
use crate::error::{self, Result};
use crate::provision::reactor::Reactor;
use crate::provision::{ProvisionReport, Provisioner, provision_reactor};
use crate::repository::{LocalRepository, RemoteRepository, RepositoryResolver};
use crate::runner::JarRunnerLoader;

/// Run provision command
pub fn run(global: &GlobalArgs, args: ProvisionArgs) -> Result<()> {
    let settings = Settings::locate(global.settings.as_deref())?;
    let root = match args.dir.clone() {
        Some(dir) => dir,
        None => current_dir()?,
    };

    let reactor = Reactor::load(&root)?;
    let basedir = reactor.root().basedir();
    let remotes = settings
        .remote_repositories(&reactor.root().pom().repositories())
        .iter()
        .map(|repository| RemoteRepository::new(repository, &basedir))
        .collect();
    let local = LocalRepository::new(settings.local_repository(global.local_repository.as_deref()));
    let resolver = RepositoryResolver::new(local, remotes);

    let environment = settings.runtime_environment(global.java_class_version.as_deref());
    let loader = JarRunnerLoader::new(&resolver, environment.java_command.clone());
    let options = args.options();

    let provisioner = Provisioner {
        options: &options,
        resolver: &resolver,
        local: resolver.local(),
        repositories: resolver.remote_urls(),
        loader: &loader,
        environment,
        show_progress: !global.verbose,
    };

    let report = provision_reactor(&reactor, provisioner)?;
    print_summary(&report);
    Ok(())
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| error::fs::read_failed(".", e.to_string()))
}

fn print_summary(report: &ProvisionReport) {
    println!(
        "{} {} ({} bundles)",
        style("Deployment descriptor").green().bold(),
        style(&report.coordinates).cyan(),
        report.bundles.len()
    );
    println!("  written to   {}", report.descriptor.display());
    println!("  installed to {}", report.installed.display());

    if !report.skipped.is_empty() {
        println!(
            "{} {} missing bundle(s) skipped",
            style("Warning:").yellow().bold(),
            report.skipped.len()
        );
        for artifact in &report.skipped {
            println!("  {}", style(artifact).dim());
        }
    }

    if let Some(arguments) = &report.arguments {
        println!("{} {}", style("Pax Runner").green().bold(), arguments.join(" "));
    }
}
