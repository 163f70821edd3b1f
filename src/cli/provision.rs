use clap::Parser;
use std::path::PathBuf;

use crate::config::options::{DEFAULT_FRAMEWORK, DEFAULT_RUNNER_VERSION, parse_deploy_poms};
use crate::config::ProvisionOptions;

/// Arguments for the provision command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Provision the build in the current directory:\n    pax provision\n\n\
                   Use the classic runner:\n    pax provision --runner 0.4.0\n\n\
                   Pass raw runner commands:\n    pax provision --provision mvn:org.example/extra/1.0\n\n\
                   Add bundles from other descriptors:\n    pax provision --deploy-poms ../shared/pom.xml,../tools/pom.xml")]
pub struct ProvisionArgs {
    /// Root project directory or descriptor (defaults to current directory)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Framework to deploy onto
    #[arg(long, short = 'f', default_value = DEFAULT_FRAMEWORK)]
    pub framework: String,

    /// Install the deployment descriptor without launching the runner
    #[arg(long)]
    pub no_deploy: bool,

    /// Comma separated descriptors whose bundles are deployed too
    #[arg(long, value_name = "POMS")]
    pub deploy_poms: Option<String>,

    /// Pax Runner version
    #[arg(long, short = 'r', default_value = DEFAULT_RUNNER_VERSION)]
    pub runner: String,

    /// Raw provisioning command for the runner (repeatable)
    #[arg(long = "provision", short = 'p', value_name = "COMMAND", allow_hyphen_values = true)]
    pub provision: Vec<String>,

    /// Classify projects by their built jar manifests as well as their packaging
    #[arg(long)]
    pub scan_manifests: bool,
}

impl ProvisionArgs {
    pub fn options(&self) -> ProvisionOptions {
        ProvisionOptions {
            framework: self.framework.clone(),
            deploy: !self.no_deploy,
            deploy_poms: self
                .deploy_poms
                .as_deref()
                .map(parse_deploy_poms)
                .unwrap_or_default(),
            runner: self.runner.clone(),
            provision: self.provision.clone(),
            scan_manifests: self.scan_manifests,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ProvisionArgs {
        let cli = super::super::Cli::try_parse_from(args).unwrap_or_else(|e| {
            panic!("Failed to parse CLI arguments: {e}");
        });
        match cli.command {
            super::super::Commands::Provision(args) => args,
            _ => panic!("Expected Provision command"),
        }
    }

    #[test]
    fn test_defaults() {
        let options = parse(&["pax", "provision"]).options();
        assert_eq!(options, ProvisionOptions::default());
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "pax",
            "provision",
            "--dir",
            "app",
            "--framework",
            "equinox",
            "--no-deploy",
            "--deploy-poms",
            "a/pom.xml, b/pom.xml",
            "--runner",
            "0.4.0",
            "-p",
            "mvn:org.example/one/1.0",
            "-p",
            "--log=debug",
            "--scan-manifests",
        ]);
        assert_eq!(args.dir, Some(PathBuf::from("app")));

        let options = args.options();
        assert_eq!(options.framework, "equinox");
        assert!(!options.deploy);
        assert_eq!(
            options.deploy_poms,
            vec![PathBuf::from("a/pom.xml"), PathBuf::from("b/pom.xml")]
        );
        assert_eq!(options.runner, "0.4.0");
        assert_eq!(options.provision, vec!["mvn:org.example/one/1.0", "--log=debug"]);
        assert!(options.scan_manifests);
    }
}
