//! Provisioning parameters

use std::path::PathBuf;

pub const DEFAULT_FRAMEWORK: &str = "felix";

pub const DEFAULT_RUNNER_VERSION: &str = "0.5.1";

/// Parameters of one provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Target framework passed to the runner
    pub framework: String,
    /// Invoke the runner after installing the deployment descriptor
    pub deploy: bool,
    /// Extra descriptors folded into the bundle registry
    pub deploy_poms: Vec<PathBuf>,
    /// Runner version; selects the calling convention
    pub runner: String,
    /// Raw commands passed to the NG runner
    pub provision: Vec<String>,
    /// Inspect jar manifests when classifying projects
    pub scan_manifests: bool,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            framework: DEFAULT_FRAMEWORK.to_string(),
            deploy: true,
            deploy_poms: Vec::new(),
            runner: DEFAULT_RUNNER_VERSION.to_string(),
            provision: Vec::new(),
            scan_manifests: false,
        }
    }
}

/// Split a comma separated list of descriptor paths
pub fn parse_deploy_poms(list: &str) -> Vec<PathBuf> {
    list.split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ProvisionOptions::default();
        assert_eq!(options.framework, "felix");
        assert!(options.deploy);
        assert_eq!(options.runner, "0.5.1");
    }

    #[test]
    fn test_parse_deploy_poms() {
        assert_eq!(
            parse_deploy_poms("a/pom.xml, b/pom.xml,,"),
            vec![PathBuf::from("a/pom.xml"), PathBuf::from("b/pom.xml")]
        );
        assert!(parse_deploy_poms("").is_empty());
    }
}
