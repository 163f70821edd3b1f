use clap::Parser;
use std::path::PathBuf;

use crate::scaffold::{BundleRequest, DEFAULT_BUNDLE_VERSION};

/// Arguments for the create-bundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Add a bundle module to the project in the current directory:\n    pax create-bundle org.example.api\n\n\
                   Choose the module name and add JUnit:\n    pax create-bundle org.example.api --name api --junit 4.13\n\n\
                   Create a standalone bundle:\n    pax create-bundle org.example.tool --dir /tmp --settings-poms ./templates")]
pub struct CreateBundleArgs {
    /// Java package of the bundle
    pub package: String,

    /// Module name and artifact id (defaults to the package)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Bundle version
    #[arg(long, default_value = DEFAULT_BUNDLE_VERSION)]
    pub version: String,

    /// Directory to create the module in (defaults to current directory)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Group id (defaults to one derived from the containing project)
    #[arg(long, short = 'g')]
    pub group: Option<String>,

    /// Add a JUnit test dependency with this version
    #[arg(long, value_name = "VERSION")]
    pub junit: Option<String>,

    /// Add Spring bean support for this Spring version
    #[arg(long, value_name = "VERSION")]
    pub spring: Option<String>,

    /// Do not add OSGi API dependencies
    #[arg(long)]
    pub no_dependencies: bool,

    /// Replace existing descriptor entries
    #[arg(long, short = 'o')]
    pub overwrite: bool,

    /// Directory containing the settings descriptors used by standalone bundles
    #[arg(long, value_name = "PATH")]
    pub settings_poms: Option<PathBuf>,

    /// Build plugin version pinned in standalone bundles
    #[arg(long, value_name = "VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub plugin_version: String,
}

impl CreateBundleArgs {
    pub fn request(&self, dir: PathBuf) -> BundleRequest {
        BundleRequest {
            package: self.package.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            dir,
            group: self.group.clone(),
            junit: self.junit.clone(),
            spring: self.spring.clone(),
            no_dependencies: self.no_dependencies,
            overwrite: self.overwrite,
            settings_poms: self.settings_poms.clone(),
            plugin_version: self.plugin_version.clone(),
        }
    }
}
