use clap::Parser;
use std::path::PathBuf;

use crate::scaffold::RemovalRequest;

/// Arguments for the remove-bundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Unlink the api module of the project in the current directory:\n    pax remove-bundle api\n\n\
                   Unlink a nested module:\n    pax remove-bundle core --dir bundles")]
pub struct RemoveBundleArgs {
    /// Module directory of the bundle
    pub name: String,

    /// Directory holding the module (defaults to current directory)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub dir: Option<PathBuf>,
}

impl RemoveBundleArgs {
    pub fn request(&self, dir: PathBuf) -> RemovalRequest {
        RemovalRequest {
            name: self.name.clone(),
            dir,
        }
    }
}
