//! Configuration handling for Pax Construct
//!
//! This module contains data structures for:
//! - `settings.yaml` - local and remote repositories, Java runtime
//! - provisioning parameters given on the command line

pub mod options;
pub mod settings;

pub use options::ProvisionOptions;
pub use settings::Settings;
