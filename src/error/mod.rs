//! Error types and handling for Pax Construct
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Settings and reactor configuration errors
//! - [`descriptor`]: Project descriptor (POM) errors
//! - [`deploy`]: Deployment descriptor synthesis and installation errors
//! - [`dispatch`]: External provisioning tool errors
//! - [`fs`]: File system errors

pub mod config;
pub mod deploy;
pub mod descriptor;
pub mod dispatch;
pub mod fs;


use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Boxed error raised by the external provisioning tool
pub type ToolError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The step at which dispatching to the provisioning tool failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    /// The tool artifact is not present in any repository
    NotFound,
    /// The tool artifact exists but could not be resolved or opened
    Unresolvable,
    /// The tool was loaded but its entry point is missing
    EntryPointNotFound,
    /// The entry point raised an error while running
    Invocation,
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DispatchFailure::NotFound => "Unable to find Pax-Runner",
            DispatchFailure::Unresolvable => "Unable to resolve Pax-Runner",
            DispatchFailure::EntryPointNotFound => "Unable to find Pax-Runner entry point",
            DispatchFailure::Invocation => "Pax-Runner exception",
        };
        f.write_str(text)
    }
}

/// Main error type for Pax Construct operations
#[derive(Error, Diagnostic, Debug)]
pub enum PaxError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(pax::config::not_found),
        help("Check the --settings path or the PAX_SETTINGS environment variable")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(pax::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(pax::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Module '{module}' has no project descriptor at {path}")]
    #[diagnostic(
        code(pax::config::module_not_found),
        help("Remove the module from <modules> or create its pom.xml")
    )]
    ModuleNotFound { module: String, path: String },

    // Descriptor errors
    #[error("Failed to read project descriptor: {path}: {reason}")]
    #[diagnostic(code(pax::descriptor::read_failed))]
    DescriptorReadFailed { path: String, reason: String },

    #[error("Failed to parse project descriptor: {path}: {reason}")]
    #[diagnostic(code(pax::descriptor::parse_failed))]
    DescriptorParseFailed { path: String, reason: String },

    #[error("Element already exists: {element}")]
    #[diagnostic(
        code(pax::descriptor::existing_element),
        help("Pass --overwrite to replace existing elements")
    )]
    ExistingElement { element: String },

    #[error("Section '{section}' not found in {path}")]
    #[diagnostic(code(pax::descriptor::section_not_found))]
    SectionNotFound { section: String, path: String },

    #[error("Bad version in dependencies for {project}: {reason}")]
    #[diagnostic(code(pax::descriptor::invalid_version))]
    InvalidDependencyVersion { project: String, reason: String },

    // Deployment errors
    #[error("Unable to write deployment POM {path}: {reason}")]
    #[diagnostic(code(pax::deploy::write_failed))]
    DeploymentWriteFailed { path: String, reason: String },

    #[error("Unable to install deployment POM {coordinates}: {reason}")]
    #[diagnostic(code(pax::deploy::install_failed))]
    DeploymentInstallFailed { coordinates: String, reason: String },

    // Dispatch errors
    #[error("{kind} {reference}")]
    #[diagnostic(
        code(pax::dispatch::failed),
        help("Check the --runner version and that the runner jar is in a configured repository")
    )]
    Dispatch {
        kind: DispatchFailure,
        reference: String,
        #[source]
        cause: Option<ToolError>,
    },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(pax::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(pax::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pax::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for PaxError {
    fn from(err: std::io::Error) -> Self {
        PaxError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PaxError {
    fn from(err: serde_yaml::Error) -> Self {
        PaxError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PaxError>;
