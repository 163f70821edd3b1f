//! Dispatch to the Pax Runner provisioning tool
//!
//! Two calling conventions exist. Runner versions below [`NG_THRESHOLD`]
//! use the [`classic::ClassicProtocol`] with positional flags and the
//! deployment coordinates; later versions use the [`ng::NgProtocol`] which
//! passes the descriptor file after any user supplied commands. Versions
//! are compared as plain strings.
//!
//! The tool itself is reached through [`loader::RunnerLoader`], which
//! resolves its jar and hands back an [`loader::EntryPoint`] to run.

pub mod classic;
pub mod loader;
pub mod ng;

use std::path::Path;

use tracing::info;

use crate::error::{self, Result};
use crate::provision::deployment::DeploymentDescriptor;
use crate::repository::ArtifactRef;

pub use loader::{EntryPoint, JarRunnerLoader, RunnerLoader};

/// First runner version that speaks the NG protocol
pub const NG_THRESHOLD: &str = "0.5.0";

/// Class implementing the runner's command line
pub const RUNNER_MAIN_CLASS: &str = "org.ops4j.pax.runner.Run";

/// Class version marker below which the NG runner needs its `jdk14` build
pub const JDK14_CLASS_VERSION: &str = "49.0";

pub const JDK14_CLASSIFIER: &str = "jdk14";

/// Default class version marker when none is configured (Java 8)
pub const DEFAULT_CLASS_VERSION: &str = "52.0";

/// The Java runtime the tool will run on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnvironment {
    pub java_command: String,
    /// Value of `java.class.version`, e.g. `52.0`
    pub class_version: String,
}

impl Default for RuntimeEnvironment {
    fn default() -> Self {
        Self {
            java_command: "java".to_string(),
            class_version: DEFAULT_CLASS_VERSION.to_string(),
        }
    }
}

/// Everything a protocol needs to build its argument list
#[derive(Debug, Clone, Copy)]
pub struct DeploymentContext<'a> {
    pub descriptor: &'a DeploymentDescriptor,
    /// Comma separated remote repository URLs
    pub repositories: &'a str,
    pub local_repository: &'a Path,
    pub framework: &'a str,
    /// Raw commands passed through to the NG runner
    pub commands: &'a [String],
    /// Number of artifacts accumulated before resolution
    pub bundle_count: usize,
}

/// One calling convention of the runner
pub trait RunnerProtocol {
    fn name(&self) -> &'static str;

    /// The runner artifact to load for `version`
    fn tool(&self, version: &str, environment: &RuntimeEnvironment) -> ArtifactRef;

    /// Work done before the runner is invoked
    fn prepare(&self, _context: &DeploymentContext<'_>) -> Result<()> {
        Ok(())
    }

    fn assemble_arguments(&self, context: &DeploymentContext<'_>) -> Vec<String>;
}

/// Pick the protocol for a runner version
pub fn select_protocol(version: &str) -> Box<dyn RunnerProtocol> {
    if version < NG_THRESHOLD {
        Box::new(classic::ClassicProtocol)
    } else {
        Box::new(ng::NgProtocol)
    }
}

/// Loads the runner and invokes it with protocol specific arguments
pub struct Dispatcher<'a> {
    loader: &'a dyn RunnerLoader,
    environment: RuntimeEnvironment,
}

impl<'a> Dispatcher<'a> {
    pub fn new(loader: &'a dyn RunnerLoader, environment: RuntimeEnvironment) -> Self {
        Self {
            loader,
            environment,
        }
    }

    /// Run the deployment, returning the arguments the runner received
    pub fn dispatch(&self, runner_version: &str, context: &DeploymentContext<'_>) -> Result<Vec<String>> {
        let protocol = select_protocol(runner_version);
        let tool = protocol.tool(runner_version, &self.environment);
        info!("Using {} runner protocol with {}", protocol.name(), tool);

        let entry_point = self.loader.load(&tool, RUNNER_MAIN_CLASS)?;
        protocol.prepare(context)?;
        let arguments = protocol.assemble_arguments(context);

        entry_point
            .run(&arguments)
            .map_err(|cause| error::dispatch::invocation(tool.to_string(), cause))?;
        Ok(arguments)
    }
}
