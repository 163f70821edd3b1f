//! Calling convention of runners before 0.5.0

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use super::{DeploymentContext, RunnerProtocol, RuntimeEnvironment};
use crate::error::{self, Result};
use crate::repository::ArtifactRef;

pub const RUNNER_GROUP: &str = "org.ops4j.pax";
pub const RUNNER_ARTIFACT: &str = "runner";

/// Positional invocation naming the deployment coordinates
pub struct ClassicProtocol;

impl ClassicProtocol {
    fn work_dir(context: &DeploymentContext<'_>) -> PathBuf {
        context.descriptor.basedir().join("work")
    }

    /// Copy of the descriptor the runner keeps between runs
    fn cached_descriptor(context: &DeploymentContext<'_>) -> PathBuf {
        let coordinates = context.descriptor.coordinates();
        Self::work_dir(context)
            .join("lib")
            .join(format!("{}_{}.pom", coordinates.artifact_id, coordinates.version))
    }
}

impl RunnerProtocol for ClassicProtocol {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn tool(&self, version: &str, _environment: &RuntimeEnvironment) -> ArtifactRef {
        ArtifactRef::new(RUNNER_GROUP, RUNNER_ARTIFACT, version)
    }

    /// Remove the cached descriptor so the runner reloads it
    fn prepare(&self, context: &DeploymentContext<'_>) -> Result<()> {
        let cached = Self::cached_descriptor(context);
        match fs::remove_file(&cached) {
            Ok(()) => {
                debug!("Removed cached descriptor {}", cached.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(error::fs::write_failed(cached.display().to_string(), e.to_string())),
        }
    }

    fn assemble_arguments(&self, context: &DeploymentContext<'_>) -> Vec<String> {
        let coordinates = context.descriptor.coordinates();
        vec![
            format!("--dir={}", Self::work_dir(context).display()),
            "--no-md5".to_string(),
            format!("--platform={}", context.framework),
            "--profile=default".to_string(),
            format!("--repository={}", context.repositories),
            format!("--localRepository={}", context.local_repository.display()),
            coordinates.group_id.clone(),
            coordinates.artifact_id.clone(),
            coordinates.version.clone(),
        ]
    }
}
