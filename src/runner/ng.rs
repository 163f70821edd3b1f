//! Calling convention of runners from 0.5.0 on

use std::path::Path;

use super::{
    DeploymentContext, JDK14_CLASS_VERSION, JDK14_CLASSIFIER, RunnerProtocol, RuntimeEnvironment,
};
use crate::repository::ArtifactRef;

pub const RUNNER_GROUP: &str = "org.ops4j.pax.runner";
pub const RUNNER_ARTIFACT: &str = "pax-runner";

/// Passes the user's commands, followed by the deployment descriptor when there is anything to deploy
pub struct NgProtocol;

impl RunnerProtocol for NgProtocol {
    fn name(&self) -> &'static str {
        "ng"
    }

    fn tool(&self, version: &str, environment: &RuntimeEnvironment) -> ArtifactRef {
        let tool = ArtifactRef::new(RUNNER_GROUP, RUNNER_ARTIFACT, version);
        if environment.class_version.as_str() < JDK14_CLASS_VERSION {
            tool.with_classifier(JDK14_CLASSIFIER)
        } else {
            tool
        }
    }

    fn assemble_arguments(&self, context: &DeploymentContext<'_>) -> Vec<String> {
        let mut arguments = context.commands.to_vec();
        if context.bundle_count == 0 {
            return arguments;
        }

        arguments.extend([
            format!("--repositories={}", context.repositories),
            format!("--localRepository={}", context.local_repository.display()),
            format!("--platform={}", context.framework),
            absolute(context.descriptor.file()),
            "--overwriteUserBundles".to_string(),
        ]);
        arguments
    }
}

fn absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
