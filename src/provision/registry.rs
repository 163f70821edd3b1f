//! Accumulator of bundles seen during one traversal

use std::collections::HashSet;

use tracing::{debug, warn};

use super::reactor::Project;
use crate::bundle::BundleClassifier;
use crate::repository::{ArtifactKey, ArtifactRef};

/// Scope of dependencies that are provisioned alongside the bundles
pub const PROVIDED_SCOPE: &str = "provided";

/// Candidate bundles, deduplicated by full coordinates in insertion order
#[derive(Debug, Default)]
pub struct BundleRegistry {
    artifacts: Vec<ArtifactRef>,
    keys: HashSet<ArtifactKey>,
}

impl BundleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact, returning false when it was already present
    pub fn insert(&mut self, artifact: ArtifactRef) -> bool {
        if !self.keys.insert(artifact.key()) {
            return false;
        }
        debug!("Registered {}", artifact);
        self.artifacts.push(artifact);
        true
    }

    /// Record a project and its provided dependencies
    ///
    /// The project's own artifact is added when it is a bundle. Every
    /// dependency in `provided` scope that is not optional follows. When the
    /// dependency list cannot be built the project is still recorded and a
    /// warning is logged.
    pub fn add_bundle_dependencies(&mut self, project: &Project, classifier: &BundleClassifier<'_>) {
        let packaged = project.packaged_file();
        if classifier.is_bundle_project(project.packaging(), &project.artifact(), Some(&packaged)) {
            self.insert(project.artifact());
        }

        match project.dependencies() {
            Ok(dependencies) => {
                for dependency in dependencies {
                    if dependency.scope.as_deref() == Some(PROVIDED_SCOPE) && !dependency.optional {
                        self.insert(dependency);
                    }
                }
            }
            Err(e) => warn!("Bad version in dependencies for {}: {}", project.id(), e),
        }
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactRef> {
        self.artifacts.iter()
    }

    /// Consume the registry, yielding artifacts in the order they were first seen
    pub fn drain(self) -> Vec<ArtifactRef> {
        self.artifacts
    }
}
