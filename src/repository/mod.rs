//! Artifact references and repository resolution
//!
//! Artifacts live in Maven-layout directory trees. The [`LocalRepository`]
//! is the store the pipeline installs into; [`RepositoryResolver`] searches
//! it first and then every configured remote that is reachable on disk.
//! Resolution failures are plain [`ResolutionError`] values so callers can
//! log and skip them instead of aborting.

pub mod layout;
pub mod local;
pub mod resolver;
pub mod version;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::descriptor::Dependency;

pub use local::LocalRepository;
pub use resolver::{RemoteRepository, RepositoryResolver};

/// A request for an artifact, possibly with a version range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub artifact_type: String,
    pub classifier: Option<String>,
    pub scope: Option<String>,
    pub optional: bool,
}

/// Full coordinate identity used to deduplicate artifacts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub artifact_type: String,
    pub classifier: Option<String>,
}

impl ArtifactRef {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            artifact_type: "jar".to_string(),
            classifier: None,
            scope: None,
            optional: false,
        }
    }

    #[must_use]
    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Build a reference from a dependency whose version is already known
    pub fn from_dependency(dependency: &Dependency, version: impl Into<String>) -> Self {
        Self {
            group_id: dependency.group_id.clone(),
            artifact_id: dependency.artifact_id.clone(),
            version: version.into(),
            artifact_type: dependency
                .dependency_type
                .clone()
                .unwrap_or_else(|| "jar".to_string()),
            classifier: dependency.classifier.clone(),
            scope: dependency.scope.clone(),
            optional: dependency.optional,
        }
    }

    pub fn key(&self) -> ArtifactKey {
        ArtifactKey {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            artifact_type: self.artifact_type.clone(),
            classifier: self.classifier.clone(),
        }
    }

    /// File extension for this artifact's type
    pub fn extension(&self) -> &str {
        layout::extension_for(&self.artifact_type)
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.artifact_type)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)
    }
}

/// An artifact located on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub artifact: ArtifactRef,
    /// Concrete version that was found, e.g. a timestamped snapshot
    pub version: String,
    /// Floating version the concrete version belongs to, when known
    pub meta_version: Option<String>,
    pub file: PathBuf,
}

impl ResolvedArtifact {
    /// Version to reference the artifact by, falling back to the declared version
    pub fn meta_version(&self) -> &str {
        self.meta_version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.artifact.version)
    }
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("{artifact} was not found in any repository")]
    NotFound { artifact: String },

    #[error("Failed to resolve {artifact}: {reason}")]
    Failed { artifact: String, reason: String },

    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },
}

/// Locates artifacts on disk
pub trait ArtifactResolver {
    fn resolve(&self, artifact: &ArtifactRef) -> Result<ResolvedArtifact, ResolutionError>;
}
