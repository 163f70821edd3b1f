//! Resolution of accumulated bundles

use tracing::warn;

use crate::descriptor::Dependency;
use crate::progress::ResolutionProgress;
use crate::repository::{ArtifactRef, ArtifactResolver};

/// Result of resolving every accumulated artifact
#[derive(Debug, Default)]
pub struct ResolutionOutcome {
    /// Dependencies to list in the deployment descriptor, in registry order
    pub resolved: Vec<Dependency>,
    /// Artifacts that could not be resolved
    pub skipped: Vec<ArtifactRef>,
}

/// Resolve each artifact, skipping the ones that fail
///
/// Resolved artifacts are referenced by their meta-version so floating
/// snapshots stay floating in the deployment descriptor.
pub fn resolve_bundles(
    artifacts: &[ArtifactRef],
    resolver: &dyn ArtifactResolver,
    progress: &ResolutionProgress,
) -> ResolutionOutcome {
    let mut outcome = ResolutionOutcome::default();

    for artifact in artifacts {
        progress.update(&artifact.to_string());
        match resolver.resolve(artifact) {
            Ok(resolved) => outcome.resolved.push(
                Dependency::new(&artifact.group_id, &artifact.artifact_id)
                    .with_version(resolved.meta_version()),
            ),
            Err(e) => {
                warn!("Skipping missing bundle {}: {}", artifact, e);
                outcome.skipped.push(artifact.clone());
            }
        }
        progress.inc();
    }

    progress.finish();
    outcome
}
