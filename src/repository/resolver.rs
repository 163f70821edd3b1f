//! Resolution across the local repository and configured remotes

use std::path::{Path, PathBuf};

use tracing::debug;

use super::version::{VersionSpec, is_snapshot};
use super::{ArtifactRef, ArtifactResolver, LocalRepository, ResolutionError, ResolvedArtifact};
use crate::descriptor::Repository;

/// A configured remote repository
///
/// Only remotes reachable on disk (plain paths or `file:` URLs) are searched;
/// the rest are still passed on to the provisioning tool by URL.
#[derive(Debug, Clone)]
pub struct RemoteRepository {
    pub id: String,
    pub url: String,
    pub releases: bool,
    pub snapshots: bool,
    directory: Option<LocalRepository>,
}

impl RemoteRepository {
    pub fn new(repository: &Repository, basedir: &Path) -> Self {
        Self {
            id: repository.id.clone(),
            url: repository.url.clone(),
            releases: repository.releases,
            snapshots: repository.snapshots,
            directory: directory_of(&repository.url, basedir).map(LocalRepository::new),
        }
    }

    fn accepts(&self, version: &str) -> bool {
        if is_snapshot(version) {
            self.snapshots
        } else {
            self.releases
        }
    }
}

fn directory_of(url: &str, basedir: &Path) -> Option<PathBuf> {
    if let Some(path) = url.strip_prefix("file://") {
        return Some(PathBuf::from(path));
    }
    if let Some(path) = url.strip_prefix("file:") {
        return Some(PathBuf::from(path));
    }
    if url.contains("://") {
        return None;
    }
    let path = Path::new(url);
    Some(if path.is_absolute() {
        path.to_path_buf()
    } else {
        basedir.join(path)
    })
}

/// Resolves artifacts from the local repository, then from each remote in order
///
/// Artifacts found in a remote are copied into the local repository.
#[derive(Debug, Clone)]
pub struct RepositoryResolver {
    local: LocalRepository,
    remotes: Vec<RemoteRepository>,
}

impl RepositoryResolver {
    pub fn new(local: LocalRepository, remotes: Vec<RemoteRepository>) -> Self {
        Self { local, remotes }
    }

    pub fn local(&self) -> &LocalRepository {
        &self.local
    }

    /// Comma separated remote URLs, in search order
    pub fn remote_urls(&self) -> String {
        self.remotes
            .iter()
            .map(|r| r.url.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn searchable(&self) -> impl Iterator<Item = (&RemoteRepository, &LocalRepository)> {
        self.remotes.iter().filter_map(|remote| {
            if remote.directory.is_none() {
                debug!("Skipping remote repository {} ({})", remote.id, remote.url);
            }
            remote.directory.as_ref().map(|dir| (remote, dir))
        })
    }

    fn select_version(&self, artifact: &ArtifactRef, spec: &VersionSpec) -> Option<String> {
        match spec {
            VersionSpec::Exact(version) => Some(version.clone()),
            VersionSpec::Ranges(_) => {
                let mut candidates = self.local.versions(artifact);
                for (remote, dir) in self.searchable() {
                    candidates.extend(dir.versions(artifact).into_iter().filter(|v| remote.accepts(v)));
                }
                spec.select(candidates.iter().map(String::as_str))
            }
        }
    }
}

impl ArtifactResolver for RepositoryResolver {
    fn resolve(&self, artifact: &ArtifactRef) -> Result<ResolvedArtifact, ResolutionError> {
        let spec = VersionSpec::parse(&artifact.version)?;
        let not_found = || ResolutionError::NotFound {
            artifact: artifact.to_string(),
        };
        let version = self.select_version(artifact, &spec).ok_or_else(not_found)?;

        if let Some(found) = self.local.find(artifact, &version) {
            debug!("Resolved {} from local repository", artifact);
            return Ok(found);
        }

        for (remote, dir) in self.searchable() {
            if !remote.accepts(&version) {
                continue;
            }
            let Some(found) = dir.find(artifact, &version) else {
                continue;
            };
            debug!("Resolved {} from {}", artifact, remote.id);
            let file = self
                .local
                .install(&found.file, artifact, &found.version)
                .map_err(|e| ResolutionError::Failed {
                    artifact: artifact.to_string(),
                    reason: e.to_string(),
                })?;
            return Ok(ResolvedArtifact { file, ..found });
        }

        Err(not_found())
    }
}
