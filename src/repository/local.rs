//! Directory repositories in Maven layout

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::layout;
use super::version::{MavenVersion, base_version, split_timestamp};
use super::{ArtifactRef, ResolvedArtifact};

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// A repository rooted at a local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    base: PathBuf,
}

impl LocalRepository {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Where `artifact` is stored at the given concrete version
    pub fn path_of(&self, artifact: &ArtifactRef, version: &str) -> PathBuf {
        layout::artifact_path(
            &self.base,
            &artifact.group_id,
            &artifact.artifact_id,
            version,
            artifact.classifier.as_deref(),
            artifact.extension(),
        )
    }

    /// Locate a concrete or floating version of `artifact`
    ///
    /// A floating `-SNAPSHOT` version falls back to the newest timestamped
    /// file in its snapshot directory.
    pub fn find(&self, artifact: &ArtifactRef, version: &str) -> Option<ResolvedArtifact> {
        let exact = self.path_of(artifact, version);
        let (concrete, file) = if exact.is_file() {
            (version.to_string(), exact)
        } else if version.ends_with(SNAPSHOT_SUFFIX) {
            self.latest_timestamped(artifact, version)?
        } else {
            return None;
        };

        Some(ResolvedArtifact {
            artifact: artifact.clone(),
            meta_version: Some(base_version(&concrete)),
            version: concrete,
            file,
        })
    }

    /// Versions of `artifact` that have a file for its type and classifier
    pub fn versions(&self, artifact: &ArtifactRef) -> Vec<String> {
        let dir = layout::artifact_dir(&self.base, &artifact.group_id, &artifact.artifact_id);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut versions: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|version| self.find(artifact, version).is_some())
            .collect();
        versions.sort_by_key(|v| MavenVersion::parse(v));
        versions
    }

    fn latest_timestamped(&self, artifact: &ArtifactRef, snapshot: &str) -> Option<(String, PathBuf)> {
        let base = snapshot.strip_suffix(SNAPSHOT_SUFFIX)?;
        let dir = layout::version_dir(&self.base, &artifact.group_id, &artifact.artifact_id, snapshot);
        let prefix = format!("{}-{base}-", artifact.artifact_id);
        let suffix = match &artifact.classifier {
            Some(classifier) => format!("-{classifier}.{}", artifact.extension()),
            None => format!(".{}", artifact.extension()),
        };

        fs::read_dir(&dir)
            .ok()?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let stamp = name.strip_prefix(&prefix)?.strip_suffix(&suffix)?;
                let version = format!("{base}-{stamp}");
                split_timestamp(&version)?;
                Some((version, entry.path()))
            })
            .max_by(|(a, _), (b, _)| MavenVersion::parse(a).cmp(&MavenVersion::parse(b)))
    }

    /// Copy `source` into this repository as `artifact` at `version`
    pub fn install(&self, source: &Path, artifact: &ArtifactRef, version: &str) -> io::Result<PathBuf> {
        let target = self.path_of(artifact, version);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }
        if dunce::canonicalize(source).ok() != dunce::canonicalize(&target).ok() {
            fs::copy(source, &target)?;
        }
        Ok(target)
    }
}
