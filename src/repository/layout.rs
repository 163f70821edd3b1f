//! Maven repository directory layout
//!
//! `<base>/<group as path>/<artifact>/<base version>/<artifact>-<version>[-<classifier>].<ext>`

use std::path::{Path, PathBuf};

use super::version::base_version;

/// File extension used for an artifact type
pub fn extension_for(artifact_type: &str) -> &str {
    match artifact_type {
        "bundle" | "jar" | "test-jar" | "maven-plugin" | "ejb" => "jar",
        "pom" => "pom",
        other => other,
    }
}

/// Directory holding every version of an artifact
pub fn artifact_dir(base: &Path, group_id: &str, artifact_id: &str) -> PathBuf {
    let mut dir = base.to_path_buf();
    dir.extend(group_id.split('.').filter(|s| !s.is_empty()));
    dir.push(artifact_id);
    dir
}

/// Directory holding one version; timestamped snapshots share their snapshot directory
pub fn version_dir(base: &Path, group_id: &str, artifact_id: &str, version: &str) -> PathBuf {
    artifact_dir(base, group_id, artifact_id).join(base_version(version))
}

pub fn file_name(artifact_id: &str, version: &str, classifier: Option<&str>, extension: &str) -> String {
    match classifier {
        Some(classifier) => format!("{artifact_id}-{version}-{classifier}.{extension}"),
        None => format!("{artifact_id}-{version}.{extension}"),
    }
}

/// Full path of an artifact file
pub fn artifact_path(
    base: &Path,
    group_id: &str,
    artifact_id: &str,
    version: &str,
    classifier: Option<&str>,
    extension: &str,
) -> PathBuf {
    version_dir(base, group_id, artifact_id, version)
        .join(file_name(artifact_id, version, classifier, extension))
}
