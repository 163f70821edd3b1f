//! Bundle classification
//!
//! Projects and artifacts count as bundles when their packaging or type
//! mentions `bundle`. With metadata inspection enabled, any jar whose
//! manifest declares `Bundle-SymbolicName` or `Bundle-Name` counts too.

pub mod manifest;

use std::path::Path;

use tracing::debug;

use crate::repository::{ArtifactRef, ArtifactResolver};
use manifest::Manifest;

/// Marker looked for in packaging and artifact types
pub const BUNDLE_MARKER: &str = "bundle";

const BUNDLE_HEADERS: [&str; 2] = ["Bundle-SymbolicName", "Bundle-Name"];

/// Decides whether projects and artifacts are bundles
pub struct BundleClassifier<'a> {
    resolver: &'a dyn ArtifactResolver,
    test_metadata: bool,
}

impl<'a> BundleClassifier<'a> {
    pub fn new(resolver: &'a dyn ArtifactResolver, test_metadata: bool) -> Self {
        Self {
            resolver,
            test_metadata,
        }
    }

    /// A project is a bundle when its packaging says so or its own artifact is one
    pub fn is_bundle_project(
        &self,
        packaging: &str,
        artifact: &ArtifactRef,
        packaged_file: Option<&Path>,
    ) -> bool {
        packaging.contains(BUNDLE_MARKER) || self.is_bundle_artifact(artifact, packaged_file)
    }

    /// Classify an artifact by type and, when enabled, by its manifest
    ///
    /// `known_file` is used when it exists; otherwise the artifact is resolved
    /// first. Every failure on the inspection path classifies as not a bundle.
    pub fn is_bundle_artifact(&self, artifact: &ArtifactRef, known_file: Option<&Path>) -> bool {
        if artifact.artifact_type.contains(BUNDLE_MARKER) {
            return true;
        }
        if !self.test_metadata {
            return false;
        }

        match known_file.filter(|file| file.exists()) {
            Some(file) => has_bundle_headers(file),
            None => match self.resolver.resolve(artifact) {
                Ok(resolved) => has_bundle_headers(&resolved.file),
                Err(e) => {
                    debug!("Cannot inspect {}: {}", artifact, e);
                    false
                }
            },
        }
    }
}

/// Whether the jar at `path` declares bundle headers in its manifest
///
/// Missing files, corrupt archives and absent manifests all yield `false`.
pub fn has_bundle_headers(path: &Path) -> bool {
    match Manifest::read_from_jar(path) {
        Ok(Some(manifest)) => BUNDLE_HEADERS.iter().any(|h| manifest.get(h).is_some()),
        Ok(None) => false,
        Err(e) => {
            debug!("Cannot read manifest of {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::repository::{ResolutionError, ResolvedArtifact};
    use std::cell::Cell;
    use std::fs::File;
    use std::io::Write as _;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct FixedResolver {
        file: Option<PathBuf>,
        calls: Cell<usize>,
    }

    impl ArtifactResolver for FixedResolver {
        fn resolve(&self, artifact: &ArtifactRef) -> Result<ResolvedArtifact, ResolutionError> {
            self.calls.set(self.calls.get() + 1);
            match &self.file {
                Some(file) => Ok(ResolvedArtifact {
                    artifact: artifact.clone(),
                    version: artifact.version.clone(),
                    meta_version: None,
                    file: file.clone(),
                }),
                None => Err(ResolutionError::NotFound {
                    artifact: artifact.to_string(),
                }),
            }
        }
    }

    fn resolver(file: Option<PathBuf>) -> FixedResolver {
        FixedResolver {
            file,
            calls: Cell::new(0),
        }
    }

    fn jar(dir: &Path, name: &str, manifest: Option<&str>) -> PathBuf {
        let path = dir.join(name);
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        if let Some(manifest) = manifest {
            writer.start_file(manifest::MANIFEST_PATH, options).unwrap();
            writer.write_all(manifest.as_bytes()).unwrap();
        }
        writer.start_file("org/example/Main.class", options).unwrap();
        writer.write_all(b"\xca\xfe\xba\xbe").unwrap();
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_bundle_type_needs_no_inspection() {
        let resolver = resolver(None);
        let classifier = BundleClassifier::new(&resolver, true);
        let artifact = ArtifactRef::new("g", "a", "1.0").with_type("bundle");
        assert!(classifier.is_bundle_artifact(&artifact, None));
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn test_cheap_path_without_metadata() {
        let temp = TempDir::new().unwrap();
        let file = jar(temp.path(), "a.jar", Some("Bundle-SymbolicName: a\n"));
        let resolver = resolver(Some(file));
        let classifier = BundleClassifier::new(&resolver, false);
        assert!(!classifier.is_bundle_artifact(&ArtifactRef::new("g", "a", "1.0"), None));
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn test_manifest_headers_are_detected() {
        let temp = TempDir::new().unwrap();
        let symbolic = jar(temp.path(), "a.jar", Some("Manifest-Version: 1.0\nBundle-SymbolicName: a\n"));
        let named = jar(temp.path(), "b.jar", Some("Manifest-Version: 1.0\nBundle-Name: B\n"));
        let plain = jar(temp.path(), "c.jar", Some("Manifest-Version: 1.0\n"));
        assert!(has_bundle_headers(&symbolic));
        assert!(has_bundle_headers(&named));
        assert!(!has_bundle_headers(&plain));
    }

    #[test]
    fn test_inspection_failures_are_not_bundles() {
        let temp = TempDir::new().unwrap();
        let corrupt = temp.path().join("corrupt.jar");
        std::fs::write(&corrupt, "not a zip").unwrap();
        let no_manifest = jar(temp.path(), "bare.jar", None);

        assert!(!has_bundle_headers(&corrupt));
        assert!(!has_bundle_headers(&no_manifest));
        assert!(!has_bundle_headers(&temp.path().join("missing.jar")));
    }

    #[test]
    fn test_unresolvable_artifact_is_not_a_bundle() {
        let resolver = resolver(None);
        let classifier = BundleClassifier::new(&resolver, true);
        assert!(!classifier.is_bundle_artifact(&ArtifactRef::new("g", "a", "1.0"), None));
        assert_eq!(resolver.calls.get(), 1);
    }

    #[test]
    fn test_known_file_skips_resolution() {
        let temp = TempDir::new().unwrap();
        let file = jar(temp.path(), "a.jar", Some("Bundle-SymbolicName: a\n"));
        let resolver = resolver(None);
        let classifier = BundleClassifier::new(&resolver, true);
        assert!(classifier.is_bundle_artifact(&ArtifactRef::new("g", "a", "1.0"), Some(&file)));
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn test_bundle_packaging() {
        let resolver = resolver(None);
        let classifier = BundleClassifier::new(&resolver, false);
        let artifact = ArtifactRef::new("g", "a", "1.0").with_type("bundle");
        assert!(classifier.is_bundle_project("bundle", &artifact, None));
        let jar_artifact = ArtifactRef::new("g", "a", "1.0");
        assert!(!classifier.is_bundle_project("jar", &jar_artifact, None));
    }
}
