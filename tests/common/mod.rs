//! Common test utilities for Pax Construct integration tests

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A project directory plus an isolated local repository and settings file
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let workspace = Self { temp, path };
        workspace.write_file("settings.yaml", "repositories: []\n");
        workspace
    }

    pub fn project_dir(&self) -> PathBuf {
        self.path.join("project")
    }

    pub fn local_repository(&self) -> PathBuf {
        self.path.join("m2")
    }

    /// `pax` with settings, local repository and config dir pointing into the workspace
    #[allow(deprecated)]
    pub fn pax(&self) -> Command {
        let mut cmd = Command::cargo_bin("pax").expect("pax binary should be built");
        cmd.current_dir(&self.path)
            .env("PAX_SETTINGS", self.path.join("settings.yaml"))
            .env("PAX_LOCAL_REPOSITORY", self.local_repository())
            .env("XDG_CONFIG_HOME", self.path.join("config"))
            .env_remove("PAX_JAVA_CLASS_VERSION")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Place a jar in the local repository, optionally with bundle headers
    pub fn install_jar(&self, group_id: &str, artifact_id: &str, version: &str, bundle: bool) {
        let dir = self
            .local_repository()
            .join(group_id.replace('.', "/"))
            .join(artifact_id)
            .join(version);
        fs::create_dir_all(&dir).expect("Failed to create repository directory");

        let file = fs::File::create(dir.join(format!("{artifact_id}-{version}.jar")))
            .expect("Failed to create jar");
        let mut jar = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        jar.start_file("META-INF/MANIFEST.MF", options)
            .expect("Failed to add manifest");
        let mut manifest = String::from("Manifest-Version: 1.0\r\n");
        if bundle {
            manifest.push_str(&format!("Bundle-SymbolicName: {group_id}.{artifact_id}\r\n"));
        }
        manifest.push_str("\r\n");
        jar.write_all(manifest.as_bytes())
            .expect("Failed to write manifest");
        jar.finish().expect("Failed to finish jar");
    }
}

/// Minimal descriptor text
pub fn pom(group_id: &str, artifact_id: &str, packaging: &str, body: &str) -> String {
    format!(
        "<project>\n  <modelVersion>4.0.0</modelVersion>\n  <groupId>{group_id}</groupId>\n  \
         <artifactId>{artifact_id}</artifactId>\n  <version>1.0</version>\n  \
         <packaging>{packaging}</packaging>\n{body}</project>\n"
    )
}

/// `<dependency>` element in `provided` scope
pub fn provided(group_id: &str, artifact_id: &str) -> String {
    format!(
        "    <dependency>\n      <groupId>{group_id}</groupId>\n      <artifactId>{artifact_id}</artifactId>\n      \
         <version>1.0</version>\n      <scope>provided</scope>\n    </dependency>\n"
    )
}
