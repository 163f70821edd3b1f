//! User settings (settings.yaml) data structures
//!
//! ```yaml
//! local_repository: /home/dev/.m2/repository
//! repositories:
//!   - id: ops4j
//!     url: http://repository.ops4j.org/maven2
//!     snapshots: false
//! java_command: /usr/lib/jvm/java-8/bin/java
//! java_class_version: "52.0"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::Repository;
use crate::error::{self, Result};
use crate::runner::RuntimeEnvironment;

/// Directory below the user's config dir holding the settings file
pub const CONFIG_DIR_NAME: &str = "pax-construct";

pub const SETTINGS_FILE: &str = "settings.yaml";

/// User settings, every field optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<PathBuf>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<RepositorySetting>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_class_version: Option<String>,
}

/// A remote repository entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositorySetting {
    pub id: String,
    pub url: String,
    #[serde(default = "enabled")]
    pub releases: bool,
    #[serde(default = "enabled")]
    pub snapshots: bool,
}

fn enabled() -> bool {
    true
}

impl From<&RepositorySetting> for Repository {
    fn from(setting: &RepositorySetting) -> Self {
        Repository {
            id: setting.id.clone(),
            url: setting.url.clone(),
            releases: setting.releases,
            snapshots: setting.snapshots,
        }
    }
}

impl Settings {
    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        Ok(settings)
    }

    /// Load settings from a file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(error::config::not_found(path.display().to_string()));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| error::fs::read_failed(path.display().to_string(), e.to_string()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Load the explicitly named settings, or the default file when it exists
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                debug!("Using settings {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/pax-construct/settings.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SETTINGS_FILE))
    }

    /// Local repository, preferring an explicit override
    ///
    /// Falls back to the settings and then to `~/.m2/repository`.
    pub fn local_repository(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.local_repository.clone())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_default()
                    .join(".m2")
                    .join("repository")
            })
    }

    /// Configured remotes followed by `declared` ones, first id wins
    pub fn remote_repositories(&self, declared: &[Repository]) -> Vec<Repository> {
        let mut remotes: Vec<Repository> = Vec::new();
        let candidates = self
            .repositories
            .iter()
            .map(Repository::from)
            .chain(declared.iter().cloned());
        for repository in candidates {
            if remotes.iter().all(|r| r.id != repository.id) {
                remotes.push(repository);
            }
        }
        remotes
    }

    /// Runtime used to launch the runner; an explicit class version wins
    pub fn runtime_environment(&self, class_version: Option<&str>) -> RuntimeEnvironment {
        let defaults = RuntimeEnvironment::default();
        RuntimeEnvironment {
            java_command: self.java_command.clone().unwrap_or(defaults.java_command),
            class_version: class_version
                .map(str::to_string)
                .or_else(|| self.java_class_version.clone())
                .unwrap_or(defaults.class_version),
        }
    }
}
