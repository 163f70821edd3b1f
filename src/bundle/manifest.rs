//! Jar manifest reading

use std::collections::HashMap;
use std::fs::File;
use std::io::Read as _;
use std::path::Path;

use thiserror::Error;

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot open archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Main attributes of a jar manifest
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Manifest {
    attributes: HashMap<String, String>,
}

impl Manifest {
    /// Parse the main section of a manifest
    ///
    /// Lines starting with a single space continue the previous value.
    /// Parsing stops at the first blank line, where per-entry sections begin.
    pub fn parse(content: &str) -> Self {
        let mut attributes: HashMap<String, String> = HashMap::new();
        let mut last: Option<String> = None;

        for line in content.lines() {
            if line.is_empty() {
                break;
            }
            if let Some(continuation) = line.strip_prefix(' ') {
                if let Some(key) = &last {
                    if let Some(value) = attributes.get_mut(key) {
                        value.push_str(continuation);
                    }
                }
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim().to_string();
                attributes.insert(key.clone(), value.trim_start().to_string());
                last = Some(key);
            }
        }

        Self { attributes }
    }

    /// Read the manifest of a jar, `None` when the jar has no manifest
    pub fn read_from_jar(path: &Path) -> Result<Option<Self>, ManifestError> {
        let mut archive = zip::ZipArchive::new(File::open(path)?)?;
        let mut entry = match archive.by_name(MANIFEST_PATH) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut content = String::new();
        entry.read_to_string(&mut content)?;
        Ok(Some(Self::parse(&content)))
    }

    /// Attribute lookup; manifest names are case insensitive
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
