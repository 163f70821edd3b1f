//! Project descriptor (pom.xml) model
//!
//! A [`Pom`] wraps the owned XML tree of one descriptor together with the
//! file it was read from. Typed accessors read identity, parent, modules,
//! dependencies and repositories; the editing operations in [`editor`] and
//! [`merge`] mutate the tree in place and [`Pom::write`] persists it.
//!
//! ```rust,ignore
//! let mut pom = descriptor::read_pom(Path::new("."))?;
//! pom.add_module("my-bundle", false)?;
//! pom.write()?;
//! ```

pub mod editor;
pub mod merge;
pub mod model;
pub mod naming;
pub mod path;
pub mod xml;

use std::collections::HashMap;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{self, Result};

pub use model::{Coordinates, Dependency, ParentRef, Repository};
pub use naming::compound_id;
use xml::Element;

/// Conventional descriptor file name
pub const POM_FILE: &str = "pom.xml";

/// Model version written into new descriptors
pub const MODEL_VERSION: &str = "4.0.0";

/// An editable project descriptor
#[derive(Debug, Clone)]
pub struct Pom {
    file: PathBuf,
    root: Element,
}

/// Read the descriptor at `here`, or `here/pom.xml` when `here` is a directory
pub fn read_pom(here: &Path) -> Result<Pom> {
    let file = descriptor_file(here);
    let content = fs::read_to_string(&file)
        .map_err(|e| error::descriptor::read_failed(file.display().to_string(), e.to_string()))?;
    Pom::parse(file, &content)
}

/// Start a new descriptor that will be written to `here` (or `here/pom.xml`)
pub fn create_pom(here: &Path, group_id: &str, artifact_id: &str) -> Pom {
    let mut root = Element::new("project");
    root.attributes = vec![
        ("xmlns".to_string(), "http://maven.apache.org/POM/4.0.0".to_string()),
        (
            "xmlns:xsi".to_string(),
            "http://www.w3.org/2001/XMLSchema-instance".to_string(),
        ),
        (
            "xsi:schemaLocation".to_string(),
            "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/maven-v4_0_0.xsd"
                .to_string(),
        ),
    ];
    root.set_child_text("modelVersion", MODEL_VERSION);
    root.set_child_text("groupId", group_id);
    root.set_child_text("artifactId", artifact_id);

    Pom {
        file: descriptor_file(here),
        root,
    }
}

fn descriptor_file(here: &Path) -> PathBuf {
    if here.is_dir() {
        here.join(POM_FILE)
    } else {
        here.to_path_buf()
    }
}

impl Pom {
    /// Parse descriptor content that belongs to `file`
    pub fn parse(file: PathBuf, content: &str) -> Result<Self> {
        let root = Element::parse_document(content)
            .map_err(|e| error::descriptor::parse_failed(file.display().to_string(), e.to_string()))?;
        if root.name != "project" {
            return Err(error::descriptor::parse_failed(
                file.display().to_string(),
                format!("expected <project> root element, found <{}>", root.name),
            ));
        }
        Ok(Self { file, root })
    }

    /// Copy this descriptor so it is written to a different file
    pub fn derive(&self, file: PathBuf) -> Self {
        Self {
            file,
            root: self.root.clone(),
        }
    }

    /// Unique `group:artifact:version` identifier
    pub fn id(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group_id().unwrap_or_default(),
            self.artifact_id().unwrap_or_default(),
            self.version().unwrap_or_default()
        )
    }

    /// Group id, inherited from the parent reference when not declared
    pub fn group_id(&self) -> Option<String> {
        self.root
            .child_text("groupId")
            .or_else(|| self.root.find("parent/groupId").and_then(Element::text))
    }

    pub fn artifact_id(&self) -> Option<String> {
        self.root.child_text("artifactId")
    }

    /// Version, inherited from the parent reference when not declared
    pub fn version(&self) -> Option<String> {
        self.root
            .child_text("version")
            .or_else(|| self.root.find("parent/version").and_then(Element::text))
    }

    pub fn packaging(&self) -> String {
        self.root
            .child_text("packaging")
            .unwrap_or_else(|| "jar".to_string())
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(
            self.group_id().unwrap_or_default(),
            self.artifact_id().unwrap_or_default(),
            self.version().unwrap_or_default(),
        )
    }

    pub fn parent(&self) -> Option<ParentRef> {
        self.root.child("parent").and_then(ParentRef::from_element)
    }

    /// Module names in declaration order
    pub fn modules(&self) -> Vec<String> {
        self.root
            .child("modules")
            .map(|modules| modules.children_named("module").filter_map(Element::text).collect())
            .unwrap_or_default()
    }

    pub fn dependencies(&self) -> Vec<Dependency> {
        self.section_dependencies("dependencies")
    }

    /// Entries of `<dependencyManagement>`
    pub fn managed_dependencies(&self) -> Vec<Dependency> {
        self.section_dependencies("dependencyManagement/dependencies")
    }

    fn section_dependencies(&self, path: &str) -> Vec<Dependency> {
        self.root
            .find(path)
            .map(|deps| {
                deps.children_named("dependency")
                    .filter_map(Dependency::from_element)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn repositories(&self) -> Vec<Repository> {
        self.root
            .child("repositories")
            .map(|repos| {
                repos
                    .children_named("repository")
                    .filter_map(Repository::from_element)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Declared `<properties>`
    pub fn properties(&self) -> HashMap<String, String> {
        self.root
            .child("properties")
            .map(|props| {
                props
                    .elements()
                    .map(|p| (p.name.clone(), p.text().unwrap_or_default()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Output file name configured with `<build><finalName>`
    pub fn final_name(&self) -> Option<String> {
        self.root.find("build/finalName").and_then(Element::text)
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Directory containing this descriptor
    pub fn basedir(&self) -> PathBuf {
        self.file
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize the descriptor to a string
    pub fn to_xml(&self) -> String {
        self.root.to_document()
    }

    /// Persist the descriptor to its file
    ///
    /// Content goes to a temporary file in the same directory which then
    /// replaces the target, so a failed write never clobbers a valid descriptor.
    pub fn write(&self) -> Result<()> {
        let path_str = self.file.display().to_string();
        let dir = self
            .file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        fs::create_dir_all(&dir)
            .map_err(|e| error::fs::write_failed(dir.display().to_string(), e.to_string()))?;

        let mut temp = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| error::fs::write_failed(&path_str, e.to_string()))?;
        temp.write_all(self.to_xml().as_bytes())
            .map_err(|e| error::fs::write_failed(&path_str, e.to_string()))?;
        temp.persist(&self.file)
            .map_err(|e| error::fs::write_failed(&path_str, e.error.to_string()))?;

        Ok(())
    }
}
