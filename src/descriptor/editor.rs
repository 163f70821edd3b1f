//! In-place editing operations for project descriptors
//!
//! Every `add_*` operation checks for an element with the same identity
//! first. Missing elements are appended; existing ones are replaced in
//! place when `overwrite` is set and otherwise rejected with
//! [`PaxError::ExistingElement`](crate::error::PaxError::ExistingElement),
//! leaving the descriptor untouched.

use super::model::{Coordinates, DEFAULT_PLUGIN_GROUP, Dependency, ParentRef, Repository};
use super::path::{DEFAULT_RELATIVE_PATH, shift_relative_path};
use super::xml::Element;
use super::Pom;
use crate::error::{self, Result};

impl Pom {
    /// Point this descriptor at a new parent
    pub fn set_parent(
        &mut self,
        parent: &Coordinates,
        relative_path: &str,
        overwrite: bool,
    ) -> Result<()> {
        if self.root.child("parent").is_some() && !overwrite {
            return Err(error::descriptor::existing_element("parent"));
        }

        let element = ParentRef {
            coordinates: parent.clone(),
            relative_path: Some(relative_path.to_string()),
        }
        .to_element();

        match self.root.position(|e| e.name == "parent") {
            Some(index) => self.root.replace(index, element),
            None => {
                // Maven convention keeps <parent> right after <modelVersion>
                let index = self
                    .root
                    .position(|e| e.name == "modelVersion")
                    .map_or(0, |i| i + 1);
                self.root
                    .children
                    .insert(index, super::xml::Node::Element(element));
            }
        }
        Ok(())
    }

    /// Re-point the parent's relative path after moving `offset` levels
    ///
    /// Positive offsets mean the descriptor moved down the hierarchy,
    /// negative ones that it moved up. Descriptors without a parent are left alone.
    pub fn adjust_relative_path(&mut self, offset: i32) {
        let Some(parent) = self.root.child_mut("parent") else {
            return;
        };
        let current = parent
            .child_text("relativePath")
            .unwrap_or_else(|| DEFAULT_RELATIVE_PATH.to_string());
        parent.set_child_text("relativePath", shift_relative_path(&current, offset));
    }

    pub fn add_repository(&mut self, repository: &Repository, overwrite: bool) -> Result<()> {
        self.put_repository("repositories", "repository", repository, overwrite)
    }

    pub fn add_plugin_repository(&mut self, repository: &Repository, overwrite: bool) -> Result<()> {
        self.put_repository("pluginRepositories", "pluginRepository", repository, overwrite)
    }

    fn put_repository(
        &mut self,
        section: &str,
        name: &str,
        repository: &Repository,
        overwrite: bool,
    ) -> Result<()> {
        let id = repository.id.as_str();
        put_entry(
            self.root.child_or_create(section),
            |e| e.name == name && e.child_text("id").as_deref() == Some(id),
            repository.to_element(name),
            overwrite,
            || format!("{name} {id}"),
        )
    }

    pub fn add_module(&mut self, module: &str, overwrite: bool) -> Result<()> {
        put_entry(
            self.root.child_or_create("modules"),
            |e| e.name == "module" && e.text().as_deref() == Some(module),
            Element::with_text("module", module),
            overwrite,
            || format!("module {module}"),
        )
    }

    /// Remove a module, returning whether it was present
    pub fn remove_module(&mut self, module: &str) -> bool {
        let Some(modules) = self.root.child_mut("modules") else {
            return false;
        };
        match modules.position(|e| e.name == "module" && e.text().as_deref() == Some(module)) {
            Some(index) => {
                modules.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_dependency(&mut self, dependency: &Dependency, overwrite: bool) -> Result<()> {
        put_entry(
            self.root.child_or_create("dependencies"),
            |e| e.name == "dependency" && dependency.matches_element(e),
            dependency.to_element(),
            overwrite,
            || format!("dependency {}:{}", dependency.group_id, dependency.artifact_id),
        )
    }

    /// Remove the dependency with the same group and artifact, returning whether it was present
    pub fn remove_dependency(&mut self, dependency: &Dependency) -> bool {
        let Some(deps) = self.root.child_mut("dependencies") else {
            return false;
        };
        match deps.position(|e| e.name == "dependency" && dependency.matches_element(e)) {
            Some(index) => {
                deps.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the whole dependency list
    pub fn set_dependencies(&mut self, dependencies: &[Dependency]) {
        let section = self.root.child_or_create("dependencies");
        section.children.clear();
        for dependency in dependencies {
            section.push(dependency.to_element());
        }
    }

    /// Pin the version of a plugin declared in `build/plugins` or `build/pluginManagement/plugins`
    ///
    /// Returns whether any plugin entry matched.
    pub fn update_plugin_version(&mut self, group_id: &str, artifact_id: &str, version: &str) -> bool {
        let mut updated = false;
        for path in ["build/plugins", "build/pluginManagement/plugins"] {
            let Some(plugins) = self.root.find_mut(path) else {
                continue;
            };
            for plugin in plugins.elements_mut().filter(|e| e.name == "plugin") {
                let group = plugin
                    .child_text("groupId")
                    .unwrap_or_else(|| DEFAULT_PLUGIN_GROUP.to_string());
                if group == group_id && plugin.child_text("artifactId").as_deref() == Some(artifact_id)
                {
                    plugin.set_child_text("version", version);
                    updated = true;
                }
            }
        }
        updated
    }

    pub fn set_version(&mut self, version: &str) {
        self.root.set_child_text("version", version);
    }

    pub fn set_packaging(&mut self, packaging: &str) {
        self.root.set_child_text("packaging", packaging);
    }

    pub fn set_group_id(&mut self, group_id: &str) {
        self.root.set_child_text("groupId", group_id);
    }

    pub fn set_artifact_id(&mut self, artifact_id: &str) {
        self.root.set_child_text("artifactId", artifact_id);
    }

    pub fn set_name(&mut self, name: &str) {
        self.root.set_child_text("name", name);
    }

    pub fn set_property(&mut self, key: &str, value: &str) {
        self.root.child_or_create("properties").set_child_text(key, value);
    }

    /// Drop every top-level section not named in `keep`
    pub fn retain_sections(&mut self, keep: &[&str]) {
        self.root.children.retain(|node| match node {
            super::xml::Node::Element(e) => keep.contains(&e.name.as_str()),
            _ => false,
        });
    }
}

/// Shared existence check for keyed entries of a collection section
fn put_entry(
    section: &mut Element,
    same_identity: impl Fn(&Element) -> bool,
    entry: Element,
    overwrite: bool,
    describe: impl FnOnce() -> String,
) -> Result<()> {
    match section.position(same_identity) {
        None => {
            section.push(entry);
            Ok(())
        }
        Some(_) if !overwrite => Err(error::descriptor::existing_element(describe())),
        Some(index) => {
            section.replace(index, entry);
            Ok(())
        }
    }
}
