//! Structural merging of descriptor sections
//!
//! [`Pom::merge_section`] copies a subtree from a donor descriptor into
//! this one. Collection entries are matched by identity (plugin and
//! dependency coordinates, repository and execution ids, module names),
//! structural elements merge recursively and leaf values are compared as
//! text. A conflicting entry fails the whole merge unless `overwrite` is
//! set; the descriptor is only updated once every child merged cleanly.

use super::model::DEFAULT_PLUGIN_GROUP;
use super::xml::{Element, Node};
use super::Pom;
use crate::error::{self, Result};

impl Pom {
    /// Merge `section_path` of `donor` below `dest_path` of this descriptor
    ///
    /// The part of `section_path` that extends `dest_path` is kept, so
    /// merging `build/pluginManagement/plugins` into `build` lands in
    /// `build/pluginManagement/plugins`. When the paths do not nest, only
    /// the last segment of `section_path` is created below `dest_path`.
    pub fn merge_section(
        &mut self,
        donor: &Pom,
        section_path: &str,
        dest_path: &str,
        overwrite: bool,
    ) -> Result<()> {
        let section = donor.root.find(section_path).ok_or_else(|| {
            error::descriptor::section_not_found(section_path, donor.file.display().to_string())
        })?;

        let relative = relative_section(section_path, dest_path);
        let mut merged = self.root.clone();
        let target = merged.find_or_create(dest_path).find_or_create(&relative);
        merge_children(target, section, overwrite)?;

        self.root = merged;
        Ok(())
    }
}

fn relative_section(section_path: &str, dest_path: &str) -> String {
    let section = section_path.trim_matches('/');
    let dest = dest_path.trim_matches('/');

    if dest.is_empty() {
        return section.to_string();
    }
    match section.strip_prefix(dest) {
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/').to_string(),
        _ => section.rsplit('/').next().unwrap_or(section).to_string(),
    }
}

/// Identity used to pair up entries of a collection
fn identity(element: &Element) -> Option<String> {
    match element.name.as_str() {
        "plugin" | "dependency" | "extension" => {
            let group = element.child_text("groupId").unwrap_or_else(|| {
                if element.name == "plugin" {
                    DEFAULT_PLUGIN_GROUP.to_string()
                } else {
                    String::new()
                }
            });
            Some(format!(
                "{} {group}:{}",
                element.name,
                element.child_text("artifactId").unwrap_or_default()
            ))
        }
        "repository" | "pluginRepository" | "execution" => Some(format!(
            "{} {}",
            element.name,
            element.child_text("id").unwrap_or_default()
        )),
        "module" => Some(format!("module {}", element.text().unwrap_or_default())),
        _ => None,
    }
}

fn merge_children(target: &mut Element, donor: &Element, overwrite: bool) -> Result<()> {
    // entries appended by this merge are never merge candidates
    let original = target.children.len();

    for incoming in donor.elements() {
        let key = identity(incoming);
        let existing = match &key {
            Some(key) => {
                position_before(target, original, |e| identity(e).as_ref() == Some(key))
            }
            // repeated unkeyed siblings such as <resource> form a list
            None if donor.elements().filter(|e| e.name == incoming.name).count() > 1 => None,
            None => position_before(target, original, |e| e.name == incoming.name),
        };

        let Some(index) = existing else {
            target.push(incoming.clone());
            continue;
        };

        if let Some(key) = key {
            if !overwrite {
                return Err(error::descriptor::existing_element(key));
            }
            target.replace(index, incoming.clone());
            continue;
        }

        let Node::Element(current) = &mut target.children[index] else {
            continue;
        };
        if incoming.has_elements() || current.has_elements() {
            merge_children(current, incoming, overwrite)?;
        } else if current.text() != incoming.text() {
            if !overwrite {
                return Err(error::descriptor::existing_element(incoming.name.clone()));
            }
            *current = incoming.clone();
        }
    }
    Ok(())
}

fn position_before(
    target: &Element,
    end: usize,
    predicate: impl Fn(&Element) -> bool,
) -> Option<usize> {
    target.children[..end]
        .iter()
        .position(|node| matches!(node, Node::Element(e) if predicate(e)))
}
