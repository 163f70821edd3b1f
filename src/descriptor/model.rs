//! Typed records stored in a project descriptor

use std::fmt;

use super::xml::Element;

/// Default group for plugins that omit `<groupId>`
pub const DEFAULT_PLUGIN_GROUP: &str = "org.apache.maven.plugins";

/// Project identity: group, artifact and version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Reference from a descriptor to its parent descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub coordinates: Coordinates,
    pub relative_path: Option<String>,
}

impl ParentRef {
    pub(crate) fn from_element(element: &Element) -> Option<Self> {
        Some(Self {
            coordinates: Coordinates::new(
                element.child_text("groupId")?,
                element.child_text("artifactId")?,
                element.child_text("version").unwrap_or_default(),
            ),
            relative_path: element.child_text("relativePath"),
        })
    }

    pub(crate) fn to_element(&self) -> Element {
        let mut element = Element::new("parent");
        element.push(Element::with_text("groupId", &self.coordinates.group_id));
        element.push(Element::with_text("artifactId", &self.coordinates.artifact_id));
        element.push(Element::with_text("version", &self.coordinates.version));
        if let Some(path) = &self.relative_path {
            element.push(Element::with_text("relativePath", path));
        }
        element
    }
}

/// A `<dependency>` entry
///
/// Two records describe the same dependency when group and artifact match;
/// version and scope do not take part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub optional: bool,
    pub dependency_type: Option<String>,
    pub classifier: Option<String>,
}

impl Dependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn same_identity(&self, other: &Dependency) -> bool {
        self.group_id == other.group_id && self.artifact_id == other.artifact_id
    }

    pub(crate) fn matches_element(&self, element: &Element) -> bool {
        element.child_text("groupId").as_deref() == Some(self.group_id.as_str())
            && element.child_text("artifactId").as_deref() == Some(self.artifact_id.as_str())
    }

    pub(crate) fn from_element(element: &Element) -> Option<Self> {
        Some(Self {
            group_id: element.child_text("groupId")?,
            artifact_id: element.child_text("artifactId")?,
            version: element.child_text("version"),
            scope: element.child_text("scope"),
            optional: element.child_text("optional").as_deref() == Some("true"),
            dependency_type: element.child_text("type"),
            classifier: element.child_text("classifier"),
        })
    }

    pub(crate) fn to_element(&self) -> Element {
        let mut element = Element::new("dependency");
        element.push(Element::with_text("groupId", &self.group_id));
        element.push(Element::with_text("artifactId", &self.artifact_id));
        if let Some(version) = &self.version {
            element.push(Element::with_text("version", version));
        }
        if let Some(kind) = self.dependency_type.as_deref().filter(|t| *t != "jar") {
            element.push(Element::with_text("type", kind));
        }
        if let Some(classifier) = &self.classifier {
            element.push(Element::with_text("classifier", classifier));
        }
        if let Some(scope) = &self.scope {
            element.push(Element::with_text("scope", scope));
        }
        if self.optional {
            element.push(Element::with_text("optional", "true"));
        }
        element
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        Ok(())
    }
}

/// A `<repository>` entry, identified by its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: String,
    pub url: String,
    pub releases: bool,
    pub snapshots: bool,
}

impl Repository {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            releases: true,
            snapshots: true,
        }
    }

    pub(crate) fn from_element(element: &Element) -> Option<Self> {
        let enabled = |policy: &str| {
            element
                .find(&format!("{policy}/enabled"))
                .and_then(Element::text)
                .is_none_or(|flag| flag != "false")
        };
        Some(Self {
            id: element.child_text("id")?,
            url: element.child_text("url")?,
            releases: enabled("releases"),
            snapshots: enabled("snapshots"),
        })
    }

    pub(crate) fn to_element(&self, name: &str) -> Element {
        let mut element = Element::new(name);
        element.push(Element::with_text("id", &self.id));
        element.push(Element::with_text("url", &self.url));
        for (policy, enabled) in [("releases", self.releases), ("snapshots", self.snapshots)] {
            let mut section = Element::new(policy);
            section.push(Element::with_text("enabled", enabled.to_string()));
            element.push(section);
        }
        element
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_identity_ignores_version_and_scope() {
        let a = Dependency::new("org.osgi", "osgi_R4_core").with_version("1.0");
        let b = Dependency::new("org.osgi", "osgi_R4_core").with_scope("provided");
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&Dependency::new("org.osgi", "osgi_R4_compendium")));
    }

    #[test]
    fn test_dependency_element_omits_defaults() {
        let dep = Dependency {
            dependency_type: Some("jar".to_string()),
            ..Dependency::new("junit", "junit").with_version("4.4")
        };
        let element = dep.to_element();
        assert!(element.child("type").is_none());
        assert!(element.child("optional").is_none());
        assert_eq!(Dependency::from_element(&element).unwrap().version.as_deref(), Some("4.4"));
    }

    #[test]
    fn test_repository_policies_round_trip() {
        let repo = Repository {
            releases: false,
            ..Repository::new("ops4j-snapshots", "http://repository.ops4j.org/mvn-snapshots")
        };
        let parsed = Repository::from_element(&repo.to_element("repository")).unwrap();
        assert_eq!(parsed, repo);
    }

    #[test]
    fn test_repository_policies_default_to_enabled() {
        let mut element = Element::new("repository");
        element.push(Element::with_text("id", "central"));
        element.push(Element::with_text("url", "https://repo1.maven.org/maven2"));
        let parsed = Repository::from_element(&element).unwrap();
        assert!(parsed.releases && parsed.snapshots);
    }
}
