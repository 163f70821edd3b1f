//! Projects and the multi-module traversal order

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::descriptor::path::DEFAULT_RELATIVE_PATH;
use crate::descriptor::{self, Coordinates, Dependency, POM_FILE, Pom};
use crate::error::{self, Result};
use crate::repository::ArtifactRef;
use crate::repository::version::VersionSpec;

/// How far up a chain of parent descriptors inheritance is followed
const MAX_LINEAGE: usize = 32;

/// How often nested `${...}` references are expanded
const MAX_INTERPOLATION: usize = 10;

/// A descriptor with its effective identity and inherited settings
#[derive(Debug, Clone)]
pub struct Project {
    pom: Pom,
    coordinates: Coordinates,
    packaging: String,
    properties: HashMap<String, String>,
    managed: Vec<Dependency>,
}

impl Project {
    /// Build a project, inheriting from parent descriptors found on disk
    ///
    /// The parent is looked up through its relative path and only used when
    /// its group and artifact match the reference.
    pub fn from_pom(pom: Pom) -> Self {
        let mut lineage = Vec::new();
        let mut current = pom.clone();
        while lineage.len() < MAX_LINEAGE {
            let Some(parent) = load_parent(&current) else {
                break;
            };
            lineage.push(parent.clone());
            current = parent;
        }
        Self::with_lineage(pom, &lineage)
    }

    /// Read a project from a file or directory
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_pom(descriptor::read_pom(path)?))
    }

    fn with_lineage(pom: Pom, lineage: &[Pom]) -> Self {
        // nearest declaration wins
        let mut properties = HashMap::new();
        for ancestor in lineage.iter().rev() {
            properties.extend(ancestor.properties());
        }
        properties.extend(pom.properties());

        let mut managed = pom.managed_dependencies();
        for ancestor in lineage {
            managed.extend(ancestor.managed_dependencies());
        }

        let raw = pom.coordinates();
        for (key, value) in [
            ("groupId", &raw.group_id),
            ("artifactId", &raw.artifact_id),
            ("version", &raw.version),
        ] {
            properties.insert(format!("project.{key}"), value.clone());
            properties.insert(format!("pom.{key}"), value.clone());
        }
        if let Some(parent) = pom.parent() {
            properties.insert("project.parent.groupId".to_string(), parent.coordinates.group_id);
            properties.insert("project.parent.version".to_string(), parent.coordinates.version);
        }
        properties.insert("basedir".to_string(), pom.basedir().display().to_string());

        let coordinates = Coordinates::new(
            interpolate(&raw.group_id, &properties),
            interpolate(&raw.artifact_id, &properties),
            interpolate(&raw.version, &properties),
        );
        let packaging = interpolate(&pom.packaging(), &properties);

        Self {
            pom,
            coordinates,
            packaging,
            properties,
            managed,
        }
    }

    /// `group:artifact:version`
    pub fn id(&self) -> String {
        self.coordinates.to_string()
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn pom(&self) -> &Pom {
        &self.pom
    }

    pub fn basedir(&self) -> PathBuf {
        self.pom.basedir()
    }

    /// The artifact this project produces; its type is the packaging
    pub fn artifact(&self) -> ArtifactRef {
        ArtifactRef::new(
            &self.coordinates.group_id,
            &self.coordinates.artifact_id,
            &self.coordinates.version,
        )
        .with_type(&self.packaging)
    }

    /// Where the build leaves the packaged artifact
    pub fn packaged_file(&self) -> PathBuf {
        let name = self.pom.final_name().map_or_else(
            || format!("{}-{}", self.coordinates.artifact_id, self.coordinates.version),
            |name| interpolate(&name, &self.properties),
        );
        let artifact = self.artifact();
        self.basedir()
            .join("target")
            .join(format!("{name}.{}", artifact.extension()))
    }

    /// Declared dependencies with versions and scopes filled in
    ///
    /// Versions come from the dependency itself or from the nearest managed
    /// entry. A dependency without a usable version fails the whole list.
    pub fn dependencies(&self) -> Result<Vec<ArtifactRef>> {
        self.pom
            .dependencies()
            .iter()
            .map(|declared| self.effective_dependency(declared))
            .collect()
    }

    fn effective_dependency(&self, declared: &Dependency) -> Result<ArtifactRef> {
        let group_id = interpolate(&declared.group_id, &self.properties);
        let artifact_id = interpolate(&declared.artifact_id, &self.properties);
        let managed = self.managed.iter().find(|m| {
            interpolate(&m.group_id, &self.properties) == group_id
                && interpolate(&m.artifact_id, &self.properties) == artifact_id
        });

        let version = declared
            .version
            .as_ref()
            .or_else(|| managed.and_then(|m| m.version.as_ref()))
            .map(|v| interpolate(v, &self.properties))
            .ok_or_else(|| {
                error::descriptor::invalid_version(
                    self.id(),
                    format!("{group_id}:{artifact_id} has no version"),
                )
            })?;
        if version.contains("${") {
            return Err(error::descriptor::invalid_version(
                self.id(),
                format!("{group_id}:{artifact_id} has unresolved version {version}"),
            ));
        }
        VersionSpec::parse(&version)
            .map_err(|e| error::descriptor::invalid_version(self.id(), e.to_string()))?;

        let mut effective = declared.clone();
        effective.group_id = group_id;
        effective.artifact_id = artifact_id;
        effective.scope = declared
            .scope
            .clone()
            .or_else(|| managed.and_then(|m| m.scope.clone()))
            .map(|s| interpolate(&s, &self.properties))
            .or_else(|| Some("compile".to_string()));
        effective.dependency_type = declared
            .dependency_type
            .as_ref()
            .map(|t| interpolate(t, &self.properties));
        effective.classifier = declared
            .classifier
            .as_ref()
            .map(|c| interpolate(c, &self.properties));

        Ok(ArtifactRef::from_dependency(&effective, version))
    }
}

fn load_parent(pom: &Pom) -> Option<Pom> {
    let parent = pom.parent()?;
    let relative = parent
        .relative_path
        .clone()
        .unwrap_or_else(|| DEFAULT_RELATIVE_PATH.to_string());
    let candidate = pom.basedir().join(relative);
    if !candidate.exists() {
        return None;
    }

    let loaded = descriptor::read_pom(&candidate).ok()?;
    let matches = loaded.group_id().as_deref() == Some(parent.coordinates.group_id.as_str())
        && loaded.artifact_id().as_deref() == Some(parent.coordinates.artifact_id.as_str());
    if !matches {
        debug!(
            "{} does not match parent {} of {}",
            loaded.file().display(),
            parent.coordinates,
            pom.file().display()
        );
        return None;
    }
    Some(loaded)
}

/// Expand `${key}` references; unknown keys are left as written
pub fn interpolate(value: &str, properties: &HashMap<String, String>) -> String {
    let mut current = value.to_string();
    for _ in 0..MAX_INTERPOLATION {
        if !current.contains("${") {
            break;
        }
        let mut expanded = String::with_capacity(current.len());
        let mut rest = current.as_str();
        while let Some(start) = rest.find("${") {
            expanded.push_str(&rest[..start]);
            let Some(len) = rest[start..].find('}') else {
                expanded.push_str(&rest[start..]);
                rest = "";
                break;
            };
            let key = &rest[start + 2..start + len];
            match properties.get(key) {
                Some(replacement) => expanded.push_str(replacement),
                None => expanded.push_str(&rest[start..=start + len]),
            }
            rest = &rest[start + len + 1..];
        }
        expanded.push_str(rest);
        if expanded == current {
            break;
        }
        current = expanded;
    }
    current
}

/// The ordered set of projects of one multi-module build
///
/// The root comes first, followed by its modules depth first in the order
/// they are declared.
#[derive(Debug, Clone)]
pub struct Reactor {
    projects: Vec<Project>,
}

impl Reactor {
    pub fn load(root: &Path) -> Result<Self> {
        let mut projects = Vec::new();
        let mut seen = HashSet::new();
        collect(descriptor::read_pom(root)?, &mut projects, &mut seen)?;
        Ok(Self { projects })
    }

    pub fn root(&self) -> &Project {
        &self.projects[0]
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

fn collect(pom: Pom, projects: &mut Vec<Project>, seen: &mut HashSet<PathBuf>) -> Result<()> {
    let key = dunce::canonicalize(pom.file()).unwrap_or_else(|_| pom.file().to_path_buf());
    if !seen.insert(key) {
        debug!("{} already part of the build", pom.file().display());
        return Ok(());
    }

    let basedir = pom.basedir();
    let modules = pom.modules();
    projects.push(Project::from_pom(pom));

    for module in modules {
        let location = basedir.join(&module);
        let file = if location.is_dir() {
            location.join(POM_FILE)
        } else {
            location
        };
        if !file.is_file() {
            return Err(error::config::module_not_found(module, file.display().to_string()));
        }
        collect(descriptor::read_pom(&file)?, projects, seen)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PaxError;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, body: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join(POM_FILE),
            format!("<project><modelVersion>4.0.0</modelVersion>{body}</project>"),
        )
        .unwrap();
    }

    const PARENT: &str = "<parent><groupId>org.example</groupId><artifactId>root</artifactId><version>1.0</version></parent>";

    fn multi_module(temp: &TempDir) {
        write(
            temp.path(),
            "<groupId>org.example</groupId><artifactId>root</artifactId><version>1.0</version>\
             <packaging>pom</packaging>\
             <properties><osgi.version>4.0</osgi.version></properties>\
             <dependencyManagement><dependencies>\
               <dependency><groupId>org.osgi</groupId><artifactId>osgi_R4_core</artifactId><version>${osgi.version}</version><scope>provided</scope></dependency>\
             </dependencies></dependencyManagement>\
             <modules><module>b</module><module>c</module></modules>",
        );
        write(
            &temp.path().join("b"),
            &format!(
                "{PARENT}<artifactId>b</artifactId><packaging>bundle</packaging>\
                 <modules><module>nested</module></modules>\
                 <dependencies><dependency><groupId>org.osgi</groupId><artifactId>osgi_R4_core</artifactId></dependency></dependencies>"
            ),
        );
        write(
            &temp.path().join("b/nested"),
            "<parent><groupId>org.example</groupId><artifactId>b</artifactId><version>1.0</version></parent><artifactId>nested</artifactId>",
        );
        write(&temp.path().join("c"), &format!("{PARENT}<artifactId>c</artifactId>"));
    }

    #[test]
    fn test_traversal_order_is_depth_first() {
        let temp = TempDir::new().unwrap();
        multi_module(&temp);
        let reactor = Reactor::load(temp.path()).unwrap();
        let ids: Vec<_> = reactor
            .projects()
            .iter()
            .map(|p| p.coordinates().artifact_id.clone())
            .collect();
        assert_eq!(ids, vec!["root", "b", "nested", "c"]);
        assert_eq!(reactor.root().id(), "org.example:root:1.0");
    }

    #[test]
    fn test_missing_module_is_a_configuration_error() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "<groupId>g</groupId><artifactId>root</artifactId><version>1</version><modules><module>gone</module></modules>",
        );
        assert!(matches!(
            Reactor::load(temp.path()).unwrap_err(),
            PaxError::ModuleNotFound { .. }
        ));
    }

    #[test]
    fn test_managed_versions_and_scopes_are_inherited() {
        let temp = TempDir::new().unwrap();
        multi_module(&temp);
        let project = Project::load(&temp.path().join("b")).unwrap();
        assert_eq!(project.id(), "org.example:b:1.0");

        let deps = project.dependencies().unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].version, "4.0");
        assert_eq!(deps[0].scope.as_deref(), Some("provided"));
    }

    #[test]
    fn test_missing_version_fails_closure() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "<groupId>g</groupId><artifactId>a</artifactId><version>1</version>\
             <dependencies><dependency><groupId>x</groupId><artifactId>y</artifactId></dependency></dependencies>",
        );
        let project = Project::load(temp.path()).unwrap();
        assert!(matches!(
            project.dependencies().unwrap_err(),
            PaxError::InvalidDependencyVersion { .. }
        ));
    }

    #[test]
    fn test_bad_range_fails_closure() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "<groupId>g</groupId><artifactId>a</artifactId><version>1</version>\
             <dependencies><dependency><groupId>x</groupId><artifactId>y</artifactId><version>[2.0,1.0]</version></dependency></dependencies>",
        );
        let project = Project::load(temp.path()).unwrap();
        assert!(project.dependencies().is_err());
    }

    #[test]
    fn test_interpolation() {
        let props: HashMap<String, String> = [
            ("a".to_string(), "${b}-x".to_string()),
            ("b".to_string(), "1.0".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(interpolate("v${a}", &props), "v1.0-x");
        assert_eq!(interpolate("${missing}", &props), "${missing}");
        assert_eq!(interpolate("${unterminated", &props), "${unterminated");
    }

    #[test]
    fn test_packaged_file_uses_final_name() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "<groupId>g</groupId><artifactId>a</artifactId><version>1</version>\
             <build><finalName>${project.artifactId}-custom</finalName></build>",
        );
        let project = Project::load(temp.path()).unwrap();
        assert_eq!(project.packaged_file(), temp.path().join("target/a-custom.jar"));
    }
}
