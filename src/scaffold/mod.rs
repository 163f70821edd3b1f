//! Bundle project scaffolding
//!
//! `create-bundle` writes a new module descriptor with `bundle` packaging.
//! Inside an existing project the new module is wired to the nearest
//! containing descriptor; outside one it is made standalone by merging
//! build settings from the settings descriptors.
//!
//! `remove-bundle` unlinks a module again: it leaves the containing
//! project's module list and every sibling's dependency list. The module
//! directory itself stays on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::descriptor::model::{Coordinates, Dependency, Repository};
use crate::descriptor::naming::compound_id;
use crate::descriptor::path::DEFAULT_RELATIVE_PATH;
use crate::descriptor::{self, POM_FILE, Pom};
use crate::error::{self, Result};
use crate::transaction::Transaction;

pub const BUNDLE_PACKAGING: &str = "bundle";
pub const DEFAULT_BUNDLE_VERSION: &str = "1.0-SNAPSHOT";
pub const SYMBOLIC_NAME_PROPERTY: &str = "bundle.symbolicName";

const OSGI_GROUP: &str = "org.osgi";
const OSGI_API: [&str; 2] = ["osgi_R4_core", "osgi_R4_compendium"];
const OSGI_API_VERSION: &str = "1.0";

const PLUGIN_GROUP: &str = "org.ops4j";
const PLUGIN_ARTIFACT: &str = "maven-pax-plugin";

const SNAPSHOT_REPOSITORY_ID: &str = "ops4j-snapshots";
const SNAPSHOT_REPOSITORY_URL: &str = "http://repository.ops4j.org/mvn-snapshots";

const SPRING_GROUP: &str = "org.springframework";
const SPRING_REPOSITORY_ID: &str = "spring-milestones";
const SPRING_REPOSITORY_URL: &str = "http://s3.amazonaws.com/maven.springframework.org/milestone";

/// Parameters of one `create-bundle` run
#[derive(Debug, Clone)]
pub struct BundleRequest {
    /// Java package the bundle exports
    pub package: String,
    /// Module directory and artifact id; defaults to the package
    pub name: Option<String>,
    pub version: String,
    /// Directory the module is created in
    pub dir: PathBuf,
    /// Group id; derived from the containing project when omitted
    pub group: Option<String>,
    /// JUnit version for an optional test dependency
    pub junit: Option<String>,
    /// Spring version for bean support dependencies
    pub spring: Option<String>,
    pub no_dependencies: bool,
    pub overwrite: bool,
    /// Directory holding `poms/` and `poms/compiled/` for standalone bundles
    pub settings_poms: Option<PathBuf>,
    /// Version pinned on the build plugin of standalone bundles
    pub plugin_version: String,
}

impl BundleRequest {
    pub fn new(package: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            package: package.into(),
            name: None,
            version: DEFAULT_BUNDLE_VERSION.to_string(),
            dir: dir.into(),
            group: None,
            junit: None,
            spring: None,
            no_dependencies: false,
            overwrite: false,
            settings_poms: None,
            plugin_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.package)
    }
}

/// What `create-bundle` produced
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub descriptor: PathBuf,
    pub coordinates: Coordinates,
    pub symbolic_name: String,
    /// Containing descriptor the module was added to
    pub parent: Option<PathBuf>,
}

/// Create a bundle module, rolling back every file change on failure
pub fn create_bundle(request: &BundleRequest) -> Result<ScaffoldReport> {
    let base = dunce::canonicalize(&request.dir)
        .map_err(|e| error::fs::read_failed(request.dir.display().to_string(), e.to_string()))?;
    let name = request.name();
    let bundle_dir = base.join(name);
    let pom_file = bundle_dir.join(POM_FILE);

    if pom_file.exists() && !request.overwrite {
        return Err(error::descriptor::existing_element(format!(
            "bundle {}",
            pom_file.display()
        )));
    }

    let mut parent = find_containing_pom(&base)?;
    let group_id = request.group.clone().unwrap_or_else(|| match &parent {
        Some(pom) => {
            let coordinates = pom.coordinates();
            compound_id(&coordinates.group_id, &coordinates.artifact_id)
        }
        None => request.package.clone(),
    });

    let mut pom = descriptor::create_pom(&pom_file, &group_id, name);
    pom.set_version(&request.version);
    pom.set_packaging(BUNDLE_PACKAGING);
    pom.set_name(name);
    let symbolic_name = compound_id(&group_id, name);
    pom.set_property(SYMBOLIC_NAME_PROPERTY, &symbolic_name);

    let mut transaction = Transaction::new();
    transaction.create_dir_all(&bundle_dir)?;

    match parent.as_mut() {
        Some(parent_pom) => {
            let depth = depth_below(&parent_pom.basedir(), &bundle_dir);
            pom.set_parent(&parent_pom.coordinates(), DEFAULT_RELATIVE_PATH, true)?;
            pom.adjust_relative_path(depth - 1);

            let module = module_path(&parent_pom.basedir(), &bundle_dir);
            transaction.backup_file(parent_pom.file())?;
            parent_pom.add_module(&module, request.overwrite)?;
        }
        None => {
            let settings_root = request.settings_poms.as_deref().unwrap_or(&bundle_dir);
            make_standalone(&mut pom, settings_root, &request.plugin_version)?;
        }
    }

    if !request.no_dependencies {
        add_dependencies(&mut pom, parent.is_none(), request)?;
    }

    let existed = pom_file.exists();
    transaction.backup_file(&pom_file)?;
    pom.write()?;
    if !existed {
        transaction.track_file_created(&pom_file);
    }

    if let Some(parent_pom) = &parent {
        parent_pom.write()?;
        debug!("Added module {} to {}", name, parent_pom.file().display());
    }

    transaction.commit();
    info!("Created bundle {}", pom.id());

    Ok(ScaffoldReport {
        descriptor: pom_file,
        coordinates: pom.coordinates(),
        symbolic_name,
        parent: parent.map(|p| p.file().to_path_buf()),
    })
}

/// Nearest descriptor at or above `dir`
fn find_containing_pom(dir: &Path) -> Result<Option<Pom>> {
    for candidate in dir.ancestors() {
        if candidate.join(POM_FILE).is_file() {
            return descriptor::read_pom(candidate).map(Some);
        }
    }
    Ok(None)
}

/// Number of directory levels `dir` lies below `base`
fn depth_below(base: &Path, dir: &Path) -> i32 {
    let levels = dir
        .strip_prefix(base)
        .map_or(1, |relative| relative.components().count());
    i32::try_from(levels).unwrap_or(i32::MAX)
}

/// Module entry for `dir` as seen from `base`, always with forward slashes
fn module_path(base: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(base).unwrap_or(dir);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn make_standalone(pom: &mut Pom, settings_root: &Path, plugin_version: &str) -> Result<()> {
    let (compiled, plugins) = match (
        descriptor::read_pom(&settings_root.join("poms").join("compiled")),
        descriptor::read_pom(&settings_root.join("poms")),
    ) {
        (Ok(compiled), Ok(plugins)) => (compiled, plugins),
        (Err(e), _) | (_, Err(e)) => {
            debug!("Settings descriptor unavailable: {e}");
            return Err(error::config::invalid(format!(
                "Unable to find settings POM under {}",
                settings_root.display()
            )));
        }
    };

    // plugin management first so the compiled plugins merge into it
    pom.merge_section(&plugins, "build/pluginManagement/plugins", "build", false)?;
    pom.merge_section(&compiled, "build/plugins", "build", false)?;

    pom.update_plugin_version(PLUGIN_GROUP, PLUGIN_ARTIFACT, plugin_version);

    let repository = Repository {
        releases: false,
        ..Repository::new(SNAPSHOT_REPOSITORY_ID, SNAPSHOT_REPOSITORY_URL)
    };
    pom.add_plugin_repository(&repository, true)
}

fn add_dependencies(pom: &mut Pom, standalone: bool, request: &BundleRequest) -> Result<()> {
    for artifact in OSGI_API {
        let mut dependency = Dependency::new(OSGI_GROUP, artifact);
        if standalone {
            dependency = dependency
                .with_version(OSGI_API_VERSION)
                .with_scope("provided")
                .optional(true);
        }
        pom.add_dependency(&dependency, request.overwrite)?;
    }

    if let Some(version) = &request.junit {
        let junit = Dependency::new("junit", "junit")
            .with_version(version)
            .with_scope("test");
        pom.add_dependency(&junit, request.overwrite)?;
    }

    if let Some(version) = &request.spring {
        add_spring_support(pom, version, request)?;
    }
    Ok(())
}

fn add_spring_support(pom: &mut Pom, version: &str, request: &BundleRequest) -> Result<()> {
    let milestones = Repository {
        snapshots: false,
        ..Repository::new(SPRING_REPOSITORY_ID, SPRING_REPOSITORY_URL)
    };
    pom.add_repository(&milestones, request.overwrite)?;

    if request.junit.is_some() {
        let test = Dependency::new(SPRING_GROUP, "spring-test")
            .with_version(version)
            .with_scope("test");
        pom.add_dependency(&test, request.overwrite)?;
    }

    // optional so provisioning does not pull the framework in
    let context = Dependency::new(SPRING_GROUP, "spring-context")
        .with_version(version)
        .with_scope("provided")
        .optional(true);
    pom.add_dependency(&context, request.overwrite)
}

/// Parameters of one `remove-bundle` run
#[derive(Debug, Clone)]
pub struct RemovalRequest {
    /// Module directory below `dir`
    pub name: String,
    /// Directory holding the module
    pub dir: PathBuf,
}

/// What `remove-bundle` changed
#[derive(Debug, Clone)]
pub struct RemovalReport {
    pub coordinates: Coordinates,
    /// Containing descriptor the module was removed from
    pub parent: PathBuf,
    /// Sibling descriptors that dropped their dependency on the bundle
    pub dependents: Vec<PathBuf>,
}

/// Unlink a bundle module from its project, rolling back on failure
pub fn remove_bundle(request: &RemovalRequest) -> Result<RemovalReport> {
    let base = dunce::canonicalize(&request.dir)
        .map_err(|e| error::fs::read_failed(request.dir.display().to_string(), e.to_string()))?;
    let bundle_dir = base.join(&request.name);
    let bundle = descriptor::read_pom(&bundle_dir)?;
    let coordinates = bundle.coordinates();

    let Some(mut parent) = find_containing_pom(&base)? else {
        return Err(error::config::invalid(format!(
            "No project descriptor contains {}",
            bundle_dir.display()
        )));
    };

    let module = module_path(&parent.basedir(), &bundle_dir);
    let mut transaction = Transaction::new();
    transaction.backup_file(parent.file())?;
    if !parent.remove_module(&module) {
        return Err(error::config::invalid(format!(
            "{module} is not a module of {}",
            parent.file().display()
        )));
    }

    let dependency = Dependency::new(&coordinates.group_id, &coordinates.artifact_id);
    let mut dependents = Vec::new();
    for sibling in parent.modules() {
        let mut pom = match descriptor::read_pom(&parent.basedir().join(&sibling)) {
            Ok(pom) => pom,
            Err(e) => {
                warn!("Skipping module {sibling}: {e}");
                continue;
            }
        };
        if pom.remove_dependency(&dependency) {
            transaction.backup_file(pom.file())?;
            pom.write()?;
            debug!("Dropped dependency on {} from {}", coordinates, pom.file().display());
            dependents.push(pom.file().to_path_buf());
        }
    }

    parent.write()?;
    transaction.commit();
    info!("Removed module {module} from {}", parent.file().display());

    Ok(RemovalReport {
        coordinates,
        parent: parent.file().to_path_buf(),
        dependents,
    })
}
