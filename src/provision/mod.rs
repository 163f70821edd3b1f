//! Cross-module bundle aggregation and deployment
//!
//! A [`ProvisionSession`] is created once per traversal of a multi-module
//! build. Every module visit adds its bundles to the session's
//! [`BundleRegistry`]; the visit at the last position drains the registry,
//! resolves the bundles, writes and installs the deployment descriptor and
//! finally hands it to the runner.
//!
//! The session assumes the driver visits every module exactly once, in a
//! stable order, and never interleaves two traversals on one session.

pub mod deployment;
pub mod reactor;
pub mod registry;
pub mod resolution;

use std::mem;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::bundle::BundleClassifier;
use crate::config::ProvisionOptions;
use crate::descriptor::{Coordinates, Dependency};
use crate::error::{self, Result};
use crate::progress::ResolutionProgress;
use crate::repository::{ArtifactRef, ArtifactResolver, LocalRepository};
use crate::runner::{DeploymentContext, Dispatcher, RunnerLoader, RuntimeEnvironment};

use deployment::DeploymentDescriptor;
use reactor::{Project, Reactor};
use registry::BundleRegistry;
use resolution::resolve_bundles;

/// Collaborators used when the traversal finishes
pub struct Provisioner<'a> {
    pub options: &'a ProvisionOptions,
    pub resolver: &'a dyn ArtifactResolver,
    pub local: &'a LocalRepository,
    /// Comma separated remote URLs handed to the runner
    pub repositories: String,
    pub loader: &'a dyn RunnerLoader,
    pub environment: RuntimeEnvironment,
    pub show_progress: bool,
}

/// What a finished provisioning run produced
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub coordinates: Coordinates,
    pub descriptor: PathBuf,
    pub installed: PathBuf,
    pub bundles: Vec<Dependency>,
    pub skipped: Vec<ArtifactRef>,
    /// Arguments the runner was invoked with, `None` when deployment was disabled
    pub arguments: Option<Vec<String>>,
}

enum SessionState {
    Pending,
    Collecting(BundleRegistry),
    Finalized,
}

/// Bundle accumulation across one traversal
pub struct ProvisionSession<'a> {
    provisioner: Provisioner<'a>,
    root: Project,
    total: usize,
    state: SessionState,
}

impl<'a> ProvisionSession<'a> {
    /// Start a traversal of `total` projects rooted at `root`
    pub fn new(provisioner: Provisioner<'a>, root: Project, total: usize) -> Self {
        Self {
            provisioner,
            root,
            total,
            state: SessionState::Pending,
        }
    }

    /// Record one module; the visit at the last position also finalizes
    pub fn visit(&mut self, position: usize, project: &Project) -> Result<Option<ProvisionReport>> {
        if position >= self.total {
            return Err(error::config::invalid(format!(
                "module position {position} is outside a build of {} modules",
                self.total
            )));
        }

        let classifier = self.classifier();
        self.registry_mut()?.add_bundle_dependencies(project, &classifier);

        if position + 1 == self.total {
            return self.finalize().map(Some);
        }
        Ok(None)
    }

    /// Drain the registry and deploy; only the first call succeeds
    pub fn finalize(&mut self) -> Result<ProvisionReport> {
        self.registry_mut()?;
        let SessionState::Collecting(registry) = mem::replace(&mut self.state, SessionState::Finalized)
        else {
            return Err(error::config::invalid("provisioning session already finalized"));
        };
        self.deploy(registry)
    }

    fn classifier(&self) -> BundleClassifier<'a> {
        BundleClassifier::new(self.provisioner.resolver, self.provisioner.options.scan_manifests)
    }

    fn registry_mut(&mut self) -> Result<&mut BundleRegistry> {
        if matches!(self.state, SessionState::Pending) {
            let registry = self.initial_registry();
            self.state = SessionState::Collecting(registry);
        }
        match &mut self.state {
            SessionState::Collecting(registry) => Ok(registry),
            _ => Err(error::config::invalid("provisioning session already finalized")),
        }
    }

    /// Registry seeded with the extra descriptors
    fn initial_registry(&self) -> BundleRegistry {
        let mut registry = BundleRegistry::new();
        let classifier = self.classifier();

        for path in &self.provisioner.options.deploy_poms {
            if !path.exists() {
                debug!("Ignoring missing descriptor {}", path.display());
                continue;
            }
            match Project::load(path) {
                Ok(project) => registry.add_bundle_dependencies(&project, &classifier),
                Err(e) => warn!("Unable to build Maven project for {}: {}", path.display(), e),
            }
        }
        registry
    }

    fn deploy(&self, registry: BundleRegistry) -> Result<ProvisionReport> {
        let p = &self.provisioner;

        if registry.is_empty() {
            info!("~~~~~~~~~~~~~~~~~~~");
            info!(" No bundles found! ");
            info!("~~~~~~~~~~~~~~~~~~~");
        }

        let bundle_count = registry.len();
        let artifacts = registry.drain();
        let progress = if p.show_progress {
            ResolutionProgress::new(artifacts.len() as u64)
        } else {
            ResolutionProgress::hidden()
        };
        let outcome = resolve_bundles(&artifacts, p.resolver, &progress);

        let descriptor = DeploymentDescriptor::build(&self.root, &outcome.resolved);
        descriptor.write()?;
        let installed = descriptor.install(p.local)?;

        let mut report = ProvisionReport {
            coordinates: descriptor.coordinates().clone(),
            descriptor: descriptor.file().to_path_buf(),
            installed,
            bundles: outcome.resolved,
            skipped: outcome.skipped,
            arguments: None,
        };

        if !p.options.deploy {
            info!("Deployment complete");
            return Ok(report);
        }

        let context = DeploymentContext {
            descriptor: &descriptor,
            repositories: &p.repositories,
            local_repository: p.local.base(),
            framework: &p.options.framework,
            commands: &p.options.provision,
            bundle_count,
        };
        let dispatcher = Dispatcher::new(p.loader, p.environment.clone());
        report.arguments = Some(dispatcher.dispatch(&p.options.runner, &context)?);
        Ok(report)
    }
}

/// Visit every project of a reactor in order and return the final report
pub fn provision_reactor(reactor: &Reactor, provisioner: Provisioner<'_>) -> Result<ProvisionReport> {
    let mut session = ProvisionSession::new(provisioner, reactor.root().clone(), reactor.len());
    let mut report = None;
    for (position, project) in reactor.projects().iter().enumerate() {
        debug!("Visiting {} ({}/{})", project.id(), position + 1, reactor.len());
        if let Some(finished) = session.visit(position, project)? {
            report = Some(finished);
        }
    }
    report.ok_or_else(|| error::config::invalid("build has no modules"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::descriptor::POM_FILE;
    use crate::error::PaxError;
    use crate::repository::{ResolutionError, ResolvedArtifact};
    use crate::runner::tests::RecordingLoader;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Resolves every artifact except the listed ones
    struct FakeResolver {
        missing: Vec<&'static str>,
    }

    impl ArtifactResolver for FakeResolver {
        fn resolve(&self, artifact: &ArtifactRef) -> std::result::Result<ResolvedArtifact, ResolutionError> {
            if self.missing.contains(&artifact.artifact_id.as_str()) {
                return Err(ResolutionError::NotFound {
                    artifact: artifact.to_string(),
                });
            }
            Ok(ResolvedArtifact {
                artifact: artifact.clone(),
                version: artifact.version.clone(),
                meta_version: None,
                file: PathBuf::from(format!("{}.jar", artifact.artifact_id)),
            })
        }
    }

    fn write(dir: &Path, body: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join(POM_FILE),
            format!("<project><modelVersion>4.0.0</modelVersion>{body}</project>"),
        )
        .unwrap();
    }

    const PARENT: &str =
        "<parent><groupId>org.example</groupId><artifactId>a</artifactId><version>1.0</version></parent>";

    /// Root A with modules B (bundle, provided D) and C (plain jar)
    fn scenario(temp: &TempDir) -> Reactor {
        write(
            temp.path(),
            "<groupId>org.example</groupId><artifactId>a</artifactId><version>1.0</version>\
             <packaging>pom</packaging><modules><module>b</module><module>c</module></modules>",
        );
        write(
            &temp.path().join("b"),
            &format!(
                "{PARENT}<artifactId>b</artifactId><packaging>bundle</packaging>\
                 <dependencies><dependency><groupId>org.example</groupId><artifactId>d</artifactId>\
                 <version>2.0</version><scope>provided</scope></dependency></dependencies>"
            ),
        );
        write(
            &temp.path().join("c"),
            &format!(
                "{PARENT}<artifactId>c</artifactId>\
                 <dependencies><dependency><groupId>junit</groupId><artifactId>junit</artifactId>\
                 <version>4.4</version><scope>test</scope></dependency></dependencies>"
            ),
        );
        Reactor::load(temp.path()).unwrap()
    }

    struct Harness {
        temp: TempDir,
        options: ProvisionOptions,
        resolver: FakeResolver,
        local: LocalRepository,
        loader: RecordingLoader,
    }

    impl Harness {
        fn new(options: ProvisionOptions, missing: Vec<&'static str>) -> Self {
            let temp = TempDir::new().unwrap();
            let local = LocalRepository::new(temp.path().join("m2"));
            Self {
                temp,
                options,
                resolver: FakeResolver { missing },
                local,
                loader: RecordingLoader::default(),
            }
        }

        fn provisioner(&self) -> Provisioner<'_> {
            Provisioner {
                options: &self.options,
                resolver: &self.resolver,
                local: &self.local,
                repositories: "http://repository.ops4j.org/maven2".to_string(),
                loader: &self.loader,
                environment: RuntimeEnvironment::default(),
                show_progress: false,
            }
        }
    }

    fn artifact_ids(bundles: &[Dependency]) -> Vec<&str> {
        bundles.iter().map(|d| d.artifact_id.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let harness = Harness::new(ProvisionOptions::default(), Vec::new());
        let reactor = scenario(&harness.temp);
        let mut session = ProvisionSession::new(harness.provisioner(), reactor.root().clone(), reactor.len());

        let projects = reactor.projects();
        assert!(session.visit(0, &projects[0]).unwrap().is_none());
        assert!(session.visit(1, &projects[1]).unwrap().is_none());
        assert!(harness.loader.invocations.borrow().is_empty());
        let report = session.visit(2, &projects[2]).unwrap().unwrap();

        assert_eq!(artifact_ids(&report.bundles), vec!["b", "d"]);
        assert_eq!(report.bundles[1].version.as_deref(), Some("2.0"));
        assert_eq!(
            report.coordinates,
            Coordinates::new("org.example.a.build", "deployment", "1.0")
        );
        assert_eq!(report.descriptor, harness.temp.path().join("target/deployment/pom.xml"));
        assert!(report.installed.is_file());

        let written = crate::descriptor::read_pom(&report.descriptor).unwrap();
        assert_eq!(artifact_ids(&written.dependencies()), vec!["b", "d"]);

        let invocations = harness.loader.invocations.borrow();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].last().map(String::as_str), Some("--overwriteUserBundles"));
    }

    #[test]
    fn test_finalize_runs_once_at_last_position() {
        let harness = Harness::new(ProvisionOptions::default(), Vec::new());
        let reactor = scenario(&harness.temp);
        let mut session = ProvisionSession::new(harness.provisioner(), reactor.root().clone(), reactor.len());

        let projects = reactor.projects();
        // revisiting earlier modules never triggers finalize
        for (position, project) in projects.iter().enumerate().take(2) {
            session.visit(position, project).unwrap();
            session.visit(position, project).unwrap();
        }
        assert!(harness.loader.loaded.borrow().is_empty());

        session.visit(2, &projects[2]).unwrap();
        assert_eq!(harness.loader.invocations.borrow().len(), 1);

        assert!(matches!(
            session.visit(2, &projects[2]).unwrap_err(),
            PaxError::ConfigInvalid { .. }
        ));
        assert!(session.finalize().is_err());
        assert_eq!(harness.loader.invocations.borrow().len(), 1);
    }

    #[test]
    fn test_unresolved_bundle_is_skipped() {
        let harness = Harness::new(ProvisionOptions::default(), vec!["d"]);
        let reactor = scenario(&harness.temp);
        let report = provision_reactor(&reactor, harness.provisioner()).unwrap();

        assert_eq!(artifact_ids(&report.bundles), vec!["b"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].artifact_id, "d");
    }

    #[test]
    fn test_no_deploy_stops_after_install() {
        let options = ProvisionOptions {
            deploy: false,
            ..ProvisionOptions::default()
        };
        let harness = Harness::new(options, Vec::new());
        let reactor = scenario(&harness.temp);
        let report = provision_reactor(&reactor, harness.provisioner()).unwrap();

        assert!(report.arguments.is_none());
        assert!(report.installed.is_file());
        assert!(harness.loader.loaded.borrow().is_empty());
    }

    #[test]
    fn test_empty_build_still_writes_descriptor() {
        let harness = Harness::new(ProvisionOptions::default(), Vec::new());
        write(
            harness.temp.path(),
            "<groupId>org.example</groupId><artifactId>solo</artifactId><version>1.0</version>",
        );
        let reactor = Reactor::load(harness.temp.path()).unwrap();
        let report = provision_reactor(&reactor, harness.provisioner()).unwrap();

        assert!(report.bundles.is_empty());
        assert!(report.descriptor.is_file());
        // nothing aggregated: NG runner only sees the raw commands
        assert_eq!(report.arguments, Some(Vec::new()));
    }

    #[test]
    fn test_deploy_poms_are_folded_in_once() {
        let temp = TempDir::new().unwrap();
        let extra = temp.path().join("extra");
        write(
            &extra,
            "<groupId>org.example</groupId><artifactId>extra</artifactId><version>3.0</version><packaging>bundle</packaging>",
        );
        let broken = temp.path().join("broken.xml");
        fs::write(&broken, "<not-a-project/>").unwrap();

        let options = ProvisionOptions {
            deploy: false,
            deploy_poms: vec![extra.join(POM_FILE), broken, temp.path().join("missing.xml")],
            ..ProvisionOptions::default()
        };
        let harness = Harness::new(options, Vec::new());
        let reactor = scenario(&harness.temp);
        let report = provision_reactor(&reactor, harness.provisioner()).unwrap();

        assert_eq!(artifact_ids(&report.bundles), vec!["extra", "b", "d"]);
    }

    #[test]
    fn test_classic_runner_gets_coordinates() {
        let options = ProvisionOptions {
            runner: "0.4.9".to_string(),
            ..ProvisionOptions::default()
        };
        let harness = Harness::new(options, Vec::new());
        let reactor = scenario(&harness.temp);
        let report = provision_reactor(&reactor, harness.provisioner()).unwrap();

        let arguments = report.arguments.unwrap();
        assert_eq!(
            &arguments[arguments.len() - 3..],
            &["org.example.a.build", "deployment", "1.0"]
        );
        assert_eq!(harness.loader.loaded.borrow()[0].artifact_id, "runner");
    }
}
