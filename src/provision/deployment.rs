//! Synthesis and installation of the deployment descriptor

use std::path::{Path, PathBuf};

use tracing::info;

use super::reactor::Project;
use crate::descriptor::{Coordinates, Dependency, POM_FILE, Pom, compound_id};
use crate::error::{self, Result};
use crate::repository::{ArtifactRef, LocalRepository};

/// Appended to the root's compound id to form the deployment group
pub const BUILD_SUFFIX: &str = ".build";

pub const DEPLOYMENT_ARTIFACT: &str = "deployment";

/// Location of the deployment descriptor below the root module
pub const DEPLOYMENT_DIR: &str = "target/deployment";

/// Top-level sections kept from the root descriptor
const KEPT_SECTIONS: [&str; 1] = ["modelVersion"];

/// An aggregate descriptor listing every resolved bundle
#[derive(Debug, Clone)]
pub struct DeploymentDescriptor {
    pom: Pom,
    coordinates: Coordinates,
}

impl DeploymentDescriptor {
    /// Derive the descriptor from the traversal root
    pub fn build(root: &Project, bundles: &[Dependency]) -> Self {
        let root_coordinates = root.coordinates();
        let coordinates = Coordinates::new(
            compound_id(&root_coordinates.group_id, &root_coordinates.artifact_id) + BUILD_SUFFIX,
            DEPLOYMENT_ARTIFACT,
            &root_coordinates.version,
        );

        let file = root.basedir().join(DEPLOYMENT_DIR).join(POM_FILE);
        let mut pom = root.pom().derive(file);
        pom.retain_sections(&KEPT_SECTIONS);
        pom.set_group_id(&coordinates.group_id);
        pom.set_artifact_id(&coordinates.artifact_id);
        pom.set_version(&coordinates.version);
        pom.set_packaging("pom");
        pom.set_dependencies(bundles);

        Self { pom, coordinates }
    }

    /// Write the descriptor, creating its directory
    pub fn write(&self) -> Result<()> {
        self.pom
            .write()
            .map_err(|e| error::deploy::write_failed(self.file().display().to_string(), e.to_string()))?;
        info!("Wrote deployment descriptor {}", self.file().display());
        Ok(())
    }

    /// Register the written descriptor in the local repository
    pub fn install(&self, local: &LocalRepository) -> Result<PathBuf> {
        let artifact = ArtifactRef::new(
            &self.coordinates.group_id,
            &self.coordinates.artifact_id,
            &self.coordinates.version,
        )
        .with_type("pom");

        local
            .install(self.file(), &artifact, &self.coordinates.version)
            .map_err(|e| error::deploy::install_failed(artifact.to_string(), e.to_string()))
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn file(&self) -> &Path {
        self.pom.file()
    }

    /// Directory the descriptor lives in
    pub fn basedir(&self) -> PathBuf {
        self.pom.basedir()
    }

    pub fn pom(&self) -> &Pom {
        &self.pom
    }
}
