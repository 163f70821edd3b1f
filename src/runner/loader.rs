//! Loading the runner jar and running its entry point

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{self, Result, ToolError};
use crate::repository::{ArtifactRef, ArtifactResolver, ResolutionError};

/// Something that can run the tool with a command line
pub trait EntryPoint {
    fn run(&self, arguments: &[String]) -> std::result::Result<(), ToolError>;
}

/// Turns a tool artifact into a runnable entry point
pub trait RunnerLoader {
    fn load(&self, tool: &ArtifactRef, main_class: &str) -> Result<Box<dyn EntryPoint>>;
}

/// Resolves the runner jar and runs it in a separate JVM
pub struct JarRunnerLoader<'a> {
    resolver: &'a dyn ArtifactResolver,
    java_command: String,
}

impl<'a> JarRunnerLoader<'a> {
    pub fn new(resolver: &'a dyn ArtifactResolver, java_command: impl Into<String>) -> Self {
        Self {
            resolver,
            java_command: java_command.into(),
        }
    }
}

impl RunnerLoader for JarRunnerLoader<'_> {
    fn load(&self, tool: &ArtifactRef, main_class: &str) -> Result<Box<dyn EntryPoint>> {
        let jar = match self.resolver.resolve(tool) {
            Ok(resolved) => resolved.file,
            Err(ResolutionError::NotFound { .. }) => {
                return Err(error::dispatch::not_found(tool.to_string()));
            }
            Err(e) => return Err(error::dispatch::unresolvable(tool.to_string(), Some(Box::new(e)))),
        };

        let entry = class_entry(main_class);
        let present = contains_entry(&jar, &entry)
            .map_err(|e| error::dispatch::unresolvable(tool.to_string(), Some(e)))?;
        if !present {
            return Err(error::dispatch::entry_point_not_found(format!(
                "{main_class} in {}",
                jar.display()
            )));
        }

        debug!("Loaded {} from {}", main_class, jar.display());
        Ok(Box::new(JavaEntryPoint {
            java_command: self.java_command.clone(),
            jar,
            main_class: main_class.to_string(),
        }))
    }
}

/// Archive entry holding a class
fn class_entry(main_class: &str) -> String {
    format!("{}.class", main_class.replace('.', "/"))
}

fn contains_entry(jar: &Path, entry: &str) -> std::result::Result<bool, ToolError> {
    let archive = zip::ZipArchive::new(File::open(jar)?)?;
    Ok(archive.file_names().any(|name| name == entry))
}

/// Runs `java -cp <jar> <main class> <arguments>` and waits for it
pub struct JavaEntryPoint {
    java_command: String,
    jar: PathBuf,
    main_class: String,
}

impl EntryPoint for JavaEntryPoint {
    fn run(&self, arguments: &[String]) -> std::result::Result<(), ToolError> {
        let status = Command::new(&self.java_command)
            .arg("-cp")
            .arg(&self.jar)
            .arg(&self.main_class)
            .args(arguments)
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {status}", self.main_class).into())
        }
    }
}
