//! TOML build descriptor persisted in the project folder.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use kiln_core::{
    application::{ApplicationError, ports::{BuildDescriptorRepository, Filesystem}},
    domain::{BuildDescriptor, Change, Project},
    error::KilnResult,
};
use tracing::{debug, info, instrument};

/// File name of the descriptor, at the project root.
pub const DESCRIPTOR_FILE: &str = "kiln-build.toml";

const HEADER: &str = "# Build descriptor managed by kiln.\n";

pub struct TomlBuildDescriptorRepository {
    filesystem: Arc<dyn Filesystem>,
}

impl TomlBuildDescriptorRepository {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    fn write(&self, path: &Path, descriptor: &BuildDescriptor) -> KilnResult<()> {
        let body = toml::to_string(descriptor).map_err(|e| ApplicationError::InvalidDescriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, &format!("{HEADER}{body}"))
    }
}

impl BuildDescriptorRepository for TomlBuildDescriptorRepository {
    fn location(&self, project: &Project) -> PathBuf {
        project.folder().join(DESCRIPTOR_FILE)
    }

    #[instrument(skip_all, fields(folder = %project.folder().display()))]
    fn load(&self, project: &Project) -> KilnResult<BuildDescriptor> {
        let path = self.location(project);
        if !self.filesystem.exists(&path) {
            return Err(ApplicationError::MissingBuildDescriptor { path }.into());
        }

        let raw = self.filesystem.read_file(&path)?;
        let descriptor: BuildDescriptor =
            toml::from_str(&raw).map_err(|e| ApplicationError::InvalidDescriptor {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        debug!(
            dependencies = descriptor.dependencies().len(),
            properties = descriptor.properties().len(),
            "Build descriptor loaded"
        );
        Ok(descriptor)
    }

    fn save(&self, project: &Project, descriptor: &BuildDescriptor) -> KilnResult<()> {
        self.write(&self.location(project), descriptor)
    }

    fn init(&self, project: &Project) -> KilnResult<Change> {
        let path = self.location(project);
        if self.filesystem.exists(&path) {
            return Ok(Change::Unchanged);
        }
        self.write(&path, &BuildDescriptor::new())?;
        info!(path = %path.display(), "Build descriptor created");
        Ok(Change::Added)
    }
}
