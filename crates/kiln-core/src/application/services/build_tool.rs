//! Build Tool Service - dependency and build property addition.
//!
//! Every mutation loads the descriptor, applies the idempotent domain
//! operation and saves only when something changed.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{modules::Module, ports::BuildDescriptorRepository},
    domain::{BuildDescriptor, Change, Dependency, DependencyId, DomainError, Project},
    error::KilnResult,
};

#[cfg_attr(test, mockall::automock)]
pub trait BuildToolService: Send + Sync {
    /// Create an empty build descriptor for the project.
    fn init(&self, project: &Project) -> KilnResult<Change>;

    fn add_dependency(&self, project: &Project, dependency: &Dependency) -> KilnResult<Change>;

    /// Add a dependency with extra exclusions merged onto it.
    fn add_dependency_with_exclusions(
        &self,
        project: &Project,
        dependency: &Dependency,
        exclusions: &[DependencyId],
    ) -> KilnResult<Change>;

    /// Add a named build variable.
    fn add_property(&self, project: &Project, key: &str, value: &str) -> KilnResult<Change>;
}

pub struct BuildToolDomainService {
    descriptors: Arc<dyn BuildDescriptorRepository>,
}

impl BuildToolDomainService {
    pub fn new(descriptors: Arc<dyn BuildDescriptorRepository>) -> Self {
        Self { descriptors }
    }

    fn update<F>(&self, project: &Project, mutate: F) -> KilnResult<Change>
    where
        F: FnOnce(&mut BuildDescriptor) -> Result<Change, DomainError>,
    {
        let mut descriptor = self.descriptors.load(project)?;
        let change = mutate(&mut descriptor)?;
        if !change.is_noop() {
            self.descriptors.save(project, &descriptor)?;
        }
        Ok(change)
    }
}

impl BuildToolService for BuildToolDomainService {
    #[instrument(skip_all, fields(folder = %project.folder().display()))]
    fn init(&self, project: &Project) -> KilnResult<Change> {
        let change = self.descriptors.init(project)?;
        debug!(?change, "Build descriptor initialized");
        Ok(change)
    }

    #[instrument(skip_all, fields(dependency = %dependency))]
    fn add_dependency(&self, project: &Project, dependency: &Dependency) -> KilnResult<Change> {
        let change = self.update(project, |d| d.add_dependency(dependency.clone()))?;
        debug!(?change, "Dependency declared");
        Ok(change)
    }

    #[instrument(skip_all, fields(dependency = %dependency, exclusions = exclusions.len()))]
    fn add_dependency_with_exclusions(
        &self,
        project: &Project,
        dependency: &Dependency,
        exclusions: &[DependencyId],
    ) -> KilnResult<Change> {
        let merged = dependency.clone().with_exclusions(exclusions.iter().cloned());
        let change = self.update(project, |d| d.add_dependency(merged))?;
        debug!(?change, "Dependency declared");
        Ok(change)
    }

    #[instrument(skip_all, fields(key = %key))]
    fn add_property(&self, project: &Project, key: &str, value: &str) -> KilnResult<Change> {
        let change = self.update(project, |d| Ok(d.add_property(key, value)))?;
        debug!(?change, value, "Build property set");
        Ok(change)
    }
}

impl Module for BuildToolDomainService {
    fn slug(&self) -> &'static str {
        "build-tool"
    }

    fn description(&self) -> &'static str {
        "Empty build descriptor (kiln-build.toml)"
    }

    fn init(&self, project: &mut Project) -> KilnResult<()> {
        BuildToolService::init(self, project)?;
        Ok(())
    }
}
