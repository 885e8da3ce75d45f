//! Generator Service - main application orchestrator.
//!
//! Resolves every requested slug first, then applies the modules one after
//! another to the same project. The first failure aborts the request; what
//! was already written stays written.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    application::modules::{Module, ModuleInfo, ModuleRegistry},
    domain::{DomainValidator as validator, Project},
    error::{KilnError, KilnResult},
};

/// Outcome of one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub id: Uuid,
    pub folder: PathBuf,
    /// Slugs in application order.
    pub applied: Vec<String>,
}

pub struct GeneratorService {
    registry: Arc<ModuleRegistry>,
}

impl GeneratorService {
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self { registry }
    }

    pub fn list_modules(&self) -> Vec<ModuleInfo> {
        self.registry.list()
    }

    /// Resolve slugs without touching the project.
    pub fn plan(&self, slugs: &[String]) -> KilnResult<Vec<ModuleInfo>> {
        slugs
            .iter()
            .map(|slug| {
                let module = self.registry.get(slug)?;
                Ok(ModuleInfo {
                    slug: module.slug().to_string(),
                    description: module.description().to_string(),
                })
            })
            .collect()
    }

    pub fn apply(&self, project: &mut Project, slugs: &[String]) -> KilnResult<ApplyReport> {
        self.apply_with(project, slugs, |_| {})
    }

    /// Like [`apply`](Self::apply), calling `on_applied` after each module.
    #[instrument(
        skip_all,
        fields(folder = %project.folder().display(), modules = slugs.len())
    )]
    pub fn apply_with<F>(
        &self,
        project: &mut Project,
        slugs: &[String],
        mut on_applied: F,
    ) -> KilnResult<ApplyReport>
    where
        F: FnMut(&str),
    {
        validator::validate_project(project).map_err(KilnError::Domain)?;

        let modules = slugs
            .iter()
            .map(|slug| self.registry.get(slug))
            .collect::<KilnResult<Vec<Arc<dyn Module>>>>()?;

        let id = Uuid::new_v4();
        let mut applied = Vec::with_capacity(modules.len());
        for module in modules {
            info!(%id, module = module.slug(), "Applying module");
            module.init(project)?;
            on_applied(module.slug());
            applied.push(module.slug().to_string());
        }

        info!(%id, count = applied.len(), "Generation completed");
        Ok(ApplyReport {
            id,
            folder: project.folder().to_path_buf(),
            applied,
        })
    }
}
