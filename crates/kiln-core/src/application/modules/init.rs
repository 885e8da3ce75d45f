//! Project skeleton: README, .gitignore and .editorconfig.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        modules::Module,
        ports::{ProjectRepository, ResourceStore},
    },
    domain::{
        Project, RenderContext,
        defaults::{BASE_NAME, PRETTIER_DEFAULT_INDENT, PROJECT_NAME, join_path},
    },
    error::KilnResult,
};

pub const SOURCE: &str = "init";

pub trait InitService: Send + Sync {
    fn add_readme(&self, project: &mut Project) -> KilnResult<()>;

    fn add_gitignore(&self, project: &Project) -> KilnResult<()>;

    fn add_editorconfig(&self, project: &mut Project) -> KilnResult<()>;
}

pub struct InitDomainService {
    repository: Arc<dyn ProjectRepository>,
    resources: Arc<dyn ResourceStore>,
}

impl InitDomainService {
    pub fn new(repository: Arc<dyn ProjectRepository>, resources: Arc<dyn ResourceStore>) -> Self {
        Self {
            repository,
            resources,
        }
    }

    /// Dotfiles are shipped without their leading dot.
    fn write_dotfile(&self, project: &Project, resource: &str, render: bool) -> KilnResult<()> {
        let raw = self.resources.read(&join_path(&[SOURCE, resource]))?;
        let text = if render {
            RenderContext::from_project(project).render(&raw)
        } else {
            raw
        };
        self.repository
            .write(project, &text, "", &format!(".{resource}"))
    }
}

impl InitService for InitDomainService {
    fn add_readme(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(BASE_NAME);
        project.add_default_config(PROJECT_NAME);
        self.repository.template(project, SOURCE, "README.md", "")
    }

    fn add_gitignore(&self, project: &Project) -> KilnResult<()> {
        self.write_dotfile(project, "gitignore", false)
    }

    fn add_editorconfig(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(PRETTIER_DEFAULT_INDENT);
        self.write_dotfile(project, "editorconfig", true)
    }
}

impl Module for InitDomainService {
    fn slug(&self) -> &'static str {
        "init"
    }

    fn description(&self) -> &'static str {
        "README, .gitignore and .editorconfig"
    }

    #[instrument(skip_all, fields(folder = %project.folder().display()))]
    fn init(&self, project: &mut Project) -> KilnResult<()> {
        self.add_readme(project)?;
        self.add_gitignore(project)?;
        self.add_editorconfig(project)?;
        info!("Project initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{modules::testing::FakeRepository, ports::MockResourceStore};

    #[test]
    fn init_writes_skeleton_with_defaults() {
        let mut resources = MockResourceStore::new();
        resources
            .expect_read()
            .withf(|path| path == "init/gitignore")
            .returning(|_| Ok("target/\n".into()));
        resources
            .expect_read()
            .withf(|path| path == "init/editorconfig")
            .returning(|_| Ok("indent_size = {{prettierDefaultIndent}}\n".into()));

        let mut repository = FakeRepository::default();
        repository
            .resources
            .insert("init/README.md".into(), "# {{projectName}}\n".into());
        let repository = Arc::new(repository);

        let service = InitDomainService::new(repository.clone(), Arc::new(resources));
        let mut project = Project::new(std::env::temp_dir().join("kiln-init")).unwrap();
        service.init(&mut project).unwrap();

        assert_eq!(repository.file("README.md").as_deref(), Some("# JHipster Project\n"));
        assert_eq!(repository.file(".gitignore").as_deref(), Some("target/\n"));
        assert_eq!(repository.file(".editorconfig").as_deref(), Some("indent_size = 2\n"));
        assert_eq!(project.base_name().as_deref(), Some("jhipster"));
    }
}
