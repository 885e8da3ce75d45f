use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{modules::Module, ports::ProjectRepository, services::BuildToolService},
    domain::{
        Project,
        defaults::{self, BASE_NAME, MAIN_DOCKER, PROJECT_NAME},
    },
    error::KilnResult,
};

pub const SOURCE: &str = "server/sonar";

pub trait SonarService: Send + Sync {
    fn add_sonar_plugin_version(&self, project: &Project) -> KilnResult<()>;

    fn add_properties_file(&self, project: &mut Project) -> KilnResult<()>;

    fn add_docker_compose(&self, project: &Project) -> KilnResult<()>;
}

pub struct SonarDomainService {
    repository: Arc<dyn ProjectRepository>,
    build_tool: Arc<dyn BuildToolService>,
}

impl SonarDomainService {
    pub fn new(repository: Arc<dyn ProjectRepository>, build_tool: Arc<dyn BuildToolService>) -> Self {
        Self {
            repository,
            build_tool,
        }
    }
}

impl SonarService for SonarDomainService {
    fn add_sonar_plugin_version(&self, project: &Project) -> KilnResult<()> {
        if let Some(version) =
            defaults::catalog_version("org.sonarsource.scanner.maven", "sonar-maven-plugin")
        {
            self.build_tool
                .add_property(project, "sonar-maven-plugin.version", version)?;
        }
        Ok(())
    }

    fn add_properties_file(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(BASE_NAME);
        project.add_default_config(PROJECT_NAME);
        self.repository
            .template(project, SOURCE, "sonar-project.properties", "")
    }

    fn add_docker_compose(&self, project: &Project) -> KilnResult<()> {
        self.repository.add(project, SOURCE, "sonar.yml", MAIN_DOCKER)
    }
}

impl Module for SonarDomainService {
    fn slug(&self) -> &'static str {
        "sonar"
    }

    fn description(&self) -> &'static str {
        "SonarQube analysis properties and docker compose file"
    }

    #[instrument(skip_all)]
    fn init(&self, project: &mut Project) -> KilnResult<()> {
        self.add_sonar_plugin_version(project)?;
        self.add_properties_file(project)?;
        self.add_docker_compose(project)?;
        info!("Sonar applied");
        Ok(())
    }
}
