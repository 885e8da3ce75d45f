//! Spring Boot core: starter dependencies, main class, runtime configuration
//! files and logback files carrying the logger needle.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        modules::Module,
        ports::ProjectRepository,
        services::{
            BuildToolService, PropertiesService,
            logging::{LOGBACK_MAIN, LOGBACK_TEST},
            properties::{APPLICATION_PROPERTIES, properties_dir},
        },
    },
    domain::{
        ConfigValue, Dependency, Project, PropertyTarget, Scope,
        defaults::{
            self, BASE_NAME, MAIN_JAVA, MAIN_RESOURCES, PACKAGE_NAME, TEST_JAVA, TEST_RESOURCES,
            join_path,
        },
    },
    error::KilnResult,
};

pub const SOURCE: &str = "server/springboot/core";
const SPRING_BOOT_GROUP: &str = "org.springframework.boot";

pub trait SpringBootService: Send + Sync {
    fn add_spring_boot_dependencies(&self, project: &Project) -> KilnResult<()>;

    fn add_main_app(&self, project: &mut Project) -> KilnResult<()>;

    fn add_application_properties(&self, project: &mut Project) -> KilnResult<()>;

    fn add_logging_configuration(&self, project: &mut Project) -> KilnResult<()>;

    /// Test utility capturing log events, shared by several modules.
    fn add_test_logback_recorder(&self, project: &mut Project) -> KilnResult<()>;
}

pub struct SpringBootDomainService {
    repository: Arc<dyn ProjectRepository>,
    build_tool: Arc<dyn BuildToolService>,
    properties: Arc<dyn PropertiesService>,
}

impl SpringBootDomainService {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        build_tool: Arc<dyn BuildToolService>,
        properties: Arc<dyn PropertiesService>,
    ) -> Self {
        Self {
            repository,
            build_tool,
            properties,
        }
    }
}

fn spring_boot(artifact_id: &str) -> Dependency {
    Dependency {
        group_id: SPRING_BOOT_GROUP.to_string(),
        artifact_id: artifact_id.to_string(),
        version: None,
        scope: Scope::Compile,
        optional: false,
        dependency_type: None,
        exclusions: Vec::new(),
    }
}

impl SpringBootService for SpringBootDomainService {
    fn add_spring_boot_dependencies(&self, project: &Project) -> KilnResult<()> {
        if let Some(version) = defaults::catalog_version(SPRING_BOOT_GROUP, "spring-boot") {
            self.build_tool
                .add_property(project, "spring-boot.version", version)?;
        }

        self.build_tool
            .add_dependency(project, &spring_boot("spring-boot-starter"))?;
        self.build_tool.add_dependency(
            project,
            &Dependency {
                optional: true,
                ..spring_boot("spring-boot-configuration-processor")
            },
        )?;
        self.build_tool.add_dependency(
            project,
            &Dependency {
                scope: Scope::Test,
                ..spring_boot("spring-boot-starter-test")
            },
        )?;
        Ok(())
    }

    fn add_main_app(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(PACKAGE_NAME);
        project.add_default_config(BASE_NAME);
        let package_path = project.package_name_path();

        self.repository.template(
            project,
            &join_path(&[SOURCE, "src"]),
            "MainApp.java",
            &join_path(&[MAIN_JAVA, &package_path]),
        )?;
        self.repository.template(
            project,
            &join_path(&[SOURCE, "test"]),
            "IntegrationTest.java",
            &join_path(&[TEST_JAVA, &package_path]),
        )?;
        Ok(())
    }

    fn add_application_properties(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(BASE_NAME);

        self.repository.add(
            project,
            &join_path(&[SOURCE, "resources"]),
            APPLICATION_PROPERTIES,
            &properties_dir(PropertyTarget::Main),
        )?;
        self.repository.add(
            project,
            &join_path(&[SOURCE, "resources", "test"]),
            APPLICATION_PROPERTIES,
            &properties_dir(PropertyTarget::Test),
        )?;

        let base_name = project.base_name().unwrap_or_default();
        self.properties.add_properties(
            project,
            "spring.application.name",
            ConfigValue::String(base_name),
        )?;
        Ok(())
    }

    fn add_logging_configuration(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(PACKAGE_NAME);

        self.repository.template(
            project,
            &join_path(&[SOURCE, "resources"]),
            LOGBACK_MAIN,
            MAIN_RESOURCES,
        )?;
        self.repository.template(
            project,
            &join_path(&[SOURCE, "resources", "test"]),
            LOGBACK_TEST,
            TEST_RESOURCES,
        )?;
        Ok(())
    }

    fn add_test_logback_recorder(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(PACKAGE_NAME);
        let package_path = project.package_name_path();

        self.repository.template(
            project,
            &join_path(&[SOURCE, "test"]),
            "LogbackRecorder.java",
            &join_path(&[TEST_JAVA, &package_path]),
        )
    }
}

impl Module for SpringBootDomainService {
    fn slug(&self) -> &'static str {
        "springboot"
    }

    fn description(&self) -> &'static str {
        "Spring Boot starter, main class, properties and logback files"
    }

    #[instrument(skip_all, fields(folder = %project.folder().display()))]
    fn init(&self, project: &mut Project) -> KilnResult<()> {
        self.add_spring_boot_dependencies(project)?;
        self.add_main_app(project)?;
        self.add_application_properties(project)?;
        self.add_logging_configuration(project)?;
        self.add_test_logback_recorder(project)?;
        info!("Spring Boot core applied");
        Ok(())
    }
}
