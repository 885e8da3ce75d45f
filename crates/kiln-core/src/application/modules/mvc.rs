//! Spring MVC web server (Tomcat or Undertow), actuator and the problem
//! based exception handler.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        modules::Module,
        ports::ProjectRepository,
        services::{
            BuildToolService, LoggingService, PropertiesService, logging::add_logger_everywhere,
        },
    },
    domain::{
        ConfigValue, Dependency, DependencyId, Level, Project, Scope,
        defaults::{self, MAIN_JAVA, PACKAGE_NAME, SERVER_PORT, TEST_JAVA, join_path},
    },
    error::KilnResult,
};

pub const SOURCE: &str = "server/springboot/mvc/web";
pub const EXCEPTION_HANDLER_PATH: &str = "technical/infrastructure/primary/exception";

const DEFAULT_SERVER_PORT: i64 = 8080;
const SPRING_BOOT_GROUP: &str = "org.springframework.boot";

const EXCEPTION_HANDLER_MAIN: &[&str] = &[
    "BadRequestAlertException.java",
    "ErrorConstants.java",
    "ExceptionTranslator.java",
    "FieldErrorDTO.java",
    "HeaderUtil.java",
    "ProblemConfiguration.java",
];

const EXCEPTION_HANDLER_TEST: &[&str] = &[
    "BadRequestAlertExceptionTest.java",
    "ExceptionTranslatorIT.java",
    "ExceptionTranslatorTestController.java",
    "FieldErrorDTOTest.java",
    "HeaderUtilTest.java",
];

pub trait SpringBootMvcService: Send + Sync {
    fn add_spring_boot_mvc(&self, project: &mut Project) -> KilnResult<()>;

    fn add_spring_boot_undertow(&self, project: &mut Project) -> KilnResult<()>;

    fn add_spring_boot_actuator(&self, project: &mut Project) -> KilnResult<()>;

    fn add_exception_handler(&self, project: &mut Project) -> KilnResult<()>;
}

pub struct SpringBootMvcDomainService {
    repository: Arc<dyn ProjectRepository>,
    build_tool: Arc<dyn BuildToolService>,
    properties: Arc<dyn PropertiesService>,
    logging: Arc<dyn LoggingService>,
}

pub fn spring_boot_starter_web() -> Dependency {
    starter("spring-boot-starter-web")
}

pub fn tomcat() -> DependencyId {
    DependencyId::new(SPRING_BOOT_GROUP, "spring-boot-starter-tomcat")
}

fn starter(artifact_id: &str) -> Dependency {
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

fn problem_spring_web() -> Dependency {
    Dependency {
        group_id: "org.zalando".to_string(),
        version: Some("${problem-spring.version}".to_string()),
        ..starter("problem-spring-web")
    }
}

/// `serverPort` from the project, or 8080 when unset or not an integer.
fn server_port(project: &Project) -> i64 {
    match project.get_integer_config(SERVER_PORT) {
        Ok(Some(port)) => port,
        Ok(None) => DEFAULT_SERVER_PORT,
        Err(e) => {
            warn!(error = %e, "The serverPort config is not valid, using {DEFAULT_SERVER_PORT}");
            DEFAULT_SERVER_PORT
        }
    }
}

impl SpringBootMvcDomainService {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        build_tool: Arc<dyn BuildToolService>,
        properties: Arc<dyn PropertiesService>,
        logging: Arc<dyn LoggingService>,
    ) -> Self {
        Self {
            repository,
            build_tool,
            properties,
            logging,
        }
    }

    fn add_server_port(&self, project: &Project) -> KilnResult<()> {
        self.properties
            .add_properties(project, "server.port", ConfigValue::Integer(server_port(project)))?;
        self.properties
            .add_properties_test(project, "server.port", ConfigValue::Integer(0))?;
        Ok(())
    }

    fn template_to_exception_handler(
        &self,
        project: &Project,
        kind: &str,
        filename: &str,
        layer: &str,
    ) -> KilnResult<()> {
        let package_path = project.package_name_path();
        self.repository.template(
            project,
            &join_path(&[SOURCE, kind]),
            filename,
            &join_path(&[layer, &package_path, EXCEPTION_HANDLER_PATH]),
        )
    }
}

impl SpringBootMvcService for SpringBootMvcDomainService {
    #[instrument(skip_all)]
    fn add_spring_boot_mvc(&self, project: &mut Project) -> KilnResult<()> {
        self.build_tool
            .add_dependency(project, &spring_boot_starter_web())?;

        self.add_server_port(project)?;
        self.add_exception_handler(project)?;
        add_logger_everywhere(
            self.logging.as_ref(),
            project,
            "org.springframework.web",
            Level::Warn,
        )?;
        info!("Spring MVC (Tomcat) applied");
        Ok(())
    }

    #[instrument(skip_all)]
    fn add_spring_boot_undertow(&self, project: &mut Project) -> KilnResult<()> {
        self.build_tool.add_dependency_with_exclusions(
            project,
            &spring_boot_starter_web(),
            &[tomcat()],
        )?;
        self.build_tool
            .add_dependency(project, &starter("spring-boot-starter-undertow"))?;

        self.add_server_port(project)?;
        self.add_exception_handler(project)?;
        add_logger_everywhere(self.logging.as_ref(), project, "io.undertow", Level::Warn)?;
        info!("Spring MVC (Undertow) applied");
        Ok(())
    }

    #[instrument(skip_all)]
    fn add_spring_boot_actuator(&self, project: &mut Project) -> KilnResult<()> {
        self.build_tool
            .add_dependency(project, &starter("spring-boot-starter-actuator"))?;

        for (key, value) in [
            ("management.endpoints.web.base-path", "/management"),
            (
                "management.endpoints.web.exposure.include",
                "configprops, env, health, info, logfile, loggers, threaddump",
            ),
            ("management.endpoint.health.probes.enabled", "true"),
            (
                "management.endpoint.health.group.liveness.include",
                "livenessState",
            ),
            (
                "management.endpoint.health.group.readiness.include",
                "readinessState",
            ),
        ] {
            self.properties
                .add_properties(project, key, ConfigValue::parse(value))?;
        }
        info!("Spring Boot Actuator applied");
        Ok(())
    }

    fn add_exception_handler(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(PACKAGE_NAME);

        if let Some(version) = defaults::catalog_version("org.zalando", "problem-spring-web") {
            self.build_tool
                .add_property(project, "problem-spring.version", version)?;
        }
        self.build_tool.add_dependency(project, &problem_spring_web())?;
        self.build_tool
            .add_dependency(project, &starter("spring-boot-starter-validation"))?;

        let package_name = project.package_name().unwrap_or_default();
        self.properties.add_properties(
            project,
            "application.exception.details",
            ConfigValue::Boolean(false),
        )?;
        self.properties.add_properties(
            project,
            "application.exception.package",
            ConfigValue::String(format!("org.,java.,net.,javax.,com.,io.,de.,{package_name}")),
        )?;
        self.properties.add_properties_test(
            project,
            "application.exception.package",
            ConfigValue::String("org.,java.".into()),
        )?;

        for filename in EXCEPTION_HANDLER_MAIN {
            self.template_to_exception_handler(project, "src", filename, MAIN_JAVA)?;
        }
        for filename in EXCEPTION_HANDLER_TEST {
            self.template_to_exception_handler(project, "test", filename, TEST_JAVA)?;
        }

        let package_path = project.package_name_path();
        self.repository.template(
            project,
            &join_path(&[SOURCE, "test"]),
            "TestUtil.java",
            &join_path(&[TEST_JAVA, &package_path]),
        )?;
        Ok(())
    }
}

impl Module for SpringBootMvcDomainService {
    fn slug(&self) -> &'static str {
        "springboot-mvc"
    }

    fn description(&self) -> &'static str {
        "Spring MVC web server on Tomcat with exception handler"
    }

    fn init(&self, project: &mut Project) -> KilnResult<()> {
        self.add_spring_boot_mvc(project)
    }
}
