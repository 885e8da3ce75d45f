//! Liquibase database migrations.
//!
//! The master changelog carries the liquibase needle; every later migration
//! registers its changelog file above it with [`LiquibaseService::add_changelog_xml`].

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        modules::{Module, SpringBootService},
        ports::ProjectRepository,
        services::{BuildToolService, LoggingService, logging::add_logger_everywhere},
    },
    domain::{
        Change, Dependency, Level, Project, Scope, TextEdit,
        defaults::{MAIN_JAVA, MAIN_RESOURCES, NEEDLE_LIQUIBASE, PACKAGE_NAME, TEST_JAVA, join_path},
    },
    error::KilnResult,
};

pub const SOURCE: &str = "server/springboot/dbmigration/liquibase";
pub const LIQUIBASE_PATH: &str = "technical/infrastructure/secondary/liquibase";
pub const MASTER_XML: &str = "master.xml";
pub const CONFIG_LIQUIBASE: &str = "config/liquibase";

const CONFIGURATION_MAIN: &[&str] = &[
    "AsyncSpringLiquibase.java",
    "LiquibaseConfiguration.java",
    "SpringLiquibaseUtil.java",
];

const CONFIGURATION_TEST: &[&str] = &[
    "AsyncSpringLiquibaseTest.java",
    "LiquibaseConfigurationIT.java",
    "SpringLiquibaseUtilTest.java",
];

/// `<include>` element registering a changelog in the master file.
pub fn include_line(path: &str, file_name: &str) -> String {
    format!(
        "<include file=\"classpath:{}\" relativeToChangelogFile=\"false\"/>",
        join_path(&[CONFIG_LIQUIBASE, path, file_name])
    )
}

pub trait LiquibaseService: Send + Sync {
    fn add_liquibase(&self, project: &Project) -> KilnResult<()>;

    fn add_changelog_master_xml(&self, project: &Project) -> KilnResult<()>;

    /// Register `config/liquibase/{path}/{file_name}` in the master file.
    fn add_changelog_xml(&self, project: &Project, path: &str, file_name: &str)
    -> KilnResult<Change>;

    fn add_configuration_java(&self, project: &mut Project) -> KilnResult<()>;

    fn add_logger_in_configuration(&self, project: &Project) -> KilnResult<()>;
}

pub struct LiquibaseDomainService {
    repository: Arc<dyn ProjectRepository>,
    build_tool: Arc<dyn BuildToolService>,
    spring_boot: Arc<dyn SpringBootService>,
    logging: Arc<dyn LoggingService>,
}

impl LiquibaseDomainService {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        build_tool: Arc<dyn BuildToolService>,
        spring_boot: Arc<dyn SpringBootService>,
        logging: Arc<dyn LoggingService>,
    ) -> Self {
        Self {
            repository,
            build_tool,
            spring_boot,
            logging,
        }
    }

    fn template_to_liquibase(
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
            &join_path(&[layer, &package_path, LIQUIBASE_PATH]),
        )
    }
}

impl LiquibaseService for LiquibaseDomainService {
    fn add_liquibase(&self, project: &Project) -> KilnResult<()> {
        let core = Dependency::builder()
            .group_id("org.liquibase")
            .artifact_id("liquibase-core")
            .build()?;
        self.build_tool.add_dependency(project, &core)?;

        let h2 = Dependency::builder()
            .group_id("com.h2database")
            .artifact_id("h2")
            .scope(Scope::Test)
            .build()?;
        self.build_tool.add_dependency(project, &h2)?;
        Ok(())
    }

    fn add_changelog_master_xml(&self, project: &Project) -> KilnResult<()> {
        self.repository.add(
            project,
            &join_path(&[SOURCE, "resources"]),
            MASTER_XML,
            &join_path(&[MAIN_RESOURCES, CONFIG_LIQUIBASE]),
        )
    }

    #[instrument(skip(self, project))]
    fn add_changelog_xml(
        &self,
        project: &Project,
        path: &str,
        file_name: &str,
    ) -> KilnResult<Change> {
        let edit = TextEdit::insert_before_needle(
            NEEDLE_LIQUIBASE,
            include_line(path, file_name),
            project.indent_width(),
        );
        self.repository.replace_text(
            project,
            &join_path(&[MAIN_RESOURCES, CONFIG_LIQUIBASE]),
            MASTER_XML,
            &edit,
        )
    }

    fn add_configuration_java(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(PACKAGE_NAME);

        for filename in CONFIGURATION_MAIN {
            self.template_to_liquibase(project, "src", filename, MAIN_JAVA)?;
        }

        self.spring_boot.add_test_logback_recorder(project)?;
        for filename in CONFIGURATION_TEST {
            self.template_to_liquibase(project, "test", filename, TEST_JAVA)?;
        }
        Ok(())
    }

    fn add_logger_in_configuration(&self, project: &Project) -> KilnResult<()> {
        add_logger_everywhere(self.logging.as_ref(), project, "liquibase", Level::Warn)?;
        add_logger_everywhere(
            self.logging.as_ref(),
            project,
            "LiquibaseSchemaResolver",
            Level::Info,
        )?;
        Ok(())
    }
}

impl Module for LiquibaseDomainService {
    fn slug(&self) -> &'static str {
        "liquibase"
    }

    fn description(&self) -> &'static str {
        "Liquibase migrations with a master changelog"
    }

    #[instrument(skip_all, fields(folder = %project.folder().display()))]
    fn init(&self, project: &mut Project) -> KilnResult<()> {
        self.add_liquibase(project)?;
        self.add_changelog_master_xml(project)?;
        self.add_configuration_java(project)?;
        self.add_logger_in_configuration(project)?;
        info!("Liquibase applied");
        Ok(())
    }
}
