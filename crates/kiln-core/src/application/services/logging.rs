use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ports::ProjectRepository,
    domain::{
        Change, Level, Project, TextEdit,
        defaults::{MAIN_RESOURCES, NEEDLE_LOGBACK, TEST_RESOURCES},
    },
    error::KilnResult,
};

pub const LOGBACK_MAIN: &str = "logback-spring.xml";
pub const LOGBACK_TEST: &str = "logback.xml";

/// Logger registrations in the generated logback files.
#[cfg_attr(test, mockall::automock)]
pub trait LoggingService: Send + Sync {
    fn add_logger(&self, project: &Project, package_name: &str, level: Level)
    -> KilnResult<Change>;

    fn add_logger_test(
        &self,
        project: &Project,
        package_name: &str,
        level: Level,
    ) -> KilnResult<Change>;
}

/// Register a logger in both the main and the test logback file.
pub fn add_logger_everywhere(
    logging: &dyn LoggingService,
    project: &Project,
    package_name: &str,
    level: Level,
) -> KilnResult<()> {
    logging.add_logger(project, package_name, level)?;
    logging.add_logger_test(project, package_name, level)?;
    Ok(())
}

pub fn logger_line(package_name: &str, level: Level) -> String {
    format!("<logger name=\"{package_name}\" level=\"{level}\" />")
}

pub struct LoggingDomainService {
    repository: Arc<dyn ProjectRepository>,
}

impl LoggingDomainService {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    fn insert(
        &self,
        project: &Project,
        dir: &str,
        filename: &str,
        package_name: &str,
        level: Level,
    ) -> KilnResult<Change> {
        let edit = TextEdit::insert_before_needle(
            NEEDLE_LOGBACK,
            logger_line(package_name, level),
            project.indent_width(),
        );
        let change = self.repository.replace_text(project, dir, filename, &edit)?;
        debug!(?change, file = filename, "Logger registered");
        Ok(change)
    }
}

impl LoggingService for LoggingDomainService {
    #[instrument(skip(self, project))]
    fn add_logger(
        &self,
        project: &Project,
        package_name: &str,
        level: Level,
    ) -> KilnResult<Change> {
        self.insert(project, MAIN_RESOURCES, LOGBACK_MAIN, package_name, level)
    }

    #[instrument(skip(self, project))]
    fn add_logger_test(
        &self,
        project: &Project,
        package_name: &str,
        level: Level,
    ) -> KilnResult<Change> {
        self.insert(project, TEST_RESOURCES, LOGBACK_TEST, package_name, level)
    }
}
