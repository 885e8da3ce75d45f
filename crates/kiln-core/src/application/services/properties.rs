use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ports::ProjectRepository,
    domain::{
        Change, ConfigValue, Project, PropertiesFile, PropertyTarget,
        defaults::{MAIN_RESOURCES, TEST_RESOURCES, join_path},
    },
    error::KilnResult,
};

pub const APPLICATION_PROPERTIES: &str = "application.properties";

/// Directory holding the runtime configuration file for a target.
pub fn properties_dir(target: PropertyTarget) -> String {
    let root = match target {
        PropertyTarget::Main => MAIN_RESOURCES,
        PropertyTarget::Test => TEST_RESOURCES,
    };
    join_path(&[root, "config"])
}

/// Runtime configuration properties (`application.properties`).
#[cfg_attr(test, mockall::automock)]
pub trait PropertiesService: Send + Sync {
    fn add_properties(&self, project: &Project, key: &str, value: ConfigValue)
    -> KilnResult<Change>;

    fn add_properties_test(
        &self,
        project: &Project,
        key: &str,
        value: ConfigValue,
    ) -> KilnResult<Change>;
}

pub struct PropertiesDomainService {
    repository: Arc<dyn ProjectRepository>,
}

impl PropertiesDomainService {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    /// Upsert into the target file, creating it when missing.
    #[instrument(skip(self, project, value))]
    fn upsert(
        &self,
        project: &Project,
        target: PropertyTarget,
        key: &str,
        value: ConfigValue,
    ) -> KilnResult<Change> {
        let dir = properties_dir(target);

        let mut file = if self.repository.exists(project, &dir, APPLICATION_PROPERTIES) {
            PropertiesFile::parse(&self.repository.read(project, &dir, APPLICATION_PROPERTIES)?)
        } else {
            PropertiesFile::new()
        };

        let change = file.set(key, value);
        if !change.is_noop() {
            self.repository
                .write(project, &file.render(), &dir, APPLICATION_PROPERTIES)?;
        }

        debug!(?change, "Property set");
        Ok(change)
    }
}

impl PropertiesService for PropertiesDomainService {
    fn add_properties(
        &self,
        project: &Project,
        key: &str,
        value: ConfigValue,
    ) -> KilnResult<Change> {
        self.upsert(project, PropertyTarget::Main, key, value)
    }

    fn add_properties_test(
        &self,
        project: &Project,
        key: &str,
        value: ConfigValue,
    ) -> KilnResult<Change> {
        self.upsert(project, PropertyTarget::Test, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockProjectRepository;

    fn project() -> Project {
        Project::new(std::env::temp_dir().join("kiln-properties")).unwrap()
    }

    #[test]
    fn missing_file_is_created() {
        let mut repository = MockProjectRepository::new();
        repository
            .expect_exists()
            .withf(|_, dir, file| dir == "src/main/resources/config" && file == APPLICATION_PROPERTIES)
            .return_const(false);
        repository.expect_read().never();
        repository
            .expect_write()
            .withf(|_, text, dir, file| {
                text == "server.port=8080\n"
                    && dir == "src/main/resources/config"
                    && file == APPLICATION_PROPERTIES
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let service = PropertiesDomainService::new(Arc::new(repository));
        let change = service
            .add_properties(&project(), "server.port", 8080.into())
            .unwrap();

        assert_eq!(change, Change::Added);
    }

    #[test]
    fn existing_value_is_replaced_in_test_file() {
        let mut repository = MockProjectRepository::new();
        repository.expect_exists().return_const(true);
        repository
            .expect_read()
            .withf(|_, dir, _| dir == "src/test/resources/config")
            .returning(|_, _, _| Ok("# test\nserver.port=8080\n".into()));
        repository
            .expect_write()
            .withf(|_, text, _, _| text == "# test\nserver.port=0\n")
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let service = PropertiesDomainService::new(Arc::new(repository));
        let change = service
            .add_properties_test(&project(), "server.port", 0.into())
            .unwrap();

        assert_eq!(change, Change::Updated);
    }

    #[test]
    fn identical_value_does_not_rewrite() {
        let mut repository = MockProjectRepository::new();
        repository.expect_exists().return_const(true);
        repository
            .expect_read()
            .returning(|_, _, _| Ok("application.exception.details=false\n".into()));
        repository.expect_write().never();

        let service = PropertiesDomainService::new(Arc::new(repository));
        let change = service
            .add_properties(&project(), "application.exception.details", false.into())
            .unwrap();

        assert_eq!(change, Change::Unchanged);
    }
}
