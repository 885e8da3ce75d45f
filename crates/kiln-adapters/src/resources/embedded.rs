//! Resources compiled into the binary.

use kiln_core::{
    application::{ApplicationError, ports::ResourceStore},
    error::KilnResult,
};

macro_rules! embedded {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../../resources/", $path)))),*]
    };
}

/// Sorted by path.
static RESOURCES: &[(&str, &str)] = embedded![
    "init/README.md",
    "init/editorconfig",
    "init/gitignore",
    "server/sonar/sonar-project.properties",
    "server/sonar/sonar.yml",
    "server/springboot/cache/ehcache/resources/ehcache.xml",
    "server/springboot/cache/ehcache/src/EhcacheConfiguration.java",
    "server/springboot/cache/ehcache/src/EhcacheConfigurer.java",
    "server/springboot/cache/ehcache/src/EhcacheProperties.java",
    "server/springboot/cache/ehcache/test/EhcacheConfigurationIT.java",
    "server/springboot/cache/jcache/src/CacheConfiguration.java",
    "server/springboot/cache/jcache/src/JCacheConfiguration.java",
    "server/springboot/core/resources/application.properties",
    "server/springboot/core/resources/logback-spring.xml",
    "server/springboot/core/resources/test/application.properties",
    "server/springboot/core/resources/test/logback.xml",
    "server/springboot/core/src/MainApp.java",
    "server/springboot/core/test/IntegrationTest.java",
    "server/springboot/core/test/LogbackRecorder.java",
    "server/springboot/dbmigration/liquibase/resources/master.xml",
    "server/springboot/dbmigration/liquibase/src/AsyncSpringLiquibase.java",
    "server/springboot/dbmigration/liquibase/src/LiquibaseConfiguration.java",
    "server/springboot/dbmigration/liquibase/src/SpringLiquibaseUtil.java",
    "server/springboot/dbmigration/liquibase/test/AsyncSpringLiquibaseTest.java",
    "server/springboot/dbmigration/liquibase/test/LiquibaseConfigurationIT.java",
    "server/springboot/dbmigration/liquibase/test/SpringLiquibaseUtilTest.java",
    "server/springboot/mvc/web/src/BadRequestAlertException.java",
    "server/springboot/mvc/web/src/ErrorConstants.java",
    "server/springboot/mvc/web/src/ExceptionTranslator.java",
    "server/springboot/mvc/web/src/FieldErrorDTO.java",
    "server/springboot/mvc/web/src/HeaderUtil.java",
    "server/springboot/mvc/web/src/ProblemConfiguration.java",
    "server/springboot/mvc/web/test/BadRequestAlertExceptionTest.java",
    "server/springboot/mvc/web/test/ExceptionTranslatorIT.java",
    "server/springboot/mvc/web/test/ExceptionTranslatorTestController.java",
    "server/springboot/mvc/web/test/FieldErrorDTOTest.java",
    "server/springboot/mvc/web/test/HeaderUtilTest.java",
    "server/springboot/mvc/web/test/TestUtil.java",
];

/// The resource set shipped with kiln.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl EmbeddedResources {
    pub fn new() -> Self {
        Self
    }

    pub fn get(&self, path: &str) -> Option<&'static str> {
        RESOURCES
            .binary_search_by(|(p, _)| (*p).cmp(path))
            .ok()
            .map(|i| RESOURCES[i].1)
    }
}

impl ResourceStore for EmbeddedResources {
    fn read(&self, path: &str) -> KilnResult<String> {
        self.get(path).map(str::to_string).ok_or_else(|| {
            ApplicationError::ResourceNotFound {
                path: path.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> Vec<String> {
        RESOURCES.iter().map(|(p, _)| p.to_string()).collect()
    }
}
