//! Caching: Spring Boot JCache support and Ehcache as its provider, either
//! configured from Java properties or from an `ehcache.xml` file.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        modules::Module,
        ports::ProjectRepository,
        services::{BuildToolService, PropertiesService},
    },
    domain::{
        ConfigValue, Dependency, Project, Scope,
        defaults::{BASE_NAME, MAIN_JAVA, MAIN_RESOURCES, PACKAGE_NAME, TEST_JAVA, join_path},
    },
    error::KilnResult,
};

pub const JCACHE_SOURCE: &str = "server/springboot/cache/jcache";
pub const EHCACHE_SOURCE: &str = "server/springboot/cache/ehcache";
pub const CACHE_PATH: &str = "technical/infrastructure/secondary/cache";
pub const EHCACHE_PATH: &str = "technical/infrastructure/secondary/cache/ehcache";

fn dependency(group_id: &str, artifact_id: &str) -> Dependency {
    Dependency {
        group_id: group_id.to_string(),
        artifact_id: artifact_id.to_string(),
        version: None,
        scope: Scope::Compile,
        optional: false,
        dependency_type: None,
        exclusions: Vec::new(),
    }
}

fn template_to(
    repository: &dyn ProjectRepository,
    project: &Project,
    source: &str,
    kind: &str,
    filename: &str,
    layer: &str,
    suffix: &str,
) -> KilnResult<()> {
    let package_path = project.package_name_path();
    repository.template(
        project,
        &join_path(&[source, kind]),
        filename,
        &join_path(&[layer, &package_path, suffix]),
    )
}

// ── JCache ───────────────────────────────────────────────────────────────────

pub trait SpringBootJCacheService: Send + Sync {
    fn add_dependencies(&self, project: &Project) -> KilnResult<()>;

    fn add_enable_caching(&self, project: &mut Project) -> KilnResult<()>;

    fn add_java_config(&self, project: &mut Project) -> KilnResult<()>;
}

pub struct SpringBootJCacheDomainService {
    repository: Arc<dyn ProjectRepository>,
    build_tool: Arc<dyn BuildToolService>,
}

impl SpringBootJCacheDomainService {
    pub fn new(repository: Arc<dyn ProjectRepository>, build_tool: Arc<dyn BuildToolService>) -> Self {
        Self {
            repository,
            build_tool,
        }
    }
}

impl SpringBootJCacheService for SpringBootJCacheDomainService {
    fn add_dependencies(&self, project: &Project) -> KilnResult<()> {
        self.build_tool.add_dependency(
            project,
            &dependency("org.springframework.boot", "spring-boot-starter-cache"),
        )?;
        self.build_tool
            .add_dependency(project, &dependency("javax.cache", "cache-api"))?;
        Ok(())
    }

    fn add_enable_caching(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(PACKAGE_NAME);
        template_to(
            self.repository.as_ref(),
            project,
            JCACHE_SOURCE,
            "src",
            "CacheConfiguration.java",
            MAIN_JAVA,
            CACHE_PATH,
        )
    }

    fn add_java_config(&self, project: &mut Project) -> KilnResult<()> {
        project.add_default_config(PACKAGE_NAME);
        template_to(
            self.repository.as_ref(),
            project,
            JCACHE_SOURCE,
            "src",
            "JCacheConfiguration.java",
            MAIN_JAVA,
            CACHE_PATH,
        )
    }
}

impl Module for SpringBootJCacheDomainService {
    fn slug(&self) -> &'static str {
        "springboot-jcache"
    }

    fn description(&self) -> &'static str {
        "Spring Cache abstraction on JCache (JSR-107)"
    }

    #[instrument(skip_all)]
    fn init(&self, project: &mut Project) -> KilnResult<()> {
        self.add_dependencies(project)?;
        self.add_enable_caching(project)?;
        self.add_java_config(project)?;
        info!("JCache applied");
        Ok(())
    }
}

// ── Ehcache ──────────────────────────────────────────────────────────────────

pub trait EhcacheService: Send + Sync {
    fn init_java_configuration(&self, project: &mut Project) -> KilnResult<()>;

    fn init_xml_configuration(&self, project: &mut Project) -> KilnResult<()>;

    fn add_dependencies(&self, project: &Project) -> KilnResult<()>;

    fn add_xml_dependencies(&self, project: &Project) -> KilnResult<()>;

    fn add_enable_caching(&self, project: &mut Project) -> KilnResult<()>;

    fn add_ehcache_xml(&self, project: &Project) -> KilnResult<()>;

    fn add_xml_property(&self, project: &Project) -> KilnResult<()>;

    fn add_java_config(&self, project: &mut Project) -> KilnResult<()>;

    fn add_java_properties(&self, project: &Project) -> KilnResult<()>;
}

pub struct EhcacheDomainService {
    repository: Arc<dyn ProjectRepository>,
    build_tool: Arc<dyn BuildToolService>,
    jcache: Arc<dyn SpringBootJCacheService>,
    properties: Arc<dyn PropertiesService>,
}

impl EhcacheDomainService {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        build_tool: Arc<dyn BuildToolService>,
        jcache: Arc<dyn SpringBootJCacheService>,
        properties: Arc<dyn PropertiesService>,
    ) -> Self {
        Self {
            repository,
            build_tool,
            jcache,
            properties,
        }
    }
}

impl EhcacheService for EhcacheDomainService {
    #[instrument(skip_all)]
    fn init_java_configuration(&self, project: &mut Project) -> KilnResult<()> {
        self.add_dependencies(project)?;
        self.add_enable_caching(project)?;
        self.add_java_config(project)?;
        self.add_java_properties(project)?;
        info!("Ehcache (Java configuration) applied");
        Ok(())
    }

    #[instrument(skip_all)]
    fn init_xml_configuration(&self, project: &mut Project) -> KilnResult<()> {
        self.add_dependencies(project)?;
        self.add_xml_dependencies(project)?;
        self.add_enable_caching(project)?;
        self.add_ehcache_xml(project)?;
        self.add_xml_property(project)?;
        info!("Ehcache (XML configuration) applied");
        Ok(())
    }

    fn add_dependencies(&self, project: &Project) -> KilnResult<()> {
        self.jcache.add_dependencies(project)?;
        self.build_tool
            .add_dependency(project, &dependency("org.ehcache", "ehcache"))?;
        Ok(())
    }

    fn add_xml_dependencies(&self, project: &Project) -> KilnResult<()> {
        self.build_tool.add_dependency(
            project,
            &dependency("jakarta.xml.bind", "jakarta.xml.bind-api"),
        )?;
        self.build_tool
            .add_dependency(project, &dependency("org.glassfish.jaxb", "jaxb-runtime"))?;
        Ok(())
    }

    fn add_enable_caching(&self, project: &mut Project) -> KilnResult<()> {
        self.jcache.add_enable_caching(project)
    }

    fn add_ehcache_xml(&self, project: &Project) -> KilnResult<()> {
        self.repository.add(
            project,
            &join_path(&[EHCACHE_SOURCE, "resources"]),
            "ehcache.xml",
            &join_path(&[MAIN_RESOURCES, "config/ehcache"]),
        )
    }

    fn add_xml_property(&self, project: &Project) -> KilnResult<()> {
        self.properties.add_properties(
            project,
            "spring.cache.jcache.config",
            ConfigValue::String("classpath:config/ehcache/ehcache.xml".into()),
        )?;
        Ok(())
    }

    fn add_java_config(&self, project: &mut Project) -> KilnResult<()> {
        self.jcache.add_java_config(project)?;

        project.add_default_config(PACKAGE_NAME);
        project.add_default_config(BASE_NAME);

        for filename in [
            "EhcacheConfiguration.java",
            "EhcacheConfigurer.java",
            "EhcacheProperties.java",
        ] {
            template_to(
                self.repository.as_ref(),
                project,
                EHCACHE_SOURCE,
                "src",
                filename,
                MAIN_JAVA,
                EHCACHE_PATH,
            )?;
        }
        template_to(
            self.repository.as_ref(),
            project,
            EHCACHE_SOURCE,
            "test",
            "EhcacheConfigurationIT.java",
            TEST_JAVA,
            EHCACHE_PATH,
        )
    }

    fn add_java_properties(&self, project: &Project) -> KilnResult<()> {
        self.properties.add_properties(
            project,
            "application.cache.ehcache.max-entries",
            ConfigValue::Integer(100),
        )?;
        self.properties.add_properties(
            project,
            "application.cache.ehcache.time-to-live-seconds",
            ConfigValue::Integer(3600),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::{
            modules::testing::FakeRepository,
            services::{build_tool::MockBuildToolService, properties::MockPropertiesService},
        },
        domain::Change,
    };
    use std::sync::Mutex;

    /// Build tool double recording artifact ids in call order.
    fn recording_build_tool(seen: Arc<Mutex<Vec<String>>>) -> MockBuildToolService {
        let mut build_tool = MockBuildToolService::new();
        build_tool.expect_add_dependency().returning(move |_, d| {
            seen.lock().unwrap().push(d.artifact_id.clone());
            Ok(Change::Added)
        });
        build_tool
    }

    fn project() -> Project {
        Project::builder()
            .folder(std::env::temp_dir().join("kiln-cache"))
            .package_name("tech.jhipster.chips")
            .build()
            .unwrap()
    }

    fn services(
        build_tool: MockBuildToolService,
        properties: MockPropertiesService,
    ) -> (Arc<FakeRepository>, EhcacheDomainService) {
        let repository = Arc::new(FakeRepository::default());
        let build_tool: Arc<dyn BuildToolService> = Arc::new(build_tool);
        let jcache = Arc::new(SpringBootJCacheDomainService::new(
            repository.clone(),
            Arc::clone(&build_tool),
        ));
        let ehcache = EhcacheDomainService::new(
            repository.clone(),
            build_tool,
            jcache,
            Arc::new(properties),
        );
        (repository, ehcache)
    }

    #[test]
    fn xml_configuration_recipe() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut properties = MockPropertiesService::new();
        properties
            .expect_add_properties()
            .withf(|_, key, value| {
                key == "spring.cache.jcache.config"
                    && *value == ConfigValue::String("classpath:config/ehcache/ehcache.xml".into())
            })
            .times(1)
            .returning(|_, _, _| Ok(Change::Added));

        let (repository, service) = services(recording_build_tool(Arc::clone(&seen)), properties);
        service.init_xml_configuration(&mut project()).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "spring-boot-starter-cache",
                "cache-api",
                "ehcache",
                "jakarta.xml.bind-api",
                "jaxb-runtime",
            ]
        );
        let paths = repository.paths();
        assert!(paths.contains(&"src/main/resources/config/ehcache/ehcache.xml".to_string()));
        assert!(paths.contains(
            &"src/main/java/tech/jhipster/chips/technical/infrastructure/secondary/cache/CacheConfiguration.java"
                .to_string()
        ));
    }

    #[test]
    fn java_configuration_recipe() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut properties = MockPropertiesService::new();
        properties
            .expect_add_properties()
            .withf(|_, key, value| {
                key == "application.cache.ehcache.max-entries" && *value == ConfigValue::Integer(100)
            })
            .times(1)
            .returning(|_, _, _| Ok(Change::Added));
        properties
            .expect_add_properties()
            .withf(|_, key, value| {
                key == "application.cache.ehcache.time-to-live-seconds"
                    && *value == ConfigValue::Integer(3600)
            })
            .times(1)
            .returning(|_, _, _| Ok(Change::Added));

        let (repository, service) = services(recording_build_tool(Arc::clone(&seen)), properties);
        let mut project = project();
        service.init_java_configuration(&mut project).unwrap();

        assert_eq!(project.base_name().as_deref(), Some("jhipster"));
        let ehcache_dir =
            "src/main/java/tech/jhipster/chips/technical/infrastructure/secondary/cache/ehcache";
        for file in [
            "EhcacheConfiguration.java",
            "EhcacheConfigurer.java",
            "EhcacheProperties.java",
        ] {
            assert!(repository.paths().contains(&format!("{ehcache_dir}/{file}")));
        }
        assert!(!seen.lock().unwrap().contains(&"jaxb-runtime".to_string()));
    }
}
