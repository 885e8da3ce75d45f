//! Slug → module lookup, plus the wiring of every shipped module.

use std::sync::Arc;

use tracing::debug;

use crate::{
    application::{
        ApplicationError,
        modules::{
            EhcacheDomainService, EhcacheService, InitDomainService, LiquibaseDomainService,
            Module, ServiceModule, SonarDomainService, SpringBootDomainService,
            SpringBootJCacheDomainService, SpringBootMvcDomainService, SpringBootMvcService,
            SpringBootService,
        },
        ports::{BuildDescriptorRepository, ProjectRepository, ResourceStore},
        services::{
            BuildToolDomainService, BuildToolService, LoggingDomainService, LoggingService,
            PropertiesDomainService, PropertiesService,
        },
    },
    error::KilnResult,
};

/// Information about a module for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ModuleInfo {
    pub slug: String,
    pub description: String,
}

/// Immutable after construction; shared by reference between requests.
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    pub fn builder() -> ModuleRegistryBuilder {
        ModuleRegistryBuilder::default()
    }

    pub fn get(&self, slug: &str) -> KilnResult<Arc<dyn Module>> {
        self.modules
            .iter()
            .find(|m| m.slug() == slug)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::ModuleNotFound {
                    slug: slug.to_string(),
                }
                .into()
            })
    }

    /// Modules in registration order.
    pub fn list(&self) -> Vec<ModuleInfo> {
        self.modules
            .iter()
            .map(|m| ModuleInfo {
                slug: m.slug().to_string(),
                description: m.description().to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[derive(Default)]
pub struct ModuleRegistryBuilder {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistryBuilder {
    /// Register a module. Slugs are unique.
    pub fn register(mut self, module: Arc<dyn Module>) -> KilnResult<Self> {
        if self.modules.iter().any(|m| m.slug() == module.slug()) {
            return Err(ApplicationError::DuplicateModule {
                slug: module.slug().to_string(),
            }
            .into());
        }
        debug!(slug = module.slug(), "Module registered");
        self.modules.push(module);
        Ok(self)
    }

    pub fn build(self) -> ModuleRegistry {
        ModuleRegistry {
            modules: self.modules,
        }
    }
}

/// Wire every shipped module onto the given ports.
pub fn standard_registry(
    repository: Arc<dyn ProjectRepository>,
    resources: Arc<dyn ResourceStore>,
    descriptors: Arc<dyn BuildDescriptorRepository>,
) -> KilnResult<ModuleRegistry> {
    let build_tool = Arc::new(BuildToolDomainService::new(descriptors));
    let build_tool_service: Arc<dyn BuildToolService> = build_tool.clone();
    let properties: Arc<dyn PropertiesService> =
        Arc::new(PropertiesDomainService::new(Arc::clone(&repository)));
    let logging: Arc<dyn LoggingService> =
        Arc::new(LoggingDomainService::new(Arc::clone(&repository)));

    let init = Arc::new(InitDomainService::new(Arc::clone(&repository), resources));

    let spring_boot = Arc::new(SpringBootDomainService::new(
        Arc::clone(&repository),
        Arc::clone(&build_tool_service),
        Arc::clone(&properties),
    ));
    let spring_boot_service: Arc<dyn SpringBootService> = spring_boot.clone();

    let mvc = Arc::new(SpringBootMvcDomainService::new(
        Arc::clone(&repository),
        Arc::clone(&build_tool_service),
        Arc::clone(&properties),
        Arc::clone(&logging),
    ));
    let mvc_service: Arc<dyn SpringBootMvcService> = mvc.clone();

    let liquibase = Arc::new(LiquibaseDomainService::new(
        Arc::clone(&repository),
        Arc::clone(&build_tool_service),
        spring_boot_service,
        Arc::clone(&logging),
    ));

    let jcache = Arc::new(SpringBootJCacheDomainService::new(
        Arc::clone(&repository),
        Arc::clone(&build_tool_service),
    ));
    let ehcache: Arc<dyn EhcacheService> = Arc::new(EhcacheDomainService::new(
        Arc::clone(&repository),
        Arc::clone(&build_tool_service),
        jcache.clone(),
        Arc::clone(&properties),
    ));

    let sonar = Arc::new(SonarDomainService::new(
        Arc::clone(&repository),
        build_tool_service,
    ));

    Ok(ModuleRegistry::builder()
        .register(init)?
        .register(build_tool)?
        .register(spring_boot)?
        .register(mvc)?
        .register(Arc::new(ServiceModule::new(
            "springboot-undertow",
            "Spring MVC web server on Undertow instead of Tomcat",
            Arc::clone(&mvc_service),
            |s, p| s.add_spring_boot_undertow(p),
        )))?
        .register(Arc::new(ServiceModule::new(
            "springboot-actuator",
            "Spring Boot Actuator with management endpoints",
            mvc_service,
            |s, p| s.add_spring_boot_actuator(p),
        )))?
        .register(liquibase)?
        .register(jcache)?
        .register(Arc::new(ServiceModule::new(
            "ehcache-java-config",
            "Ehcache configured from application properties",
            Arc::clone(&ehcache),
            |s, p| s.init_java_configuration(p),
        )))?
        .register(Arc::new(ServiceModule::new(
            "ehcache-xml-config",
            "Ehcache configured from ehcache.xml",
            ehcache,
            |s, p| s.init_xml_configuration(p),
        )))?
        .register(sonar)?
        .build())
}
