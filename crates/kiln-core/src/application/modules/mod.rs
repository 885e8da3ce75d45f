//! Feature modules.
//!
//! Each module is one capability trait plus one domain service struct that
//! receives its collaborators in `new`. Every module is also a [`Module`],
//! the uniform entry point the registry dispatches to.

use std::sync::Arc;

use crate::{domain::Project, error::KilnResult};

pub mod cache;
pub mod init;
pub mod liquibase;
pub mod mvc;
pub mod registry;
pub mod sonar;
pub mod springboot;

pub use cache::{EhcacheDomainService, EhcacheService, SpringBootJCacheDomainService, SpringBootJCacheService};
pub use init::{InitDomainService, InitService};
pub use liquibase::{LiquibaseDomainService, LiquibaseService};
pub use mvc::{SpringBootMvcDomainService, SpringBootMvcService};
pub use registry::{ModuleInfo, ModuleRegistry, ModuleRegistryBuilder, standard_registry};
pub use sonar::{SonarDomainService, SonarService};
pub use springboot::{SpringBootDomainService, SpringBootService};

/// A named, applicable unit of project mutation.
pub trait Module: Send + Sync {
    /// Stable identifier used on the command line.
    fn slug(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Apply the module's full recipe. Idempotent.
    fn init(&self, project: &mut Project) -> KilnResult<()>;
}

/// Exposes one operation of a multi-recipe service as its own module.
pub struct ServiceModule<S: ?Sized> {
    slug: &'static str,
    description: &'static str,
    service: Arc<S>,
    run: fn(&S, &mut Project) -> KilnResult<()>,
}

impl<S: ?Sized> ServiceModule<S> {
    pub fn new(
        slug: &'static str,
        description: &'static str,
        service: Arc<S>,
        run: fn(&S, &mut Project) -> KilnResult<()>,
    ) -> Self {
        Self {
            slug,
            description,
            service,
            run,
        }
    }
}

impl<S: ?Sized + Send + Sync> Module for ServiceModule<S> {
    fn slug(&self) -> &'static str {
        self.slug
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn init(&self, project: &mut Project) -> KilnResult<()> {
        (self.run)(self.service.as_ref(), project)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self, project: &mut Project) -> KilnResult<()>;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self, project: &mut Project) -> KilnResult<()> {
            project.add_config("greeting", "hello");
            Ok(())
        }
    }

    #[test]
    fn service_module_runs_selected_operation() {
        let service: Arc<dyn Greeter> = Arc::new(Hello);
        let module = ServiceModule::new(
            "hello",
            "Says hello",
            service,
            |s, p| s.greet(p),
        );
        let mut project = Project::new(std::env::temp_dir()).unwrap();

        module.init(&mut project).unwrap();

        assert_eq!(module.slug(), "hello");
        assert_eq!(
            project.get_string_config("greeting").unwrap().as_deref(),
            Some("hello")
        );
    }
}
