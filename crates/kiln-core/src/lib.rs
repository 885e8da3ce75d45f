//! Kiln Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Kiln
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             kiln-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   GeneratorService + ModuleRegistry     │
//! │   Modules (springboot, liquibase, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ProjectRepository, ResourceStore, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    kiln-adapters (Infrastructure)       │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Project, BuildDescriptor, TextEdit)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kiln_core::prelude::*;
//!
//! # fn run(
//! #     repository: Arc<dyn ProjectRepository>,
//! #     resources: Arc<dyn ResourceStore>,
//! #     descriptors: Arc<dyn BuildDescriptorRepository>,
//! # ) -> KilnResult<()> {
//! let registry = standard_registry(repository, resources, descriptors)?;
//! let generator = GeneratorService::new(Arc::new(registry));
//!
//! let mut project = Project::builder()
//!     .folder("/tmp/chips")
//!     .package_name("tech.jhipster.chips")
//!     .build()?;
//! generator.apply(&mut project, &["build-tool".to_string(), "liquibase".to_string()])?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplyReport, GeneratorService, Module, ModuleInfo, ModuleRegistry, standard_registry,
        ports::{
            BuildDescriptorRepository, Filesystem, ProjectRepository, ResourceStore,
            TemplateRenderer,
        },
    };
    pub use crate::domain::{
        BuildDescriptor, Change, ConfigValue, Dependency, Level, Project, RenderContext, Scope,
        TextEdit,
    };
    pub use crate::error::{KilnError, KilnResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
