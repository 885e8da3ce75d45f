//! Application layer for Kiln.
//!
//! This layer contains:
//! - **Services**: collaborator services and the generator orchestrator
//! - **Modules**: one domain service per feature, all dispatched by slug
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Business rules that need no I/O live in `crate::domain`.

pub mod error;
pub mod modules;
pub mod ports;
pub mod services;

pub use modules::{Module, ModuleInfo, ModuleRegistry, standard_registry};
pub use services::{
    ApplyReport, BuildToolService, GeneratorService, LoggingService, PropertiesService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    BuildDescriptorRepository, Filesystem, ProjectRepository, ResourceStore, TemplateRenderer,
};

pub use error::ApplicationError;
