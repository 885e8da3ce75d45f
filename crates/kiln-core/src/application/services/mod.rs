//! Application services - orchestrate use cases.
//!
//! Collaborator services (build tool, properties, logging) wrap one kind of
//! project mutation each; the generator dispatches module slugs.

pub mod build_tool;
pub mod generator;
pub mod logging;
pub mod properties;

pub use build_tool::{BuildToolDomainService, BuildToolService};
pub use generator::{ApplyReport, GeneratorService};
pub use logging::{LoggingDomainService, LoggingService};
pub use properties::{PropertiesDomainService, PropertiesService};
