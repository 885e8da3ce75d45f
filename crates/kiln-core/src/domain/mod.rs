//! Core domain layer for Kiln.
//!
//! This module contains pure business logic. All I/O, resource loading and
//! persistence concerns are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Pure edits**: needle insertion and property upserts work on strings
//! - **Rich domain model**: Behavior lives in entities, not services

pub mod defaults;
pub mod entities;
pub mod error;
pub mod needle;
pub mod value_objects;

mod validation;

pub use entities::{
    BuildDescriptor, BuildProperty, Dependency, DependencyBuilder, DependencyId, DependencyKey,
    PlacementMode, Project, ProjectBuilder, PropertiesFile, RelativePath, RenderContext,
    TemplatePlacement,
};

pub use error::{DomainError, ErrorCategory};
pub use needle::{EditOutcome, TextEdit};
pub use value_objects::{Change, ConfigValue, Level, PropertyTarget, Scope};

pub use validation::DomainValidator;
