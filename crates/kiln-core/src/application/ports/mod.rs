//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kiln-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: raw file operations
//!   - `ResourceStore`: shipped template resources
//!   - `TemplateRenderer`: placeholder substitution
//!   - `ProjectRepository`: file placement and edits inside a project
//!   - `BuildDescriptorRepository`: build descriptor persistence
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `Module` (see `crate::application::modules`)

pub mod output;

pub use output::{
    BuildDescriptorRepository, Filesystem, ProjectRepository, ResourceStore, TemplateRenderer,
};

#[cfg(test)]
pub use output::{
    MockBuildDescriptorRepository, MockFilesystem, MockProjectRepository, MockResourceStore,
    MockTemplateRenderer,
};
