pub mod build_descriptor;
pub mod common;
pub mod dependency;
pub mod project;
pub mod properties;
pub mod render_context;

pub use crate::domain::DomainError;
pub use build_descriptor::{BuildDescriptor, BuildProperty};
pub use common::{PlacementMode, RelativePath, TemplatePlacement};
pub use dependency::{Dependency, DependencyBuilder, DependencyId, DependencyKey};
pub use project::{Project, ProjectBuilder};
pub use properties::PropertiesFile;
pub use render_context::RenderContext;
