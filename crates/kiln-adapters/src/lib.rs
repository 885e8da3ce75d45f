//! Infrastructure adapters for Kiln.
//!
//! This crate implements the ports defined in `kiln-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod descriptor;
pub mod filesystem;
pub mod project;
pub mod renderer;
pub mod resources;

use std::sync::Arc;

use kiln_core::{
    application::{
        GeneratorService, standard_registry,
        ports::{Filesystem, ResourceStore},
    },
    error::KilnResult,
};

// Re-export commonly used adapters
pub use descriptor::{DESCRIPTOR_FILE, TomlBuildDescriptorRepository};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use project::FsProjectRepository;
pub use renderer::SimpleRenderer;
pub use resources::{
    DirectoryResources, EmbeddedResources, LayeredResources, default_resources,
    resources_with_override,
};

/// A generator with every shipped module wired onto `filesystem` and
/// `resources`.
pub fn generator(
    filesystem: Arc<dyn Filesystem>,
    resources: Arc<dyn ResourceStore>,
) -> KilnResult<GeneratorService> {
    let repository = Arc::new(FsProjectRepository::new(
        Arc::clone(&filesystem),
        Arc::clone(&resources),
        Arc::new(SimpleRenderer::new()),
    ));
    let descriptors = Arc::new(TomlBuildDescriptorRepository::new(filesystem));
    let registry = standard_registry(repository, resources, descriptors)?;
    Ok(GeneratorService::new(Arc::new(registry)))
}

/// The production wiring: local disk and [`default_resources`].
pub fn local_generator() -> KilnResult<GeneratorService> {
    generator(Arc::new(LocalFilesystem::new()), default_resources())
}
