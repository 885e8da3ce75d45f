//! Resource stores.
//!
//! Resolution order for [`default_resources`]:
//!
//! 1. **`$KILN_RESOURCES_DIR`**: files present there override the shipped ones
//! 2. the resources embedded in the binary
//!
//! [`resources_with_override`] takes the override directory explicitly.

mod directory;
mod embedded;

use std::{path::PathBuf, sync::Arc};

use kiln_core::{application::ports::ResourceStore, error::KilnResult};
use tracing::{debug, info};

pub use directory::DirectoryResources;
pub use embedded::EmbeddedResources;

/// Environment variable naming an override directory.
pub const RESOURCES_DIR_ENV: &str = "KILN_RESOURCES_DIR";

/// Reads from `overrides` first, then from the embedded set.
#[derive(Debug, Clone)]
pub struct LayeredResources {
    overrides: DirectoryResources,
    embedded: EmbeddedResources,
}

impl LayeredResources {
    pub fn new(overrides: DirectoryResources) -> Self {
        Self {
            overrides,
            embedded: EmbeddedResources::new(),
        }
    }
}

impl ResourceStore for LayeredResources {
    fn read(&self, path: &str) -> KilnResult<String> {
        if self.overrides.contains(path) {
            debug!(path, "resource overridden");
            return self.overrides.read(path);
        }
        self.embedded.read(path)
    }

    fn list(&self) -> Vec<String> {
        let mut paths = self.embedded.list();
        paths.extend(self.overrides.list());
        paths.sort();
        paths.dedup();
        paths
    }
}

/// Embedded resources, layered under `dir` when it is a directory.
pub fn resources_with_override(dir: Option<PathBuf>) -> Arc<dyn ResourceStore> {
    match dir {
        Some(dir) if dir.is_dir() => {
            info!(path = %dir.display(), "using resource overrides");
            Arc::new(LayeredResources::new(DirectoryResources::new(dir)))
        }
        Some(dir) => {
            debug!(path = %dir.display(), "override directory missing, using embedded resources");
            Arc::new(EmbeddedResources::new())
        }
        None => Arc::new(EmbeddedResources::new()),
    }
}

/// Embedded resources, layered under `$KILN_RESOURCES_DIR` when set.
pub fn default_resources() -> Arc<dyn ResourceStore> {
    resources_with_override(std::env::var_os(RESOURCES_DIR_ENV).map(PathBuf::from))
}
