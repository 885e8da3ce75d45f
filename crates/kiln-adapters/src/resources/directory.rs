//! Resources read from a directory on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use kiln_core::{
    application::{ApplicationError, ports::ResourceStore},
    error::KilnResult,
};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Resources under `root`, addressed by `/`-separated relative path.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    /// The directory does not need to exist; lookups then fail with
    /// `ResourceNotFound`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contains(&self, path: &str) -> bool {
        self.root.join(path).is_file()
    }
}

impl ResourceStore for DirectoryResources {
    fn read(&self, path: &str) -> KilnResult<String> {
        let full = self.root.join(path);
        debug!(path = %full.display(), "reading resource");
        fs::read_to_string(&full).map_err(|_| {
            ApplicationError::ResourceNotFound {
                path: path.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable resource entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                paths.push(normalize_path(&relative.to_string_lossy()));
            }
        }
        paths.sort();
        paths
    }
}

/// Forward slashes on every platform.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
