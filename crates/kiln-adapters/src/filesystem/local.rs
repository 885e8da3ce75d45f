//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use kiln_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{KilnError, KilnResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> KilnResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> KilnResult<String> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::MissingFile {
                path: path.to_path_buf(),
            }
            .into(),
            _ => map_io_error(path, e, "read file"),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> KilnError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = temp.path().join("a/b");

        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&dir.join("c.txt"), "hello").unwrap();

        assert!(fs.exists(&dir.join("c.txt")));
        assert_eq!(fs.read_file(&dir.join("c.txt")).unwrap(), "hello");
    }

    #[test]
    fn reading_absent_file_is_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_file(&temp.path().join("nope"))
            .unwrap_err();

        assert!(matches!(
            err,
            KilnError::Application(ApplicationError::MissingFile { .. })
        ));
    }
}
