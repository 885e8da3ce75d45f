//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while applying modules to a project.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The project has no build descriptor yet.
    #[error("No build descriptor at {path}")]
    MissingBuildDescriptor { path: PathBuf },

    /// A file that an edit targets does not exist.
    #[error("File not found: {path}")]
    MissingFile { path: PathBuf },

    /// A source resource is not shipped.
    #[error("Resource not found: {path}")]
    ResourceNotFound { path: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    #[error("Unknown module: {slug}")]
    ModuleNotFound { slug: String },

    #[error("Module registered twice: {slug}")]
    DuplicateModule { slug: String },

    /// The build descriptor exists but cannot be parsed or written.
    #[error("Invalid build descriptor at {path}: {reason}")]
    InvalidDescriptor { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingBuildDescriptor { path } => vec![
                format!("Expected a build descriptor at {}", path.display()),
                "Apply the build-tool module first: kiln apply build-tool".into(),
            ],
            Self::MissingFile { path } => vec![
                format!("Missing: {}", path.display()),
                "Apply the module that creates this file first".into(),
            ],
            Self::ResourceNotFound { path } => vec![
                format!("No resource named {}", path),
                "Check KILN_RESOURCES_DIR if you use a resource override".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ModuleNotFound { .. } => vec![
                "Run 'kiln list' to see available modules".into(),
            ],
            Self::InvalidDescriptor { path, .. } => vec![
                format!("Fix or remove {}", path.display()),
                "Then apply the build-tool module again".into(),
            ],
            Self::StoreLockError => vec![
                "A shared store was poisoned by a panic".into(),
                "Try again".into(),
            ],
            Self::DuplicateModule { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingBuildDescriptor { .. } | Self::MissingFile { .. } => {
                ErrorCategory::Generator
            }
            Self::ResourceNotFound { .. } | Self::ModuleNotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidDescriptor { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::StoreLockError | Self::DuplicateModule { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
