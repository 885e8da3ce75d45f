// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through reports and logs)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A config key holds a value of the wrong type for the typed accessor.
    ///
    /// Callers recover from this locally by falling back to a default.
    #[error("config '{key}' holds a {found} value, expected {expected}")]
    UnauthorizedValue {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    // ========================================================================
    // Structural Prerequisites (generator errors)
    // ========================================================================
    #[error("needle '{needle}' not found in {file}")]
    NeedleNotFound { needle: String, file: String },

    #[error("text '{token}' not found in {file}")]
    TokenNotFound { token: String, file: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid dependency: {0}")]
    InvalidDependency(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path leaves the project folder: {path}")]
    ParentPathNotAllowed { path: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnauthorizedValue { key, expected, .. } => vec![
                format!("Set '{}' to a {} value", key, expected),
                "Or remove it to use the built-in default".into(),
            ],
            Self::NeedleNotFound { needle, file } => vec![
                format!("{} is missing the insertion marker {}", file, needle),
                "Apply the module that creates this file first".into(),
                "If the file was edited by hand, restore the marker line".into(),
            ],
            Self::TokenNotFound { file, .. } => vec![
                format!("{} does not contain the expected text", file),
                "The file may have been edited by hand".into(),
            ],
            Self::InvalidProject(msg) => vec![
                "Check the project folder and package name".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidDependency(msg) => vec![
                "Dependencies need a non-empty groupId and artifactId".into(),
                format!("Details: {}", msg),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnauthorizedValue { .. } => ErrorCategory::Configuration,
            Self::InvalidProject(_)
            | Self::InvalidDependency(_)
            | Self::InvalidPattern { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::ParentPathNotAllowed { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::NeedleNotFound { .. } | Self::TokenNotFound { .. } => ErrorCategory::Generator,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    /// Missing structural prerequisite (needle, base file, descriptor).
    Generator,
    NotFound,
    Internal,
}
