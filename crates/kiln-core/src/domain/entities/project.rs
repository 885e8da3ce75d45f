//! The in-progress generated project.
//!
//! A `Project` is created once per generation request, mutated in place by
//! every module applied to it, and read afterwards to report results. It is
//! owned by exactly one request; nothing in the engine aliases it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{
    defaults::{
        self, BASE_NAME, DEFAULT_INDENT, DEFAULT_PACKAGE_NAME_PATH, MAX_INDENT, PACKAGE_NAME,
        PRETTIER_DEFAULT_INDENT, PROJECT_NAME,
    },
    error::DomainError,
    value_objects::ConfigValue,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    folder: PathBuf,
    config: BTreeMap<String, ConfigValue>,
}

impl Project {
    /// Create a project rooted at an absolute folder with an empty config.
    pub fn new(folder: impl Into<PathBuf>) -> Result<Self, DomainError> {
        Self::builder().folder(folder).build()
    }

    pub fn builder() -> ProjectBuilder {
        ProjectBuilder::default()
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn config(&self) -> &BTreeMap<String, ConfigValue> {
        &self.config
    }

    // ── Raw and typed access ──────────────────────────────────────────────

    pub fn get_config(&self, key: &str) -> Option<&ConfigValue> {
        self.config.get(key)
    }

    /// Typed read. `Err(UnauthorizedValue)` when the stored type differs.
    pub fn get_string_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        match self.config.get(key) {
            None => Ok(None),
            Some(ConfigValue::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(unauthorized(key, "string", other)),
        }
    }

    pub fn get_integer_config(&self, key: &str) -> Result<Option<i64>, DomainError> {
        match self.config.get(key) {
            None => Ok(None),
            Some(ConfigValue::Integer(i)) => Ok(Some(*i)),
            Some(other) => Err(unauthorized(key, "integer", other)),
        }
    }

    pub fn get_boolean_config(&self, key: &str) -> Result<Option<bool>, DomainError> {
        match self.config.get(key) {
            None => Ok(None),
            Some(ConfigValue::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(unauthorized(key, "boolean", other)),
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Set a value only if the key is absent.
    pub fn add_config(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.config.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Seed a recognised key from the default table if it has no value.
    ///
    /// Unknown keys are ignored. Calling this repeatedly never changes an
    /// existing value.
    pub fn add_default_config(&mut self, key: &str) {
        if self.config.contains_key(key) {
            return;
        }
        if let Some(value) = defaults::default_config(key) {
            self.config.insert(key.to_string(), value);
        }
    }

    // ── Derived values ────────────────────────────────────────────────────

    /// The configured package name, if it is set to a string.
    pub fn package_name(&self) -> Option<String> {
        self.get_string_config(PACKAGE_NAME).ok().flatten()
    }

    /// Slash-delimited form of the package name.
    ///
    /// Never empty: an unset package name yields the default path.
    pub fn package_name_path(&self) -> String {
        self.package_name()
            .filter(|p| !p.is_empty())
            .map(|p| p.replace('.', "/"))
            .unwrap_or_else(|| DEFAULT_PACKAGE_NAME_PATH.to_string())
    }

    pub fn base_name(&self) -> Option<String> {
        self.get_string_config(BASE_NAME).ok().flatten()
    }

    pub fn project_name(&self) -> Option<String> {
        self.get_string_config(PROJECT_NAME).ok().flatten()
    }

    /// Indentation width from `prettierDefaultIndent`.
    ///
    /// Falls back to [`DEFAULT_INDENT`] when unset, non-integer or outside
    /// `1..=MAX_INDENT`.
    pub fn indent_width(&self) -> usize {
        match self.get_integer_config(PRETTIER_DEFAULT_INDENT) {
            Ok(Some(width)) => match usize::try_from(width) {
                Ok(width) if (1..=MAX_INDENT).contains(&width) => width,
                _ => {
                    tracing::warn!(width, "Indent out of range, using default");
                    DEFAULT_INDENT
                }
            },
            Ok(None) => DEFAULT_INDENT,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid indent config, using default");
                DEFAULT_INDENT
            }
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.folder.is_absolute() {
            return Err(DomainError::InvalidProject(format!(
                "folder must be absolute: {}",
                self.folder.display()
            )));
        }
        if let Some(ConfigValue::String(package)) = self.config.get(PACKAGE_NAME) {
            validate_package_name(package)?;
        }
        Ok(())
    }
}

fn unauthorized(key: &str, expected: &'static str, found: &ConfigValue) -> DomainError {
    DomainError::UnauthorizedValue {
        key: key.to_string(),
        expected,
        found: found.type_name(),
    }
}

fn validate_package_name(package: &str) -> Result<(), DomainError> {
    let valid_segment = |segment: &str| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };

    if package.split('.').all(valid_segment) {
        Ok(())
    } else {
        Err(DomainError::InvalidProject(format!(
            "invalid package name: {package}"
        )))
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ProjectBuilder {
    folder: Option<PathBuf>,
    config: BTreeMap<String, ConfigValue>,
}

impl ProjectBuilder {
    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn package_name(self, package: impl Into<String>) -> Self {
        self.config(PACKAGE_NAME, package.into())
    }

    pub fn base_name(self, base: impl Into<String>) -> Self {
        self.config(BASE_NAME, base.into())
    }

    pub fn config(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Project, DomainError> {
        let project = Project {
            folder: self
                .folder
                .ok_or(DomainError::MissingRequiredField { field: "folder" })?,
            config: self.config,
        };
        project.validate()?;
        Ok(project)
    }
}
