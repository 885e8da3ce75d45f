//! Tool-agnostic model of a project's build descriptor.
//!
//! Holds the deduplicated dependency list and the named build properties.
//! Persisting it (TOML, a Maven POM, ...) is an adapter concern.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    defaults,
    entities::dependency::{Dependency, DependencyKey},
    error::DomainError,
    value_objects::Change,
};

/// A named build-level variable, referenced as `${key}` by declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildProperty {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    #[serde(default)]
    properties: Vec<BuildProperty>,
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

impl BuildDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn properties(&self) -> &[BuildProperty] {
        &self.properties
    }

    pub fn find_dependency(&self, key: &DependencyKey) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| &d.key() == key)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Insert a dependency, deduplicating by `(groupId, artifactId, scope)`.
    ///
    /// A missing version is resolved from the version catalog. When the key
    /// already exists:
    /// - a version given by the new declaration replaces the stored one
    /// - `optional` and `type` are taken from the new declaration
    /// - exclusions accumulate
    ///
    /// Re-adding an identical declaration returns [`Change::Unchanged`].
    pub fn add_dependency(&mut self, mut dependency: Dependency) -> Result<Change, DomainError> {
        dependency.validate()?;

        if dependency.version.is_none() {
            dependency.version =
                defaults::catalog_version(&dependency.group_id, &dependency.artifact_id)
                    .map(str::to_string);
        }

        let key = dependency.key();
        let Some(index) = self.dependencies.iter().position(|d| d.key() == key) else {
            debug!(dependency = %dependency, "Dependency added");
            self.dependencies.push(dependency);
            return Ok(Change::Added);
        };

        let existing = &mut self.dependencies[index];
        let mut merged = existing.clone();
        if dependency.version.is_some() {
            merged.version = dependency.version;
        }
        merged.optional = dependency.optional;
        merged.dependency_type = dependency.dependency_type;
        merged = merged.with_exclusions(dependency.exclusions);

        if &merged == existing {
            return Ok(Change::Unchanged);
        }

        debug!(dependency = %merged, "Dependency updated");
        *existing = merged;
        Ok(Change::Updated)
    }

    /// Insert or update a build property; last write wins.
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> Change {
        let key = key.into();
        let value = value.into();

        match self.properties.iter_mut().find(|p| p.key == key) {
            Some(existing) if existing.value == value => Change::Unchanged,
            Some(existing) => {
                existing.value = value;
                Change::Updated
            }
            None => {
                self.properties.push(BuildProperty { key, value });
                Change::Added
            }
        }
    }
}
