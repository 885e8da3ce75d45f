use std::collections::HashSet;

use crate::domain::{
    entities::{BuildDescriptor, Dependency, Project},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Entities validate themselves on construction; this is the entry point
/// for values that arrive already built (deserialized descriptors,
/// projects from a caller).
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project(project: &Project) -> Result<(), DomainError> {
        project.validate()
    }

    pub fn validate_dependency(dependency: &Dependency) -> Result<(), DomainError> {
        dependency.validate()
    }

    /// Every dependency valid and no key declared twice.
    pub fn validate_descriptor(descriptor: &BuildDescriptor) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for dependency in descriptor.dependencies() {
            dependency.validate()?;
            if !seen.insert(dependency.key()) {
                return Err(DomainError::InvalidDependency(format!(
                    "duplicate declaration of {}",
                    dependency.key()
                )));
            }
        }
        Ok(())
    }
}
