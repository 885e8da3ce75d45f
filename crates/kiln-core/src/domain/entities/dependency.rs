use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, value_objects::Scope};

/// `groupId:artifactId` coordinate, used for exclusions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyId {
    pub group_id: String,
    pub artifact_id: String,
}

impl DependencyId {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Deduplication key: `(groupId, artifactId, scope)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyKey {
    pub id: DependencyId,
    pub scope: Scope,
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.scope)
    }
}

/// A build dependency declared by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<DependencyId>,
}

impl Dependency {
    pub fn builder() -> DependencyBuilder {
        DependencyBuilder::default()
    }

    pub fn id(&self) -> DependencyId {
        DependencyId::new(&self.group_id, &self.artifact_id)
    }

    pub fn key(&self) -> DependencyKey {
        DependencyKey {
            id: self.id(),
            scope: self.scope,
        }
    }

    /// Copy of this dependency with extra exclusions merged in (deduplicated,
    /// original order kept).
    pub fn with_exclusions(mut self, exclusions: impl IntoIterator<Item = DependencyId>) -> Self {
        for exclusion in exclusions {
            if !self.exclusions.contains(&exclusion) {
                self.exclusions.push(exclusion);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.group_id.trim().is_empty() {
            return Err(DomainError::InvalidDependency(format!(
                "empty groupId for artifact '{}'",
                self.artifact_id
            )));
        }
        if self.artifact_id.trim().is_empty() {
            return Err(DomainError::InvalidDependency(format!(
                "empty artifactId in group '{}'",
                self.group_id
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        if self.scope != Scope::Compile {
            write!(f, " ({})", self.scope)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DependencyBuilder {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Scope,
    optional: bool,
    dependency_type: Option<String>,
    exclusions: Vec<DependencyId>,
}

impl DependencyBuilder {
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn dependency_type(mut self, dependency_type: impl Into<String>) -> Self {
        self.dependency_type = Some(dependency_type.into());
        self
    }

    pub fn exclusion(mut self, exclusion: DependencyId) -> Self {
        self.exclusions.push(exclusion);
        self
    }

    pub fn build(self) -> Result<Dependency, DomainError> {
        let dependency = Dependency {
            group_id: self
                .group_id
                .ok_or(DomainError::MissingRequiredField { field: "groupId" })?,
            artifact_id: self
                .artifact_id
                .ok_or(DomainError::MissingRequiredField { field: "artifactId" })?,
            version: self.version,
            scope: self.scope,
            optional: self.optional,
            dependency_type: self.dependency_type,
            exclusions: self.exclusions,
        };
        dependency.validate()?;
        Ok(dependency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_compile_scope() {
        let dep = Dependency::builder()
            .group_id("org.liquibase")
            .artifact_id("liquibase-core")
            .build()
            .unwrap();

        assert_eq!(dep.scope, Scope::Compile);
        assert_eq!(dep.version, None);
        assert_eq!(dep.to_string(), "org.liquibase:liquibase-core");
    }

    #[test]
    fn builder_requires_coordinates() {
        assert!(Dependency::builder().artifact_id("h2").build().is_err());
        assert!(
            Dependency::builder()
                .group_id(" ")
                .artifact_id("h2")
                .build()
                .is_err()
        );
    }

    #[test]
    fn scope_is_part_of_key() {
        let compile = Dependency::builder()
            .group_id("com.h2database")
            .artifact_id("h2")
            .build()
            .unwrap();
        let test = Dependency::builder()
            .group_id("com.h2database")
            .artifact_id("h2")
            .scope(Scope::Test)
            .build()
            .unwrap();

        assert_eq!(compile.id(), test.id());
        assert_ne!(compile.key(), test.key());
    }

    #[test]
    fn with_exclusions_deduplicates() {
        let tomcat = DependencyId::new("org.springframework.boot", "spring-boot-starter-tomcat");
        let dep = Dependency::builder()
            .group_id("org.springframework.boot")
            .artifact_id("spring-boot-starter-web")
            .exclusion(tomcat.clone())
            .build()
            .unwrap()
            .with_exclusions([tomcat.clone(), tomcat]);

        assert_eq!(dep.exclusions.len(), 1);
    }
}
