use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to stay below the folder it is resolved in.
///
/// Invariant: never absolute and never contains `..`. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        check_relative(&path)?;
        Ok(Self(path))
    }

    /// Join a segment, maintaining relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        check_relative(segment)?;
        Ok(Self(self.0.join(segment)))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolve against an absolute root (a project folder).
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

fn check_relative(path: &Path) -> Result<(), DomainError> {
    if path.is_absolute() || path.to_string_lossy().starts_with('/') {
        return Err(DomainError::AbsolutePathNotAllowed {
            path: path.display().to_string(),
        });
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(DomainError::ParentPathNotAllowed {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A source resource paired with its destination in the project.
///
/// Placement is declarative: re-running it overwrites the destination with
/// the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePlacement {
    pub source_dir: String,
    pub filename: String,
    pub destination_dir: String,
    pub mode: PlacementMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// Verbatim copy.
    Copy,
    /// Substitute `{{placeholders}}` first.
    Render,
}

impl TemplatePlacement {
    pub fn source(&self) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(&self.source_dir)?.join(&self.filename)
    }

    pub fn destination(&self) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(&self.destination_dir)?.join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_rejected() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("src/main").is_ok());
    }

    #[test]
    fn parent_components_rejected() {
        assert!(matches!(
            RelativePath::try_new("src/../../etc"),
            Err(DomainError::ParentPathNotAllowed { .. })
        ));
        assert!(matches!(
            RelativePath::try_new("src/main").unwrap().join("../../outside.txt"),
            Err(DomainError::ParentPathNotAllowed { .. })
        ));
        assert!(RelativePath::try_new("./src/main").is_ok());
    }

    #[test]
    fn placement_destination_cannot_escape_project() {
        let placement = TemplatePlacement {
            source_dir: "server/springboot/core".into(),
            filename: "MainApp.java".into(),
            destination_dir: "../elsewhere".into(),
            mode: PlacementMode::Render,
        };
        assert!(placement.destination().is_err());
    }

    #[test]
    fn placement_paths() {
        let placement = TemplatePlacement {
            source_dir: "server/springboot/cache/ehcache/resources".into(),
            filename: "ehcache.xml".into(),
            destination_dir: "src/main/resources/config/ehcache".into(),
            mode: PlacementMode::Copy,
        };

        assert_eq!(
            placement.destination().unwrap().as_path(),
            Path::new("src/main/resources/config/ehcache/ehcache.xml")
        );
        assert_eq!(
            placement.source().unwrap().to_string(),
            "server/springboot/cache/ehcache/resources/ehcache.xml"
        );
    }
}
