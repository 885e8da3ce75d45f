//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kiln-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{BuildDescriptor, Project, RenderContext, TextEdit, value_objects::Change};
use crate::error::KilnResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kiln_adapters::filesystem::LocalFilesystem` (production)
/// - `kiln_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
///
/// Paths are absolute; the project repository resolves them against the
/// project folder.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KilnResult<()>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> KilnResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template resources shipped with the generator.
///
/// Resource paths are `/`-separated and relative, e.g.
/// `server/springboot/dbmigration/liquibase/resources/master.xml`.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceStore: Send + Sync {
    /// Raw resource text. `ResourceNotFound` when absent.
    fn read(&self, path: &str) -> KilnResult<String>;

    /// Every resource path, sorted.
    fn list(&self) -> Vec<String>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `kiln_adapters::renderer::SimpleRenderer` (variable substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &RenderContext) -> KilnResult<String>;
}

/// Port for placing and editing files inside a project.
///
/// Every `dir` argument is relative to the project folder; every `source`
/// argument is a resource directory.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectRepository: Send + Sync {
    /// Copy a resource verbatim to `destination/filename`.
    fn add(
        &self,
        project: &Project,
        source: &str,
        filename: &str,
        destination: &str,
    ) -> KilnResult<()>;

    /// Render a resource with the project's context, then write it.
    fn template(
        &self,
        project: &Project,
        source: &str,
        filename: &str,
        destination: &str,
    ) -> KilnResult<()>;

    /// Write literal text to `destination/filename`.
    fn write(
        &self,
        project: &Project,
        text: &str,
        destination: &str,
        filename: &str,
    ) -> KilnResult<()>;

    /// Read `dir/filename`. `MissingFile` when absent.
    fn read(&self, project: &Project, dir: &str, filename: &str) -> KilnResult<String>;

    /// Apply a text edit to `dir/filename`. The file is only rewritten when
    /// the edit changes it.
    fn replace_text(
        &self,
        project: &Project,
        dir: &str,
        filename: &str,
        edit: &TextEdit,
    ) -> KilnResult<Change>;

    fn contains_regexp(
        &self,
        project: &Project,
        dir: &str,
        filename: &str,
        pattern: &str,
    ) -> KilnResult<bool>;

    fn exists(&self, project: &Project, dir: &str, filename: &str) -> bool;
}

/// Port for the project's build descriptor.
///
/// Implemented by:
/// - `kiln_adapters::descriptor::TomlBuildDescriptorRepository`
#[cfg_attr(test, mockall::automock)]
pub trait BuildDescriptorRepository: Send + Sync {
    /// Where the descriptor lives for this project.
    fn location(&self, project: &Project) -> PathBuf;

    /// `MissingBuildDescriptor` when the project has none.
    fn load(&self, project: &Project) -> KilnResult<BuildDescriptor>;

    fn save(&self, project: &Project, descriptor: &BuildDescriptor) -> KilnResult<()>;

    /// Create an empty descriptor unless one exists.
    fn init(&self, project: &Project) -> KilnResult<Change>;
}
