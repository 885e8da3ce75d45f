//! Project repository over the filesystem port.

use std::{path::PathBuf, sync::Arc};

use kiln_core::{
    application::ports::{Filesystem, ProjectRepository, ResourceStore, TemplateRenderer},
    domain::{
        Change, EditOutcome, PlacementMode, Project, RelativePath, RenderContext,
        TemplatePlacement, TextEdit, defaults::join_path, needle,
    },
    error::KilnResult,
};
use tracing::{debug, instrument};

/// Places resources into, and edits files inside, a project folder.
///
/// Every path is resolved against [`Project::folder`]; parent directories are
/// created on write.
pub struct FsProjectRepository {
    filesystem: Arc<dyn Filesystem>,
    resources: Arc<dyn ResourceStore>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl FsProjectRepository {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        resources: Arc<dyn ResourceStore>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            filesystem,
            resources,
            renderer,
        }
    }

    fn resolve(&self, project: &Project, dir: &str, filename: &str) -> KilnResult<PathBuf> {
        Ok(RelativePath::try_new(dir)?
            .join(filename)?
            .resolve(project.folder()))
    }

    fn write_to(&self, path: PathBuf, content: &str) -> KilnResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "file written");
        Ok(())
    }

    #[instrument(skip_all, fields(source = %placement.source_dir, file = %placement.filename))]
    fn place(&self, project: &Project, placement: &TemplatePlacement) -> KilnResult<()> {
        let source = placement.source()?;
        let raw = self
            .resources
            .read(&join_path(&[&placement.source_dir, &placement.filename]))?;
        let text = match placement.mode {
            PlacementMode::Copy => raw,
            PlacementMode::Render => self
                .renderer
                .render(&raw, &RenderContext::from_project(project))?,
        };
        let destination = placement.destination()?.resolve(project.folder());
        debug!(%source, destination = %destination.display(), "placing resource");
        self.write_to(destination, &text)
    }
}

fn placement(source: &str, filename: &str, destination: &str, mode: PlacementMode) -> TemplatePlacement {
    TemplatePlacement {
        source_dir: source.to_string(),
        filename: filename.to_string(),
        destination_dir: destination.to_string(),
        mode,
    }
}

impl ProjectRepository for FsProjectRepository {
    fn add(
        &self,
        project: &Project,
        source: &str,
        filename: &str,
        destination: &str,
    ) -> KilnResult<()> {
        self.place(
            project,
            &placement(source, filename, destination, PlacementMode::Copy),
        )
    }

    fn template(
        &self,
        project: &Project,
        source: &str,
        filename: &str,
        destination: &str,
    ) -> KilnResult<()> {
        self.place(
            project,
            &placement(source, filename, destination, PlacementMode::Render),
        )
    }

    fn write(
        &self,
        project: &Project,
        text: &str,
        destination: &str,
        filename: &str,
    ) -> KilnResult<()> {
        let path = self.resolve(project, destination, filename)?;
        self.write_to(path, text)
    }

    fn read(&self, project: &Project, dir: &str, filename: &str) -> KilnResult<String> {
        let path = self.resolve(project, dir, filename)?;
        self.filesystem.read_file(&path)
    }

    #[instrument(skip(self, project, edit))]
    fn replace_text(
        &self,
        project: &Project,
        dir: &str,
        filename: &str,
        edit: &TextEdit,
    ) -> KilnResult<Change> {
        let path = self.resolve(project, dir, filename)?;
        let content = self.filesystem.read_file(&path)?;

        match edit.apply(&content, &join_path(&[dir, filename]))? {
            EditOutcome::Applied(updated) => {
                self.filesystem.write_file(&path, &updated)?;
                Ok(Change::Updated)
            }
            EditOutcome::AlreadyPresent => {
                debug!(path = %path.display(), "edit already present");
                Ok(Change::Unchanged)
            }
        }
    }

    fn contains_regexp(
        &self,
        project: &Project,
        dir: &str,
        filename: &str,
        pattern: &str,
    ) -> KilnResult<bool> {
        let content = self.read(project, dir, filename)?;
        Ok(needle::contains_regexp(&content, pattern)?)
    }

    fn exists(&self, project: &Project, dir: &str, filename: &str) -> bool {
        self.resolve(project, dir, filename)
            .map(|path| self.filesystem.exists(&path))
            .unwrap_or(false)
    }
}
