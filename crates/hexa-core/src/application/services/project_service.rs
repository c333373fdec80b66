//! Project Service - materializes a project from the remote template archive.
//!
//! Workflow:
//! 1. Fetch the named template from the configured archive
//! 2. Render it, rewriting the placeholder token to the project name
//! 3. Write the tree below the destination
//!
//! A missing template fails before anything is created at the destination.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateFetcher, TemplateRenderer},
    },
    domain::{
        DomainValidator as validator, FsEntry, ProjectName, ProjectStructure, RenderContext,
        TemplateName,
    },
    error::{HexaError, HexaResult},
};

/// Release asset holding every project template.
pub const DEFAULT_TEMPLATE_URL: &str =
    "https://github.com/rapidstellar/gohexa-template/releases/download/1.0.0/templates.zip";

/// Token replaced with the project name in every materialized file.
pub const DEFAULT_PLACEHOLDER: &str = "go-template";

/// Where templates come from and what gets rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializerConfig {
    pub source_url: String,
    pub placeholder: String,
}

impl Default for MaterializerConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_TEMPLATE_URL.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl MaterializerConfig {
    /// An empty placeholder matches nothing and would leave every file
    /// untouched, so it is rejected along with an empty URL.
    pub fn validate(&self) -> HexaResult<()> {
        if self.source_url.trim().is_empty() {
            return Err(HexaError::Configuration {
                message: "templates.source_url cannot be empty".into(),
            });
        }
        if self.placeholder.is_empty() {
            return Err(HexaError::Configuration {
                message: "templates.placeholder cannot be empty".into(),
            });
        }
        Ok(())
    }
}

/// Outcome of a successful materialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub project: String,
    pub template: String,
    pub root: PathBuf,
    pub files: usize,
    pub directories: usize,
}

pub struct ProjectService {
    config: MaterializerConfig,
    fetcher: Box<dyn TemplateFetcher>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ProjectService {
    pub fn new(
        config: MaterializerConfig,
        fetcher: Box<dyn TemplateFetcher>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            config,
            fetcher,
            renderer,
            filesystem,
        }
    }

    pub fn config(&self) -> &MaterializerConfig {
        &self.config
    }

    /// Create `destination` from the archive template `template`.
    ///
    /// With `overwrite` an existing destination is written into: colliding
    /// files are replaced and unrelated files are left alone. Without it an
    /// existing destination is refused.
    #[instrument(
        skip_all,
        fields(
            project = %project,
            template = %template,
            destination = %destination.as_ref().display()
        )
    )]
    pub fn create_project(
        &self,
        project: &ProjectName,
        template: &TemplateName,
        destination: impl AsRef<Path>,
        overwrite: bool,
    ) -> HexaResult<ProjectReport> {
        self.config.validate()?;
        let destination = destination.as_ref();
        let existed = self.filesystem.exists(destination);

        if existed && !overwrite {
            return Err(ApplicationError::ProjectExists {
                path: destination.to_path_buf(),
            }
            .into());
        }

        let loaded = self.fetcher.fetch(&self.config.source_url, template)?;
        info!(files = loaded.file_count(), "Template fetched");

        let structure = self.plan_from(project, &loaded, destination)?;
        self.write_structure(&structure, existed)?;

        let report = ProjectReport {
            project: project.to_string(),
            template: template.to_string(),
            root: structure.root().to_path_buf(),
            files: structure.file_count(),
            directories: structure.directory_count(),
        };
        info!(
            files = report.files,
            directories = report.directories,
            "Project materialized"
        );
        Ok(report)
    }

    fn plan_from(
        &self,
        project: &ProjectName,
        template: &crate::domain::Template,
        destination: &Path,
    ) -> HexaResult<ProjectStructure> {
        let context = RenderContext::for_project(project, self.config.placeholder.as_str());
        let structure = self.renderer.render(template, &context, destination)?;
        validator::validate_project_structure(&structure)?;
        Ok(structure)
    }

    /// Write with rollback, but only for a destination this run created.
    fn write_structure(&self, structure: &ProjectStructure, existed: bool) -> HexaResult<()> {
        match self.write_all(structure) {
            Ok(()) => Ok(()),
            Err(e) if !existed => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(structure.root());
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Write failed inside existing directory, leaving it in place");
                Err(e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> HexaResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&root.join(dir.path.as_path()))?;
                }
                FsEntry::File(file) => {
                    let path = root.join(file.path.as_path());
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    debug!(path = %path.display(), bytes = file.size(), "Writing file");
                    self.filesystem.write_file(&path, &file.content)?;
                }
            }
        }

        Ok(())
    }

    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
