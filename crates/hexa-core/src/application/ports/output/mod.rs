//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hexa-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ProjectStructure, RenderContext, Template, TemplateId, TemplateName};
use crate::error::HexaResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hexa_adapters::filesystem::LocalFilesystem` (production)
/// - `hexa_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HexaResult<()>;

    /// Create or truncate a file and write `content` to it.
    fn write_file(&self, path: &Path, content: &[u8]) -> HexaResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> HexaResult<()>;
}

/// Port for obtaining a project template from its remote archive.
///
/// The returned template is fully in memory; any staging area used to
/// produce it is gone by the time `fetch` returns.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher: Send + Sync {
    /// Download the archive at `source_url` and load the top-level
    /// directory named `template`.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::TemplateNotFound` if the archive has no such directory
    /// - `ApplicationError::Fetch` for download and extraction failures
    fn fetch(&self, source_url: &str, template: &TemplateName) -> HexaResult<Template>;
}

/// Port for generator template storage and retrieval.
///
/// Implemented by:
/// - `hexa_adapters::template_store::InMemoryStore` (built-in templates)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get a specific template by ID.
    fn get(&self, id: &TemplateId) -> HexaResult<Template>;

    /// List all available templates.
    fn list(&self) -> HexaResult<Vec<Template>>;

    /// Insert or update a template.
    fn insert(&self, template: Template) -> HexaResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `hexa_adapters::renderer::SimpleRenderer` (variable and placeholder substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render a template into a project structure.
    ///
    /// # Arguments
    ///
    /// * `template` - The template to render
    /// * `context` - Variable substitution context
    /// * `output_root` - Root directory for output paths
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> HexaResult<ProjectStructure>;
}
