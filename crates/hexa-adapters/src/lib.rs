//! Infrastructure adapters for Hexa.
//!
//! This crate implements the ports defined in `hexa_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod fetcher;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use fetcher::{Downloader, FileDownloader, HttpDownloader, UrlDownloader, ZipTemplateFetcher};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_loader::DirectoryTemplateLoader;
pub use template_store::InMemoryStore;
