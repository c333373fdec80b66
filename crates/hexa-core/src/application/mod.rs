//! Application layer for Hexa.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectService, GeneratorService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DEFAULT_TEMPLATE_URL, GenerateRequest, GeneratedArtifact, GeneratorInfo, GeneratorService,
    MaterializerConfig, ProjectReport, ProjectService,
};

pub use ports::{Filesystem, TemplateFetcher, TemplateRenderer, TemplateStore};

pub use error::{ApplicationError, FetchError};
