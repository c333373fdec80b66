//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hexa-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateFetcher`: Download and unpack a project template
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Generator template storage/retrieval
//!   - `TemplateRenderer`: Template rendering
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, TemplateFetcher, TemplateRenderer, TemplateStore};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateFetcher, MockTemplateRenderer, MockTemplateStore};
