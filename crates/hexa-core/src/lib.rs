//! Hexa Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the `hexa`
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             hexa-cli (CLI)              │
//! │        (Implements Driving Ports)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │           Application Services          │
//! │   (ProjectService, GeneratorService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Fetcher, Store, Renderer, Filesystem)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     hexa-adapters (Infrastructure)      │
//! │  (ZipTemplateFetcher, LocalFilesystem)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hexa_core::prelude::*;
//!
//! let service = ProjectService::new(
//!     MaterializerConfig::default(),
//!     fetcher,    // impl TemplateFetcher
//!     renderer,   // impl TemplateRenderer
//!     filesystem, // impl Filesystem
//! );
//!
//! let name = ProjectName::parse("orders")?;
//! let template = TemplateName::parse("hexagonal")?;
//! let report = service.create_project(&name, &template, "./orders", false)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateRequest, GeneratorService, MaterializerConfig, ProjectService,
        ports::{Filesystem, TemplateFetcher, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        ArtifactKind, FeatureName, IdStrategy, ProjectName, ProjectStructure, RenderContext,
        Template, TemplateId, TemplateName,
    };
    pub use crate::error::{HexaError, HexaResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
