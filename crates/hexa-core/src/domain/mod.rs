//! Core domain layer for Hexa.
//!
//! Pure data and rules: validated names, the template aggregate, the render
//! context and the rendered project structure. No filesystem or network
//! access happens here; all I/O goes through the ports defined in the
//! application layer.
//!
//! - **No I/O**: no filesystem, network, or process calls
//! - **Immutable values**: transformations return new instances
//! - **Validated at the edge**: names are parsed once, then trusted

pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    common::RelativePath,
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    render_context::{Placeholder, RenderContext, replace_all_bytes},
    template::{
        DirectorySpec, FileSpec, Template, TemplateBuilder, TemplateContent, TemplateId,
        TemplateMetadata, TemplateNode, TemplateSource, TemplateTree,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{ArtifactKind, FeatureName, IdStrategy, ProjectName, TemplateName};

pub use validation::DomainValidator;
