//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a project" or "generate a handler".

pub mod generator_service;
pub mod project_service;

pub use generator_service::{GenerateRequest, GeneratedArtifact, GeneratorInfo, GeneratorService};
pub use project_service::{DEFAULT_TEMPLATE_URL, MaterializerConfig, ProjectReport, ProjectService};
