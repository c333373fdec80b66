// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid feature name '{name}': {reason}")]
    InvalidFeatureName { name: String, reason: String },

    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName { name: String, reason: String },

    #[error("Unknown generator '{0}'")]
    UnknownArtifactKind(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template_id}' has no content")]
    EmptyTemplate { template_id: String },

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use a single directory name without path separators".into(),
                "Examples: orders, my_project, billing-api".into(),
            ],
            Self::InvalidFeatureName { name, reason } => vec![
                format!("Feature name '{}' is invalid: {}", name, reason),
                "Feature names become Go identifiers: start with a letter".into(),
                "Examples: User, Order, InvoiceLine".into(),
            ],
            Self::InvalidTemplateName { .. } => vec![
                "Template names are top-level directories of the template archive".into(),
                "Example: --template hexagonal".into(),
            ],
            Self::UnknownArtifactKind(_) => vec![
                "Try: hexa list to see the available generators".into(),
            ],
            Self::MissingRequiredField { field } if *field == "feature" => vec![
                "This generator needs a feature name".into(),
                "Example: hexa generate service --feature User".into(),
            ],
            Self::EmptyTemplate { template_id } => vec![
                format!("Template '{}' is empty", template_id),
                "Check that the archive contains files for this template".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidFeatureName { .. }
            | Self::InvalidTemplateName { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::UnknownArtifactKind(_) => ErrorCategory::NotFound,
            Self::InvalidTemplate(_) | Self::EmptyTemplate { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
