//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The requested sub-template is not a directory in the extracted archive.
    /// `available` lists the top-level directories that were found.
    #[error("Template '{template}' not found in archive")]
    TemplateNotFound {
        template: String,
        available: Vec<String>,
    },

    /// A generator template is missing from the store.
    #[error("Template resolution failed: {reason}")]
    TemplateResolution { reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// A generated artifact would overwrite an existing file.
    #[error("File already exists at {path}")]
    ArtifactExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// Downloading or unpacking the template archive failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound {
                template,
                available,
            } => {
                let mut hints = vec![format!(
                    "The archive has no '{}' directory at its top level",
                    template
                )];
                if available.is_empty() {
                    hints.push("The archive contains no templates".into());
                } else {
                    hints.push(format!("Available templates: {}", available.join(", ")));
                }
                hints.push("Check the template name passed with --template".into());
                hints
            }
            Self::TemplateResolution { reason } => vec![
                format!("Resolution failed: {}", reason),
                "Try: hexa list to see available generators".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to write into it anyway".into(),
                "Choose a different project name".into(),
            ],
            Self::ArtifactExists { path } => vec![
                format!("Refusing to overwrite {}", path.display()),
                "Use --force to replace the file".into(),
                "Or pick another directory with --output".into(),
            ],
            Self::Fetch(e) => e.suggestions(),
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::TemplateResolution { .. } => {
                ErrorCategory::NotFound
            }
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::StoreLockError => ErrorCategory::Internal,
            Self::ProjectExists { .. } | Self::ArtifactExists { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::Fetch(e) => e.category(),
        }
    }
}

/// Failures of the archive fetcher, one per step of download and extraction.
///
/// Reasons are kept as strings so the error stays `Clone` like the rest of
/// the error tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS, TLS or protocol failure.
    #[error("Failed to download {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with something other than 200.
    #[error("Failed to download {url}: server responded with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// The temporary archive file could not be created.
    #[error("Failed to create temporary file: {reason}")]
    TempFile { reason: String },

    /// The staging directory could not be created.
    #[error("Failed to create staging directory: {reason}")]
    Staging { reason: String },

    /// Response bytes could not be written to the temporary file.
    #[error("Failed to save archive to {path}: {reason}")]
    Persist { path: PathBuf, reason: String },

    /// The downloaded file is not a readable zip archive.
    #[error("Invalid archive: {reason}")]
    InvalidArchive { reason: String },

    /// An archive entry could not be opened, or names a path outside the
    /// extraction root.
    #[error("Failed to open archive entry '{entry}': {reason}")]
    ArchiveEntry { entry: String, reason: String },

    /// A directory or file could not be created during extraction.
    #[error("Failed to create {path}: {reason}")]
    Extract { path: PathBuf, reason: String },

    /// An entry's bytes could not be copied to its destination.
    #[error("Failed to copy archive entry to {path}: {reason}")]
    CopyEntry { path: PathBuf, reason: String },
}

impl FetchError {
    /// Transport failures and 5xx answers may succeed on a later run.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport { .. } | Self::HttpStatus { .. } | Self::InvalidArchive { .. } => {
                ErrorCategory::Remote
            }
            Self::ArchiveEntry { .. } => ErrorCategory::Remote,
            Self::TempFile { .. }
            | Self::Staging { .. }
            | Self::Persist { .. }
            | Self::Extract { .. }
            | Self::CopyEntry { .. } => ErrorCategory::Internal,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Transport { url, .. } => vec![
                format!("Could not reach {}", url),
                "Check your network connection and proxy settings".into(),
                "Override the source with --source-url or HEXA_TEMPLATES__SOURCE_URL".into(),
            ],
            Self::HttpStatus { status, .. } if *status == 404 => vec![
                "The template archive was not found at the configured URL".into(),
                "Check templates.source_url with: hexa config get templates.source_url".into(),
            ],
            Self::HttpStatus { .. } => vec![
                "The template server returned an error".into(),
                "Try again later".into(),
            ],
            Self::InvalidArchive { .. } | Self::ArchiveEntry { .. } => vec![
                "The downloaded file is not a usable zip archive".into(),
                "Make sure templates.source_url points at a .zip release asset".into(),
            ],
            Self::TempFile { .. } | Self::Staging { .. } | Self::Persist { .. } => vec![
                "Could not write to the temporary directory".into(),
                "Check free disk space and the TMPDIR environment variable".into(),
            ],
            Self::Extract { path, .. } | Self::CopyEntry { path, .. } => vec![
                format!("Failed while extracting to {}", path.display()),
                "Check free disk space and permissions".into(),
            ],
        }
    }
}
