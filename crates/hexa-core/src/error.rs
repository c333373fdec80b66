//! Unified error handling for Hexa Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::{ApplicationError, FetchError};
use crate::domain::DomainError;

/// Root error type for Hexa Core operations.
#[derive(Debug, Error, Clone)]
pub enum HexaError {
    /// Errors from the domain layer (invalid names, malformed templates).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (fetching, rendering, writing).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl From<FetchError> for HexaError {
    fn from(err: FetchError) -> Self {
        Self::Application(ApplicationError::Fetch(err))
    }
}

impl HexaError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in hexa".into(),
                "Please report this issue at: https://github.com/cosecruz/hexa/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Nothing retries automatically; this only drives the wording the CLI
    /// shows to the user.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Application(ApplicationError::StoreLockError) => true,
            Self::Application(ApplicationError::Fetch(fetch)) => fetch.is_transient(),
            _ => false,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// The remote template source could not be reached or answered badly.
    Remote,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type HexaResult<T> = Result<T, HexaError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> HexaResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> HexaResult<T> {
        self.map_err(|e| HexaError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_convert_through_application_layer() {
        let err: HexaError = FetchError::HttpStatus {
            url: "https://example.invalid/t.zip".into(),
            status: 404,
        }
        .into();

        assert!(matches!(
            err,
            HexaError::Application(ApplicationError::Fetch(FetchError::HttpStatus {
                status: 404,
                ..
            }))
        ));
        assert_eq!(err.category(), ErrorCategory::Remote);
    }

    #[test]
    fn only_transient_remote_failures_are_retryable() {
        let server: HexaError = FetchError::HttpStatus {
            url: "u".into(),
            status: 503,
        }
        .into();
        let missing: HexaError = FetchError::HttpStatus {
            url: "u".into(),
            status: 404,
        }
        .into();
        let archive: HexaError = FetchError::InvalidArchive {
            reason: "bad header".into(),
        }
        .into();

        assert!(server.is_retryable());
        assert!(!missing.is_retryable());
        assert!(!archive.is_retryable());
    }

    #[test]
    fn context_wraps_foreign_errors_as_internal() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = res.context("reading staging dir").unwrap_err();
        assert!(matches!(err, HexaError::Internal { ref message } if message.contains("boom")));
    }
}
