//! Error handling for the hexa CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use hexa_core::error::HexaError;

pub use hexa_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The project argument has no usable final path component.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `hexa-core` or one of its adapters.
    #[error("{0}")]
    Core(#[from] HexaError),

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "The last path component becomes the project name".into(),
                "Examples: orders, services/billing, ../my_project".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check the file printed by 'hexa config path'".into(),
                "Use 'hexa init --force' to restore the default config".into(),
            ],

            Self::Core(core_err) => {
                let mut suggestions = core_err.suggestions();
                if core_err.is_retryable() {
                    suggestions.push("This looks temporary; try again in a moment".into());
                }
                suggestions
            }

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Cancelled => vec!["No changes were made".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidProjectName { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Remote => ErrorCategory::Remote,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Remote        |  5   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Remote => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Render for a terminal: red headline, dimmed cause chain, yellow
    /// suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(
            verbose,
            &Palette {
                headline: &|s: &str| format!("{} {}", "✗ Error:".red().bold(), s.red()),
                cause: &|s: &str| format!("{} {}", "→".dimmed(), s.dimmed()),
                heading: &|s: &str| s.yellow().bold().to_string(),
                hint: &|s: &str| format!("{} {}", "\u{2139}".blue(), s.dimmed()),
            },
        )
    }

    /// Same layout as [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(
            verbose,
            &Palette {
                headline: &|s: &str| format!("Error: {s}"),
                cause: &|s: &str| format!("Caused by: {s}"),
                heading: &|s: &str| s.to_string(),
                hint: &|s: &str| s.to_string(),
            },
        )
    }

    fn render(&self, verbose: bool, palette: &Palette<'_>) -> String {
        let mut lines = vec![String::new(), (palette.headline)(&self.to_string())];

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                lines.push(format!("  {}", (palette.cause)(&err.to_string())));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            lines.push(String::new());
            lines.push((palette.heading)("Suggestions:"));
            lines.extend(suggestions.iter().map(|s| format!("  {s}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push((palette.hint)("Use -v / --verbose for more details."));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Remote => tracing::error!("Remote error: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

type Style<'a> = &'a dyn Fn(&str) -> String;

struct Palette<'a> {
    headline: Style<'a>,
    cause: Style<'a>,
    heading: Style<'a>,
    hint: Style<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, existing targets).
    UserError,
    /// Template or generator not found.
    NotFound,
    /// Download or archive failure.
    Remote,
    Configuration,
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Converts foreign error types into [`CliError`] at call-sites with a
/// descriptive context message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, HexaError> {
    /// Core errors already carry their context; the message is dropped.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use hexa_core::application::{ApplicationError, FetchError};

    fn core(err: impl Into<HexaError>) -> CliError {
        CliError::Core(err.into())
    }

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn project_exists_suggests_force() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/orders"),
        });
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn transient_remote_failure_suggests_retry() {
        let err = core(FetchError::HttpStatus {
            url: "https://example.invalid/t.zip".into(),
            status: 503,
        });
        assert!(err.suggestions().iter().any(|s| s.contains("try again")));
    }

    #[test]
    fn invalid_name_suggestions_non_empty() {
        let err = CliError::InvalidProjectName {
            name: "..".into(),
            reason: "no final component".into(),
        };
        assert!(!err.suggestions().is_empty());
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        assert_eq!(
            core(ApplicationError::ArtifactExists {
                path: PathBuf::from("x.go")
            })
            .exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_template_not_found() {
        let err = core(ApplicationError::TemplateNotFound {
            template: "layered".into(),
            available: vec!["hexagonal".into()],
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_remote() {
        let err = core(FetchError::InvalidArchive {
            reason: "bad header".into(),
        });
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/x"),
        });
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let s = CliError::Cancelled.format_plain(true);
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn verbose_output_lists_causes() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        assert!(err.format_plain(true).contains("Caused by: disk full"));
        assert!(!err.format_plain(false).contains("disk full"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config"));
    }
}
