//! Output management and formatting.
//!
//! Human output goes to stdout through [`console::Term`]; progress spinners
//! draw on stderr and only appear for interactive human output.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto defers to `output.format`, then to TTY detection.
        let resolved_format = match (args.output_format, config.output.format.as_str()) {
            (OutputFormat::Auto, "json") => OutputFormat::Json,
            (OutputFormat::Auto, "plain") => OutputFormat::Plain,
            (OutputFormat::Auto, _) if io::stdout().is_terminal() => OutputFormat::Human,
            (OutputFormat::Auto, _) => OutputFormat::Plain,
            (explicit, _) => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Plain line; suppressed in quiet mode like every method but [`Self::json`].
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.styled(Some("\u{2713}"), msg, AnsiColors::Green)
    }

    /// `⚠ <msg>` in yellow.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.styled(Some("\u{26a0}"), msg, AnsiColors::Yellow)
    }

    /// `ℹ <msg>` in blue.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.styled(Some("\u{2139}"), msg, AnsiColors::Blue)
    }

    /// Bold cyan section title.
    pub fn header(&self, text: &str) -> io::Result<()> {
        self.styled(None, text, AnsiColors::Cyan)
    }

    fn styled(&self, symbol: Option<&str>, msg: &str, color: AnsiColors) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = match (symbol, self.no_color) {
            (Some(symbol), true) => format!("{symbol} {msg}"),
            (Some(symbol), false) => {
                format!("{} {}", symbol.color(color).bold(), msg.color(color))
            }
            (None, true) => msg.to_owned(),
            (None, false) => msg.color(color).bold().to_string(),
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout.  Printed even in quiet mode: the caller asked
    /// for machine-readable output.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Spinner for a long-running step.  Hidden unless the output is human
    /// and not quiet; finish it with `finish_and_clear`.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
        );
        spinner.set_message(msg.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: OutputFormat::Plain, // avoid TTY detection in tests
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_print_is_ok() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
    }

    #[test]
    fn config_no_color_applies_without_flag() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Plain,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(OutputManager::new(&args, &config).no_color);
        assert!(!make_manager(false, false).no_color);
    }

    #[test]
    fn spinner_hidden_for_plain_output() {
        let out = make_manager(false, true);
        assert!(out.spinner("Downloading").is_hidden());
    }

    #[test]
    fn auto_defers_to_configured_format() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert!(OutputManager::new(&args, &config).is_json());
    }

    #[test]
    fn explicit_format_is_kept() {
        let out = make_manager(false, false);
        assert_eq!(out.resolved_format, OutputFormat::Plain);
        assert!(!out.is_json());
    }
}
