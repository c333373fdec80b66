//! Flags shared by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// More log output on stderr: `-v` info, `-vv` debug, `-vvv` trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours (also set by `NO_COLOR`).
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read configuration from FILE instead of the platform config dir.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed on stdout.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise, unless `output.format` says
    /// differently.
    #[default]
    Auto,
    /// Colours, symbols and spinners.
    Human,
    Plain,
    /// One JSON document per command.
    Json,
}
