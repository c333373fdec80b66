//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use hexa_core::domain::ArtifactKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "hexa",
    bin_name = "hexa",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2b22} Hexagonal Go service scaffolding",
    long_about = "hexa creates Go services from a released template archive \
                  and generates the layers of a feature slice.",
    after_help = "EXAMPLES:\n\
        \x20 hexa new orders\n\
        \x20 hexa new ../services/billing --template hexagonal\n\
        \x20 hexa generate service --feature User\n\
        \x20 hexa completions bash > /usr/share/bash-completion/completions/hexa",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from the template archive.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        long_about = "Create a new project from a template archive.\n\n\
            An existing destination directory is refused unless --force is given. \
            With --force, files that collide with the template are overwritten and \
            every other file is kept.",
        after_help = "EXAMPLES:\n\
            \x20 hexa new orders\n\
            \x20 hexa new orders --template hexagonal --force\n\
            \x20 hexa new orders --source-url file:///tmp/templates.zip"
    )]
    New(NewArgs),

    /// Generate one layer of a feature slice.
    #[command(
        visible_alias = "g",
        about = "Generate a feature file",
        after_help = "EXAMPLES:\n\
            \x20 hexa generate model --feature User\n\
            \x20 hexa generate handler -f User -p shop --uuid\n\
            \x20 hexa generate transactor -o internal/adapters/database"
    )]
    Generate(GenerateArgs),

    /// List available generators.
    #[command(
        visible_alias = "ls",
        about = "List available generators",
        after_help = "EXAMPLES:\n\
            \x20 hexa list\n\
            \x20 hexa list --format json"
    )]
    List(ListArgs),

    /// Initialise a hexa configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 hexa init\n\
            \x20 hexa init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hexa completions bash > ~/.local/share/bash-completion/completions/hexa\n\
            \x20 hexa completions zsh  > ~/.zfunc/_hexa\n\
            \x20 hexa completions fish > ~/.config/fish/completions/hexa.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the hexa configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hexa config get templates.source_url\n\
            \x20 hexa config set defaults.project shop\n\
            \x20 hexa config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `hexa new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  The last component is the project name that
    /// replaces the template placeholder; the whole path is the destination.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Top-level directory of the template archive to use.
    #[arg(
        short = 't',
        long = "template",
        value_name = "TEMPLATE",
        help = "Template to use (default: hexagonal)"
    )]
    pub template: Option<String>,

    /// Override the archive URL from the configuration.
    #[arg(
        long = "source-url",
        value_name = "URL",
        help = "Template archive URL (http(s):// or file://)"
    )]
    pub source_url: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Write into an existing directory, overwriting colliding files.
    #[arg(
        long = "force",
        help = "Write into an existing directory (refused by default)",
        long_help = "Write into an existing directory. Without this flag an existing \
            destination is an error; with it, colliding files are overwritten and \
            other files are kept."
    )]
    pub force: bool,

    /// Describe what would happen without downloading or writing anything.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `hexa generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Which layer to generate.
    #[arg(value_name = "KIND", value_enum, help = "Artifact to generate")]
    pub kind: Kind,

    /// Feature name, e.g. `User`.  Required for everything but `transactor`.
    #[arg(
        short = 'f',
        long = "feature",
        value_name = "NAME",
        help = "Feature name (e.g. User)"
    )]
    pub feature: Option<String>,

    /// Project name used in `github.com/<project>/...` import paths.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "PROJECT",
        help = "Project module name used in imports (default from config)"
    )]
    pub project: Option<String>,

    /// Output directory; defaults to the layer's conventional directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory"
    )]
    pub output: Option<PathBuf>,

    /// Use UUID string IDs instead of auto-increment integers.
    #[arg(long = "uuid", help = "Use UUID primary keys")]
    pub uuid: bool,

    /// Overwrite the file if it exists.
    #[arg(long = "force", help = "Overwrite an existing file")]
    pub force: bool,

    /// Print the rendered file instead of writing it.
    #[arg(long = "dry-run", help = "Print the file instead of writing it")]
    pub dry_run: bool,
}

/// Generator kinds as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Kind {
    Model,
    Domain,
    #[value(alias = "ports")]
    Port,
    #[value(alias = "repo")]
    Repository,
    Service,
    #[value(alias = "handlers")]
    Handler,
    #[value(alias = "routes")]
    Route,
    App,
    Transactor,
}

impl From<Kind> for ArtifactKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Model => Self::Model,
            Kind::Domain => Self::Domain,
            Kind::Port => Self::Port,
            Kind::Repository => Self::Repository,
            Kind::Service => Self::Service,
            Kind::Handler => Self::Handler,
            Kind::Route => Self::Route,
            Kind::App => Self::App,
            Kind::Transactor => Self::Transactor,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `hexa list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `hexa init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `hexa completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `hexa config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.source_url`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn new_help_explains_existing_directories() {
        let mut cmd = Cli::command();
        let help = cmd
            .find_subcommand_mut("new")
            .unwrap()
            .render_long_help()
            .to_string();
        let help = help.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(help.contains("refused unless --force"));
        assert!(help.contains("colliding files are overwritten"));
    }

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from(["hexa", "new", "orders", "-t", "hexagonal", "--force"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "orders");
        assert_eq!(args.template.as_deref(), Some("hexagonal"));
        assert!(args.force);
    }

    #[test]
    fn parse_generate_with_alias() {
        let cli = Cli::parse_from(["hexa", "g", "repo", "-f", "User", "--uuid"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(ArtifactKind::from(args.kind), ArtifactKind::Repository);
        assert_eq!(args.feature.as_deref(), Some("User"));
        assert!(args.uuid);
    }

    #[test]
    fn every_kind_maps_to_an_artifact() {
        for kind in Kind::value_variants() {
            let artifact = ArtifactKind::from(*kind);
            assert_eq!(
                kind.to_possible_value().unwrap().get_name(),
                artifact.as_str()
            );
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["hexa", "generate", "controller", "-f", "User"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["hexa", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
