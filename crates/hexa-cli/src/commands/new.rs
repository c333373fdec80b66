//! Implementation of the `hexa new` command.
//!
//! Responsibility: turn the CLI arguments into a project name, template and
//! destination, call the core project service, and display results. No
//! business logic lives here.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use hexa_adapters::{LocalFilesystem, SimpleRenderer, UrlDownloader, ZipTemplateFetcher};
use hexa_core::{
    application::{MaterializerConfig, ProjectReport, ProjectService},
    domain::{ProjectName, TemplateName},
    error::HexaError,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `hexa new` command.
///
/// 1. Split the argument into project name and destination
/// 2. Resolve template and archive URL (flags over config)
/// 3. Confirm with the user when interactive
/// 4. Early-exit on `--dry-run`
/// 5. Download, extract and materialize via [`ProjectService`]
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let (name, destination) = resolve_project_path(&args.name)?;
    let project = ProjectName::parse(name).map_err(HexaError::from)?;
    let template = TemplateName::parse(
        args.template
            .clone()
            .unwrap_or_else(|| config.defaults.template.clone()),
    )
    .map_err(HexaError::from)?;

    let mut materializer = config.materializer_config();
    if let Some(url) = &args.source_url {
        materializer.source_url = url.clone();
    }

    debug!(
        template = %template,
        source = %materializer.source_url,
        destination = %destination.display(),
        "Project resolved"
    );

    let interactive = std::io::stdin().is_terminal();
    if needs_confirmation(&args, &global, &output, interactive) {
        show_configuration(&project, &template, &destination, &materializer, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    if args.dry_run {
        output.info(&format!(
            "Dry run: would create '{}' at {} from '{}' in {}",
            project,
            destination.display(),
            template,
            materializer.source_url,
        ))?;
        return Ok(());
    }

    let service = ProjectService::new(
        materializer,
        Box::new(ZipTemplateFetcher::new(UrlDownloader::new())),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    info!(path = %destination.display(), "Materialization started");
    let spinner = output.spinner(&format!("Fetching template '{template}'..."));
    let result = service.create_project(&project, &template, &destination, args.force);
    spinner.finish_and_clear();
    let report = result.with_cli_context(|| "materializing project")?;

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    output.success(&success_line(&report))?;

    if !global.quiet {
        output.print(&format!(
            "  {} files, {} directories",
            report.files, report.directories
        ))?;
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", destination.display()))?;
        output.print("  go mod tidy")?;
    }

    Ok(())
}

fn success_line(report: &ProjectReport) -> String {
    format!(
        "Project '{}' initialized successfully using the '{}' template! Created {}",
        report.project,
        report.template,
        report.root.display()
    )
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Split `name` into the project name (last component) and the destination
/// (the whole path).
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract a project name from the path".into(),
        })?
        .to_string();

    Ok((project_name, path.to_path_buf()))
}

/// Prompt only for interactive human sessions that did not opt out.
fn needs_confirmation(
    args: &NewArgs,
    global: &GlobalArgs,
    output: &OutputManager,
    interactive: bool,
) -> bool {
    interactive && !args.yes && !args.dry_run && !global.quiet && !output.is_json()
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    project: &ProjectName,
    template: &TemplateName,
    destination: &Path,
    materializer: &MaterializerConfig,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:   {project}"))?;
    out.print(&format!("  Template:  {template}"))?;
    out.print(&format!("  Source:    {}", materializer.source_url))?;
    out.print(&format!("  Location:  {}", destination.display()))?;
    if destination.exists() {
        out.warning("The directory exists; colliding files will be overwritten with --force")?;
    }
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands, OutputFormat};
    use clap::Parser;

    fn parse(argv: &[&str]) -> (NewArgs, GlobalArgs) {
        let cli = Cli::parse_from(argv.iter().copied());
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        (args, cli.global)
    }

    fn output(format: OutputFormat) -> OutputManager {
        let global = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: format,
        };
        OutputManager::new(&global, &AppConfig::default())
    }

    // ── resolve_project_path ──────────────────────────────────────────────────

    #[test]
    fn simple_name_is_both_name_and_destination() {
        let (name, dir) = resolve_project_path("orders").unwrap();
        assert_eq!(name, "orders");
        assert_eq!(dir, PathBuf::from("orders"));
    }

    #[test]
    fn relative_path_keeps_full_destination() {
        let (name, dir) = resolve_project_path("../services/billing").unwrap();
        assert_eq!(name, "billing");
        assert_eq!(dir, PathBuf::from("../services/billing"));
    }

    #[test]
    fn nested_path_works_on_all_platforms() {
        let sep = std::path::MAIN_SEPARATOR;
        let path = format!("foo{sep}bar{sep}orders");

        let (name, dir) = resolve_project_path(&path).unwrap();
        assert_eq!(name, "orders");
        assert_eq!(dir, PathBuf::from("foo").join("bar").join("orders"));
    }

    #[test]
    fn parent_only_path_has_no_name() {
        assert!(matches!(
            resolve_project_path(".."),
            Err(CliError::InvalidProjectName { .. })
        ));
    }

    // ── needs_confirmation ───────────────────────────────────────────────────

    #[test]
    fn success_line_names_the_created_directory() {
        let report = ProjectReport {
            project: "billing".into(),
            template: "hexagonal".into(),
            root: PathBuf::from("services/billing"),
            files: 3,
            directories: 1,
        };
        let line = success_line(&report);
        assert!(line.starts_with(
            "Project 'billing' initialized successfully using the 'hexagonal' template!"
        ));
        assert!(line.ends_with(&format!("Created {}", Path::new("services/billing").display())));
    }

    #[test]
    fn interactive_run_asks_for_confirmation() {
        let (args, global) = parse(&["hexa", "new", "orders"]);
        assert!(needs_confirmation(&args, &global, &output(OutputFormat::Human), true));
    }

    #[test]
    fn opt_outs_skip_confirmation() {
        let human = output(OutputFormat::Human);

        let (args, global) = parse(&["hexa", "new", "orders", "-y"]);
        assert!(!needs_confirmation(&args, &global, &human, true));

        let (args, global) = parse(&["hexa", "new", "orders", "--dry-run"]);
        assert!(!needs_confirmation(&args, &global, &human, true));

        let (args, global) = parse(&["hexa", "new", "orders"]);
        assert!(!needs_confirmation(&args, &global, &human, false));
        assert!(!needs_confirmation(&args, &global, &output(OutputFormat::Json), true));
    }
}
