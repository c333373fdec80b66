//! Implementation of the `hexa generate` command.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use hexa_adapters::{InMemoryStore, LocalFilesystem, SimpleRenderer};
use hexa_core::{
    application::{GenerateRequest, GeneratedArtifact, GeneratorService},
    domain::{ArtifactKind, FeatureName, IdStrategy, ProjectName},
    error::HexaError,
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Serialize)]
struct ArtifactSummary<'a> {
    kind: ArtifactKind,
    path: &'a Path,
    bytes: usize,
    written: bool,
}

#[instrument(skip_all, fields(kind = ?args.kind))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let request = build_request(&args, &config)?;
    debug!(?request, "Generate request built");

    let service = GeneratorService::new(
        Box::new(InMemoryStore::with_builtin()?),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    if args.dry_run {
        let artifact = service.plan(&request)?;
        return show_plan(&artifact, &output);
    }

    let artifact = service.generate(&request)?;

    if output.is_json() {
        output.json(&summary(&artifact, true))?;
    } else {
        output.success(&artifact.success_message())?;
    }
    Ok(())
}

/// Merge flags with config defaults into a core request.
fn build_request(args: &GenerateArgs, config: &AppConfig) -> CliResult<GenerateRequest> {
    let project = args
        .project
        .clone()
        .unwrap_or_else(|| config.defaults.project.clone());
    let project = ProjectName::parse(project).map_err(HexaError::from)?;

    let mut request = GenerateRequest::new(args.kind.into(), project)
        .id_strategy(IdStrategy::from_flag(args.uuid || config.defaults.use_uuid))
        .overwrite(args.force);

    if let Some(feature) = &args.feature {
        request = request.feature(FeatureName::parse(feature.as_str()).map_err(HexaError::from)?);
    }
    if let Some(dir) = &args.output {
        request = request.output_dir(dir);
    }
    Ok(request)
}

fn show_plan(artifact: &GeneratedArtifact, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&summary(artifact, false))?;
        return Ok(());
    }

    output.header(&format!("Would write {}", artifact.path.display()))?;
    output.print(&String::from_utf8_lossy(&artifact.content))?;
    Ok(())
}

fn summary(artifact: &GeneratedArtifact, written: bool) -> ArtifactSummary<'_> {
    ArtifactSummary {
        kind: artifact.kind,
        path: &artifact.path,
        bytes: artifact.content.len(),
        written,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn args(argv: &[&str]) -> GenerateArgs {
        let Commands::Generate(args) = Cli::parse_from(argv.iter().copied()).command else {
            panic!("expected Generate command");
        };
        args
    }

    #[test]
    fn project_falls_back_to_config() {
        let mut config = AppConfig::default();
        config.defaults.project = "shop".into();

        let request = build_request(&args(&["hexa", "g", "service", "-f", "Order"]), &config).unwrap();
        assert_eq!(request.project.as_str(), "shop");
        assert_eq!(request.kind, ArtifactKind::Service);
        assert_eq!(request.id_strategy, IdStrategy::Serial);
    }

    #[test]
    fn config_can_default_to_uuid_ids() {
        let mut config = AppConfig::default();
        config.defaults.use_uuid = true;

        let request = build_request(&args(&["hexa", "g", "model", "-f", "User"]), &config).unwrap();
        assert_eq!(request.id_strategy, IdStrategy::Uuid);
    }

    #[test]
    fn flags_override_config() {
        let request = build_request(
            &args(&[
                "hexa", "g", "handler", "-f", "User", "-p", "billing", "-o", "api", "--force",
            ]),
            &AppConfig::default(),
        )
        .unwrap();

        assert_eq!(request.project.as_str(), "billing");
        assert_eq!(request.output_dir, Some(PathBuf::from("api")));
        assert!(request.overwrite);
    }

    #[test]
    fn invalid_feature_is_a_user_error() {
        let err = build_request(
            &args(&["hexa", "g", "model", "-f", "9lives"]),
            &AppConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
