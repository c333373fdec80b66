//! Implementation of the `hexa list` command.

use hexa_adapters::{InMemoryStore, LocalFilesystem, SimpleRenderer};
use hexa_core::application::{GeneratorInfo, GeneratorService};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let service = GeneratorService::new(
        Box::new(InMemoryStore::with_builtin()?),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let generators = service.generators()?;

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available generators:")?;
            for line in table_rows(&generators) {
                output.print(&line)?;
            }
            output.print("")?;
            output.print("Usage: hexa generate <KIND> --feature <NAME>")?;
        }

        // Machine-readable formats go straight to stdout, quiet or not.
        ListFormat::Json => output.json(&generators)?,

        ListFormat::List => {
            for g in &generators {
                println!("{}", g.kind);
            }
        }

        ListFormat::Csv => {
            for line in csv_rows(&generators) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn table_rows(generators: &[GeneratorInfo]) -> Vec<String> {
    generators
        .iter()
        .map(|g| {
            format!(
                "  {:<11} {:<34} {}",
                g.kind.as_str(),
                format!("{}/{}", g.default_dir, g.file_pattern),
                g.description
            )
        })
        .collect()
}

fn csv_rows(generators: &[GeneratorInfo]) -> Vec<String> {
    let mut rows = vec!["kind,directory,file,requires_feature".to_string()];
    rows.extend(generators.iter().map(|g| {
        format!(
            "{},{},{},{}",
            g.kind, g.default_dir, g.file_pattern, g.requires_feature
        )
    }));
    rows
}
