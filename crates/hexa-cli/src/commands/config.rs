//! `hexa config`: read and write configuration values.

use serde_json::json;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            if output.is_json() {
                output.json(&json!({ "key": key, "value": value }))?;
            } else {
                println!("{value}");
            }
        }

        ConfigCommands::Set { key, value } => {
            // Only the file is rewritten; environment overrides stay out of it.
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            let mut on_disk = AppConfig::load_file(&path)?;
            on_disk.set(&key, &value)?;
            on_disk.save(&path)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current configuration:")?;
                output.print(&config.to_toml()?)?;
            }
        }

        ConfigCommands::Path => {
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            println!("{}", path.display());
        }
    }

    Ok(())
}
