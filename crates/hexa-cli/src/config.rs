//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the
//! [`MaterializerConfig`] derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `HEXA_<SECTION>__<KEY>`, e.g.
//!    `HEXA_TEMPLATES__SOURCE_URL`
//! 3. Config file (`--config`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use hexa_core::{
    application::MaterializerConfig,
    domain::{ProjectName, TemplateName},
    error::HexaError,
};

use crate::error::{CliError, CliResult, IntoCli};

const ENV_PREFIX: &str = "HEXA";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Values used when a flag is omitted.
    #[serde(default)]
    pub defaults: Defaults,
    /// Where project templates come from.
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Project name used in generated import paths.
    pub project: String,
    /// Archive directory used by `hexa new`.
    pub template: String,
    /// Generate UUID ids without passing `--uuid`.
    pub use_uuid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub source_url: String,
    /// Literal replaced by the project name in materialized files.
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            project: "my_project".into(),
            template: TemplateName::DEFAULT.into(),
            use_uuid: false,
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        let materializer = MaterializerConfig::default();
        Self {
            source_url: materializer.source_url,
            placeholder: materializer.placeholder,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

/// Keys accepted by `hexa config get/set`.
pub const KEYS: [&str; 7] = [
    "defaults.project",
    "defaults.template",
    "defaults.use_uuid",
    "templates.source_url",
    "templates.placeholder",
    "output.no_color",
    "output.format",
];

impl AppConfig {
    /// Load defaults, then the config file, then `HEXA_*` environment
    /// variables.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    /// The merged `templates` section is validated, whichever layer set it.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::build(&path, required, Some(env_source()))?.validated()
    }

    fn validated(self) -> CliResult<Self> {
        self.materializer_config()
            .validate()
            .map_err(|e| CliError::ConfigError {
                message: match &e {
                    HexaError::Configuration { message } => message.clone(),
                    other => other.to_string(),
                },
                source: Some(Box::new(e)),
            })?;
        Ok(self)
    }

    /// Load defaults and the file only, for rewriting the file in place.
    /// Not validated, so a broken value can still be repaired with `set`.
    pub fn load_file(path: &Path) -> CliResult<Self> {
        Self::build(path, false, None)
    }

    fn build(path: &Path, required: bool, env: Option<Environment>) -> CliResult<Self> {
        debug!(path = %path.display(), required, "Loading configuration");

        let defaults = Config::try_from(&AppConfig::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults).add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(required),
        );
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        builder
            .build()
            .and_then(Config::try_deserialize::<Self>)
            .map_err(config_error)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hexa.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "hexa", "hexa")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".hexa.toml"))
    }

    pub fn materializer_config(&self) -> MaterializerConfig {
        MaterializerConfig {
            source_url: self.templates.source_url.clone(),
            placeholder: self.templates.placeholder.clone(),
        }
    }

    pub fn get(&self, key: &str) -> CliResult<String> {
        Ok(match key {
            "defaults.project" => self.defaults.project.clone(),
            "defaults.template" => self.defaults.template.clone(),
            "defaults.use_uuid" => self.defaults.use_uuid.to_string(),
            "templates.source_url" => self.templates.source_url.clone(),
            "templates.placeholder" => self.templates.placeholder.clone(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return Err(unknown_key(key)),
        })
    }

    /// Set `key`, validating the value the same way the matching flag is.
    pub fn set(&mut self, key: &str, value: &str) -> CliResult<()> {
        match key {
            "defaults.project" => {
                ProjectName::parse(value).map_err(|e| CliError::Core(e.into()))?;
                self.defaults.project = value.into();
            }
            "defaults.template" => {
                TemplateName::parse(value).map_err(|e| CliError::Core(e.into()))?;
                self.defaults.template = value.into();
            }
            "defaults.use_uuid" => self.defaults.use_uuid = parse_bool(key, value)?,
            "templates.source_url" => {
                if value.trim().is_empty() {
                    return Err(invalid_value(key, "URL cannot be empty"));
                }
                self.templates.source_url = value.into();
            }
            "templates.placeholder" => {
                if value.is_empty() {
                    return Err(invalid_value(key, "placeholder cannot be empty"));
                }
                self.templates.placeholder = value.into();
            }
            "output.no_color" => self.output.no_color = parse_bool(key, value)?,
            "output.format" => self.output.format = value.into(),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        let toml = self.to_toml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_cli_context(|| {
                format!("Failed to create config directory '{}'", parent.display())
            })?;
        }
        std::fs::write(path, toml)
            .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}' (known: {})", KEYS.join(", ")),
        source: None,
    }
}

fn invalid_value(key: &str, reason: &str) -> CliError {
    CliError::InvalidInput {
        message: format!("{key}: {reason}"),
        source: None,
    }
}

fn parse_bool(key: &str, value: &str) -> CliResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(invalid_value(key, "expected true or false")),
    }
}
