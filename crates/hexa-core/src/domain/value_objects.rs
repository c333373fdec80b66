//! Domain value objects: validated names, ID strategy and artifact kinds.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Names
//! are validated once at construction so services can assume well-formed
//! input; the raw string is kept exactly as the user typed it.

use crate::domain::{entities::template::TemplateId, error::DomainError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ProjectName ──────────────────────────────────────────────────────────────

/// Name of a project directory, also the Go module root used in imports.
///
/// Never case-converted: it is substituted into files byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.clone(),
            reason: reason.into(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("name cannot contain control characters"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── FeatureName ──────────────────────────────────────────────────────────────

/// Feature (entity) name for the generators, e.g. `User` or `Order`.
///
/// Must be a valid Go identifier because it is spliced into type and
/// function names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureName(String);

impl FeatureName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidFeatureName {
            name: name.clone(),
            reason: reason.into(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(invalid("name cannot be empty")),
            Some(c) if !c.is_ascii_alphabetic() => {
                return Err(invalid("name must start with an ASCII letter"));
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("only ASCII letters, digits and '_' are allowed"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased name, used for file names and package paths.
    pub fn lower(&self) -> String {
        self.0.to_lowercase()
    }

    /// Naive plural: append `s` unless the name already ends in `s`, then
    /// lower-case. Used for REST route segments.
    pub fn plural_lower(&self) -> String {
        let plural = if self.0.ends_with('s') {
            self.0.clone()
        } else {
            format!("{}s", self.0)
        };
        plural.to_lowercase()
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── TemplateName ─────────────────────────────────────────────────────────────

/// Name of a top-level directory inside the template archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateName(String);

impl TemplateName {
    pub const DEFAULT: &'static str = "hexagonal";

    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidTemplateName {
            name: name.clone(),
            reason: reason.into(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name == "." || name == ".." {
            return Err(invalid("name must be a directory name"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if name.contains('@') {
            return Err(invalid("name cannot contain '@'"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TemplateName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── IdStrategy ───────────────────────────────────────────────────────────────

/// How generated entities are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Auto-increment `uint` primary key.
    #[default]
    Serial,
    /// `uuid_generate_v4()` string primary key.
    Uuid,
}

impl IdStrategy {
    pub fn from_flag(use_uuid: bool) -> Self {
        if use_uuid { Self::Uuid } else { Self::Serial }
    }

    /// Go type of the `ID` field and of `id` parameters.
    pub const fn id_type(self) -> &'static str {
        match self {
            Self::Serial => "uint",
            Self::Uuid => "string",
        }
    }

    /// Struct tag for the `ID` field.
    pub const fn id_tag(self) -> &'static str {
        match self {
            Self::Serial => r#"gorm:"primaryKey;autoIncrement" json:"id""#,
            Self::Uuid => r#"gorm:"type:uuid;primaryKey;default:uuid_generate_v4()" json:"id""#,
        }
    }

    /// Go literal used when a record is missing.
    pub fn default_id(self) -> String {
        match self {
            Self::Serial => "0".to_string(),
            Self::Uuid => format!("\"{}\"", uuid::Uuid::nil()),
        }
    }

    /// Handler statements that bind `id` from the `:id` route parameter.
    pub const fn id_param(self) -> &'static str {
        match self {
            Self::Serial => concat!(
                "id, err := strconv.Atoi(c.Params(\"id\"))\n",
                "\tif err != nil {\n",
                "\t\treturn utils.NewErrorResponse(c, \"Invalid ID\", err.Error())\n",
                "\t}"
            ),
            Self::Uuid => "id := c.Params(\"id\")",
        }
    }

    /// Expression passing the bound `id` to the service.
    pub const fn id_arg(self) -> &'static str {
        match self {
            Self::Serial => "uint(id)",
            Self::Uuid => "id",
        }
    }

    /// Extra handler import needed to parse the route parameter.
    pub const fn id_import(self) -> &'static str {
        match self {
            Self::Serial => "\"strconv\"",
            Self::Uuid => "",
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => f.write_str("serial"),
            Self::Uuid => f.write_str("uuid"),
        }
    }
}

// ── ArtifactKind ─────────────────────────────────────────────────────────────

/// One layer of a generated feature slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Model,
    Domain,
    Port,
    Repository,
    Service,
    Handler,
    Route,
    App,
    Transactor,
}

impl ArtifactKind {
    pub const TEMPLATE_VERSION: &'static str = "1.0.0";

    pub const ALL: [ArtifactKind; 9] = [
        Self::Model,
        Self::Domain,
        Self::Port,
        Self::Repository,
        Self::Service,
        Self::Handler,
        Self::Route,
        Self::App,
        Self::Transactor,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Domain => "domain",
            Self::Port => "port",
            Self::Repository => "repository",
            Self::Service => "service",
            Self::Handler => "handler",
            Self::Route => "route",
            Self::App => "app",
            Self::Transactor => "transactor",
        }
    }

    /// Capitalised name used in success messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Domain => "Domain",
            Self::Port => "Ports",
            Self::Repository => "Repository",
            Self::Service => "Service",
            Self::Handler => "Handler",
            Self::Route => "Route",
            Self::App => "App",
            Self::Transactor => "Transactor",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Model => "GORM persistence model",
            Self::Domain => "Domain entity with model converters",
            Self::Port => "Repository and service interfaces",
            Self::Repository => "GORM repository implementation",
            Self::Service => "Application service implementation",
            Self::Handler => "Fiber HTTP handlers",
            Self::Route => "Fiber route registration",
            Self::App => "Dependency wiring container",
            Self::Transactor => "Context-scoped database transactions",
        }
    }

    /// Directory used when no output directory is given, relative to the
    /// project root.
    pub const fn default_dir(&self) -> &'static str {
        match self {
            Self::Model => "internal/adapters/database/models",
            Self::Domain => "internal/core/domain",
            Self::Port => "internal/core/ports",
            Self::Repository => "internal/adapters/repositories",
            Self::Service => "internal/core/services",
            Self::Handler => "internal/adapters/http/handlers",
            Self::Route => "internal/adapters/http/routers",
            Self::App => "internal/adapters/app",
            Self::Transactor => "internal/adapters/database",
        }
    }

    /// File name pattern with `{feature}` standing for the lower-cased name.
    pub const fn file_pattern(&self) -> &'static str {
        match self {
            Self::Model => "{feature}.go",
            Self::Domain => "{feature}_domain.go",
            Self::Port => "{feature}_ports.go",
            Self::Repository => "{feature}_repository.go",
            Self::Service => "{feature}_service.go",
            Self::Handler => "{feature}_handlers.go",
            Self::Route => "{feature}_routes.go",
            Self::App => "{feature}_app.go",
            Self::Transactor => "transactor.go",
        }
    }

    /// Store key of the built-in template for this kind.
    pub fn template_id(&self) -> TemplateId {
        TemplateId::new(self.as_str(), Self::TEMPLATE_VERSION)
    }

    pub const fn requires_feature(&self) -> bool {
        !matches!(self, Self::Transactor)
    }

    /// Concrete file name for a feature.
    pub fn file_name(&self, feature: Option<&FeatureName>) -> Result<String, DomainError> {
        let pattern = self.file_pattern();
        if !self.requires_feature() {
            return Ok(pattern.to_string());
        }
        let feature = feature.ok_or(DomainError::MissingRequiredField { field: "feature" })?;
        Ok(pattern.replace("{feature}", &feature.lower()))
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "model" | "models" => Ok(Self::Model),
            "domain" => Ok(Self::Domain),
            "port" | "ports" => Ok(Self::Port),
            "repository" | "repo" => Ok(Self::Repository),
            "service" => Ok(Self::Service),
            "handler" | "handlers" => Ok(Self::Handler),
            "route" | "routes" | "router" => Ok(Self::Route),
            "app" => Ok(Self::App),
            "transactor" => Ok(Self::Transactor),
            other => Err(DomainError::UnknownArtifactKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_is_kept_verbatim() {
        let name = ProjectName::parse("Orders-API").unwrap();
        assert_eq!(name.as_str(), "Orders-API");
    }

    #[test]
    fn project_name_rejects_paths_and_dotfiles() {
        assert!(ProjectName::parse("").is_err());
        assert!(ProjectName::parse(".hidden").is_err());
        assert!(ProjectName::parse("a/b").is_err());
        assert!(ProjectName::parse("a\\b").is_err());
    }

    #[test]
    fn feature_name_must_be_identifier() {
        assert!(FeatureName::parse("User").is_ok());
        assert!(FeatureName::parse("invoice_line2").is_ok());
        assert!(FeatureName::parse("2fa").is_err());
        assert!(FeatureName::parse("user-profile").is_err());
        assert!(FeatureName::parse("").is_err());
    }

    #[test]
    fn plural_only_appends_when_missing() {
        assert_eq!(FeatureName::parse("User").unwrap().plural_lower(), "users");
        assert_eq!(FeatureName::parse("Status").unwrap().plural_lower(), "status");
        assert_eq!(FeatureName::parse("BUS").unwrap().plural_lower(), "buss");
    }

    #[test]
    fn template_name_rejects_traversal() {
        assert!(TemplateName::parse("hexagonal").is_ok());
        assert!(TemplateName::parse("..").is_err());
        assert!(TemplateName::parse("a/b").is_err());
        assert_eq!(TemplateName::default().as_str(), "hexagonal");
    }

    #[test]
    fn uuid_strategy_uses_nil_uuid_default() {
        assert_eq!(
            IdStrategy::Uuid.default_id(),
            "\"00000000-0000-0000-0000-000000000000\""
        );
        assert_eq!(IdStrategy::Serial.default_id(), "0");
        assert_eq!(IdStrategy::from_flag(true).id_type(), "string");
    }

    #[test]
    fn artifact_file_names() {
        let feature = FeatureName::parse("OrderLine").unwrap();
        assert_eq!(
            ArtifactKind::Handler.file_name(Some(&feature)).unwrap(),
            "orderline_handlers.go"
        );
        assert_eq!(ArtifactKind::Model.file_name(Some(&feature)).unwrap(), "orderline.go");
        assert_eq!(ArtifactKind::Transactor.file_name(None).unwrap(), "transactor.go");
        assert_eq!(
            ArtifactKind::Service.file_name(None),
            Err(DomainError::MissingRequiredField { field: "feature" })
        );
    }

    #[test]
    fn artifact_kind_parses_aliases() {
        assert_eq!("routes".parse::<ArtifactKind>().unwrap(), ArtifactKind::Route);
        assert_eq!("REPO".parse::<ArtifactKind>().unwrap(), ArtifactKind::Repository);
        assert!("controller".parse::<ArtifactKind>().is_err());
    }
}
