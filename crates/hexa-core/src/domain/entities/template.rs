//! Template aggregate.
//!
//! A [`Template`] is a declarative tree of files and directories. Two kinds
//! of template flow through the system:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Project template (fetched from the archive)              │
//! │   every file is TemplateContent::Raw(bytes)              │
//! │   rewritten with the literal placeholder substitution    │
//! ├──────────────────────────────────────────────────────────┤
//! │ Generator template (built in, one per ArtifactKind)      │
//! │   a single TemplateContent::Parameterized(text) file     │
//! │   rendered with {{VARIABLE}} substitution                │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Paths inside a tree are [`RelativePath`]s, so nothing a template
//! describes can land outside the destination root.

use std::collections::HashSet;
use std::fmt;

use crate::domain::{entities::common::RelativePath, error::DomainError};

// ============================================================================
// Template Identity
// ============================================================================

/// Unique identifier for a template: `name@version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateId {
    name: String,
    version: String,
}

impl TemplateId {
    /// # Panics
    ///
    /// Panics if name contains `@`. This is a programming error, not a
    /// runtime error.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();
        assert!(
            !name.contains('@'),
            "Template name cannot contain @: {}",
            name
        );
        Self { name, version }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

// ============================================================================
// Core Template Aggregate
// ============================================================================

/// A reusable blueprint: identity, display metadata and the tree to create.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `id.name` is non-empty
/// 2. `metadata.name` is non-empty
/// 3. All paths in `tree` are unique
///
/// An empty tree is valid: a template directory with no entries produces
/// an empty project directory.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: TemplateId,
    pub metadata: TemplateMetadata,
    pub tree: TemplateTree,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.name().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template name cannot be empty".into(),
            ));
        }

        if self.metadata.name.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Metadata name cannot be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for node in &self.tree.nodes {
            if !seen.insert(node.path().as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: node.path().as_str(),
                });
            }
        }

        Ok(())
    }

    pub fn file_count(&self) -> usize {
        self.tree
            .nodes
            .iter()
            .filter(|n| matches!(n, TemplateNode::File(_)))
            .count()
    }
}

/// Builder for templates. `build()` checks required fields and invariants.
#[derive(Default)]
pub struct TemplateBuilder {
    id: Option<TemplateId>,
    metadata: Option<TemplateMetadata>,
    tree: TemplateTree,
}

impl TemplateBuilder {
    pub fn id(mut self, id: TemplateId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the entire tree at once (replaces any previous nodes).
    pub fn tree(mut self, tree: TemplateTree) -> Self {
        self.tree = tree;
        self
    }

    /// Add a single node to the tree (accumulates).
    pub fn add_node(mut self, node: TemplateNode) -> Self {
        self.tree.push(node);
        self
    }

    pub fn build(self) -> Result<Template, DomainError> {
        let template = Template {
            id: self
                .id
                .ok_or(DomainError::MissingRequiredField { field: "id" })?,
            metadata: self
                .metadata
                .ok_or(DomainError::MissingRequiredField { field: "metadata" })?,
            tree: self.tree,
        };
        template.validate()?;
        Ok(template)
    }
}

// ============================================================================
// Template Metadata
// ============================================================================

/// Human-readable information about a template.
#[derive(Debug, Clone)]
pub struct TemplateMetadata {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Where the template came from: `builtin` or the archive URL.
    pub source: String,
}

impl TemplateMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: "0.1.0".to_string(),
            source: "builtin".to_string(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn version(mut self, ver: impl Into<String>) -> Self {
        self.version = ver.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

// ============================================================================
// Template Tree
// ============================================================================

/// Ordered list of nodes. Directories are listed before their contents.
#[derive(Debug, Clone, Default)]
pub struct TemplateTree {
    pub nodes: Vec<TemplateNode>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: TemplateNode) {
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone)]
pub enum TemplateNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl TemplateNode {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileSpec {
    pub path: RelativePath,
    pub content: TemplateContent,
}

impl FileSpec {
    pub fn new(path: impl Into<RelativePath>, content: TemplateContent) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub path: RelativePath,
}

impl DirectorySpec {
    pub fn new(path: impl Into<RelativePath>) -> Self {
        Self { path: path.into() }
    }
}

// ============================================================================
// Content Types
// ============================================================================

/// Content specification for a file.
#[derive(Debug, Clone)]
pub enum TemplateContent {
    /// Text with `{{VARIABLE}}` placeholders.
    Parameterized(TemplateSource),

    /// Bytes copied from an archive. Only the context's literal placeholder
    /// is rewritten; every other byte is preserved.
    Raw(Vec<u8>),
}

/// Parameterized text compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSource(&'static str);

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}
