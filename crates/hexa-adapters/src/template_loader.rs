//! Directory-based template loader.
//!
//! Reads one template selection out of an extracted archive and turns it into
//! a domain [`Template`]. Every top-level directory of the staging root is a
//! selectable template:
//!
//! ```text
//! staging/
//! ├── hexagonal/
//! │   ├── go.mod               ← "module go-template"
//! │   ├── cmd/
//! │   │   └── main.go
//! │   └── internal/
//! └── layered/
//!     └── ...
//! ```
//!
//! File bytes are loaded as [`TemplateContent::Raw`]; the only rewrite applied
//! later is the literal placeholder. Names are kept exactly as on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use hexa_core::{
    application::ApplicationError,
    domain::{
        DirectorySpec, FileSpec, RelativePath, Template, TemplateContent, TemplateId,
        TemplateMetadata, TemplateName, TemplateNode, TemplateTree,
    },
    error::HexaResult,
};

/// Version tag given to templates read from an archive.
pub const ARCHIVE_VERSION: &str = "archive";

/// Loads template selections from an extracted archive root.
pub struct DirectoryTemplateLoader {
    root: PathBuf,
    source: Option<String>,
}

impl DirectoryTemplateLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source: None,
        }
    }

    /// Record where the archive came from in the template metadata.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the template selections present under the root, sorted.
    pub fn available(&self) -> HexaResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| self.io_error(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.io_error(&self.root, e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load `template` from `<root>/<template>`.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::TemplateNotFound`] when the subdirectory is absent,
    /// [`ApplicationError::FilesystemError`] when reading fails.
    #[instrument(skip(self), fields(root = %self.root.display(), template = %template))]
    pub fn load(&self, template: &TemplateName) -> HexaResult<Template> {
        let dir = self.root.join(template.as_str());
        if !dir.is_dir() {
            return Err(ApplicationError::TemplateNotFound {
                template: template.to_string(),
                available: self.available().unwrap_or_default(),
            }
            .into());
        }

        let tree = self.build_tree(&dir)?;
        debug!(nodes = tree.len(), "template tree loaded");

        let source = self
            .source
            .clone()
            .unwrap_or_else(|| dir.display().to_string());
        let metadata = TemplateMetadata::new(template.as_str())
            .version(ARCHIVE_VERSION)
            .source(source);

        Ok(Template::builder()
            .id(TemplateId::new(template.as_str(), ARCHIVE_VERSION))
            .metadata(metadata)
            .tree(tree)
            .build()?)
    }

    /// Walk `dir` in file-name order so parents precede their children.
    fn build_tree(&self, dir: &Path) -> HexaResult<TemplateTree> {
        let mut tree = TemplateTree::new();

        for walk_entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let walk_entry = walk_entry.map_err(|e| ApplicationError::FilesystemError {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
                reason: e.to_string(),
            })?;
            let abs_path = walk_entry.path();
            let rel_raw = abs_path
                .strip_prefix(dir)
                .map_err(|e| ApplicationError::FilesystemError {
                    path: abs_path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            let path = RelativePath::try_new(rel_raw.to_path_buf())?;

            if walk_entry.file_type().is_dir() {
                tree.push(TemplateNode::Directory(DirectorySpec::new(path)));
                continue;
            }

            if !walk_entry.file_type().is_file() {
                trace!(path = %abs_path.display(), "skipping special file");
                continue;
            }

            let bytes = fs::read(abs_path).map_err(|e| self.io_error(abs_path, e))?;
            tree.push(TemplateNode::File(FileSpec::new(
                path,
                TemplateContent::Raw(bytes),
            )));
        }

        Ok(tree)
    }

    fn io_error(&self, path: &Path, e: std::io::Error) -> ApplicationError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexa_core::error::HexaError;
    use tempfile::TempDir;

    fn staging(files: &[(&str, &[u8])]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (rel_path, content) in files {
            let full = temp.path().join(rel_path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        temp
    }

    fn name(s: &str) -> TemplateName {
        TemplateName::parse(s).unwrap()
    }

    #[test]
    fn missing_selection_is_template_not_found() {
        let temp = staging(&[("hexagonal/go.mod", b"module go-template")]);
        let err = DirectoryTemplateLoader::new(temp.path())
            .load(&name("layered"))
            .unwrap_err();

        assert!(matches!(
            err,
            HexaError::Application(ApplicationError::TemplateNotFound { ref template, .. })
                if template == "layered"
        ));
    }

    #[test]
    fn file_at_selection_path_is_not_a_template() {
        let temp = staging(&[("hexagonal", b"not a dir")]);
        assert!(
            DirectoryTemplateLoader::new(temp.path())
                .load(&name("hexagonal"))
                .is_err()
        );
    }

    #[test]
    fn loads_raw_bytes_in_walk_order() {
        let temp = staging(&[
            ("hexagonal/go.mod", b"module go-template"),
            ("hexagonal/cmd/main.go", b"package main"),
            ("hexagonal/logo.bin", &[0xff, 0x00, 0xfe]),
        ]);

        let template = DirectoryTemplateLoader::new(temp.path())
            .source("https://example.invalid/templates.zip")
            .load(&name("hexagonal"))
            .unwrap();

        let paths: Vec<_> = template.tree.nodes.iter().map(|n| n.path().as_str()).collect();
        assert_eq!(paths, vec!["cmd", "cmd/main.go", "go.mod", "logo.bin"]);

        let TemplateNode::File(logo) = &template.tree.nodes[3] else {
            panic!("expected a file node");
        };
        assert!(matches!(&logo.content, TemplateContent::Raw(b) if b == &[0xff, 0x00, 0xfe]));
        assert_eq!(
            template.metadata.source,
            "https://example.invalid/templates.zip"
        );
        assert_eq!(template.id, TemplateId::new("hexagonal", ARCHIVE_VERSION));
    }

    #[test]
    fn empty_selection_loads_as_empty_template() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("bare")).unwrap();

        let template = DirectoryTemplateLoader::new(temp.path())
            .load(&name("bare"))
            .unwrap();
        assert!(template.tree.is_empty());
    }

    #[test]
    fn available_lists_top_level_directories() {
        let temp = staging(&[
            ("layered/a.go", b""),
            ("hexagonal/b.go", b""),
            ("README.md", b""),
        ]);

        let names = DirectoryTemplateLoader::new(temp.path()).available().unwrap();
        assert_eq!(names, vec!["hexagonal", "layered"]);
    }

    #[cfg(unix)]
    #[test]
    fn backslash_is_part_of_the_file_name() {
        let temp = staging(&[("hexagonal/a\\b.go", b"package go-template")]);

        let template = DirectoryTemplateLoader::new(temp.path())
            .load(&name("hexagonal"))
            .unwrap();

        assert_eq!(template.tree.len(), 1);
        assert_eq!(template.tree.nodes[0].path().as_path(), Path::new("a\\b.go"));
    }
}
