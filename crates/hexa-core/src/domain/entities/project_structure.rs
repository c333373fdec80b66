use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Rendered output ready to be written below `root`.
///
/// Entries keep the template's order, so every directory precedes the
/// files inside it. It contains no business logic, only data.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&mut self, path: RelativePath, content: Vec<u8>) {
        self.entries
            .push(FsEntry::File(FileToWrite { path, content }));
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries
            .push(FsEntry::Directory(DirectoryToCreate { path }));
    }

    pub fn with_file(mut self, path: impl Into<RelativePath>, content: impl Into<Vec<u8>>) -> Self {
        self.add_file(path.into(), content.into());
        self
    }

    pub fn with_directory(mut self, path: impl Into<RelativePath>) -> Self {
        self.add_directory(path.into());
        self
    }

    /// Paths must be unique. Relativity is already guaranteed by
    /// [`RelativePath`].
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.path().as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: entry.path().as_str(),
                });
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    pub fn directory_count(&self) -> usize {
        self.directories().count()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: Vec<u8>,
}

impl FileToWrite {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}
