//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use hexa_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{HexaError, HexaResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> HexaResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    /// Truncates an existing file.
    fn write_file(&self, path: &Path, content: &[u8]) -> HexaResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> HexaResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> HexaError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_truncates_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.go");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, b"a much longer first version").unwrap();
        fs.write_file(&path, b"short").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn write_into_missing_parent_fails_with_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/a.go");

        let err = LocalFilesystem::new().write_file(&path, b"x").unwrap_err();
        assert!(matches!(
            err,
            HexaError::Application(ApplicationError::FilesystemError { path: p, .. }) if p == path
        ));
    }
}
