use super::DomainError;
use std::fmt;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// A filesystem path guaranteed to stay below its root.
///
/// Invariant: never absolute and never contains `..`. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path escapes its root (use `try_new` for fallible).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        assert!(
            is_contained(&path),
            "RelativePath must be relative and contained: {:?}",
            path
        );
        Self(path)
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if !is_contained(&path) {
            return Err(DomainError::InvalidTemplate(format!(
                "path escapes its root: {}",
                path.display()
            )));
        }
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash form for display. Only the platform separator is
    /// rewritten; a `\\` in a Unix file name stays as it is.
    pub fn as_str(&self) -> String {
        let lossy = self.0.to_string_lossy();
        if MAIN_SEPARATOR == '\\' {
            lossy.replace(MAIN_SEPARATOR, "/")
        } else {
            lossy.into_owned()
        }
    }
}

fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}
