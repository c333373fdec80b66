//! `file://` archive sources and scheme dispatch.

use std::{fs::File, io::Read};

use hexa_core::application::FetchError;

use super::{Downloader, HttpDownloader};

const FILE_SCHEME: &str = "file://";

/// Reads an archive from the local disk. Accepts `file://` URLs and plain
/// paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDownloader;

impl Downloader for FileDownloader {
    fn open(&self, url: &str) -> Result<Box<dyn Read>, FetchError> {
        let path = url.strip_prefix(FILE_SCHEME).unwrap_or(url);
        let file = File::open(path).map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Box::new(file))
    }
}

/// Routes `file://` URLs to [`FileDownloader`] and everything else to
/// [`HttpDownloader`].
#[derive(Clone, Default)]
pub struct UrlDownloader {
    http: HttpDownloader,
    file: FileDownloader,
}

impl UrlDownloader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Downloader for UrlDownloader {
    fn open(&self, url: &str) -> Result<Box<dyn Read>, FetchError> {
        if url.starts_with(FILE_SCHEME) {
            self.file.open(url)
        } else {
            self.http.open(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_file_urls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("templates.zip");
        fs::write(&path, b"PK").unwrap();

        let mut body = Vec::new();
        UrlDownloader::new()
            .open(&format!("file://{}", path.display()))
            .unwrap()
            .read_to_end(&mut body)
            .unwrap();
        assert_eq!(body, b"PK");
    }

    #[test]
    fn missing_file_is_a_transport_error() {
        let err = FileDownloader
            .open("file:///definitely/not/here.zip")
            .err()
            .unwrap();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
