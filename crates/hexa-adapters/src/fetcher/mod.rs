//! Remote template archive fetcher.
//!
//! Downloads the archive into a `template*.zip` temporary file, extracts it
//! into a staging directory and loads one top-level directory of it as a
//! [`Template`]. Both temporaries are removed when the fetch returns.

mod extract;
mod http;
mod local;

use std::{
    io::{self, Read, Seek, Write},
    path::{Path, PathBuf},
};

use tempfile::{Builder, NamedTempFile, TempDir};
use tracing::{debug, info, instrument, warn};
use zip::ZipArchive;

use hexa_core::{
    application::{FetchError, ports::TemplateFetcher},
    domain::{Template, TemplateName},
    error::HexaResult,
};

use crate::template_loader::DirectoryTemplateLoader;

pub use extract::extract_archive;
pub use http::HttpDownloader;
pub use local::{FileDownloader, UrlDownloader};

/// Source of archive bytes.
///
/// [`UrlDownloader`] is the production implementation; tests serve archives
/// from memory.
pub trait Downloader: Send + Sync {
    /// Open `url` for reading.
    ///
    /// # Errors
    ///
    /// [`FetchError::Transport`] when the server cannot be reached and
    /// [`FetchError::HttpStatus`] for any answer other than 200.
    fn open(&self, url: &str) -> Result<Box<dyn Read>, FetchError>;
}

/// Fetches templates from a zip archive served by a [`Downloader`].
pub struct ZipTemplateFetcher<D: Downloader = UrlDownloader> {
    downloader: D,
    staging_root: Option<PathBuf>,
}

impl Default for ZipTemplateFetcher<UrlDownloader> {
    fn default() -> Self {
        Self::new(UrlDownloader::new())
    }
}

impl<D: Downloader> ZipTemplateFetcher<D> {
    pub fn new(downloader: D) -> Self {
        Self {
            downloader,
            staging_root: None,
        }
    }

    /// Place temporary files under `root` instead of the system temp dir.
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(root.into());
        self
    }

    /// Download the archive at `url` and extract all of it below `dest`.
    ///
    /// The temporary archive file is gone when this returns, on every path.
    /// Entries extracted before a failure stay in `dest`.
    #[instrument(skip(self), fields(dest = %dest.display()))]
    pub fn fetch_into(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let mut archive_file = self.temp_archive()?;
        let archive_path = archive_file.path().to_path_buf();

        let mut body = self.downloader.open(url)?;
        let bytes = copy_body(url, &mut body, archive_file.as_file_mut(), &archive_path)?;
        debug!(bytes, path = %archive_path.display(), "archive saved");

        archive_file
            .as_file_mut()
            .rewind()
            .map_err(|e| FetchError::Persist {
                path: archive_path.clone(),
                reason: e.to_string(),
            })?;

        let mut archive =
            ZipArchive::new(archive_file.as_file()).map_err(|e| FetchError::InvalidArchive {
                reason: e.to_string(),
            })?;

        let files = extract_archive(&mut archive, dest)?;
        info!(files, "archive extracted");
        Ok(())
    }

    fn temp_archive(&self) -> Result<NamedTempFile, FetchError> {
        let mut builder = Builder::new();
        builder.prefix("template").suffix(".zip");

        match &self.staging_root {
            Some(root) => builder.tempfile_in(root),
            None => builder.tempfile(),
        }
        .map_err(|e| FetchError::TempFile {
            reason: e.to_string(),
        })
    }

    fn staging_dir(&self) -> Result<TempDir, FetchError> {
        let mut builder = Builder::new();
        builder.prefix("hexa-staging");

        match &self.staging_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| FetchError::Staging {
            reason: e.to_string(),
        })
    }
}

impl<D: Downloader> TemplateFetcher for ZipTemplateFetcher<D> {
    #[instrument(skip(self), fields(template = %template))]
    fn fetch(&self, source_url: &str, template: &TemplateName) -> HexaResult<Template> {
        let staging = self.staging_dir()?;
        self.fetch_into(source_url, staging.path())?;

        let loader = DirectoryTemplateLoader::new(staging.path()).source(source_url);
        let loaded = loader.load(template);

        let staging_path = staging.path().to_path_buf();
        if let Err(e) = staging.close() {
            warn!(
                error = %e,
                path = %staging_path.display(),
                "Failed to remove staging directory"
            );
        }

        loaded
    }
}

/// Copy the response body, telling read failures (network) apart from
/// write failures (local disk).
fn copy_body(
    url: &str,
    body: &mut dyn Read,
    out: &mut impl Write,
    path: &Path,
) -> Result<u64, FetchError> {
    let mut buf = [0u8; 8 * 1024];
    let mut total = 0u64;

    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        };
        out.write_all(&buf[..n]).map_err(|e| FetchError::Persist {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        total += n as u64;
    }

    out.flush().map_err(|e| FetchError::Persist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(total)
}
