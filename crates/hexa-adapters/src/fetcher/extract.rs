//! Zip extraction into a staging directory.

use std::{
    fs::{self, File},
    io::{self, Read, Seek},
    path::Path,
};

use hexa_core::application::FetchError;
use tracing::trace;
use zip::ZipArchive;

/// Extract every entry of `archive` below `dest`, returning the number of
/// files written.
///
/// Entry names that resolve outside `dest` are rejected. Nothing already
/// extracted is removed when a later entry fails.
pub fn extract_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    dest: &Path,
) -> Result<usize, FetchError> {
    let mut files = 0;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| FetchError::ArchiveEntry {
                entry: format!("#{index}"),
                reason: e.to_string(),
            })?;

        let name = entry.name().to_string();
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| FetchError::ArchiveEntry {
                entry: name.clone(),
                reason: "path escapes the extraction directory".into(),
            })?;
        let target = dest.join(relative);

        if entry.is_dir() {
            trace!(entry = %name, "creating directory");
            fs::create_dir_all(&target).map_err(|e| extract_error(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| extract_error(parent, e))?;
            }
        }

        let mut out = File::create(&target).map_err(|e| extract_error(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| FetchError::CopyEntry {
            path: target.clone(),
            reason: e.to_string(),
        })?;

        trace!(entry = %name, bytes = entry.size(), "extracted file");
        files += 1;
    }

    Ok(files)
}

fn extract_error(path: &Path, e: io::Error) -> FetchError {
    FetchError::Extract {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
