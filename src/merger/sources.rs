//! Candidate discovery and decoding.

use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat, ImageReader};

use super::artifacts::is_reserved;
use super::error::{MergeError, MergeResult};

/// List the candidate input files of `dir`.
///
/// Returns direct children that are not directories and not reserved
/// artifacts, sorted by their full path string.
pub fn list_candidates(dir: &Path) -> MergeResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| MergeError::ListDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| MergeError::ListDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() || is_reserved(&path) {
            continue;
        }
        candidates.push(path);
    }

    candidates.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(candidates)
}

/// Decode a single candidate.
///
/// The whole file is read first, so only file system failures are errors.
/// `Ok(None)` means the bytes are not an image we can decode (unknown
/// format, corrupt or truncated data), or the file vanished before we could
/// open it.
pub fn load_image(path: &Path) -> MergeResult<Option<DynamicImage>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            crate::debug_event!("merge", "vanished", "{}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(MergeError::ReadImage {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match decode(path, bytes) {
        Ok(image) => Ok(Some(image)),
        Err(ImageError::Limits(e)) => {
            tracing::warn!("[merge] skipped {}: {e}", path.display());
            Ok(None)
        }
        Err(e) => {
            crate::debug_event!("merge", "skipped", "{}: {e}", path.display());
            Ok(None)
        }
    }
}

/// Decode `bytes` read from `path` with the default allocation limits.
fn decode(path: &Path, bytes: Vec<u8>) -> Result<DynamicImage, ImageError> {
    let mut reader = ImageReader::new(Cursor::new(bytes));
    // Content sniffing wins; the extension covers formats without a signature
    if let Ok(format) = ImageFormat::from_path(path) {
        reader.set_format(format);
    }
    reader.with_guessed_format()?.decode()
}

/// Decode every candidate in order, dropping the ones that are not images.
pub fn load_images(paths: &[PathBuf]) -> MergeResult<Vec<DynamicImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        if let Some(image) = load_image(path)? {
            images.push(image);
        }
    }
    Ok(images)
}
