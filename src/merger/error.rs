//! Error types for the merger.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a merge attempt.
///
/// Undecodable candidates and already-absent artifacts are not errors;
/// they never reach this type.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Failed to remove artifact {path}: {source}")]
    RemoveArtifact {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to list directory {path}: {source}")]
    ListDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read image {path}: {source}")]
    ReadImage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Composite of {images} images exceeds the maximum canvas width")]
    CanvasTooWide { images: usize },
}

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;
