//! Rebuilds the horizontal strip from the current directory contents.
//!
//! # Pipeline
//!
//! ```text
//! CLEAR -> LIST -> DECODE -> COMPOSE -> WRITE
//!   │        │        │         │         │
//!   ▼        ▼        ▼         ▼         ▼
//! artifacts paths  images    canvas  horizontal.png
//! ```
//!
//! Every run starts from scratch: the previous artifact is removed first, so
//! a directory with no decodable images ends up with no artifact at all.

mod artifacts;
mod compose;
mod error;
mod sources;

pub use artifacts::{
    PRIMARY_ARTIFACT, RESERVED_ARTIFACTS, clear_artifacts, is_reserved, primary_artifact_path,
};
pub use compose::{CANVAS_FILL, compose_horizontal, strip_dimensions};
pub use error::{MergeError, MergeResult};
pub use sources::{list_candidates, load_image, load_images};

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What a merge run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No decodable images; nothing was written.
    Empty,
    /// The strip was written to `output`.
    Merged {
        images: usize,
        width: u32,
        height: u32,
        output: PathBuf,
        elapsed: Duration,
    },
}

/// Run one full merge over `dir`.
pub fn merge(dir: &Path) -> MergeResult<MergeOutcome> {
    let start = Instant::now();

    clear_artifacts(dir)?;

    let candidates = list_candidates(dir)?;
    crate::debug_event!("merge", "candidates", "{}", candidates.len());

    let images = load_images(&candidates)?;
    if images.is_empty() {
        crate::log_event!("merge", "nothing to merge");
        return Ok(MergeOutcome::Empty);
    }

    let count = images.len();
    let canvas = compose_horizontal(images)?;
    let (width, height) = canvas.dimensions();

    let output = primary_artifact_path(dir);
    canvas
        .save(&output)
        .map_err(|source| MergeError::WriteOutput {
            path: output.clone(),
            source,
        })?;
    drop(canvas);

    let elapsed = start.elapsed();
    crate::log_event!(
        "merge",
        "merged",
        "{count} images in {:.3}s",
        elapsed.as_secs_f64()
    );

    Ok(MergeOutcome::Merged {
        images: count,
        width,
        height,
        output,
        elapsed,
    })
}
