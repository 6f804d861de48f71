//! Handler trait invoked for qualifying events.

use std::path::{Path, PathBuf};

use crate::merger::{self, MergeOutcome};

use super::WatchError;

/// Trait for handlers that react to directory changes.
///
/// Handlers run on the watcher's dispatch thread, one call at a time.
pub trait WatchHandler: Send + 'static {
    /// Handler name for logging.
    fn name(&self) -> &str;

    /// Handle one qualifying event.
    ///
    /// `path` is the changed entry; the handler decides how much of the
    /// directory to revisit.
    fn on_change(&mut self, path: &Path) -> Result<(), WatchError>;
}

/// Rebuilds the strip for a directory on every change.
#[derive(Debug, Clone)]
pub struct MergeHandler {
    dir: PathBuf,
}

impl MergeHandler {
    /// Create a handler that merges `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Run a merge now, outside of event delivery.
    pub fn merge_now(&self) -> Result<MergeOutcome, merger::MergeError> {
        merger::merge(&self.dir)
    }
}

impl WatchHandler for MergeHandler {
    fn name(&self) -> &str {
        "merge"
    }

    fn on_change(&mut self, path: &Path) -> Result<(), WatchError> {
        crate::debug_event!("merge", "triggered by", "{}", path.display());
        self.merge_now()
            .map(|_| ())
            .map_err(|e| WatchError::HandlerFailed {
                handler: self.name().to_string(),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}
