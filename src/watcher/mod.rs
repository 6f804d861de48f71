//! Directory watcher that triggers a rebuild on every change.
//!
//! # Architecture
//!
//! ```text
//! notify::RecommendedWatcher (non-recursive, one directory)
//!         |
//!   crossbeam channel
//!         |
//!   dispatch thread ── EventFilter ── WatchHandler (MergeHandler)
//! ```
//!
//! Handlers run on the single dispatch thread, so two merges never overlap.

mod directory;
mod error;
mod filter;
mod handler;

pub use directory::{DirectoryWatcher, DirectoryWatcherBuilder, RunningWatcher};
pub use error::WatchError;
pub use filter::EventFilter;
pub use handler::{MergeHandler, WatchHandler};
