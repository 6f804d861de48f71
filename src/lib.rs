//! Keep a horizontal strip of every image in a directory up to date.
//!
//! The [`merger`] rebuilds `horizontal.png` from the current directory
//! contents; the [`watcher`] runs it again whenever the directory changes.

pub mod logging;

pub mod cli;
pub mod config;
pub mod merger;
pub mod watcher;

pub use config::Settings;
pub use merger::{MergeError, MergeOutcome, merge};
pub use watcher::{DirectoryWatcher, MergeHandler, RunningWatcher, WatchError, WatchHandler};
