//! Non-recursive directory watcher with a single dispatch thread.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded, select, unbounded};
use notify::{Event, RecursiveMode, Watcher};

use super::error::WatchError;
use super::filter::EventFilter;
use super::handler::WatchHandler;

const DISPATCH_THREAD: &str = "stripwatch-dispatch";

/// Watches one directory and routes qualifying events to a handler.
///
/// Nothing is subscribed until [`DirectoryWatcher::start`] is called.
pub struct DirectoryWatcher {
    dir: PathBuf,
    handler: Box<dyn WatchHandler>,
}

impl DirectoryWatcher {
    /// Create a builder for configuring the watcher.
    pub fn builder() -> DirectoryWatcherBuilder {
        DirectoryWatcherBuilder::new()
    }

    /// Directory being watched.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Subscribe to the directory and start dispatching events.
    ///
    /// Fails if the directory cannot be watched (missing, inaccessible).
    pub fn start(self) -> Result<RunningWatcher, WatchError> {
        let (event_tx, event_rx) = unbounded();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = event_tx.send(res);
        })?;

        watcher
            .watch(&self.dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: self.dir.clone(),
                reason: e.to_string(),
            })?;

        let (stop_tx, stop_rx) = bounded(1);
        let handler = self.handler;
        let handle = thread::Builder::new()
            .name(DISPATCH_THREAD.to_string())
            .spawn(move || dispatch(handler, event_rx, stop_rx))
            .map_err(|e| WatchError::InitFailed {
                reason: format!("cannot spawn {DISPATCH_THREAD}: {e}"),
            })?;

        crate::debug_event!("watcher", "started", "{}", self.dir.display());

        Ok(RunningWatcher {
            dir: self.dir,
            watcher: Some(watcher),
            stop_tx,
            handle: Some(handle),
        })
    }
}

/// A started watcher.
///
/// Call [`RunningWatcher::stop`] to shut down and observe errors. Dropping
/// it performs the same shutdown and discards them.
pub struct RunningWatcher {
    dir: PathBuf,
    watcher: Option<notify::RecommendedWatcher>,
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RunningWatcher {
    /// Stop watching and wait for the dispatch thread to finish.
    ///
    /// Events already queued are still handled before the thread exits.
    pub fn stop(mut self) -> Result<(), WatchError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), WatchError> {
        if let Some(mut watcher) = self.watcher.take() {
            if let Err(e) = watcher.unwatch(&self.dir) {
                crate::debug_event!("watcher", "unwatch failed", "{e}");
            }
        }

        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        // The thread may already be gone if the subscription closed
        let _ = self.stop_tx.try_send(());
        handle.join().map_err(|_| WatchError::DispatchPanicked)?;

        crate::debug_event!("watcher", "stopped", "{}", self.dir.display());
        Ok(())
    }
}

impl Drop for RunningWatcher {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            tracing::error!("[watcher] shutdown failed: {e}");
        }
    }
}

/// Dispatch loop. Runs until stopped or until the subscription closes.
fn dispatch(
    mut handler: Box<dyn WatchHandler>,
    events: Receiver<notify::Result<Event>>,
    stop: Receiver<()>,
) {
    let mut filter = EventFilter::new();

    loop {
        select! {
            recv(events) -> msg => match msg {
                Ok(res) => handle_result(&mut filter, handler.as_mut(), res),
                Err(_) => break,
            },
            recv(stop) -> _ => {
                for res in events.try_iter() {
                    handle_result(&mut filter, handler.as_mut(), res);
                }
                break;
            }
        }
    }
}

fn handle_result(
    filter: &mut EventFilter,
    handler: &mut dyn WatchHandler,
    res: notify::Result<Event>,
) {
    let event = match res {
        Ok(event) => event,
        Err(e) => {
            let error = WatchError::EventError {
                details: e.to_string(),
            };
            tracing::error!("[watcher] {error}");
            return;
        }
    };

    if !filter.qualifies(&event) {
        crate::debug_event!("watcher", "ignored", "{:?} {:?}", event.kind, event.paths);
        return;
    }

    let path = event.paths.first().cloned().unwrap_or_default();
    crate::debug_event!("watcher", "changed", "{:?} {}", event.kind, path.display());

    if let Err(e) = handler.on_change(&path) {
        tracing::error!("[{}] {e}", handler.name());
    }
}

/// Builder for constructing a DirectoryWatcher.
pub struct DirectoryWatcherBuilder {
    dir: Option<PathBuf>,
    handler: Option<Box<dyn WatchHandler>>,
}

impl DirectoryWatcherBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            dir: None,
            handler: None,
        }
    }

    /// Set the directory to watch (defaults to the current directory).
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Set the handler.
    pub fn handler(mut self, handler: impl WatchHandler) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Build the DirectoryWatcher.
    pub fn build(self) -> Result<DirectoryWatcher, WatchError> {
        let handler = self.handler.ok_or_else(|| WatchError::InitFailed {
            reason: "Handler is required".to_string(),
        })?;

        let dir = self.dir.unwrap_or_else(|| PathBuf::from("."));

        Ok(DirectoryWatcher { dir, handler })
    }
}

impl Default for DirectoryWatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
