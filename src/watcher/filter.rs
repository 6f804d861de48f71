//! Decides which file system events should trigger the handler.

use std::path::Path;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};

use crate::merger::is_reserved;

/// Stateful filter over the raw `notify` event stream.
///
/// Ignored:
/// - access events (opening or reading a file changes nothing)
/// - events on directories
/// - events on reserved artifacts
/// - the second half of a rename whose first half already qualified
#[derive(Debug, Default)]
pub struct EventFilter {
    /// Tracker of the last qualifying rename-from half.
    pending_rename: Option<usize>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `event` should trigger the handler.
    pub fn qualifies(&mut self, event: &Event) -> bool {
        match event.kind {
            EventKind::Access(_) => return false,
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                self.take_pending(event.tracker());
                return false;
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
                if self.take_pending(event.tracker()) {
                    return false;
                }
            }
            EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => {
                return false;
            }
            _ => {}
        }

        let Some(path) = event.paths.first() else {
            // Rescan notifications carry no path
            return matches!(event.kind, EventKind::Any | EventKind::Other);
        };

        if !Self::path_qualifies(path) {
            return false;
        }

        if let EventKind::Modify(ModifyKind::Name(RenameMode::From)) = event.kind {
            self.pending_rename = event.tracker();
        }
        true
    }

    fn path_qualifies(path: &Path) -> bool {
        !path.is_dir() && !is_reserved(path)
    }

    /// Clear the pending rename if `tracker` matches it.
    fn take_pending(&mut self, tracker: Option<usize>) -> bool {
        match (self.pending_rename, tracker) {
            (Some(pending), Some(tracker)) if pending == tracker => {
                self.pending_rename = None;
                true
            }
            _ => false,
        }
    }
}
