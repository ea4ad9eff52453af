//! Filesystem events relevant to inactivity tracking.

use std::path::PathBuf;

use notify::EventKind;
use strum::Display;

/// The kind of change observed under a watched root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ActivityKind {
    /// A file or directory was created.
    Created,
    /// A file or directory was modified, renamed or had its metadata changed.
    Modified,
    /// A file or directory was deleted.
    Removed,
}

impl ActivityKind {
    /// Map a notify event kind, ignoring reads and unclassified events.
    pub fn from_notify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Self::Created),
            EventKind::Modify(_) => Some(Self::Modified),
            EventKind::Remove(_) => Some(Self::Removed),
            _ => None,
        }
    }
}

/// A single change to a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    /// What happened.
    pub kind: ActivityKind,
    /// Where it happened.
    pub path: PathBuf,
}

impl WatchEvent {
    /// Create a new event.
    pub fn new(kind: ActivityKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Shorthand for a creation event.
    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self::new(ActivityKind::Created, path)
    }

    /// Shorthand for a modification event.
    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self::new(ActivityKind::Modified, path)
    }

    /// Shorthand for a deletion event.
    pub fn removed(path: impl Into<PathBuf>) -> Self {
        Self::new(ActivityKind::Removed, path)
    }

    /// Split a notify event into one event per affected path.
    pub fn from_notify(event: notify::Event) -> Vec<Self> {
        let Some(kind) = ActivityKind::from_notify(&event.kind) else {
            return Vec::new();
        };
        event
            .paths
            .into_iter()
            .map(|path| Self::new(kind, path))
            .collect()
    }
}
