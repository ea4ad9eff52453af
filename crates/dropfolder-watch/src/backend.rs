//! Filesystem observers feeding the renamer.

use std::path::Path;

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use dropfolder_core::WatchError;

use crate::event::WatchEvent;

/// Source of filesystem events for a watched root.
///
/// `start` begins observing the subtree rooted at `root` and forwards
/// every change to `events`. Observation stops when the returned guard is
/// dropped.
pub trait WatchBackend {
    /// Keeps the observer alive.
    type Guard;

    /// Start observing `root` recursively.
    fn start(
        &self,
        root: &Path,
        events: mpsc::UnboundedSender<WatchEvent>,
    ) -> Result<Self::Guard, WatchError>;
}

/// Observer backed by the platform's native notification API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyBackend;

impl NotifyBackend {
    /// Create a backend using notify's default config.
    pub fn new() -> Self {
        Self
    }
}

/// Running notify watcher; dropping it stops observation.
#[derive(Debug)]
pub struct NotifyGuard {
    _watcher: RecommendedWatcher,
}

impl WatchBackend for NotifyBackend {
    type Guard = NotifyGuard;

    fn start(
        &self,
        root: &Path,
        events: mpsc::UnboundedSender<WatchEvent>,
    ) -> Result<NotifyGuard, WatchError> {
        let observer_error = |e: notify::Error| WatchError::Observer {
            path: root.to_path_buf(),
            message: e.to_string(),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    for watch_event in WatchEvent::from_notify(event) {
                        // Receiver gone means the session already ended
                        if events.send(watch_event).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => warn!("Watch error: {e}"),
            },
            Config::default(),
        )
        .map_err(observer_error)?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(observer_error)?;
        debug!("Observer started for {}", root.display());

        Ok(NotifyGuard { _watcher: watcher })
    }
}
