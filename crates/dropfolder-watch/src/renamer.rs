//! The await / watch / rename cycle.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use dropfolder_core::{RenameStamp, RenamerConfig, WatchError};

use crate::backend::{NotifyBackend, WatchBackend};
use crate::event::{ActivityKind, WatchEvent};
use crate::session::{Activity, ActivityTracker};

/// Where the renamer is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the root directory to exist.
    Awaiting,
    /// Observing the root until it goes quiet or disappears.
    Watching,
    /// Grace period expired; the root is about to be renamed.
    Renaming,
}

/// How [`Renamer::await_target`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwaitOutcome {
    /// The root exists and is a directory.
    Found,
    /// Cancelled before the root appeared.
    Interrupted,
}

/// How a watch session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// No activity for longer than the grace period.
    GraceExpired,
    /// The root was deleted while being watched.
    RootRemoved,
    /// Cancelled while watching.
    Interrupted,
}

/// Why [`Renamer::run`] stopped. Cancellation is the only way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    /// Cancelled while waiting for the root; nothing was being watched.
    WhileIdle,
    /// Cancelled while watching, before the grace period expired.
    WhileWatching,
}

impl Interrupted {
    /// Process exit status for this interruption.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::WhileIdle => 0,
            Self::WhileWatching => 1,
        }
    }
}

/// Renames a directory once it has been idle for a grace period, then
/// waits for the next directory with the same name.
pub struct Renamer<B: WatchBackend = NotifyBackend> {
    root: PathBuf,
    interval: Duration,
    grace_period: Duration,
    stamp: RenameStamp,
    backend: B,
    phase: Phase,
}

impl Renamer<NotifyBackend> {
    /// Create a renamer using native filesystem notifications and a fresh run id.
    pub fn new(config: &RenamerConfig) -> Result<Self, WatchError> {
        let stamp = RenameStamp::generate(config.sequence_offset, config.leading_zeros);
        Self::with_backend(config, NotifyBackend::new(), stamp)
    }
}

impl<B: WatchBackend> Renamer<B> {
    /// Create a renamer with an explicit event source and starting stamp.
    pub fn with_backend(
        config: &RenamerConfig,
        backend: B,
        stamp: RenameStamp,
    ) -> Result<Self, WatchError> {
        if config.interval.is_zero() {
            return Err(WatchError::InvalidConfig {
                message: "Interval must be greater than zero".to_string(),
            });
        }

        let root = std::path::absolute(&config.root)
            .map_err(|e| WatchError::io(&config.root, e))?
            .components()
            .collect();

        Ok(Self {
            root,
            interval: config.interval,
            grace_period: config.grace_period,
            stamp,
            backend,
            phase: Phase::Awaiting,
        })
    }

    /// Absolute path of the watched root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stamp the current session will rename with.
    pub fn stamp(&self) -> &RenameStamp {
        &self.stamp
    }

    /// Current phase of the cycle.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Path the root will be renamed to when the current session expires.
    pub fn target(&self) -> PathBuf {
        self.stamp.apply(&self.root)
    }

    /// Run the await / watch / rename cycle until cancelled.
    ///
    /// Every session, whether it ends in a rename or in the root being
    /// deleted, advances the sequence number by one.
    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<Interrupted, WatchError> {
        self.phase = Phase::Awaiting;

        loop {
            self.phase = match self.phase {
                Phase::Awaiting => match self.await_target(cancel).await {
                    AwaitOutcome::Found => Phase::Watching,
                    AwaitOutcome::Interrupted => return Ok(Interrupted::WhileIdle),
                },
                Phase::Watching => match self.watch(cancel).await? {
                    SessionEnd::GraceExpired => Phase::Renaming,
                    SessionEnd::RootRemoved => {
                        self.end_session();
                        Phase::Awaiting
                    }
                    SessionEnd::Interrupted => return Ok(Interrupted::WhileWatching),
                },
                Phase::Renaming => {
                    self.rename_root()?;
                    self.end_session();
                    Phase::Awaiting
                }
            };
        }
    }

    /// Wait until the root exists as a directory, checking every interval.
    pub async fn await_target(&self, cancel: &CancellationToken) -> AwaitOutcome {
        info!("Waiting for root directory at {}", self.root.display());

        loop {
            if self.root.is_dir() {
                info!("Root directory detected, starting to watch for changes");
                return AwaitOutcome::Found;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(
                        "Received interrupt, quitting. Root directory at {} not found",
                        self.root.display()
                    );
                    return AwaitOutcome::Interrupted;
                }
                _ = time::sleep(self.interval) => {}
            }
        }
    }

    /// Watch the root until it has been idle for the grace period, is
    /// deleted, or the token is cancelled. The observer is stopped on
    /// every exit path.
    ///
    /// Events are matched against the canonical root, since some
    /// observers report paths with symlinks resolved.
    pub async fn watch(&self, cancel: &CancellationToken) -> Result<SessionEnd, WatchError> {
        let watched = match self.root.canonicalize() {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "Root directory {} disappeared, stopping watcher",
                    self.root.display()
                );
                return Ok(SessionEnd::RootRemoved);
            }
            Err(e) => return Err(WatchError::io(&self.root, e)),
        };

        let (tx, mut rx) = mpsc::unbounded_channel();
        let observer = self.backend.start(&watched, tx)?;

        let mut tracker = ActivityTracker::new(&watched, Instant::now());
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let end = loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(
                        "Received interrupt, quitting. Was watching {} for changes, grace period had not expired",
                        self.root.display()
                    );
                    break SessionEnd::Interrupted;
                }
                Some(event) = rx.recv() => {
                    log_event(&event);
                    if tracker.record(&event, Instant::now()) == Activity::RootRemoved {
                        info!(
                            "Root directory {} disappeared, stopping watcher",
                            self.root.display()
                        );
                        break SessionEnd::RootRemoved;
                    }
                }
                _ = ticker.tick() => {
                    if tracker.grace_expired(Instant::now(), self.grace_period) {
                        debug!(
                            "Idle for {:?} after {} events",
                            tracker.idle_for(Instant::now()),
                            tracker.events_seen()
                        );
                        break SessionEnd::GraceExpired;
                    }
                }
            }
        };

        drop(observer);
        Ok(end)
    }

    /// Rename the root to its stamped name.
    ///
    /// Returns `None` when the root vanished before it could be renamed.
    fn rename_root(&self) -> Result<Option<PathBuf>, WatchError> {
        let target = self.target();

        if target.exists() {
            return Err(WatchError::Rename {
                from: self.root.clone(),
                to: target,
                source: io::Error::new(io::ErrorKind::AlreadyExists, "target already exists"),
            });
        }

        match std::fs::rename(&self.root, &target) {
            Ok(()) => {
                info!(
                    "Grace period ended, renaming {} to {}",
                    self.root.display(),
                    target.display()
                );
                Ok(Some(target))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "Root directory {} disappeared before it could be renamed",
                    self.root.display()
                );
                Ok(None)
            }
            Err(source) => Err(WatchError::Rename {
                from: self.root.clone(),
                to: target,
                source,
            }),
        }
    }

    fn end_session(&mut self) {
        self.stamp = self.stamp.next();
    }
}

fn log_event(event: &WatchEvent) {
    match event.kind {
        ActivityKind::Created => {
            let what = if event.path.is_dir() { "subdirectory" } else { "file" };
            info!("New {what} created: {}", event.path.display());
        }
        ActivityKind::Modified => debug!("Path modified: {}", event.path.display()),
        ActivityKind::Removed => info!("Path deleted: {}", event.path.display()),
    }
}
