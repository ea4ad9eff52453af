//! Inactivity watcher and renamer for dropfolder.
//!
//! A [`Renamer`] waits for a directory to appear, watches it recursively
//! for filesystem events and renames it to `<root>_<run>_<sequence>` once
//! nothing has changed for a grace period. It then waits for a new
//! directory under the original name, forever, until cancelled.
//!
//! The filesystem observer runs on its own thread and hands events to the
//! foreground loop over a channel; all session state lives in that loop.
//!
//! ```rust,no_run
//! use dropfolder_core::RenamerConfig;
//! use dropfolder_watch::Renamer;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), dropfolder_core::WatchError> {
//! let config = RenamerConfig::new("/srv/incoming");
//! let mut renamer = Renamer::new(&config)?;
//!
//! let cancel = CancellationToken::new();
//! let interrupted = renamer.run(&cancel).await?;
//! std::process::exit(interrupted.exit_code());
//! # }
//! ```

mod backend;
mod event;
mod renamer;
mod session;

pub use backend::{NotifyBackend, NotifyGuard, WatchBackend};
pub use event::{ActivityKind, WatchEvent};
pub use renamer::{AwaitOutcome, Interrupted, Phase, Renamer, SessionEnd};
pub use session::{Activity, ActivityTracker};

// Re-export core types for convenience
pub use dropfolder_core::{RenameStamp, RenamerConfig, WatchError};
