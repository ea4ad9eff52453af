//! Error types for scanning and watching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a media scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root path does not exist.
    #[error("{} does not exist, quitting...", path.display())]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("{} is not a folder, quitting...", path.display())]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Whether the error reports bad user input rather than a failure mid-scan.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotADirectory { .. })
    }
}

/// Errors that can occur while watching and renaming a directory.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The filesystem observer could not be started.
    #[error("Failed to watch {}: {message}", path.display())]
    Observer { path: PathBuf, message: String },

    /// Renaming the watched directory failed.
    #[error("Failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O error.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl WatchError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
