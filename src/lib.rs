//! Shared plumbing for the dropfolder binaries.

pub mod logging;
