//! Core types and configuration for dropfolder.
//!
//! This crate provides the value types shared by the scanner, the
//! similarity analyzer and the inactivity renamer: configuration,
//! rename stamps, file records and error types.

mod config;
mod error;
mod record;
mod stamp;

pub use config::{
    MediaScanConfig, MediaScanConfigBuilder, RenamerConfig, RenamerConfigBuilder,
    SimilarityConfig, SimilarityConfigBuilder,
};
pub use error::{ScanError, WatchError};
pub use record::FileRecord;
pub use stamp::RenameStamp;
