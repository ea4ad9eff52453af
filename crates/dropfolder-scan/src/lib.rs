//! Media file scanning for dropfolder.
//!
//! This crate walks a directory with jwalk and keeps the files whose
//! content type, sniffed from their leading bytes, matches a MIME
//! substring such as `"audio"` or `"image/png"`.
//!
//! # Example
//!
//! ```rust,no_run
//! use dropfolder_scan::{MediaScanConfig, MediaScanner};
//!
//! let config = MediaScanConfig::new("/path/to/music", "audio");
//! let scan = MediaScanner::new().scan(&config).unwrap();
//!
//! for record in &scan.records {
//!     println!("{} ({})", record.path.display(), record.mime);
//! }
//! ```

mod scanner;
mod sniff;

pub use scanner::{MediaScan, MediaScanner};
pub use sniff::{ContentType, sniff_bytes, sniff_path};

// Re-export core types for convenience
pub use dropfolder_core::{FileRecord, MediaScanConfig, ScanError};
