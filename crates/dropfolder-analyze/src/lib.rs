//! Filename similarity analysis for dropfolder.
//!
//! Given the records produced by a media scan, this crate reports pairs
//! of files whose names (extensions stripped) look alike.
//!
//! The score is a Ratcliff/Obershelp ratio: the longest common block is
//! matched first, then the unmatched parts on either side are matched
//! recursively. With `M` matched characters and `T` characters in total
//! the ratio is `2*M / T`, so identical names score 1.0 and names with no
//! character in common score 0.0.
//!
//! ```rust
//! use dropfolder_analyze::filename_similarity;
//!
//! let ratio = filename_similarity("track01.mp3", "track01_copy.mp3");
//! assert!(ratio > 0.7);
//! ```
//!
//! Pairwise search over scanned records:
//!
//! ```rust,ignore
//! use dropfolder_analyze::{SimilarNameFinder, SimilarityConfig};
//!
//! let finder = SimilarNameFinder::with_config(SimilarityConfig::default());
//! let report = finder.find(&scan.records);
//!
//! for pair in &report.pairs {
//!     println!("{} ~ {}", pair.first.display(), pair.second.display());
//! }
//! ```

mod similar_names;
mod similarity;

pub use similar_names::{SimilarNameFinder, SimilarPair, SimilarityReport};
pub use similarity::{filename_similarity, matching_characters, sequence_ratio};

// Re-export core types
pub use dropfolder_core::{FileRecord, SimilarityConfig};
