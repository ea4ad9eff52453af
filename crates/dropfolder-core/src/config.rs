//! Configuration types for the scanner, the analyzer and the renamer.

use std::path::PathBuf;
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a media scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct MediaScanConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Substring matched against the sniffed MIME type (e.g. "audio").
    #[builder(default)]
    #[serde(default)]
    pub mime_substring: String,

    /// Descend into subdirectories.
    #[builder(default = "false")]
    #[serde(default)]
    pub recurse: bool,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Descend into symlinked directories when recursing.
    ///
    /// Symlinks to files are always examined, through the link.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Number of threads for the walk (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_true() -> bool {
    true
}

impl MediaScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                Err("Root path cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Root path is required".to_string()),
        }
    }
}

impl MediaScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> MediaScanConfigBuilder {
        MediaScanConfigBuilder::default()
    }

    /// Create a top-level scan of `root` for types containing `mime_substring`.
    pub fn new(root: impl Into<PathBuf>, mime_substring: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            mime_substring: mime_substring.into(),
            recurse: false,
            include_hidden: true,
            follow_symlinks: false,
            threads: 0,
        }
    }

    /// Check whether a sniffed MIME type is wanted by this scan.
    pub fn matches_mime(&self, mime: &str) -> bool {
        mime.contains(self.mime_substring.as_str())
    }

    /// Maximum walk depth below the root.
    pub fn max_depth(&self) -> usize {
        if self.recurse { usize::MAX } else { 1 }
    }
}

/// Configuration for filename similarity analysis.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SimilarityConfig {
    /// Minimum ratio for a pair to be reported, 1.0 is identity.
    #[builder(default = "0.8")]
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Skip pairs whose detected extensions are equal.
    #[builder(default = "false")]
    #[serde(default)]
    pub ignore_same_extension: bool,
}

fn default_threshold() -> f64 {
    0.8
}

impl SimilarityConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(format!("Similarity must be between 0 and 1, got {threshold}"));
            }
        }
        Ok(())
    }
}

impl SimilarityConfig {
    /// Create a new similarity config builder.
    pub fn builder() -> SimilarityConfigBuilder {
        SimilarityConfigBuilder::default()
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            ignore_same_extension: false,
        }
    }
}

/// Configuration for the inactivity renamer.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct RenamerConfig {
    /// Directory to wait for, watch and rename.
    pub root: PathBuf,

    /// How often to check for the directory and for expired grace periods.
    #[builder(default = "Duration::from_secs(10)")]
    #[serde(default = "default_interval")]
    pub interval: Duration,

    /// Inactivity required before the directory is renamed.
    #[builder(default = "Duration::from_secs(600)")]
    #[serde(default = "default_grace_period")]
    pub grace_period: Duration,

    /// First sequence number used by this run.
    #[builder(default = "0")]
    #[serde(default)]
    pub sequence_offset: u64,

    /// Minimum width of the zero-padded sequence number.
    #[builder(default = "2")]
    #[serde(default = "default_leading_zeros")]
    pub leading_zeros: usize,
}

fn default_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_grace_period() -> Duration {
    Duration::from_secs(600)
}

fn default_leading_zeros() -> usize {
    2
}

impl RenamerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            Some(_) => {}
        }
        if self.interval == Some(Duration::ZERO) {
            return Err("Interval must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl RenamerConfig {
    /// Create a new renamer config builder.
    pub fn builder() -> RenamerConfigBuilder {
        RenamerConfigBuilder::default()
    }

    /// Create a config for `root` with default timings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            interval: default_interval(),
            grace_period: default_grace_period(),
            sequence_offset: 0,
            leading_zeros: default_leading_zeros(),
        }
    }
}
