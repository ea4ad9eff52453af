//! Pairwise search for similarly named files.

use std::path::PathBuf;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dropfolder_core::{FileRecord, SimilarityConfig};

use crate::similarity::sequence_ratio;

/// Two files whose names passed the similarity threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPair {
    /// Path of the file that came first in scan order.
    pub first: PathBuf,
    /// Path of the file that came second in scan order.
    pub second: PathBuf,
    /// Similarity ratio in `[0, 1]`.
    pub similarity: f64,
}

impl SimilarPair {
    /// Similarity as a percentage.
    pub fn percentage(&self) -> f64 {
        self.similarity * 100.0
    }
}

/// Results from a similar-name search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Reported pairs, in scan order of their first then second member.
    pub pairs: Vec<SimilarPair>,

    /// Number of records analyzed.
    pub files_analyzed: u64,

    /// Number of pairs whose names were compared.
    pub comparisons: u64,

    /// Number of pairs skipped because their extensions were equal.
    pub skipped_same_extension: u64,
}

impl SimilarityReport {
    /// Check if any similar pair was found.
    pub fn has_pairs(&self) -> bool {
        !self.pairs.is_empty()
    }

    /// Number of reported pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}

/// Finds pairs of records with similar names.
///
/// Every unordered pair is considered exactly once, with the earlier
/// record (in scan order) as the first member.
pub struct SimilarNameFinder {
    config: SimilarityConfig,
}

impl SimilarNameFinder {
    /// Create a new finder with default config.
    pub fn new() -> Self {
        Self {
            config: SimilarityConfig::default(),
        }
    }

    /// Create a new finder with custom config.
    pub fn with_config(config: SimilarityConfig) -> Self {
        Self { config }
    }

    /// The config this finder was built with.
    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Whether a pair is eligible for comparison under the current config.
    pub fn should_compare(&self, first: &FileRecord, second: &FileRecord) -> bool {
        !(self.config.ignore_same_extension && first.same_extension(second))
    }

    /// Compare every unordered pair of records.
    pub fn find(&self, records: &[FileRecord]) -> SimilarityReport {
        let total = records.len();

        // One row per first member; rows are collected in order
        let rows: Vec<PairRow> = (0..total)
            .into_par_iter()
            .map(|x| self.compare_row(records, x))
            .collect();

        let mut report = SimilarityReport {
            pairs: Vec::new(),
            files_analyzed: total as u64,
            comparisons: 0,
            skipped_same_extension: 0,
        };

        for row in rows {
            report.comparisons += row.comparisons;
            report.skipped_same_extension += row.skipped;
            report.pairs.extend(row.pairs);
        }

        debug!(
            "Compared {} pairs of {} files, {} above {:.2}",
            report.comparisons,
            total,
            report.pairs.len(),
            self.config.threshold
        );

        report
    }

    /// Compare `records[x]` against every record after it.
    fn compare_row(&self, records: &[FileRecord], x: usize) -> PairRow {
        let first = &records[x];
        let mut row = PairRow::default();

        for second in &records[x + 1..] {
            if !self.should_compare(first, second) {
                row.skipped += 1;
                continue;
            }

            row.comparisons += 1;
            let similarity = sequence_ratio(first.stem(), second.stem());
            if similarity >= self.config.threshold {
                row.pairs.push(SimilarPair {
                    first: first.path.clone(),
                    second: second.path.clone(),
                    similarity,
                });
            }
        }

        row
    }
}

impl Default for SimilarNameFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct PairRow {
    pairs: Vec<SimilarPair>,
    comparisons: u64,
    skipped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, extension: &str) -> FileRecord {
        FileRecord::new(name, format!("/media/{name}"), extension, "audio/mpeg")
    }

    #[test]
    fn test_should_compare() {
        let mp3 = record("a.mp3", "mp3");
        let other_mp3 = record("b.mp3", "mp3");
        let wav = record("a.wav", "wav");

        let finder = SimilarNameFinder::new();
        assert!(finder.should_compare(&mp3, &other_mp3));

        let config = SimilarityConfig::builder()
            .ignore_same_extension(true)
            .build()
            .unwrap();
        let finder = SimilarNameFinder::with_config(config);
        assert!(!finder.should_compare(&mp3, &other_mp3));
        assert!(finder.should_compare(&mp3, &wav));
    }

    #[test]
    fn test_last_record_is_compared() {
        let records = vec![
            record("take.mp3", "mp3"),
            record("take1.mp3", "mp3"),
            record("take2.mp3", "mp3"),
        ];

        let report = SimilarNameFinder::new().find(&records);

        assert_eq!(report.comparisons, 3);
        assert_eq!(report.pair_count(), 3);
        assert!(report.pairs.iter().any(|p| p.second == records[2].path && p.first == records[1].path));
    }

    #[test]
    fn test_compares_stems_only() {
        let records = vec![
            record("live.set.mp3", "mp3"),
            record("live.set.flac", "flac"),
            record(".mp3", "mp3"),
        ];

        let report = SimilarNameFinder::new().find(&records);

        assert_eq!(report.pair_count(), 1);
        assert_eq!(report.pairs[0].first, records[0].path);
        assert_eq!(report.pairs[0].second, records[1].path);
        assert_eq!(report.pairs[0].similarity, 1.0);
    }

    #[test]
    fn test_empty_and_single() {
        let finder = SimilarNameFinder::new();

        let report = finder.find(&[]);
        assert_eq!(report.files_analyzed, 0);
        assert!(!report.has_pairs());

        let report = finder.find(&[record("solo.mp3", "mp3")]);
        assert_eq!(report.comparisons, 0);
    }

    #[test]
    fn test_percentage() {
        let pair = SimilarPair {
            first: PathBuf::from("/a"),
            second: PathBuf::from("/b"),
            similarity: 0.75,
        };
        assert_eq!(pair.percentage(), 75.0);
    }
}
