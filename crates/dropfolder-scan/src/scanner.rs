//! JWalk-based media scanner.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use jwalk::{Parallelism, WalkDir};
use rayon::prelude::*;
use tracing::{debug, warn};

use dropfolder_core::{FileRecord, MediaScanConfig, ScanError};

use crate::sniff::{ContentType, sniff_path};

/// Result of a media scan.
#[derive(Debug, Clone)]
pub struct MediaScan {
    /// Root directory as given in the config.
    pub root: PathBuf,
    /// Matching files, in walk order.
    pub records: Vec<FileRecord>,
    /// Number of regular files inspected.
    pub files_examined: u64,
    /// Number of files that could not be read for sniffing.
    pub unreadable: u64,
    /// Time taken by the scan.
    pub scan_duration: Duration,
}

impl MediaScan {
    /// Number of matching files.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no file matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Scanner that collects files of a given content type.
pub struct MediaScanner;

impl MediaScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan the configured root for files whose sniffed MIME type matches.
    pub fn scan(&self, config: &MediaScanConfig) -> Result<MediaScan, ScanError> {
        let start = Instant::now();
        validate_root(&config.root)?;

        let candidates = self.collect_files(config);
        let files_examined = candidates.len() as u64;

        // Sniff in parallel; collect() keeps walk order
        let sniffed: Vec<(PathBuf, String, io::Result<Option<ContentType>>)> = candidates
            .into_par_iter()
            .map(|(path, name)| {
                let kind = sniff_path(&path);
                (path, name, kind)
            })
            .collect();

        let mut records = Vec::new();
        let mut unreadable = 0u64;
        for (path, name, kind) in sniffed {
            match kind {
                Ok(Some(kind)) if config.matches_mime(kind.mime) => {
                    records.push(FileRecord::new(name, path, kind.extension, kind.mime));
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("Skipping unreadable file {}: {err}", path.display());
                    unreadable += 1;
                }
            }
        }

        let scan_duration = start.elapsed();
        debug!(
            "Scanned {} files under {} in {:?}, {} matched",
            files_examined,
            config.root.display(),
            scan_duration,
            records.len()
        );

        Ok(MediaScan {
            root: config.root.clone(),
            records,
            files_examined,
            unreadable,
            scan_duration,
        })
    }

    /// Walk the tree and return every regular file with its name.
    fn collect_files(&self, config: &MediaScanConfig) -> Vec<(PathBuf, String)> {
        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        let walker = WalkDir::new(&config.root)
            .parallelism(parallelism)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .sort(true)
            .min_depth(1)
            .max_depth(config.max_depth());

        let mut files = Vec::new();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.display().to_string()).unwrap_or_default();
                    warn!("Skipping {path}: {err}");
                    continue;
                }
            };

            if !is_regular_file(&entry.file_type(), &entry.path()) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            files.push((entry.path(), name));
        }

        files
    }
}

impl Default for MediaScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Regular files, and symlinks whose target is a regular file.
fn is_regular_file(file_type: &std::fs::FileType, path: &Path) -> bool {
    file_type.is_file() || (file_type.is_symlink() && path.is_file())
}

/// Check that the scan root exists and is a directory.
fn validate_root(root: &Path) -> Result<(), ScanError> {
    let metadata = std::fs::metadata(root).map_err(|e| ScanError::io(root, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sniff::fixtures::{JPEG, MP3, WAV};
    use std::fs;
    use tempfile::TempDir;

    fn create_media_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("song.mp3"), MP3).unwrap();
        fs::write(root.join("song.wav"), WAV).unwrap();
        fs::write(root.join("photo.jpg"), JPEG).unwrap();
        fs::write(root.join("notes.txt"), "plain text").unwrap();

        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested/deep.mp3"), MP3).unwrap();

        temp
    }

    fn names(scan: &MediaScan) -> Vec<&str> {
        scan.records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_collects_matching_type_top_level() {
        let temp = create_media_tree();
        let config = MediaScanConfig::new(temp.path(), "audio");

        let scan = MediaScanner::new().scan(&config).unwrap();

        assert_eq!(names(&scan), vec!["song.mp3", "song.wav"]);
        assert_eq!(scan.files_examined, 4);
        assert_eq!(scan.unreadable, 0);
        assert_eq!(scan.records[0].extension, "mp3");
        assert_eq!(scan.records[1].extension, "wav");
        assert_eq!(scan.records[0].path, temp.path().join("song.mp3"));
    }

    #[test]
    fn test_recurse_into_subdirectories() {
        let temp = create_media_tree();
        let config = MediaScanConfig::builder()
            .root(temp.path())
            .mime_substring("audio/mpeg")
            .recurse(true)
            .build()
            .unwrap();

        let scan = MediaScanner::new().scan(&config).unwrap();

        let mut found = names(&scan);
        found.sort();
        assert_eq!(found, vec!["deep.mp3", "song.mp3"]);
    }

    #[test]
    fn test_type_comes_from_content_not_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("cover.mp3"), JPEG).unwrap();
        fs::write(temp.path().join("track.jpg"), MP3).unwrap();

        let config = MediaScanConfig::new(temp.path(), "image");
        let scan = MediaScanner::new().scan(&config).unwrap();

        assert_eq!(names(&scan), vec!["cover.mp3"]);
        assert_eq!(scan.records[0].extension, "jpg");
    }

    #[test]
    fn test_no_matches() {
        let temp = create_media_tree();
        let config = MediaScanConfig::new(temp.path(), "video");

        let scan = MediaScanner::new().scan(&config).unwrap();
        assert!(scan.is_empty());
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let config = MediaScanConfig::new(temp.path().join("absent"), "audio");

        let err = MediaScanner::new().scan(&config).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_root_is_a_file() {
        let temp = create_media_tree();
        let config = MediaScanConfig::new(temp.path().join("song.mp3"), "audio");

        let err = MediaScanner::new().scan(&config).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_sniffed_through_link() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let store = TempDir::new().unwrap();
        fs::write(temp.path().join("song.mp3"), MP3).unwrap();
        fs::write(store.path().join("take.mp3"), MP3).unwrap();
        symlink(store.path().join("take.mp3"), temp.path().join("song_link.mp3")).unwrap();
        symlink(store.path().join("absent.mp3"), temp.path().join("dangling.mp3")).unwrap();

        let config = MediaScanConfig::new(temp.path(), "audio");
        let scan = MediaScanner::new().scan(&config).unwrap();

        assert_eq!(names(&scan), vec!["song.mp3", "song_link.mp3"]);
        assert_eq!(scan.records[1].path, temp.path().join("song_link.mp3"));
        assert_eq!(scan.files_examined, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_followed_on_request() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let store = TempDir::new().unwrap();
        fs::write(store.path().join("deep.mp3"), MP3).unwrap();
        symlink(store.path(), temp.path().join("linked")).unwrap();

        let mut config = MediaScanConfig::new(temp.path(), "audio");
        config.recurse = true;
        assert!(MediaScanner::new().scan(&config).unwrap().is_empty());

        config.follow_symlinks = true;
        let scan = MediaScanner::new().scan(&config).unwrap();
        assert_eq!(names(&scan), vec!["deep.mp3"]);
    }
}
