use dropfolder_core::{FileRecord, MediaScanConfig, RenameStamp, RenamerConfig, SimilarityConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[test]
fn test_rename_stamp_sequence_across_sessions() {
    let first = RenameStamp::new("cafe0123", 0, 2);
    let root = Path::new("/srv/incoming");

    let names: Vec<PathBuf> = std::iter::successors(Some(first), |s| Some(s.next()))
        .take(3)
        .map(|s| s.apply(root))
        .collect();

    assert_eq!(
        names,
        vec![
            PathBuf::from("/srv/incoming_cafe0123_00"),
            PathBuf::from("/srv/incoming_cafe0123_01"),
            PathBuf::from("/srv/incoming_cafe0123_02"),
        ]
    );
}

#[test]
fn test_rename_stamp_offset() {
    let stamp = RenameStamp::generate(41, 4);
    assert_eq!(stamp.sequence, 41);
    assert!(stamp.to_string().ends_with("_0041"));
}

#[test]
fn test_renamer_config_builder() {
    let config = RenamerConfig::builder()
        .root("/srv/incoming")
        .interval(Duration::from_secs(1))
        .grace_period(Duration::from_secs(30))
        .sequence_offset(7u64)
        .leading_zeros(3usize)
        .build()
        .unwrap();

    assert_eq!(config.root, PathBuf::from("/srv/incoming"));
    assert_eq!(config.interval, Duration::from_secs(1));
    assert_eq!(config.grace_period, Duration::from_secs(30));
    assert_eq!(config.sequence_offset, 7);
    assert_eq!(config.leading_zeros, 3);
}

#[test]
fn test_config_serialization() {
    let config = RenamerConfig::new("/srv/incoming");
    let json = serde_json::to_string(&config).unwrap();
    let restored: RenamerConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.root, config.root);
    assert_eq!(restored.grace_period, config.grace_period);

    // Missing fields fall back to defaults
    let partial: SimilarityConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(partial.threshold, 0.8);

    let scan: MediaScanConfig = serde_json::from_str(r#"{"root": "/music"}"#).unwrap();
    assert!(scan.include_hidden);
    assert!(!scan.recurse);
}

#[test]
fn test_file_record_serialization() {
    let record = FileRecord::new("song.mp3", "/music/song.mp3", "mp3", "audio/mpeg");
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["name"], "song.mp3");
    assert_eq!(json["extension"], "mp3");
    assert_eq!(json["mime"], "audio/mpeg");
}
