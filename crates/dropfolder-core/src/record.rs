//! File records produced by a media scan.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A file whose sniffed content type matched a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name, including its extension.
    pub name: CompactString,
    /// Full path as produced by the walk.
    pub path: PathBuf,
    /// Extension guessed from the file signature (not the file name).
    pub extension: CompactString,
    /// MIME type guessed from the file signature.
    pub mime: CompactString,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        extension: impl Into<CompactString>,
        mime: impl Into<CompactString>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            extension: extension.into(),
            mime: mime.into(),
        }
    }

    /// File name with its final extension stripped.
    ///
    /// A leading dot does not count as an extension separator, so
    /// `.hidden` stays `.hidden`.
    pub fn stem(&self) -> &str {
        Path::new(self.name.as_str())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(self.name.as_str())
    }

    /// Whether both records were detected as the same kind of file.
    pub fn same_extension(&self, other: &FileRecord) -> bool {
        self.extension == other.extension
    }
}
