//! Rename stamps: the run identifier and sequence number appended to renamed directories.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the random run identifier.
const RUN_ID_LEN: usize = 8;

/// Suffix applied to a directory when its grace period expires.
///
/// The run identifier is fixed for the whole process; only the sequence
/// number advances between sessions, so every directory renamed by one
/// invocation shares the same stamp prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameStamp {
    /// Random token generated once per process.
    pub run_id: String,
    /// Sequence number of the current session.
    pub sequence: u64,
    /// Minimum width of the zero-padded sequence number.
    pub width: usize,
}

impl RenameStamp {
    /// Create a stamp with an explicit run identifier.
    pub fn new(run_id: impl Into<String>, sequence: u64, width: usize) -> Self {
        Self {
            run_id: run_id.into(),
            sequence,
            width,
        }
    }

    /// Create a stamp with a freshly generated run identifier.
    pub fn generate(sequence_offset: u64, width: usize) -> Self {
        let mut run_id = Uuid::new_v4().simple().to_string();
        run_id.truncate(RUN_ID_LEN);
        Self::new(run_id, sequence_offset, width)
    }

    /// The stamp for the session after this one.
    pub fn next(&self) -> Self {
        Self {
            run_id: self.run_id.clone(),
            sequence: self.sequence + 1,
            width: self.width,
        }
    }

    /// Compute the renamed path for `root`: `<root>_<run_id>_<sequence>`.
    pub fn apply(&self, root: &Path) -> PathBuf {
        let mut name = OsString::from(root.as_os_str());
        name.push(format!("_{self}"));
        PathBuf::from(name)
    }
}

impl fmt::Display for RenameStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{:0width$}", self.run_id, self.sequence, width = self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_pads_sequence() {
        let stamp = RenameStamp::new("1a2b3c4d", 3, 2);
        assert_eq!(
            stamp.apply(Path::new("/srv/drop")),
            PathBuf::from("/srv/drop_1a2b3c4d_03")
        );
    }

    #[test]
    fn test_sequence_wider_than_padding() {
        let stamp = RenameStamp::new("run", 1234, 2);
        assert_eq!(stamp.to_string(), "run_1234");
    }

    #[test]
    fn test_zero_width() {
        let stamp = RenameStamp::new("run", 0, 0);
        assert_eq!(stamp.to_string(), "run_0");
    }

    #[test]
    fn test_next_keeps_run_id() {
        let stamp = RenameStamp::generate(5, 3);
        let next = stamp.next();

        assert_eq!(next.run_id, stamp.run_id);
        assert_eq!(next.sequence, 6);
        assert_eq!(next.width, 3);
    }

    #[test]
    fn test_generated_run_id() {
        let a = RenameStamp::generate(0, 2);
        let b = RenameStamp::generate(0, 2);

        assert_eq!(a.run_id.len(), 8);
        assert!(a.run_id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a.run_id, b.run_id);
    }
}
