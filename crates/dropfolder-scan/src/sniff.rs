//! Content-type sniffing from file signatures.

use std::io;
use std::path::Path;

/// A content type guessed from a file's leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentType {
    /// MIME type, e.g. `audio/mpeg`.
    pub mime: &'static str,
    /// Canonical extension for the type, e.g. `mp3`.
    pub extension: &'static str,
}

impl From<infer::Type> for ContentType {
    fn from(kind: infer::Type) -> Self {
        Self {
            mime: kind.mime_type(),
            extension: kind.extension(),
        }
    }
}

/// Guess the content type of the file at `path`.
///
/// Only the file signature is inspected; the file name is ignored.
/// Returns `Ok(None)` for content that matches no known signature.
pub fn sniff_path(path: &Path) -> io::Result<Option<ContentType>> {
    Ok(infer::get_from_path(path)?.map(ContentType::from))
}

/// Guess the content type of an in-memory buffer.
pub fn sniff_bytes(buf: &[u8]) -> Option<ContentType> {
    infer::get(buf).map(ContentType::from)
}
