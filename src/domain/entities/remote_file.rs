//! RemoteFile entity - one entry of a remote directory listing

use chrono::{DateTime, Utc};

/// A directory entry as reported by the remote host
///
/// Reconstructed on every listing; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    filename: String,
    modified_at: DateTime<Utc>,
}

impl RemoteFile {
    pub fn new(filename: impl Into<String>, modified_at: DateTime<Utc>) -> Self {
        Self {
            filename: filename.into(),
            modified_at,
        }
    }

    /// Build from a raw Unix mtime; a missing or out-of-range mtime maps to the epoch
    pub fn from_unix_mtime(filename: impl Into<String>, mtime: Option<u64>) -> Self {
        let modified_at = mtime
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_default();
        Self::new(filename, modified_at)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}
