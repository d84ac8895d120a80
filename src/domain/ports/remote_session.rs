//! Remote Session Port
//!
//! Abstracts the file-transfer session used to inspect and mutate the remote
//! revision directory. Implementations:
//! - `SftpSessionProvider` - SFTP over an authenticated SSH connection
//! - `MemorySessionProvider` - in-memory directory for tests

use std::fmt;

use thiserror::Error;

use crate::domain::entities::RemoteFile;

/// Result type for remote session operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Remote operation that a `TransportError` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportStep {
    List,
    Stat,
    ReadLink,
    Unlink,
    Symlink,
    Write,
    Close,
}

impl TransportStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Stat => "stat",
            Self::ReadLink => "read-link",
            Self::Unlink => "unlink",
            Self::Symlink => "symlink",
            Self::Write => "write",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for TransportStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote operation failed after the session was established
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{step} failed for '{path}': {message}")]
pub struct TransportError {
    pub step: TransportStep,
    pub path: String,
    pub message: String,
}

impl TransportError {
    pub fn new(step: TransportStep, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A session could not be established
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not connect to {host}:{port}: {reason}")]
pub struct ConnectionError {
    pub host: String,
    pub port: u16,
    pub reason: String,
}

/// Type of a remote directory entry, as reported by lstat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Symlink,
    Directory,
    Other,
}

/// One open file-transfer session
///
/// A session serves exactly one logical operation and is closed by the
/// caller on success. Dropping an unclosed session must release it.
pub trait RemoteSession {
    /// List the entries of a directory (without `.` and `..`)
    fn read_dir(&mut self, dir: &str) -> TransportResult<Vec<RemoteFile>>;

    /// lstat a path; `None` when nothing exists there
    fn entry_kind(&mut self, path: &str) -> TransportResult<Option<EntryKind>>;

    /// Read the target of a symbolic link
    fn read_link(&mut self, path: &str) -> TransportResult<String>;

    /// Remove a file or symbolic link
    fn unlink(&mut self, path: &str) -> TransportResult<()>;

    /// Create a symbolic link at `link` pointing to `target`
    fn symlink(&mut self, target: &str, link: &str) -> TransportResult<()>;

    /// Create `path` with exactly `bytes`; returns once the remote handle is closed
    fn write_file(&mut self, path: &str, bytes: &[u8]) -> TransportResult<()>;

    /// End the session
    fn close(self: Box<Self>) -> TransportResult<()>;
}

/// Opens authenticated sessions against one remote host
pub trait SessionProvider {
    /// Human-readable destination (for logs and events)
    fn destination(&self) -> String;

    /// Establish a new session
    fn connect(&self) -> Result<Box<dyn RemoteSession>, ConnectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_names_step_and_path() {
        let err = TransportError::new(TransportStep::Unlink, "/srv/index.html", "permission denied");
        assert_eq!(
            err.to_string(),
            "unlink failed for '/srv/index.html': permission denied"
        );
    }

    #[test]
    fn connection_error_display() {
        let err = ConnectionError {
            host: "example.com".to_string(),
            port: 2222,
            reason: "authentication rejected".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not connect to example.com:2222: authentication rejected"
        );
    }

    #[test]
    fn step_names_are_kebab_case() {
        assert_eq!(TransportStep::ReadLink.to_string(), "read-link");
    }
}
