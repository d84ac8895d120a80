//! Error types for ssh-index
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{ConnectionError, TransportError};
use crate::domain::value_objects::InvalidKey;

/// Result type alias for ssh-index operations
pub type SshIndexResult<T> = Result<T, SshIndexError>;

/// Main error type for revision operations
#[derive(Error, Debug)]
pub enum SshIndexError {
    /// Could not establish an authenticated session
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// A remote operation failed mid-session
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Upload target already exists; nothing was written
    #[error("revision '{key}' is already uploaded")]
    DuplicateRevision { key: String },

    /// Activation target is not among the uploaded revisions
    #[error("revision '{key}' does not exist")]
    RevisionNotFound { key: String },

    /// Revision key or prefix failed validation
    #[error("invalid revision key '{key}': {reason}")]
    InvalidRevisionKey { key: String, reason: &'static str },

    /// Configuration could not be loaded or is incomplete
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Local artifact could not be read
    #[error("failed to read artifact {path}: {source}")]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Revision key could not be generated
    #[error("could not generate revision key: {0}")]
    Tagging(String),

    /// Writing command output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InvalidKey> for SshIndexError {
    fn from(err: InvalidKey) -> Self {
        Self::InvalidRevisionKey {
            key: err.key,
            reason: err.reason,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("missing required config '{key}'")]
    Missing { key: &'static str },

    #[error("unknown deploy target '{name}'")]
    UnknownTarget { name: String },

    #[error("invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

/// How a failure should be reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Benign: the requested state already holds
    NothingToDo,
    /// The caller supplied something unusable
    BadInput,
    /// Network, authentication, or remote/local I/O failure
    Failure,
}

impl SshIndexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateRevision { .. } => ErrorKind::NothingToDo,
            Self::RevisionNotFound { .. } | Self::InvalidRevisionKey { .. } | Self::Config(_) => {
                ErrorKind::BadInput
            }
            Self::Connection(_)
            | Self::Transport(_)
            | Self::ReadArtifact { .. }
            | Self::Tagging(_)
            | Self::Io(_) => ErrorKind::Failure,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::NothingToDo => 0,
            ErrorKind::BadInput => 2,
            ErrorKind::Failure => 1,
        }
    }
}
