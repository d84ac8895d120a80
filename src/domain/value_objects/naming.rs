//! Remote Naming Rules
//!
//! Maps revision keys to remote filenames and back, and builds the remote
//! paths of revision files and the entry point.

use std::fmt;

use super::revision_key::{KeyPrefix, RevisionKey, PREFIX_SEPARATOR};

/// Well-known entry file that clients request
pub const ENTRY_POINT: &str = "index.html";

/// Extension shared by every revision file
pub const REVISION_SUFFIX: &str = ".html";

/// Filename convention for revision files: `[prefix:]key.html`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionNaming {
    prefix: Option<KeyPrefix>,
}

impl RevisionNaming {
    pub fn new(prefix: Option<KeyPrefix>) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> Option<&KeyPrefix> {
        self.prefix.as_ref()
    }

    /// `prefix:key` when a prefix is configured, otherwise `key`
    pub fn full_key(&self, key: &RevisionKey) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}{}", prefix, PREFIX_SEPARATOR, key),
            None => key.to_string(),
        }
    }

    /// Remote filename for a revision key
    pub fn file_name(&self, key: &RevisionKey) -> String {
        format!("{}{}", self.full_key(key), REVISION_SUFFIX)
    }

    /// Derive the revision identifier from a remote filename
    ///
    /// Returns `None` for the entry point, for names without the revision
    /// suffix, and for names outside the configured prefix.
    pub fn revision_of<'a>(&self, filename: &'a str) -> Option<&'a str> {
        if filename == ENTRY_POINT {
            return None;
        }
        let stem = filename.strip_suffix(REVISION_SUFFIX)?;
        let revision = match &self.prefix {
            Some(prefix) => stem
                .strip_prefix(prefix.as_str())?
                .strip_prefix(PREFIX_SEPARATOR)?,
            None => stem,
        };
        if revision.is_empty() {
            return None;
        }
        Some(revision)
    }
}

/// Remote directory path, normalized to end with exactly one `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDir(String);

impl RemoteDir {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            // "" and "/" both collapse here; only "/" names the root
            if raw.trim().starts_with('/') {
                return Self("/".to_string());
            }
            return Self("./".to_string());
        }
        Self(format!("{}/", trimmed))
    }

    /// Directory path with trailing slash
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of a file directly inside this directory
    pub fn join(&self, filename: &str) -> String {
        format!("{}{}", self.0, filename)
    }
}

impl fmt::Display for RemoteDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything needed to address revision files on the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLayout {
    pub dir: RemoteDir,
    pub naming: RevisionNaming,
}

impl RemoteLayout {
    pub fn new(dir: RemoteDir, naming: RevisionNaming) -> Self {
        Self { dir, naming }
    }

    pub fn entry_point_path(&self) -> String {
        self.dir.join(ENTRY_POINT)
    }

    pub fn revision_path(&self, key: &RevisionKey) -> String {
        self.dir.join(&self.naming.file_name(key))
    }
}

/// Final path component of a (possibly absolute) link target
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
