//! Revision Key Value Objects
//!
//! `RevisionKey` identifies one uploaded artifact, `KeyPrefix` namespaces
//! keys when several sites share a remote directory.

use std::fmt;

use super::naming::{ENTRY_POINT, REVISION_SUFFIX};

/// Separator between the key prefix and the revision key in filenames.
pub const PREFIX_SEPARATOR: char = ':';

/// Why a revision key or prefix was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKey {
    pub key: String,
    pub reason: &'static str,
}

/// A validated revision identifier (e.g. a commit hash or content hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevisionKey(String);

impl RevisionKey {
    /// Validate and wrap a caller-supplied key
    ///
    /// Surrounding whitespace is trimmed. The key must be non-empty, must not
    /// contain path separators or NUL, and must not name the entry point.
    pub fn parse(raw: &str) -> Result<Self, InvalidKey> {
        let key = raw.trim();
        let invalid = |reason| InvalidKey {
            key: raw.to_string(),
            reason,
        };

        if key.is_empty() {
            return Err(invalid("revision key must not be empty"));
        }
        if key.contains('/') || key.contains('\0') {
            return Err(invalid("revision key must not contain '/' or NUL"));
        }
        if format!("{key}{REVISION_SUFFIX}") == ENTRY_POINT {
            return Err(invalid("revision key collides with the entry point"));
        }

        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RevisionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Namespace prepended to revision keys (`prefix:key`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    /// Parse a configured prefix; an empty value means "no prefix"
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, InvalidKey> {
        let prefix = raw.trim();
        if prefix.is_empty() {
            return Ok(None);
        }
        if prefix.contains('/') || prefix.contains(PREFIX_SEPARATOR) || prefix.contains('\0') {
            return Err(InvalidKey {
                key: raw.to_string(),
                reason: "key prefix must not contain '/', ':' or NUL",
            });
        }
        Ok(Some(Self(prefix.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let key = RevisionKey::parse("  abc123 \n").unwrap();
        assert_eq!(key.as_str(), "abc123");
    }

    #[test]
    fn parse_rejects_empty() {
        let err = RevisionKey::parse("   ").unwrap_err();
        assert_eq!(err.reason, "revision key must not be empty");
    }

    #[test]
    fn parse_rejects_path_separator() {
        assert!(RevisionKey::parse("../etc/passwd").is_err());
    }

    #[test]
    fn parse_rejects_entry_point_collision() {
        let err = RevisionKey::parse("index").unwrap_err();
        assert_eq!(err.key, "index");
    }

    #[test]
    fn parse_accepts_index_lookalikes() {
        assert!(RevisionKey::parse("index2").is_ok());
        assert!(RevisionKey::parse("Index").is_ok());
    }

    #[test]
    fn display_is_raw_key() {
        let key = RevisionKey::parse("000000").unwrap();
        assert_eq!(key.to_string(), "000000");
    }

    #[test]
    fn empty_prefix_means_none() {
        assert_eq!(KeyPrefix::parse_optional("").unwrap(), None);
        assert_eq!(KeyPrefix::parse_optional("  ").unwrap(), None);
    }

    #[test]
    fn prefix_rejects_separator() {
        assert!(KeyPrefix::parse_optional("a:b").is_err());
    }

    #[test]
    fn prefix_keeps_value() {
        let prefix = KeyPrefix::parse_optional("my-site").unwrap().unwrap();
        assert_eq!(prefix.as_str(), "my-site");
    }
}
