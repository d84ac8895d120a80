//! Revision Key Generation
//!
//! Derives a revision key for an artifact when none is given explicitly.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{SshIndexError, SshIndexResult};

/// Hex characters kept from the artifact digest
pub const FILE_HASH_LEN: usize = 32;

/// How revision keys are generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevisionType {
    /// SHA-256 of the artifact bytes
    #[default]
    FileHash,
    /// Current git commit of the project
    GitCommit,
}

impl RevisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileHash => "file-hash",
            Self::GitCommit => "git-commit",
        }
    }
}

/// Lowercase hex SHA-256 of `bytes`, truncated to [`FILE_HASH_LEN`]
pub fn file_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = format!("{:x}", digest);
    hex.truncate(FILE_HASH_LEN);
    hex
}

/// `git rev-parse HEAD` in `project_root`
pub fn git_commit(project_root: &Path, short: bool) -> SshIndexResult<String> {
    let mut cmd = Command::new("git");
    cmd.arg("rev-parse");
    if short {
        cmd.arg("--short");
    }
    cmd.arg("HEAD").current_dir(project_root);

    let output = cmd
        .output()
        .map_err(|e| SshIndexError::Tagging(format!("failed to run git: {}", e)))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SshIndexError::Tagging(format!(
            "git rev-parse failed: {}",
            stderr.trim()
        )));
    }

    let commit = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if commit.is_empty() {
        return Err(SshIndexError::Tagging(
            "git rev-parse printed no commit".to_string(),
        ));
    }
    Ok(commit)
}

/// Generate a revision key for `artifact` using `kind`
pub fn generate_revision_key(
    artifact: &[u8],
    kind: RevisionType,
    short: bool,
    project_root: &Path,
) -> SshIndexResult<String> {
    let key = match kind {
        RevisionType::FileHash => file_hash(artifact),
        RevisionType::GitCommit => git_commit(project_root, short)?,
    };
    debug!(kind = kind.as_str(), %key, "generated revision key");
    Ok(key)
}
