use std::path::{Path, PathBuf};

use crate::config::PROJECT_CONFIG_FILE;

/// Find the directory a deploy is relative to.
///
/// Walks upward from `start` and stops at the first directory holding
/// `ssh-index.toml` or a `.git` entry (directory or worktree file).
/// Without any marker, `start` is used.
pub fn discover_project_root(start: &Path) -> PathBuf {
    let found = start
        .ancestors()
        .find(|dir| dir.join(PROJECT_CONFIG_FILE).is_file() || dir.join(".git").exists());
    match found {
        Some(dir) => {
            tracing::debug!(root = %dir.display(), "project root");
            dir.to_path_buf()
        }
        None => start.to_path_buf(),
    }
}
