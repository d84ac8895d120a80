//! Configuration loading
//!
//! Finds the config file, parses it with unknown-key warnings, and applies
//! `SSH_INDEX_*` environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

use super::types::Config;

/// Project-level config filename
pub const PROJECT_CONFIG_FILE: &str = "ssh-index.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Pick the config file to read
///
/// An explicit path always wins (and must exist). Otherwise
/// `<project_root>/ssh-index.toml`, then the user config
/// (`~/.config/ssh-index/config.toml`). `None` means built-in defaults only.
pub fn locate(explicit: Option<&Path>, project_root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project_config = project_root.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        return Some(project_config);
    }

    let user_config = user_config_path()?;
    user_config.is_file().then_some(user_config)
}

/// `~/.config/ssh-index/config.toml` (platform config dir)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ssh-index").join("config.toml"))
}

/// Load the located config file, or defaults when there is none
pub fn load(
    explicit: Option<&Path>,
    project_root: &Path,
) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    match locate(explicit, project_root) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_with_warnings(&path)
        }
        None => {
            debug!("no config file found, using defaults");
            Ok((Config::default(), Vec::new()))
        }
    }
}

/// Apply environment variable overrides (SSH_INDEX_* prefix)
///
/// `lookup` returns the value of a variable; pass `|k| std::env::var(k).ok()`
/// for the process environment.
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("SSH_INDEX_HOST") {
        config.ssh.host = Some(host);
    }
    if let Some(username) = lookup("SSH_INDEX_USERNAME") {
        config.ssh.username = Some(username);
    }
    if let Some(port) = lookup("SSH_INDEX_PORT") {
        let parsed = port.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
            key: "SSH_INDEX_PORT".to_string(),
            message: e.to_string(),
        })?;
        config.ssh.port = Some(parsed);
    }
    if let Some(password) = lookup("SSH_INDEX_PASSWORD") {
        config.ssh.password = Some(password);
    }
    if let Some(key_file) = lookup("SSH_INDEX_PRIVATE_KEY_FILE") {
        config.ssh.private_key_file = Some(key_file);
    }
    if let Some(dir) = lookup("SSH_INDEX_REMOTE_DIR") {
        config.remote.dir = Some(dir);
    }
    // Set but empty disables the prefix, same as in the file
    if let Some(prefix) = lookup("SSH_INDEX_KEY_PREFIX") {
        config.remote.key_prefix = Some(prefix);
    }
    if let Some(key) = lookup("SSH_INDEX_REVISION_KEY") {
        config.revision.key = Some(key);
    }
    Ok(config)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "ssh",
        "host",
        "username",
        "port",
        "private_key_file",
        "private_key_passphrase",
        "password",
        "agent",
        "known_hosts_file",
        "timeout_secs",
        "remote",
        "dir",
        "key_prefix",
        "artifact",
        "dist_dir",
        "file_pattern",
        "revision",
        "type",
        "short",
        "key",
        "output",
        "color",
        "unicode",
        "targets",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
