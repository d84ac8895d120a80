//! Configuration type definitions
//!
//! Every table field is optional in the file so that `[targets.<name>]`
//! tables can overlay only what they set. Defaults and required keys are
//! applied when resolving into a [`DeployConfig`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{KeyPrefix, RemoteDir, RemoteLayout, RevisionNaming};
use crate::error::ConfigError;
use crate::infrastructure::remote::{ConnectOptions, Credentials, DEFAULT_PORT};
use crate::infrastructure::tagging::RevisionType;


/// Default artifact directory
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Default artifact filename inside the dist directory
pub const DEFAULT_FILE_PATTERN: &str = "index.html";

/// `[ssh]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshConfig {
    pub host: Option<String>,
    pub username: Option<String>,
    pub port: Option<u16>,
    pub private_key_file: Option<String>,
    pub private_key_passphrase: Option<String>,
    pub password: Option<String>,
    pub agent: Option<bool>,
    pub known_hosts_file: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl SshConfig {
    fn overlay(&mut self, other: SshConfig) {
        overlay(&mut self.host, other.host);
        overlay(&mut self.username, other.username);
        overlay(&mut self.port, other.port);
        overlay(&mut self.private_key_file, other.private_key_file);
        overlay(&mut self.private_key_passphrase, other.private_key_passphrase);
        overlay(&mut self.password, other.password);
        overlay(&mut self.agent, other.agent);
        overlay(&mut self.known_hosts_file, other.known_hosts_file);
        overlay(&mut self.timeout_secs, other.timeout_secs);
    }

    /// Pick credentials: key file, then password, then agent
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        if let Some(path) = non_empty(&self.private_key_file) {
            return Ok(Credentials::PrivateKey {
                path: expand_tilde(path),
                passphrase: self.private_key_passphrase.clone(),
            });
        }
        if let Some(password) = &self.password {
            return Ok(Credentials::Password(password.clone()));
        }
        if self.agent == Some(true) {
            return Ok(Credentials::Agent);
        }
        Err(ConfigError::Invalid {
            key: "ssh".to_string(),
            message: "no credentials configured; set private_key_file, password, or agent = true"
                .to_string(),
        })
    }
}

/// `[remote]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub dir: Option<String>,
    /// Empty string disables the prefix
    pub key_prefix: Option<String>,
}

impl RemoteConfig {
    fn overlay(&mut self, other: RemoteConfig) {
        overlay(&mut self.dir, other.dir);
        overlay(&mut self.key_prefix, other.key_prefix);
    }
}

/// `[artifact]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub dist_dir: Option<String>,
    pub file_pattern: Option<String>,
}

impl ArtifactConfig {
    fn overlay(&mut self, other: ArtifactConfig) {
        overlay(&mut self.dist_dir, other.dist_dir);
        overlay(&mut self.file_pattern, other.file_pattern);
    }
}

/// `[revision]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevisionConfig {
    #[serde(rename = "type")]
    pub kind: Option<RevisionType>,
    pub short: Option<bool>,
    pub key: Option<String>,
}

impl RevisionConfig {
    fn overlay(&mut self, other: RevisionConfig) {
        overlay(&mut self.kind, other.kind);
        overlay(&mut self.short, other.short);
        overlay(&mut self.key, other.key);
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// `[output]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: Option<ColorMode>,
    pub unicode: Option<bool>,
}

impl OutputConfig {
    fn overlay(&mut self, other: OutputConfig) {
        overlay(&mut self.color, other.color);
        overlay(&mut self.unicode, other.unicode);
    }
}

/// Overrides applied by `--target <name>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub ssh: SshConfig,
    pub remote: RemoteConfig,
    pub artifact: ArtifactConfig,
    pub revision: RevisionConfig,
    pub output: OutputConfig,
}

/// Main configuration structure, as written in `ssh-index.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ssh: SshConfig,
    pub remote: RemoteConfig,
    pub artifact: ArtifactConfig,
    pub revision: RevisionConfig,
    pub output: OutputConfig,
    pub targets: BTreeMap<String, TargetConfig>,
}

impl Config {
    /// Overlay the `[targets.<name>]` table onto the base tables
    pub fn select_target(mut self, name: &str) -> Result<Self, ConfigError> {
        let target = self
            .targets
            .remove(name)
            .ok_or_else(|| ConfigError::UnknownTarget {
                name: name.to_string(),
            })?;
        self.ssh.overlay(target.ssh);
        self.remote.overlay(target.remote);
        self.artifact.overlay(target.artifact);
        self.revision.overlay(target.revision);
        self.output.overlay(target.output);
        Ok(self)
    }

    /// Apply defaults, check required keys and build the runtime settings
    ///
    /// `project_root` anchors the artifact directory and supplies the
    /// default key prefix (its directory name).
    pub fn resolve(
        self,
        project_root: &Path,
        target: Option<&str>,
    ) -> Result<DeployConfig, ConfigError> {
        let host = required(&self.ssh.host, "ssh.host")?;
        let username = required(&self.ssh.username, "ssh.username")?;
        let dir = required(&self.remote.dir, "remote.dir")?;

        let port = self.ssh.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(ConfigError::Invalid {
                key: "ssh.port".to_string(),
                message: "port must be between 1 and 65535".to_string(),
            });
        }

        let prefix_raw = match &self.remote.key_prefix {
            Some(prefix) => prefix.clone(),
            None => project_root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let prefix = KeyPrefix::parse_optional(&prefix_raw).map_err(|e| ConfigError::Invalid {
            key: "remote.key_prefix".to_string(),
            message: e.reason.to_string(),
        })?;

        let connect = ConnectOptions {
            host: host.to_string(),
            port,
            username: username.to_string(),
            credentials: self.ssh.credentials()?,
            known_hosts_file: non_empty(&self.ssh.known_hosts_file).map(expand_tilde),
            timeout: self
                .ssh
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        };

        let dist_dir = self
            .artifact
            .dist_dir
            .unwrap_or_else(|| DEFAULT_DIST_DIR.to_string());

        Ok(DeployConfig {
            connect,
            layout: RemoteLayout::new(RemoteDir::new(dir), RevisionNaming::new(prefix)),
            dist_dir: project_root.join(dist_dir),
            file_pattern: self
                .artifact
                .file_pattern
                .unwrap_or_else(|| DEFAULT_FILE_PATTERN.to_string()),
            revision_type: self.revision.kind.unwrap_or_default(),
            revision_short: self.revision.short.unwrap_or(false),
            revision_key: self.revision.key,
            project_root: project_root.to_path_buf(),
            target: target.map(str::to_string),
        })
    }
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub connect: ConnectOptions,
    pub layout: RemoteLayout,
    /// Absolute or project-relative artifact directory
    pub dist_dir: PathBuf,
    pub file_pattern: String,
    pub revision_type: RevisionType,
    pub revision_short: bool,
    /// Explicit revision key from config or environment
    pub revision_key: Option<String>,
    pub project_root: PathBuf,
    /// Name of the `[targets.<name>]` table in use
    pub target: Option<String>,
}

fn overlay<T>(base: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *base = value;
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(value: &'a Option<String>, key: &'static str) -> Result<&'a str, ConfigError> {
    non_empty(value).ok_or(ConfigError::Missing { key })
}

/// Expand a leading `~` to the local home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
