//! Configuration module for ssh-index
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SSH_INDEX_*)
//! 3. `[targets.<name>]` table selected with `--target`
//! 4. Base tables of the config file (`ssh-index.toml` or user config)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load, load_with_warnings, locate, user_config_path, with_env_overrides, ConfigWarning,
    PROJECT_CONFIG_FILE,
};
pub use types::{
    expand_tilde, ArtifactConfig, ColorMode, Config, DeployConfig, OutputConfig, RemoteConfig,
    RevisionConfig, SshConfig, TargetConfig, DEFAULT_DIST_DIR, DEFAULT_FILE_PATTERN,
};
