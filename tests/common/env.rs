//! Test environments for ssh-index.
//!
//! `TestEnv` runs the real binary inside temp directories. `Project` drives
//! the command runners directly against a `MemoryRemote`.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;

use tempfile::TempDir;

use ssh_index::commands::{activate, deploy, list, DeployOptions};
use ssh_index::config::{Config, DeployConfig};
use ssh_index::domain::ports::NoopEventSink;
use ssh_index::infrastructure::{MemoryRemote, MemorySessionProvider};
use ssh_index::presentation::output::TextRenderer;
use ssh_index::presentation::DeployReport;
use ssh_index::{ActivationResult, RevisionDescriptor, SshIndexResult};

/// Result of running the ssh-index binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated project and home directories for CLI runs
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let project_root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(project_root.path().join(".git")).unwrap();
        Self {
            project_root,
            home_dir: tempfile::tempdir().unwrap(),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_ssh-index")),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        for (key, _) in std::env::vars() {
            if key.starts_with("SSH_INDEX_") {
                cmd.env_remove(key);
            }
        }
        to_result(cmd.output().expect("failed to execute ssh-index"))
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// A project directory deployed to an in-memory remote
pub struct Project {
    pub dir: TempDir,
    pub config: DeployConfig,
    pub remote: MemoryRemote,
}

impl Project {
    pub fn new(config_toml: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dist")).unwrap();
        let config: Config = toml::from_str(config_toml).unwrap();
        let config = config.resolve(dir.path(), None).unwrap();
        let remote = MemoryRemote::with_dir(config.layout.dir.as_str());
        Self {
            dir,
            config,
            remote,
        }
    }

    pub fn build(&self, html: &str) {
        std::fs::write(self.dir.path().join("dist/index.html"), html).unwrap();
    }

    fn provider(&self) -> MemorySessionProvider {
        MemorySessionProvider::new(self.remote.clone())
    }

    fn renderer() -> TextRenderer {
        TextRenderer {
            color: false,
            unicode: false,
        }
    }

    pub fn deploy(&self, options: DeployOptions) -> SshIndexResult<DeployReport> {
        let mut out = Vec::new();
        deploy::run(
            self.provider(),
            &self.config,
            &options,
            Arc::new(NoopEventSink),
            &Self::renderer(),
            &mut out,
        )
    }

    pub fn activate(&self, revision: &str) -> SshIndexResult<ActivationResult> {
        let mut out = Vec::new();
        activate::run(
            self.provider(),
            &self.config,
            Some(revision),
            Arc::new(NoopEventSink),
            &Self::renderer(),
            &mut out,
        )
    }

    pub fn list(&self) -> SshIndexResult<Vec<RevisionDescriptor>> {
        let mut out = Vec::new();
        list::run(
            self.provider(),
            &self.config,
            Arc::new(NoopEventSink),
            &Self::renderer(),
            &mut out,
        )
    }

    pub fn active(&self) -> Option<String> {
        self.list()
            .unwrap()
            .into_iter()
            .find(|r| r.active)
            .map(|r| r.revision)
    }
}
