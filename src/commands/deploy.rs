//! `deploy` command
//!
//! Reads the built artifact, resolves its revision key, uploads it and
//! optionally activates it. An artifact that is already uploaded is not an
//! error here: the upload is skipped and activation still runs if asked for.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::DeployConfig;
use crate::domain::ports::{DeployEventSink, SessionProvider};
use crate::domain::value_objects::RevisionKey;
use crate::error::{SshIndexError, SshIndexResult};
use crate::infrastructure::tagging::generate_revision_key;
use crate::presentation::factory;
use crate::presentation::{DeployReport, Renderer};

/// Flags of the `deploy` subcommand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployOptions {
    pub revision: Option<String>,
    pub activate: bool,
    pub dist_dir: Option<PathBuf>,
    pub file_pattern: Option<String>,
}

/// Message shown when a revision was deployed without activating it
pub fn activation_hint(revision: &str, target: Option<&str>) -> String {
    let mut hint = format!(
        "Deployed but did not activate revision {revision}. \
         To activate, run: ssh-index activate --revision={revision}"
    );
    if let Some(target) = target {
        hint.push_str(" --target ");
        hint.push_str(target);
    }
    hint
}

/// Artifact path: CLI flags first, then configuration
pub fn artifact_path(config: &DeployConfig, options: &DeployOptions) -> PathBuf {
    let dist_dir = match &options.dist_dir {
        Some(dir) => config.project_root.join(dir),
        None => config.dist_dir.clone(),
    };
    let file_pattern = options
        .file_pattern
        .as_deref()
        .unwrap_or(config.file_pattern.as_str());
    dist_dir.join(file_pattern)
}

/// Explicit key from the CLI or configuration, otherwise a generated one
pub fn resolve_revision_key(
    artifact: &[u8],
    config: &DeployConfig,
    explicit: Option<&str>,
) -> SshIndexResult<RevisionKey> {
    match explicit.or(config.revision_key.as_deref()) {
        Some(raw) => Ok(RevisionKey::parse(raw)?),
        None => {
            let generated = generate_revision_key(
                artifact,
                config.revision_type,
                config.revision_short,
                &config.project_root,
            )?;
            Ok(RevisionKey::parse(&generated)?)
        }
    }
}

pub fn run<P: SessionProvider + Clone>(
    provider: P,
    config: &DeployConfig,
    options: &DeployOptions,
    events: Arc<dyn DeployEventSink>,
    renderer: &dyn Renderer,
    out: &mut dyn Write,
) -> SshIndexResult<DeployReport> {
    let path = artifact_path(config, options);
    let bytes = fs::read(&path).map_err(|source| SshIndexError::ReadArtifact {
        path: path.clone(),
        source,
    })?;
    let key = resolve_revision_key(&bytes, config, options.revision.as_deref())?;
    info!(artifact = %path.display(), revision = %key, "deploying");

    let upload = factory::create_upload_use_case(provider.clone(), config, events.clone());
    let uploaded = match upload.execute(&bytes, &key) {
        Ok(result) => Some(result),
        Err(SshIndexError::DuplicateRevision { key: existing }) => {
            info!(revision = %existing, "revision already uploaded");
            None
        }
        Err(e) => return Err(e),
    };

    let activation = if options.activate {
        let activate = factory::create_activate_use_case(provider, config, events);
        Some(activate.execute(key.as_str())?)
    } else {
        None
    };

    let report = DeployReport {
        revision: key.to_string(),
        upload: uploaded,
        hint: activation
            .is_none()
            .then(|| activation_hint(key.as_str(), config.target.as_deref())),
        activation,
    };
    renderer.deploy(out, &report)?;
    Ok(report)
}
