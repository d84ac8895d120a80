//! `activate` command

use std::io::Write;
use std::sync::Arc;

use crate::application::ActivationResult;
use crate::config::DeployConfig;
use crate::domain::ports::{DeployEventSink, SessionProvider};
use crate::domain::value_objects::RevisionKey;
use crate::error::{SshIndexError, SshIndexResult};
use crate::presentation::factory;
use crate::presentation::Renderer;

/// Activate `revision`, falling back to the configured revision key
pub fn run<P: SessionProvider>(
    provider: P,
    config: &DeployConfig,
    revision: Option<&str>,
    events: Arc<dyn DeployEventSink>,
    renderer: &dyn Renderer,
    out: &mut dyn Write,
) -> SshIndexResult<ActivationResult> {
    let raw = revision
        .or(config.revision_key.as_deref())
        .ok_or(SshIndexError::InvalidRevisionKey {
            key: String::new(),
            reason: "no revision given; pass --revision=<key>",
        })?;
    let key = RevisionKey::parse(raw)?;

    let result = factory::create_activate_use_case(provider, config, events).execute(key.as_str())?;
    renderer.activation(out, &result)?;
    Ok(result)
}
