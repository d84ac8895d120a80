//! `list` command

use std::io::Write;
use std::sync::Arc;

use crate::config::DeployConfig;
use crate::domain::entities::RevisionDescriptor;
use crate::domain::ports::{DeployEventSink, SessionProvider};
use crate::error::SshIndexResult;
use crate::presentation::factory;
use crate::presentation::Renderer;

/// List uploaded revisions and render them
pub fn run<P: SessionProvider>(
    provider: P,
    config: &DeployConfig,
    events: Arc<dyn DeployEventSink>,
    renderer: &dyn Renderer,
    out: &mut dyn Write,
) -> SshIndexResult<Vec<RevisionDescriptor>> {
    let revisions = factory::create_revision_repository(provider, config, events).list()?;
    renderer.revisions(out, config.layout.dir.as_str(), &revisions)?;
    Ok(revisions)
}
