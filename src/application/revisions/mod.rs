//! Revision Repository
//!
//! Lists the revisions present in the remote directory and which one the
//! entry point currently serves. Nothing is cached: each call reads the
//! remote directory afresh.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::RevisionDescriptor;
use crate::domain::ports::{
    DeployEvent, DeployEventSink, EntryKind, NoopEventSink, RemoteSession, SessionProvider,
    TransportResult,
};
use crate::domain::services::catalog;
use crate::domain::value_objects::RemoteLayout;
use crate::error::SshIndexResult;

use super::session::with_session;

/// Read access to the revisions of one remote directory
pub struct RevisionRepository<P: SessionProvider> {
    provider: P,
    layout: RemoteLayout,
    events: Arc<dyn DeployEventSink>,
}

impl<P: SessionProvider> RevisionRepository<P> {
    pub fn new(provider: P, layout: RemoteLayout) -> Self {
        Self {
            provider,
            layout,
            events: Arc::new(NoopEventSink),
        }
    }

    /// Report progress to `events`
    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn layout(&self) -> &RemoteLayout {
        &self.layout
    }

    pub fn events(&self) -> &dyn DeployEventSink {
        self.events.as_ref()
    }

    /// Uploaded revisions, newest first, with the active one flagged
    pub fn list(&self) -> SshIndexResult<Vec<RevisionDescriptor>> {
        let layout = &self.layout;
        let revisions = with_session(&self.provider, self.events(), |session| {
            let files = session.read_dir(layout.dir.as_str())?;
            let link_target = resolve_entry_point(session, &layout.entry_point_path())?;
            debug!(
                files = files.len(),
                link_target = link_target.as_deref().unwrap_or("-"),
                "read remote directory"
            );
            Ok(catalog(&files, link_target.as_deref(), &layout.naming))
        })?;

        self.events.on_event(DeployEvent::Listed {
            revision_count: revisions.len(),
        });
        Ok(revisions)
    }
}

/// Target of the entry point link; `None` when absent or not a link
fn resolve_entry_point(
    session: &mut dyn RemoteSession,
    entry_point: &str,
) -> TransportResult<Option<String>> {
    match session.entry_kind(entry_point)? {
        Some(EntryKind::Symlink) => session.read_link(entry_point).map(Some),
        _ => Ok(None),
    }
}
