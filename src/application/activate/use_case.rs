//! Activate Use Case
//!
//! Validating phase: list revisions and require the target to be among them.
//! Mutating phase, in one session:
//! 1. unlink the entry point (a missing entry point is fine)
//! 2. symlink the entry point to `<dir>/<revision filename>`
//!
//! Between 1 and 2 the entry point does not exist. A symlink failure leaves
//! it missing; there is no rollback.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::revisions::RevisionRepository;
use crate::application::session::with_session;
use crate::domain::ports::{
    DeployEvent, DeployEventSink, RemoteSession, SessionProvider, TransportResult,
};
use crate::domain::value_objects::RemoteLayout;
use crate::error::{SshIndexError, SshIndexResult};

use super::result::ActivationResult;

/// Activate use case - swaps the entry point link
pub struct ActivateUseCase<P: SessionProvider> {
    revisions: RevisionRepository<P>,
}

impl<P: SessionProvider> ActivateUseCase<P> {
    pub fn new(provider: P, layout: RemoteLayout) -> Self {
        Self {
            revisions: RevisionRepository::new(provider, layout),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.revisions = self.revisions.with_events(events);
        self
    }

    /// Make `revision` the one served through the entry point
    ///
    /// Matching is exact and case-sensitive. An unknown revision fails with
    /// `RevisionNotFound` before anything on the remote side changes.
    pub fn execute(&self, revision: &str) -> SshIndexResult<ActivationResult> {
        let events = self.revisions.events();

        let target = self
            .revisions
            .list()?
            .into_iter()
            .find(|r| r.revision == revision)
            .ok_or_else(|| SshIndexError::RevisionNotFound {
                key: revision.to_string(),
            })?;

        events.on_event(DeployEvent::ActivationStarted {
            revision: target.revision.clone(),
        });

        let layout = self.revisions.layout();
        let entry_point = layout.entry_point_path();
        let link_target = layout.dir.join(&target.filename);

        let entry_point_was_absent = with_session(self.revisions.provider(), events, |session| {
            let was_absent = remove_entry_point(session, &entry_point)?;
            if was_absent {
                warn!(path = %entry_point, "entry point did not exist; creating it");
                events.on_event(DeployEvent::EntryPointMissing {
                    path: entry_point.clone(),
                });
            }
            session.symlink(&link_target, &entry_point)?;
            Ok(was_absent)
        })?;

        info!(revision = %target.revision, link = %entry_point, target = %link_target, "revision activated");
        events.on_event(DeployEvent::Activated {
            revision: target.revision.clone(),
        });

        Ok(ActivationResult {
            activated_revision_key: target.revision,
            entry_point_was_absent,
        })
    }
}

/// Unlink the entry point; `Ok(true)` when it was already gone
///
/// An unlink failure is only tolerated if nothing exists at the path
/// afterwards. Otherwise the unlink error is returned and the old link stays.
fn remove_entry_point(session: &mut dyn RemoteSession, entry_point: &str) -> TransportResult<bool> {
    let unlink_err = match session.unlink(entry_point) {
        Ok(()) => return Ok(false),
        Err(e) => e,
    };
    match session.entry_kind(entry_point)? {
        None => Ok(true),
        Some(_) => Err(unlink_err),
    }
}
