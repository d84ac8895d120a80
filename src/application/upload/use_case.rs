//! Upload Use Case
//!
//! 1. List existing revisions (own session)
//! 2. Reject the key if a revision with it already exists
//! 3. Write the artifact to `<dir>/<prefix:>key.html` (second session)
//!
//! The entry point is never touched here.

use std::sync::Arc;

use tracing::info;

use crate::application::revisions::RevisionRepository;
use crate::application::session::with_session;
use crate::domain::ports::{DeployEvent, DeployEventSink, SessionProvider};
use crate::domain::value_objects::{RemoteLayout, RevisionKey};
use crate::error::{SshIndexError, SshIndexResult};

use super::result::UploadResult;

/// Upload use case - adds one revision file to the remote directory
pub struct UploadUseCase<P: SessionProvider> {
    revisions: RevisionRepository<P>,
}

impl<P: SessionProvider> UploadUseCase<P> {
    pub fn new(provider: P, layout: RemoteLayout) -> Self {
        Self {
            revisions: RevisionRepository::new(provider, layout),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.revisions = self.revisions.with_events(events);
        self
    }

    /// Upload `bytes` as revision `key`
    ///
    /// Returns `DuplicateRevision` without writing anything when the key is
    /// already present.
    pub fn execute(&self, bytes: &[u8], key: &RevisionKey) -> SshIndexResult<UploadResult> {
        let events = self.revisions.events();

        let existing = self.revisions.list()?;
        if existing.iter().any(|r| r.revision == key.as_str()) {
            events.on_event(DeployEvent::UploadSkipped {
                revision: key.to_string(),
            });
            return Err(SshIndexError::DuplicateRevision {
                key: key.to_string(),
            });
        }

        let path = self.revisions.layout().revision_path(key);
        events.on_event(DeployEvent::UploadStarted {
            revision: key.to_string(),
            path: path.clone(),
            bytes: bytes.len(),
        });

        with_session(self.revisions.provider(), events, |session| {
            session.write_file(&path, bytes)?;
            Ok(())
        })?;

        info!(revision = %key, %path, bytes = bytes.len(), "revision uploaded");
        events.on_event(DeployEvent::Uploaded {
            revision: key.to_string(),
            path: path.clone(),
        });

        Ok(UploadResult {
            revision_key: key.to_string(),
            remote_path: path,
            bytes: bytes.len(),
        })
    }
}
