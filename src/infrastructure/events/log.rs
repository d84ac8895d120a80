//! Tracing Event Sink
//!
//! Forwards deploy events to `tracing` so they show up in the log stream
//! in text mode.

use tracing::{debug, info, warn};

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that logs each event at a fitting level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl DeployEventSink for TracingEventSink {
    fn on_event(&self, event: DeployEvent) {
        match event {
            DeployEvent::Connecting { destination } => debug!(%destination, "connecting"),
            DeployEvent::Listed { revision_count } => debug!(revision_count, "listed revisions"),
            DeployEvent::UploadStarted {
                revision,
                path,
                bytes,
            } => info!(%revision, %path, bytes, "uploading revision"),
            DeployEvent::Uploaded { revision, path } => info!(%revision, %path, "uploaded"),
            DeployEvent::UploadSkipped { revision } => {
                info!(%revision, "revision already uploaded, skipping")
            }
            DeployEvent::ActivationStarted { revision } => info!(%revision, "activating"),
            DeployEvent::EntryPointMissing { path } => {
                warn!(%path, "entry point was missing before activation")
            }
            DeployEvent::Activated { revision } => info!(%revision, "activated"),
        }
    }
}
