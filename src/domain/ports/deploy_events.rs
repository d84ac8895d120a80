//! Deploy Event Port
//!
//! Observable progress of list/upload/activate operations.
//! Enables JSON event streams for CI and log forwarding.

/// Event emitted during revision operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// A session is being opened
    Connecting { destination: String },

    /// The remote directory was listed
    Listed { revision_count: usize },

    /// Upload of a revision file started
    UploadStarted {
        revision: String,
        path: String,
        bytes: usize,
    },

    /// Revision file written
    Uploaded { revision: String, path: String },

    /// Upload skipped because the revision already exists
    UploadSkipped { revision: String },

    /// Entry point swap started
    ActivationStarted { revision: String },

    /// Entry point did not exist before activation
    EntryPointMissing { path: String },

    /// Entry point now links to the revision
    Activated { revision: String },
}

/// Receiver of deploy events
///
/// Implementations:
/// - `JsonEventSink` - NDJSON on stdout
/// - `TracingEventSink` - forwards to `tracing`
/// - `NoopEventSink` - silent
pub trait DeployEventSink: Send + Sync {
    fn on_event(&self, event: DeployEvent);
}

/// Event sink that discards everything
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingEventSink {
        events: Arc<Mutex<Vec<DeployEvent>>>,
    }

    impl DeployEventSink for RecordingEventSink {
        fn on_event(&self, event: DeployEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingEventSink {
            events: events.clone(),
        };

        sink.on_event(DeployEvent::Listed { revision_count: 2 });
        sink.on_event(DeployEvent::Activated {
            revision: "rev1".to_string(),
        });

        assert_eq!(events.lock().unwrap().len(), 2);
    }
}
