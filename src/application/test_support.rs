//! Shared fixtures for use case tests

use std::sync::{Arc, Mutex};

use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::domain::value_objects::{KeyPrefix, RemoteDir, RemoteLayout, RevisionNaming};

/// Event sink that remembers everything it receives
#[derive(Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<DeployEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DeployEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DeployEventSink for RecordingEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Layout for `dir`; an empty `prefix` means no prefix
pub fn layout(dir: &str, prefix: &str) -> RemoteLayout {
    RemoteLayout::new(
        RemoteDir::new(dir),
        RevisionNaming::new(KeyPrefix::parse_optional(prefix).unwrap()),
    )
}
