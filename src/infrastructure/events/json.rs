//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    command: &'static str,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            command,
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let command = self.command;
        let json = match event {
            DeployEvent::Connecting { destination } => serde_json::json!({
                "event": "connecting",
                "command": command,
                "destination": destination,
            }),

            DeployEvent::Listed { revision_count } => serde_json::json!({
                "event": "listed",
                "command": command,
                "revision_count": revision_count,
            }),

            DeployEvent::UploadStarted {
                revision,
                path,
                bytes,
            } => serde_json::json!({
                "event": "upload_start",
                "command": command,
                "revision": revision,
                "path": path,
                "bytes": bytes,
            }),

            DeployEvent::Uploaded { revision, path } => serde_json::json!({
                "event": "uploaded",
                "command": command,
                "revision": revision,
                "path": path,
            }),

            DeployEvent::UploadSkipped { revision } => serde_json::json!({
                "event": "upload_skipped",
                "command": command,
                "revision": revision,
                "reason": "already uploaded",
            }),

            DeployEvent::ActivationStarted { revision } => serde_json::json!({
                "event": "activation_start",
                "command": command,
                "revision": revision,
            }),

            DeployEvent::EntryPointMissing { path } => serde_json::json!({
                "event": "entry_point_missing",
                "command": command,
                "path": path,
            }),

            DeployEvent::Activated { revision } => serde_json::json!({
                "event": "activated",
                "command": command,
                "revision": revision,
            }),
        };

        self.write_event(json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_upload_start() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("deploy", writer);

        sink.on_event(DeployEvent::UploadStarted {
            revision: "abc".to_string(),
            path: "/srv/site/abc.html".to_string(),
            bytes: 42,
        });

        let events = lines(&buffer);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event"], "upload_start");
        assert_eq!(events[0]["command"], "deploy");
        assert_eq!(events[0]["bytes"], 42);
    }

    #[test]
    fn json_sink_writes_one_line_per_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("activate", writer);

        sink.on_event(DeployEvent::ActivationStarted {
            revision: "rev1".to_string(),
        });
        sink.on_event(DeployEvent::EntryPointMissing {
            path: "/srv/site/index.html".to_string(),
        });
        sink.on_event(DeployEvent::Activated {
            revision: "rev1".to_string(),
        });

        let names: Vec<String> = lines(&buffer)
            .iter()
            .map(|e| e["event"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["activation_start", "entry_point_missing", "activated"]
        );
    }

    #[test]
    fn json_sink_marks_skipped_upload() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("deploy", writer);

        sink.on_event(DeployEvent::UploadSkipped {
            revision: "abc".to_string(),
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["reason"], "already uploaded");
    }
}
