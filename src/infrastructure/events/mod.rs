//! Event Sink Implementations
//!
//! Provides concrete implementations of DeployEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: forwards to the log stream

mod json;
mod log;

pub use self::json::JsonEventSink;
pub use self::log::TracingEventSink;
