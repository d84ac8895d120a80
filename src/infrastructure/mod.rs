//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `remote/` - Session providers (SFTP, in-memory)
//! - `events/` - Deploy event sinks (JSON, tracing)
//! - `tagging` - Revision key generation

pub mod events;
pub mod remote;
pub mod tagging;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use remote::{MemoryRemote, MemorySessionProvider, SftpSessionProvider};
