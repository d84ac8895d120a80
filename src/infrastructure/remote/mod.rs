//! Remote Session Adapters
//!
//! - `SftpSessionProvider` - SFTP over SSH (production)
//! - `MemorySessionProvider` - in-memory directory tree (tests)

mod memory;
mod sftp;

pub use memory::{MemoryRemote, MemorySessionProvider};
pub use sftp::{ConnectOptions, Credentials, SftpSessionProvider, DEFAULT_PORT};
