//! Domain Entities
//!
//! - `RemoteFile` - an entry of the remote directory listing
//! - `RevisionDescriptor` - an uploaded revision derived from a `RemoteFile`

mod remote_file;
mod revision;

pub use remote_file::RemoteFile;
pub use revision::RevisionDescriptor;
