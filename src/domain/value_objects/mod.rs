//! Domain Value Objects
//!
//! Immutable value types for revision keys and remote naming rules.

mod naming;
mod revision_key;

pub use naming::{basename, RemoteDir, RemoteLayout, RevisionNaming, ENTRY_POINT, REVISION_SUFFIX};
pub use revision_key::{InvalidKey, KeyPrefix, RevisionKey, PREFIX_SEPARATOR};
