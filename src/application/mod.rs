//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates sessions, events and logging around them
//!
//! ## Use Cases
//!
//! - `RevisionRepository` - Lists revisions and the active one
//! - `UploadUseCase` - Uploads a new revision file
//! - `ActivateUseCase` - Swaps the entry point to a revision

pub mod activate;
pub mod revisions;
pub mod session;
pub mod upload;

#[cfg(test)]
mod test_support;

pub use activate::{ActivateUseCase, ActivationResult};
pub use revisions::RevisionRepository;
pub use session::with_session;
pub use upload::{UploadResult, UploadUseCase};
