//! ssh-index - revision-based static site deploys over SFTP
//!
//! Every build of a site's `index.html` is uploaded next to the live one as
//! a revision file (`[prefix:]key.html`). The live `index.html` is a symlink
//! that `activate` repoints at one of those revisions, so rollbacks are a
//! single remote rename of what the web server serves.

pub mod application;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    ActivateUseCase, ActivationResult, RevisionRepository, UploadResult, UploadUseCase,
};
pub use config::{Config, DeployConfig};
pub use domain::entities::RevisionDescriptor;
pub use domain::value_objects::{KeyPrefix, RemoteDir, RemoteLayout, RevisionKey, RevisionNaming};
pub use error::{ErrorKind, SshIndexError, SshIndexResult};
