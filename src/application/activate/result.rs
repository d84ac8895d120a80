//! Activation Result

use serde::Serialize;

/// Outcome of a successful activation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivationResult {
    /// Revision the entry point now links to
    pub activated_revision_key: String,
    /// The entry point did not exist before the swap
    pub entry_point_was_absent: bool,
}
