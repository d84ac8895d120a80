//! RevisionDescriptor entity - caller-facing view of an uploaded revision

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One uploaded revision as seen in the remote directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionDescriptor {
    /// Revision identifier (filename without prefix and suffix)
    pub revision: String,
    /// Remote filename backing this revision
    pub filename: String,
    /// Remote modification time
    pub timestamp: DateTime<Utc>,
    /// Whether the entry point currently links to this revision
    pub active: bool,
}

impl RevisionDescriptor {
    pub fn new(
        revision: impl Into<String>,
        filename: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            revision: revision.into(),
            filename: filename.into(),
            timestamp,
            active: false,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
