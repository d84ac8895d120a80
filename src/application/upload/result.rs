//! Upload Result

use serde::Serialize;

/// Outcome of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    /// Key the revision was uploaded under (without prefix)
    pub revision_key: String,
    /// Remote path of the new revision file
    pub remote_path: String,
    /// Bytes written
    pub bytes: usize,
}
