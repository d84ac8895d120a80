//! Revision Catalog
//!
//! Turns a raw directory listing into the ordered list of revisions.
//! Pure function: the remote directory stays the single source of truth.

use crate::domain::entities::{RemoteFile, RevisionDescriptor};
use crate::domain::value_objects::{basename, RevisionNaming};

/// Build revision descriptors from a directory listing
///
/// `link_target` is the entry point's symlink target, if it resolved.
/// Output is sorted newest first; equal mtimes fall back to filename
/// descending so the order is stable across listings.
pub fn catalog(
    files: &[RemoteFile],
    link_target: Option<&str>,
    naming: &RevisionNaming,
) -> Vec<RevisionDescriptor> {
    let active_file = link_target.map(basename);

    let mut revisions: Vec<RevisionDescriptor> = files
        .iter()
        .filter_map(|file| {
            let revision = naming.revision_of(file.filename())?;
            let active = active_file == Some(file.filename());
            Some(
                RevisionDescriptor::new(revision, file.filename(), file.modified_at())
                    .with_active(active),
            )
        })
        .collect();

    revisions.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.filename.cmp(&a.filename))
    });
    revisions
}
