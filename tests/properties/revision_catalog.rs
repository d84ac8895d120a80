//! Property tests for revision listing order and activity.

use std::collections::BTreeMap;

use proptest::prelude::*;

use ssh_index::domain::entities::RemoteFile;
use ssh_index::domain::services::catalog;
use ssh_index::domain::value_objects::{KeyPrefix, RevisionNaming};

fn listing() -> impl Strategy<Value = Vec<(String, u64)>> {
    // Distinct names; a small mtime range forces plenty of ties
    proptest::collection::btree_map("[a-z0-9]{1,8}", 0u64..20, 0..24).prop_map(
        |files: BTreeMap<String, u64>| {
            files
                .into_iter()
                .map(|(key, mtime)| (format!("proj:{}.html", key), mtime))
                .collect()
        },
    )
}

fn naming() -> RevisionNaming {
    RevisionNaming::new(KeyPrefix::parse_optional("proj").unwrap())
}

fn to_files(listing: &[(String, u64)]) -> Vec<RemoteFile> {
    listing
        .iter()
        .map(|(name, mtime)| RemoteFile::from_unix_mtime(name.as_str(), Some(*mtime)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: revisions are ordered newest first, ties by filename descending.
    #[test]
    fn property_strictly_descending(listing in listing()) {
        let revisions = catalog(&to_files(&listing), None, &naming());

        prop_assert_eq!(revisions.len(), listing.len());
        for pair in revisions.windows(2) {
            let newer = (pair[0].timestamp, &pair[0].filename);
            let older = (pair[1].timestamp, &pair[1].filename);
            prop_assert!(newer > older);
        }
    }

    /// PROPERTY: at most one revision is active, and only the linked one.
    #[test]
    fn property_single_active(listing in listing(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!listing.is_empty());
        let linked = &listing[pick.index(listing.len())].0;
        let target = format!("/srv/site/{}", linked);

        let revisions = catalog(&to_files(&listing), Some(&target), &naming());

        let active: Vec<&str> = revisions
            .iter()
            .filter(|r| r.active)
            .map(|r| r.filename.as_str())
            .collect();
        prop_assert_eq!(active, vec![linked.as_str()]);
    }

    /// PROPERTY: the entry point and foreign files never show up.
    #[test]
    fn property_foreign_files_are_ignored(listing in listing()) {
        let mut files = to_files(&listing);
        files.push(RemoteFile::from_unix_mtime("index.html", Some(99)));
        files.push(RemoteFile::from_unix_mtime("other:abc.html", Some(99)));
        files.push(RemoteFile::from_unix_mtime("proj:abc.txt", Some(99)));

        let revisions = catalog(&files, Some("/srv/site/index.html"), &naming());

        prop_assert_eq!(revisions.len(), listing.len());
        prop_assert!(revisions.iter().all(|r| !r.active));
    }
}
