//! Property tests for revision filenames.

use proptest::prelude::*;

use ssh_index::domain::value_objects::{KeyPrefix, RevisionKey, RevisionNaming};

fn key_string() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._:-]{1,24}")
        .unwrap()
        .prop_filter("reserved entry point key", |k| k != "index")
}

fn prefix_string() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the revision of a generated filename is the key it came from.
    #[test]
    fn property_file_name_round_trips(key in key_string(), prefix in prefix_string()) {
        let key = RevisionKey::parse(&key).unwrap();
        let naming = RevisionNaming::new(KeyPrefix::parse_optional(&prefix).unwrap());

        let filename = naming.file_name(&key);

        prop_assert!(filename.ends_with(".html"));
        prop_assert_eq!(naming.revision_of(&filename), Some(key.as_str()));
    }

    /// PROPERTY: without a prefix the filename is just `key.html`.
    #[test]
    fn property_unprefixed_file_name(key in key_string()) {
        let key = RevisionKey::parse(&key).unwrap();
        let naming = RevisionNaming::new(None);

        prop_assert_eq!(naming.file_name(&key), format!("{}.html", key));
    }

    /// PROPERTY: filenames of another prefix never parse as revisions.
    #[test]
    fn property_other_prefix_is_filtered(
        key in key_string(),
        ours in prefix_string(),
        theirs in prefix_string(),
    ) {
        prop_assume!(ours != theirs);
        let key = RevisionKey::parse(&key).unwrap();
        let our_naming = RevisionNaming::new(KeyPrefix::parse_optional(&ours).unwrap());
        let their_naming = RevisionNaming::new(KeyPrefix::parse_optional(&theirs).unwrap());

        let filename = their_naming.file_name(&key);

        prop_assert_eq!(our_naming.revision_of(&filename), None);
    }

    /// PROPERTY: keys containing '/' are always rejected.
    #[test]
    fn property_slash_is_rejected(left in key_string(), right in key_string()) {
        let raw = format!("{}/{}", left, right);
        prop_assert!(RevisionKey::parse(&raw).is_err());
    }
}
