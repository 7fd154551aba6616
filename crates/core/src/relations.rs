//! Inverse lookup for family relationship labels.
//!
//! When a customer lists "Sofia, Daughter", the directory creates or links the
//! related record with the opposite label, "Mother". Labels are free-form
//! strings at the edge, so the table is a closed match with a catch-all.

/// Label used when a relationship has no known inverse.
pub const FALLBACK_RELATIONSHIP: &str = "Relative";

/// Returns the inverse of a relationship label, as seen from the other person.
///
/// Matching is case-sensitive. Gendered pairs invert exactly; collective
/// labels collapse to a neutral form ("Brother" inverts to "Sibling"), so not
/// every entry round-trips. Unknown labels fall back to
/// [`FALLBACK_RELATIONSHIP`].
pub fn inverse_of(relationship: &str) -> &'static str {
    match relationship {
        "Spouse" => "Spouse",
        "Husband" => "Wife",
        "Wife" => "Husband",
        "Son" => "Father",
        "Daughter" => "Mother",
        "Father" => "Son",
        "Mother" => "Daughter",
        "Brother" => "Sibling",
        "Sister" => "Sibling",
        "Grandfather" => "Grandchild",
        "Grandmother" => "Grandchild",
        "Grandson" => "Grandparent",
        "Granddaughter" => "Grandparent",
        _ => FALLBACK_RELATIONSHIP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spouse_is_its_own_inverse() {
        assert_eq!(inverse_of("Spouse"), "Spouse");
    }

    #[test]
    fn gendered_pairs_round_trip() {
        for pair in [("Husband", "Wife"), ("Son", "Father"), ("Daughter", "Mother")] {
            assert_eq!(inverse_of(pair.0), pair.1);
            assert_eq!(inverse_of(pair.1), pair.0);
        }
    }

    #[test]
    fn collective_labels_do_not_round_trip() {
        assert_eq!(inverse_of("Brother"), "Sibling");
        assert_eq!(inverse_of("Sister"), "Sibling");
        assert_eq!(inverse_of("Sibling"), FALLBACK_RELATIONSHIP);

        assert_eq!(inverse_of("Grandfather"), "Grandchild");
        assert_eq!(inverse_of("Grandson"), "Grandparent");
        assert_eq!(inverse_of("Grandchild"), FALLBACK_RELATIONSHIP);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(inverse_of("spouse"), FALLBACK_RELATIONSHIP);
        assert_eq!(inverse_of("WIFE"), FALLBACK_RELATIONSHIP);
    }

    #[test]
    fn unknown_labels_fall_back_to_relative() {
        assert_eq!(inverse_of("Colleague"), FALLBACK_RELATIONSHIP);
        assert_eq!(inverse_of(""), FALLBACK_RELATIONSHIP);
    }
}
