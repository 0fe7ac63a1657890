//! Field resolution helpers shared by all dialect adapters
//!
//! Tag formats disagree on how a concept is named, and real-world files
//! frequently carry several historical spellings of the same field. These
//! pure functions implement the lookup rules used everywhere:
//!
//! - key and description matching is case-insensitive
//! - among candidate fields, the first non-empty value wins
//! - if every candidate is empty, the first existing one is still returned
//!   so callers can tell "present but empty" from "absent"

/// Compare two field keys or descriptions case-insensitively
pub fn keys_match(lhs: &str, rhs: &str) -> bool {
    if lhs.is_ascii() && rhs.is_ascii() {
        lhs.eq_ignore_ascii_case(rhs)
    } else {
        lhs.to_lowercase() == rhs.to_lowercase()
    }
}

/// Return the first non-empty value of a multi-valued field
///
/// Yields an empty string if the field has values but all of them are
/// empty.
pub fn first_non_empty_value<'a, I>(values: I) -> &'a str
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Resolve a concept stored under several alternative keys
///
/// `keys` lists the preferred key first, followed by the alternatives in
/// their declared order. `lookup` resolves a single key to its value, or
/// `None` if the key does not exist.
///
/// Returns the first non-empty value. If all existing candidates are empty
/// the first existing one is returned, and `None` only if no candidate
/// exists at all.
pub fn find_first_non_empty<'a, F>(keys: &[&str], mut lookup: F) -> Option<&'a str>
where
    F: FnMut(&str) -> Option<&'a str>,
{
    let mut first_found = None;
    for key in keys {
        if let Some(value) = lookup(key) {
            if !value.is_empty() {
                return Some(value);
            }
            first_found.get_or_insert(value);
        }
    }
    first_found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(fields: &'a HashMap<&'a str, &'a str>) -> impl FnMut(&str) -> Option<&'a str> {
        move |key| fields.get(key).copied()
    }

    #[test]
    fn alternative_key_is_used_if_preferred_is_missing() {
        let fields = HashMap::from([("B", "x")]);
        assert_eq!(find_first_non_empty(&["A", "B"], lookup(&fields)), Some("x"));
    }

    #[test]
    fn non_empty_value_is_preferred_over_first_listed() {
        let fields = HashMap::from([("A", ""), ("B", "y")]);
        assert_eq!(find_first_non_empty(&["A", "B"], lookup(&fields)), Some("y"));
    }

    #[test]
    fn first_empty_value_is_returned_if_nothing_else_exists() {
        let fields = HashMap::from([("B", ""), ("C", "")]);
        assert_eq!(
            find_first_non_empty(&["A", "B", "C"], lookup(&fields)),
            Some("")
        );
    }

    #[test]
    fn absent_if_no_candidate_exists() {
        let fields = HashMap::from([("Z", "z")]);
        assert_eq!(find_first_non_empty(&["A", "B"], lookup(&fields)), None);
    }

    #[test]
    fn first_non_empty_value_skips_empty_entries() {
        assert_eq!(first_non_empty_value(["", "b", "c"]), "b");
        assert_eq!(first_non_empty_value(["", ""]), "");
        assert_eq!(first_non_empty_value(Vec::<&str>::new()), "");
    }

    #[test]
    fn keys_match_ignores_case() {
        assert!(keys_match("replaygain_track_gain", "REPLAYGAIN_TRACK_GAIN"));
        assert!(keys_match("Ärger", "ärger"));
        assert!(!keys_match("COMMENT", "COMMENTS"));
    }
}
