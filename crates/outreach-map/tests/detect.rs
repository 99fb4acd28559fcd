use proptest::prelude::*;

use outreach_map::{MappingError, detect_fields};

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn detects_typical_guest_sheet() {
    let cols = headers(&[
        "Wedding Guest Name",
        "Mailing Address",
        "Notes",
        "Facebook Profile",
        "RSVP",
    ]);
    let mapping = detect_fields(&cols).unwrap();

    assert_eq!(mapping.name.as_deref(), Some("Wedding Guest Name"));
    assert_eq!(mapping.address.as_deref(), Some("Mailing Address"));
    assert_eq!(mapping.notes.as_deref(), Some("Notes"));
    assert_eq!(mapping.social_profile.as_deref(), Some("Facebook Profile"));
}

#[test]
fn matching_ignores_case_and_padding() {
    let cols = headers(&["  FULL NAME  ", "home ADDRESS", "fb"]);
    let mapping = detect_fields(&cols).unwrap();

    assert_eq!(mapping.name.as_deref(), Some("  FULL NAME  "));
    assert_eq!(mapping.address.as_deref(), Some("home ADDRESS"));
    assert_eq!(mapping.social_profile.as_deref(), Some("fb"));
}

#[test]
fn candidate_priority_wins_over_header_order() {
    // "contact" appears first but "person" has higher priority.
    let cols = headers(&["Contact", "Person", "Location", "Street Address"]);
    let mapping = detect_fields(&cols).unwrap();

    assert_eq!(mapping.name.as_deref(), Some("Person"));
    assert_eq!(mapping.address.as_deref(), Some("Street Address"));
}

#[test]
fn missing_name_column_reports_headers() {
    let cols = headers(&["Street", "Phone"]);
    let err = detect_fields(&cols).unwrap_err();

    assert_eq!(
        err,
        MappingError::NoNameColumn {
            headers: cols.clone()
        }
    );
    assert!(err.to_string().contains("Street, Phone"));
}

#[test]
fn empty_header_row_fails() {
    assert!(detect_fields(&[]).is_err());
}

proptest! {
    #[test]
    fn any_header_containing_name_is_detected(
        prefix in "[a-z ]{0,8}",
        suffix in "[a-z ]{0,8}",
        others in prop::collection::vec("[0-9]{1,6}", 0..5),
    ) {
        let mut cols = others;
        cols.push(format!("{prefix}Name{suffix}"));
        let mapping = detect_fields(&cols).unwrap();
        prop_assert!(mapping.name.is_some());
    }

    #[test]
    fn headers_without_candidates_fail(cols in prop::collection::vec("[0-9_ ]{0,10}", 0..6)) {
        let result = detect_fields(&cols);
        let is_no_name = matches!(result, Err(MappingError::NoNameColumn { .. }));
        prop_assert!(is_no_name);
    }

    #[test]
    fn detection_is_deterministic(cols in prop::collection::vec("[a-zA-Z ]{0,16}", 0..8)) {
        prop_assert_eq!(detect_fields(&cols), detect_fields(&cols));
    }
}
