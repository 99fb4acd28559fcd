use proptest::prelude::*;

use outreach_core::{STATUS_RULES, classify_status};
use outreach_model::GuestStatus;

#[test]
fn empty_inputs_need_address() {
    assert_eq!(classify_status("", ""), GuestStatus::NeedsAddress);
    assert_eq!(classify_status("   ", " \t "), GuestStatus::NeedsAddress);
}

#[test]
fn address_without_note_rules_has_address() {
    assert_eq!(classify_status("", "123 Main St"), GuestStatus::HasAddress);
    assert_eq!(
        classify_status("college roommate", "123 Main St"),
        GuestStatus::HasAddress
    );
}

#[test]
fn note_rules_override_address() {
    assert_eq!(classify_status("no facebook found", ""), GuestStatus::NotOnFb);
    assert_eq!(classify_status("messaged them", ""), GuestStatus::Requested);
    assert_eq!(
        classify_status("Reached out on Sunday", "123 Main St"),
        GuestStatus::Requested
    );
}

#[test]
fn requested_outranks_not_on_fb() {
    assert_eq!(
        classify_status("messaged, no facebook match yet", ""),
        GuestStatus::Requested
    );
    assert_eq!(
        classify_status("Not on FB - texted instead", ""),
        GuestStatus::Requested
    );
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(classify_status("FACEBOOK DEACTIVATED", ""), GuestStatus::NotOnFb);
    assert_eq!(classify_status("  Follow Up next week ", ""), GuestStatus::Requested);
}

fn rule_phrase(status: GuestStatus) -> impl Strategy<Value = &'static str> {
    let literals: Vec<&'static str> = STATUS_RULES
        .iter()
        .filter(|(_, s)| *s == status)
        .filter_map(|(pattern, _)| match pattern {
            outreach_core::NotePattern::Literal(text) => Some(*text),
            outreach_core::NotePattern::Regex(_) => None,
        })
        .collect();
    prop::sample::select(literals)
}

proptest! {
    #[test]
    fn classification_is_total(note in ".*", address in ".*") {
        let status = classify_status(&note, &address);
        prop_assert!(GuestStatus::ALL.contains(&status));
    }

    #[test]
    fn requested_phrase_always_wins(
        requested in rule_phrase(GuestStatus::Requested),
        not_on_fb in rule_phrase(GuestStatus::NotOnFb),
        address in "[a-z0-9 ]{0,20}",
        swap in any::<bool>(),
    ) {
        let note = if swap {
            format!("{not_on_fb}; {requested}")
        } else {
            format!("{requested}; {not_on_fb}")
        };
        prop_assert_eq!(classify_status(&note, &address), GuestStatus::Requested);
    }

    #[test]
    fn plain_digits_follow_address(note in "[0-9 ]{0,12}", address in "[a-zA-Z0-9 ]{0,20}") {
        let expected = if address.trim().is_empty() {
            GuestStatus::NeedsAddress
        } else {
            GuestStatus::HasAddress
        };
        prop_assert_eq!(classify_status(&note, &address), expected);
    }
}
