//! Status classification from free-text notes.
//!
//! Rules live in one ordered table. Every requested-indicator comes before
//! every not-on-facebook indicator, so a note mentioning both an outreach
//! action and a failed search is classified as `requested`.

use std::sync::LazyLock;

use regex::Regex;

use outreach_model::GuestStatus;

/// How a rule matches against the normalized note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePattern {
    /// Plain substring.
    Literal(&'static str),
    /// Regex fragment, searched anywhere in the note.
    Regex(&'static str),
}

use NotePattern::{Literal, Regex as Re};

/// Ordered `(pattern, status)` rules; the first hit decides.
pub const STATUS_RULES: &[(NotePattern, GuestStatus)] = &[
    // Outreach already sent.
    (Literal("address requested"), GuestStatus::Requested),
    (Literal("requested address"), GuestStatus::Requested),
    (Literal("asked for address"), GuestStatus::Requested),
    (Literal("request sent"), GuestStatus::Requested),
    (Literal("messaged"), GuestStatus::Requested),
    (Literal("sent message"), GuestStatus::Requested),
    (Literal("message sent"), GuestStatus::Requested),
    (Literal("dm sent"), GuestStatus::Requested),
    (Literal("sent dm"), GuestStatus::Requested),
    (Literal("contacted"), GuestStatus::Requested),
    (Literal("reached out"), GuestStatus::Requested),
    (Literal("texted"), GuestStatus::Requested),
    (Literal("emailed"), GuestStatus::Requested),
    (Literal("invitation sent"), GuestStatus::Requested),
    (Literal("invite sent"), GuestStatus::Requested),
    (Literal("waiting for address"), GuestStatus::Requested),
    (Literal("pending address"), GuestStatus::Requested),
    (Literal("address pending"), GuestStatus::Requested),
    (Literal("awaiting response"), GuestStatus::Requested),
    (Literal("follow up"), GuestStatus::Requested),
    (Literal("following up"), GuestStatus::Requested),
    (Literal("follow-up"), GuestStatus::Requested),
    (Literal("reminded"), GuestStatus::Requested),
    (Literal("reminder sent"), GuestStatus::Requested),
    (Literal("second request"), GuestStatus::Requested),
    (Literal("2nd request"), GuestStatus::Requested),
    // Could not be reached on the social platform.
    (Literal("no facebook"), GuestStatus::NotOnFb),
    (Literal("not on facebook"), GuestStatus::NotOnFb),
    (Literal("not on fb"), GuestStatus::NotOnFb),
    (Literal("no fb"), GuestStatus::NotOnFb),
    (Literal("facebook not found"), GuestStatus::NotOnFb),
    (Literal("fb not found"), GuestStatus::NotOnFb),
    (Literal("not found on facebook"), GuestStatus::NotOnFb),
    (Literal("not found on fb"), GuestStatus::NotOnFb),
    (Literal("no social media"), GuestStatus::NotOnFb),
    (Literal("not on social media"), GuestStatus::NotOnFb),
    (Literal("no facebook account"), GuestStatus::NotOnFb),
    (Literal("no facebook profile"), GuestStatus::NotOnFb),
    (Literal("doesnt have facebook"), GuestStatus::NotOnFb),
    (Literal("doesn't have facebook"), GuestStatus::NotOnFb),
    (Literal("does not have facebook"), GuestStatus::NotOnFb),
    (Literal("doesnt use facebook"), GuestStatus::NotOnFb),
    (Literal("doesn't use facebook"), GuestStatus::NotOnFb),
    (Literal("does not use facebook"), GuestStatus::NotOnFb),
    (Literal("facebook deactivated"), GuestStatus::NotOnFb),
    (Literal("fb deactivated"), GuestStatus::NotOnFb),
    (Literal("deactivated facebook"), GuestStatus::NotOnFb),
    (Literal("deactivated fb"), GuestStatus::NotOnFb),
    (Literal("deleted facebook"), GuestStatus::NotOnFb),
    (Literal("facebook inactive"), GuestStatus::NotOnFb),
    (Literal("fb inactive"), GuestStatus::NotOnFb),
    (Literal("can't find facebook"), GuestStatus::NotOnFb),
    (Literal("cant find facebook"), GuestStatus::NotOnFb),
    (Re(r"cannot find.*?facebook"), GuestStatus::NotOnFb),
    (Re(r"could not find.*?(facebook|fb)"), GuestStatus::NotOnFb),
    // Sheet markers such as "Facebook Mar 2024".
    (Re(r"facebook.*?20[0-9]{2}"), GuestStatus::NotOnFb),
    (Re(r"fb.*?20[0-9]{2}"), GuestStatus::NotOnFb),
];

enum CompiledPattern {
    Literal(&'static str),
    Regex(Regex),
}

impl CompiledPattern {
    fn is_match(&self, note: &str) -> bool {
        match self {
            CompiledPattern::Literal(text) => note.contains(text),
            CompiledPattern::Regex(re) => re.is_match(note),
        }
    }
}

static COMPILED_RULES: LazyLock<Vec<(CompiledPattern, GuestStatus)>> = LazyLock::new(|| {
    STATUS_RULES
        .iter()
        .map(|(pattern, status)| {
            let compiled = match pattern {
                Literal(text) => CompiledPattern::Literal(*text),
                Re(source) => CompiledPattern::Regex(
                    Regex::new(source).expect("Invalid status rule regex"),
                ),
            };
            (compiled, *status)
        })
        .collect()
});

/// Infers a guest status from notes and address.
///
/// Note rules are checked first (requested, then not on facebook); a
/// non-blank address gives `has_address`; anything else is `needs_address`.
/// Total over all inputs.
pub fn classify_status(note: &str, address: &str) -> GuestStatus {
    if let Some(status) = match_note(note) {
        return status;
    }
    if address.trim().is_empty() {
        GuestStatus::NeedsAddress
    } else {
        GuestStatus::HasAddress
    }
}

/// Status implied by the note alone, if any rule matches.
pub fn match_note(note: &str) -> Option<GuestStatus> {
    let normalized = note.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    COMPILED_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(&normalized))
        .map(|(_, status)| *status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_regex_rule_compiles() {
        assert_eq!(COMPILED_RULES.len(), STATUS_RULES.len());
    }

    #[test]
    fn requested_rules_precede_not_on_fb_rules() {
        let first_not_on_fb = STATUS_RULES
            .iter()
            .position(|(_, status)| *status == GuestStatus::NotOnFb)
            .unwrap();
        assert!(
            STATUS_RULES[first_not_on_fb..]
                .iter()
                .all(|(_, status)| *status == GuestStatus::NotOnFb)
        );
    }

    #[test]
    fn dated_marker_is_not_on_fb() {
        assert_eq!(match_note("Facebook Mar 2024"), Some(GuestStatus::NotOnFb));
        assert_eq!(match_note("could not find him on FB"), Some(GuestStatus::NotOnFb));
    }
}
