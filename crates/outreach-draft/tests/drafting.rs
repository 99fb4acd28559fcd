use std::cell::RefCell;

use outreach_draft::{
    DraftError, MessageDrafter, Result, draft_or_fallback, fallback_message,
};
use outreach_model::WeddingDetails;

struct CannedDrafter {
    reply: Option<String>,
    seen: RefCell<Vec<String>>,
}

impl CannedDrafter {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl MessageDrafter for CannedDrafter {
    fn draft(&self, first_name: &str, _details: &WeddingDetails) -> Result<String> {
        self.seen.borrow_mut().push(first_name.to_string());
        self.reply
            .clone()
            .ok_or(DraftError::HttpStatus { status: 500 })
    }
}

#[test]
fn drafted_text_is_cleaned_and_used() {
    let drafter = CannedDrafter::replying("  Hey Ada, address please? \u{2764} ");
    let message = draft_or_fallback(Some(&drafter), "Ada Lovelace", &WeddingDetails::default());
    assert_eq!(message, "Hey Ada, address please?");
    assert_eq!(drafter.seen.borrow().as_slice(), ["Ada"]);
}

#[test]
fn failures_fall_back_deterministically() {
    let details = WeddingDetails::default();
    let failing = CannedDrafter::failing();
    let message = draft_or_fallback(Some(&failing), "Grace Hopper", &details);
    assert_eq!(message, fallback_message("Grace Hopper"));
    assert_eq!(message, draft_or_fallback(None, "Grace Hopper", &details));
}

#[test]
fn unusable_replies_fall_back() {
    let details = WeddingDetails::default();
    let long = CannedDrafter::replying(&"x".repeat(250));
    assert_eq!(
        draft_or_fallback(Some(&long), "Alan", &details),
        fallback_message("Alan")
    );
    let empty = CannedDrafter::replying("\u{1F600}");
    assert_eq!(
        draft_or_fallback(Some(&empty), "Alan", &details),
        fallback_message("Alan")
    );
}
