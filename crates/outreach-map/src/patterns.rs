//! Candidate keywords for each guest field.
//!
//! Each list is tried in order and the first keyword that appears in any
//! header wins, so longer phrases must come before the generic words they
//! contain ("guest name" before "guest").

use outreach_model::GuestField;

pub const NAME_CANDIDATES: &[&str] = &[
    "wedding guest name",
    "guest name",
    "full name",
    "name",
    "guest",
    "person",
    "contact",
];

pub const ADDRESS_CANDIDATES: &[&str] = &[
    "mailing address",
    "street address",
    "home address",
    "address",
    "addr",
    "location",
];

pub const NOTES_CANDIDATES: &[&str] = &[
    "notes",
    "note",
    "comments",
    "comment",
    "description",
    "details",
    "info",
    "remarks",
];

pub const SOCIAL_PROFILE_CANDIDATES: &[&str] = &[
    "facebook profile",
    "fb profile",
    "facebook_profile",
    "facebook",
    "fb",
    "social media",
    "social",
    "profile",
];

/// Candidate keywords for a field, most specific first.
pub fn candidates_for(field: GuestField) -> &'static [&'static str] {
    match field {
        GuestField::Name => NAME_CANDIDATES,
        GuestField::Address => ADDRESS_CANDIDATES,
        GuestField::Notes => NOTES_CANDIDATES,
        GuestField::SocialProfile => SOCIAL_PROFILE_CANDIDATES,
    }
}
