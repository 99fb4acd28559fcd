//! Guest outreach rules.
//!
//! - [`classify`]: infers a guest's status from notes and address.
//! - [`link`]: builds messenger deep links with an optional prefilled message.
//! - [`lifecycle`]: edits and manual marks, with their audit entries.
//! - [`review`]: filtering, search, pagination and dashboard counts.
//!
//! Everything here is pure and holds no state between calls.

#![deny(unsafe_code)]

pub mod classify;
pub mod error;
pub mod lifecycle;
pub mod link;
pub mod review;

pub use classify::{NotePattern, STATUS_RULES, classify_status, match_note};
pub use error::{CoreError, Result};
pub use lifecycle::{GuestChange, GuestEdit, MarkAction, apply_edit, classify_new, mark, new_guest};
pub use link::{build_messenger_link, profile_identifier};
pub use review::{
    GuestQuery, MANAGE_PAGE_SIZE, Page, REVIEW_PAGE_SIZE, StatusCounts, StatusFilter, query_guests,
};
