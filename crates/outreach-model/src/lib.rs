//! Data model for the guest outreach workflow.
//!
//! These types are shared by the import pipeline, the guest store, the
//! message drafter and the command line. None of them holds any I/O.

pub mod action;
pub mod error;
pub mod guest;
pub mod mapping;
pub mod status;
pub mod wedding;

pub use action::ActionEntry;
pub use error::{ModelError, Result};
pub use guest::{GuestId, GuestRecord, NewGuest, first_name, non_empty};
pub use mapping::{FieldMapping, GuestField};
pub use status::GuestStatus;
pub use wedding::{MessageSender, WeddingDetails};
