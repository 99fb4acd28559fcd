//! Guest mutations and the audit entries they produce.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::debug;

use outreach_model::{ActionEntry, GuestId, GuestRecord, GuestStatus, ModelError, NewGuest, non_empty};

use crate::classify::classify_status;
use crate::error::{CoreError, Result};

/// A single-field edit to a stored guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestEdit {
    Name(String),
    Address(String),
    Note(String),
    SocialProfile(String),
    Status(GuestStatus),
}

impl GuestEdit {
    /// Builds an edit from a field name and raw value, e.g. `address`.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        match field.trim().to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(GuestEdit::Name(value.to_string())),
            "address" => Ok(GuestEdit::Address(value.to_string())),
            "note" | "notes" => Ok(GuestEdit::Note(value.to_string())),
            "profile" | "social_profile" | "facebook" => {
                Ok(GuestEdit::SocialProfile(value.to_string()))
            }
            "status" => Ok(GuestEdit::Status(value.parse()?)),
            _ => Err(CoreError::UnknownEditField(field.to_string())),
        }
    }

    fn action_name(&self) -> &'static str {
        match self {
            GuestEdit::Name(_) => "update_name",
            GuestEdit::Address(_) => "update_address",
            GuestEdit::Note(_) => "update_note",
            GuestEdit::SocialProfile(_) => "update_profile",
            GuestEdit::Status(_) => "update_status",
        }
    }
}

/// Manual status override from the review queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAction {
    Requested,
    NotOnFb,
}

impl MarkAction {
    pub fn status(self) -> GuestStatus {
        match self {
            MarkAction::Requested => GuestStatus::Requested,
            MarkAction::NotOnFb => GuestStatus::NotOnFb,
        }
    }

    pub fn action_name(self) -> &'static str {
        match self {
            MarkAction::Requested => "mark_requested",
            MarkAction::NotOnFb => "mark_not_on_fb",
        }
    }
}

impl fmt::Display for MarkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status())
    }
}

impl FromStr for MarkAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<GuestStatus>() {
            Ok(GuestStatus::Requested) => Ok(MarkAction::Requested),
            Ok(GuestStatus::NotOnFb) => Ok(MarkAction::NotOnFb),
            _ => Err(CoreError::UnknownMarkAction(s.to_string())),
        }
    }
}

/// What a mutation did, ready to be recorded in the action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestChange {
    pub action: &'static str,
    pub meta: String,
    pub old_status: GuestStatus,
    pub new_status: GuestStatus,
}

impl GuestChange {
    pub fn status_changed(&self) -> bool {
        self.old_status != self.new_status
    }

    pub fn into_entry(self, guest_id: GuestId, ts: DateTime<Utc>) -> ActionEntry {
        ActionEntry::new(guest_id, self.action, self.meta, ts)
    }
}

/// Assigns the classified status to a guest that is about to be stored.
#[must_use]
pub fn classify_new(mut guest: NewGuest) -> NewGuest {
    guest.status = classify_status(guest.note_str(), guest.address_str());
    guest
}

/// Builds and classifies a hand-entered guest.
pub fn new_guest(
    name: &str,
    address: Option<&str>,
    note: Option<&str>,
    social_profile: Option<&str>,
) -> Result<NewGuest> {
    let guest = NewGuest::new(name)?
        .with_address(address.unwrap_or_default())
        .with_note(note.unwrap_or_default())
        .with_social_profile(social_profile.unwrap_or_default());
    Ok(classify_new(guest))
}

/// Applies an edit and stamps `last_action_at`.
///
/// Address and note edits re-derive the status from the new content,
/// replacing any manual mark. A blank name is rejected and leaves the guest
/// untouched.
pub fn apply_edit(
    guest: &mut GuestRecord,
    edit: GuestEdit,
    now: DateTime<Utc>,
) -> Result<GuestChange> {
    let action = edit.action_name();
    let old_status = guest.status;

    let meta = match edit {
        GuestEdit::Name(name) => {
            let name = non_empty(&name).ok_or(ModelError::EmptyName)?;
            let meta = format!("Changed name from \"{}\" to \"{}\"", guest.name, name);
            guest.name = name;
            meta
        }
        GuestEdit::Address(address) => {
            let address = non_empty(&address);
            let meta = format!(
                "Changed address from \"{}\" to \"{}\"",
                guest.address_str(),
                address.as_deref().unwrap_or_default()
            );
            guest.address = address;
            guest.status = classify_status(guest.note_str(), guest.address_str());
            meta
        }
        GuestEdit::Note(note) => {
            let note = non_empty(&note);
            let meta = format!(
                "Changed note from \"{}\" to \"{}\"",
                guest.note_str(),
                note.as_deref().unwrap_or_default()
            );
            guest.note = note;
            guest.status = classify_status(guest.note_str(), guest.address_str());
            meta
        }
        GuestEdit::SocialProfile(profile) => {
            let profile = non_empty(&profile);
            let meta = format!(
                "Changed profile from \"{}\" to \"{}\"",
                guest.social_profile.as_deref().unwrap_or_default(),
                profile.as_deref().unwrap_or_default()
            );
            guest.social_profile = profile;
            meta
        }
        GuestEdit::Status(status) => {
            guest.status = status;
            format!("Changed from {old_status} to {status}")
        }
    };

    guest.last_action_at = now;
    debug!(guest_id = %guest.id, action, status = %guest.status, "guest edited");
    Ok(GuestChange {
        action,
        meta,
        old_status,
        new_status: guest.status,
    })
}

/// Applies a manual status override.
pub fn mark(guest: &mut GuestRecord, action: MarkAction, now: DateTime<Utc>) -> GuestChange {
    let old_status = guest.status;
    let new_status = action.status();
    guest.status = new_status;
    guest.last_action_at = now;
    debug!(guest_id = %guest.id, action = action.action_name(), "guest marked");
    GuestChange {
        action: action.action_name(),
        meta: format!("Changed from {old_status} to {new_status}"),
        old_status,
        new_status,
    }
}
