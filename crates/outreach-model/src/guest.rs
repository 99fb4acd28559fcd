use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::status::GuestStatus;

/// Surrogate key assigned by the guest store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GuestId(u64);

impl GuestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GuestId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A persisted guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub id: GuestId,
    pub name: String,
    /// Mailing address; `None` means unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Profile URL, numeric id, or username on the social platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_profile: Option<String>,
    pub status: GuestStatus,
    /// 1-based data row in the file this guest was imported from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_row_number: Option<usize>,
    pub last_action_at: DateTime<Utc>,
}

impl GuestRecord {
    /// Builds a record from a new guest and the id the store assigned.
    pub fn from_new(id: GuestId, guest: NewGuest, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: guest.name,
            address: guest.address,
            note: guest.note,
            social_profile: guest.social_profile,
            status: guest.status,
            import_row_number: guest.import_row_number,
            last_action_at: now,
        }
    }

    pub fn address_str(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }

    pub fn note_str(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }

    pub fn has_address(&self) -> bool {
        !self.address_str().trim().is_empty()
    }

    /// First whitespace-separated token of the name.
    pub fn first_name(&self) -> &str {
        first_name(&self.name)
    }
}

/// A guest that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGuest {
    pub name: String,
    pub address: Option<String>,
    pub note: Option<String>,
    pub social_profile: Option<String>,
    pub status: GuestStatus,
    pub import_row_number: Option<usize>,
}

impl NewGuest {
    /// Creates a guest with the default status. The name is trimmed and must
    /// not be blank; blank optional fields collapse to `None`.
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyName);
        }
        Ok(Self {
            name: trimmed.to_string(),
            address: None,
            note: None,
            social_profile: None,
            status: GuestStatus::default(),
            import_row_number: None,
        })
    }

    #[must_use]
    pub fn with_address(mut self, address: &str) -> Self {
        self.address = non_empty(address);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: &str) -> Self {
        self.note = non_empty(note);
        self
    }

    #[must_use]
    pub fn with_social_profile(mut self, profile: &str) -> Self {
        self.social_profile = non_empty(profile);
        self
    }

    #[must_use]
    pub fn with_row_number(mut self, row: usize) -> Self {
        self.import_row_number = Some(row);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: GuestStatus) -> Self {
        self.status = status;
        self
    }

    pub fn address_str(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }

    pub fn note_str(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }
}

/// Trims a value and maps blank strings to `None`.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// First whitespace-separated token of a name, or the trimmed name itself.
pub fn first_name(name: &str) -> &str {
    let trimmed = name.trim();
    trimmed.split_whitespace().next().unwrap_or(trimmed)
}
