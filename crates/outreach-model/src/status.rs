//! Guest lifecycle status.
//!
//! The four status strings are part of the storage contract and are shared
//! with any spreadsheet that is synced against the guest list, so the
//! serialized names must never change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Where a guest is in the address-collection workflow.
///
/// `NeedsAddress` is the initial state. Outreach moves a guest to
/// `Requested`, a failed social lookup moves it to `NotOnFb`, and
/// `HasAddress` is the goal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    /// No address on file and no outreach recorded.
    #[default]
    NeedsAddress,
    /// A mailing address is on file.
    HasAddress,
    /// An address request has been sent.
    Requested,
    /// The guest could not be found on the social platform.
    NotOnFb,
}

impl GuestStatus {
    /// Every status, in dashboard order.
    pub const ALL: [GuestStatus; 4] = [
        GuestStatus::NeedsAddress,
        GuestStatus::HasAddress,
        GuestStatus::Requested,
        GuestStatus::NotOnFb,
    ];

    /// Returns the persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::NeedsAddress => "needs_address",
            GuestStatus::HasAddress => "has_address",
            GuestStatus::Requested => "requested",
            GuestStatus::NotOnFb => "not_on_fb",
        }
    }

    /// Returns a short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            GuestStatus::NeedsAddress => "Needs address",
            GuestStatus::HasAddress => "Has address",
            GuestStatus::Requested => "Requested",
            GuestStatus::NotOnFb => "Not on Facebook",
        }
    }

    /// Returns true once the workflow goal is reached.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GuestStatus::HasAddress)
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GuestStatus {
    type Err = ModelError;

    /// Parses the persisted form. Dashes are accepted in place of
    /// underscores so `not-on-fb` works on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "needs_address" => Ok(GuestStatus::NeedsAddress),
            "has_address" => Ok(GuestStatus::HasAddress),
            "requested" => Ok(GuestStatus::Requested),
            "not_on_fb" => Ok(GuestStatus::NotOnFb),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}
