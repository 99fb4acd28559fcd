//! Column mapping between an import source and guest fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A guest attribute that can be sourced from an import column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestField {
    Name,
    Address,
    Notes,
    SocialProfile,
}

impl GuestField {
    pub const ALL: [GuestField; 4] = [
        GuestField::Name,
        GuestField::Address,
        GuestField::Notes,
        GuestField::SocialProfile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuestField::Name => "name",
            GuestField::Address => "address",
            GuestField::Notes => "notes",
            GuestField::SocialProfile => "social_profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GuestField::Name => "Name",
            GuestField::Address => "Address",
            GuestField::Notes => "Notes",
            GuestField::SocialProfile => "Facebook profile",
        }
    }
}

impl fmt::Display for GuestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detected source column for each guest field.
///
/// Column names are kept exactly as they appear in the source header so
/// that write-back can address the same columns. A mapping without a name
/// column cannot drive an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_profile: Option<String>,
}

impl FieldMapping {
    /// Source column for a field, if detected.
    pub fn column(&self, field: GuestField) -> Option<&str> {
        match field {
            GuestField::Name => self.name.as_deref(),
            GuestField::Address => self.address.as_deref(),
            GuestField::Notes => self.notes.as_deref(),
            GuestField::SocialProfile => self.social_profile.as_deref(),
        }
    }

    pub fn set_column(&mut self, field: GuestField, column: Option<String>) {
        match field {
            GuestField::Name => self.name = column,
            GuestField::Address => self.address = column,
            GuestField::Notes => self.notes = column,
            GuestField::SocialProfile => self.social_profile = column,
        }
    }

    /// Position of a field's column within `headers` (exact match).
    pub fn column_index(&self, field: GuestField, headers: &[String]) -> Option<usize> {
        let column = self.column(field)?;
        headers.iter().position(|header| header == column)
    }

    /// Returns true when an import can proceed.
    pub fn is_importable(&self) -> bool {
        self.name.is_some()
    }
}
