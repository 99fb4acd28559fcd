use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::guest::GuestId;

/// Audit row recorded for every guest mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub guest_id: GuestId,
    /// Machine name of the action, e.g. `update_address` or `mark_requested`.
    pub action: String,
    /// Free-text detail, e.g. the old and new value.
    #[serde(default)]
    pub meta: String,
    pub ts: DateTime<Utc>,
}

impl ActionEntry {
    pub fn new(
        guest_id: GuestId,
        action: impl Into<String>,
        meta: impl Into<String>,
        ts: DateTime<Utc>,
    ) -> Self {
        Self {
            guest_id,
            action: action.into(),
            meta: meta.into(),
            ts,
        }
    }
}
