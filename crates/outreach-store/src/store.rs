//! JSON-file guest store.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use outreach_model::{ActionEntry, GuestId, GuestRecord, NewGuest};

use crate::error::{Result, StoreError};
use crate::io::write_atomic;

/// All guests plus their action log, keyed by surrogate id.
///
/// Ids are never reused, even across full re-imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestStore {
    next_id: u64,
    #[serde(default)]
    guests: Vec<GuestRecord>,
    #[serde(default)]
    actions: Vec<ActionEntry>,
}

impl Default for GuestStore {
    fn default() -> Self {
        Self {
            next_id: 1,
            guests: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl GuestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store; a missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no guest store yet");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(StoreError::Io {
                    operation: "read",
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        let store: Self = serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), guests = store.len(), "loaded guest store");
        Ok(store)
    }

    /// Saves the store atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self).map_err(StoreError::Serialize)?;
        write_atomic(path, &bytes)?;
        tracing::debug!(path = %path.display(), guests = self.len(), "saved guest store");
        Ok(())
    }

    /// Replaces every guest and clears the action log. Returns the count.
    pub fn replace_all(&mut self, guests: Vec<NewGuest>, now: DateTime<Utc>) -> usize {
        self.guests.clear();
        self.actions.clear();
        for guest in guests {
            self.insert(guest, now);
        }
        self.guests.len()
    }

    pub fn insert(&mut self, guest: NewGuest, now: DateTime<Utc>) -> GuestId {
        let id = GuestId::new(self.next_id);
        self.next_id += 1;
        self.guests.push(GuestRecord::from_new(id, guest, now));
        id
    }

    pub fn get(&self, id: GuestId) -> Option<&GuestRecord> {
        self.guests.iter().find(|guest| guest.id == id)
    }

    pub fn get_mut(&mut self, id: GuestId) -> Option<&mut GuestRecord> {
        self.guests.iter_mut().find(|guest| guest.id == id)
    }

    /// Removes a guest together with its action history.
    pub fn remove(&mut self, id: GuestId) -> Option<GuestRecord> {
        let idx = self.guests.iter().position(|guest| guest.id == id)?;
        self.actions.retain(|entry| entry.guest_id != id);
        Some(self.guests.remove(idx))
    }

    /// Case-insensitive exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&GuestRecord> {
        let name = name.trim().to_lowercase();
        self.guests
            .iter()
            .find(|guest| guest.name.to_lowercase() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GuestRecord> {
        self.guests.iter()
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn record_action(&mut self, entry: ActionEntry) {
        self.actions.push(entry);
    }

    /// Actions for one guest, oldest first.
    pub fn actions_for(&self, id: GuestId) -> impl Iterator<Item = &ActionEntry> {
        self.actions.iter().filter(move |entry| entry.guest_id == id)
    }
}

impl<'a> IntoIterator for &'a GuestStore {
    type Item = &'a GuestRecord;
    type IntoIter = std::slice::Iter<'a, GuestRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
