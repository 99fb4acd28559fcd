//! Guest list operations shared by the CLI commands.
//!
//! A [`Workspace`] owns the loaded settings and guest store for one data
//! directory. Every mutation stamps the guest, appends to the action log and,
//! for guests imported from a CSV upload, writes the change back to that file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use outreach_core::{
    GuestChange, GuestEdit, GuestQuery, MarkAction, Page, apply_edit, build_messenger_link, mark,
    new_guest, query_guests,
};
use outreach_draft::{MessageDrafter, OllamaClient, draft_or_fallback};
use outreach_ingest::{
    ImportOutcome, RowUpdate, SheetRef, import_table, parse_public_url, read_csv_path,
    read_csv_str, write_back,
};
use outreach_model::{ActionEntry, FieldMapping, GuestId, GuestRecord};
use outreach_store::{DataPaths, GuestStore, Settings, load_settings, save_settings};

use crate::logging::redact_value;

/// Loaded state for one data directory.
#[derive(Debug)]
pub struct Workspace {
    pub paths: DataPaths,
    pub settings: Settings,
    pub store: GuestStore,
}

/// What an import or sync did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub mapping: FieldMapping,
    pub imported: usize,
    pub skipped_rows: Vec<usize>,
    /// Copy of the uploaded file that later edits are written to.
    pub stored_copy: Option<PathBuf>,
}

/// One guest in the review queue with its outreach message and link.
#[derive(Debug, Clone)]
pub struct ReviewItem<'a> {
    pub guest: &'a GuestRecord,
    pub message: String,
    pub link: String,
}

impl Workspace {
    /// Loads settings and the guest store.
    pub fn open(paths: DataPaths) -> Result<Self> {
        let settings = load_settings(&paths.settings_file());
        let store = GuestStore::load(&paths.guests_file()).context("load guest store")?;
        Ok(Self {
            paths,
            settings,
            store,
        })
    }

    /// Persists the guest store.
    pub fn save_store(&self) -> Result<()> {
        self.store
            .save(&self.paths.guests_file())
            .context("save guest store")
    }

    /// Persists the settings record.
    pub fn save_settings(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.settings.touch(now);
        save_settings(&self.paths.settings_file(), &self.settings).context("save settings")
    }

    /// Imports a CSV file, replacing every guest.
    ///
    /// The file is copied into the uploads directory and the copy becomes
    /// the write-back target.
    pub fn import_csv_file(&mut self, path: &Path, now: DateTime<Utc>) -> Result<ImportReport> {
        let table = read_csv_path(path)?;
        let outcome = import_table(&table)?;

        let stored_copy = self.store_upload(path, now)?;
        self.settings.csv.file_path = Some(stored_copy.clone());
        self.settings.csv.mapping = outcome.mapping.clone();

        let mut report = self.replace_guests(outcome, now)?;
        report.stored_copy = Some(stored_copy);
        Ok(report)
    }

    /// Replaces every guest from sheet CSV text.
    ///
    /// Sheet rows do not line up with any uploaded file, so write-back is
    /// switched off until the next CSV import.
    pub fn sync_from_sheet(&mut self, csv_text: &str, now: DateTime<Utc>) -> Result<ImportReport> {
        let table = read_csv_str(csv_text)?;
        let outcome = import_table(&table)?;
        self.settings.csv.file_path = None;
        self.settings.csv.mapping = outcome.mapping.clone();
        self.replace_guests(outcome, now)
    }

    fn replace_guests(&mut self, outcome: ImportOutcome, now: DateTime<Utc>) -> Result<ImportReport> {
        let ImportOutcome {
            mapping,
            guests,
            skipped_rows,
        } = outcome;
        let imported = self.store.replace_all(guests, now);
        self.save_store()?;
        self.save_settings(now)?;
        info!(imported, skipped = skipped_rows.len(), "guest list replaced");
        Ok(ImportReport {
            mapping,
            imported,
            skipped_rows,
            stored_copy: None,
        })
    }

    fn store_upload(&self, path: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
        let uploads = self.paths.uploads_dir();
        fs::create_dir_all(&uploads)
            .with_context(|| format!("create uploads directory {}", uploads.display()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("guests.csv");
        let target = uploads.join(format!("{}_{file_name}", now.format("%Y%m%d_%H%M%S")));
        fs::copy(path, &target)
            .with_context(|| format!("copy {} to {}", path.display(), target.display()))?;
        Ok(target)
    }

    /// Stores the published sheet used by `sync`.
    pub fn set_sheet_url(&mut self, url: &str) -> Result<SheetRef> {
        let sheet = parse_public_url(url).ok_or_else(|| anyhow!("invalid Google Sheets URL: {url}"))?;
        self.settings.sheet.public_url = Some(url.trim().to_string());
        self.settings.sheet.spreadsheet_id = Some(sheet.spreadsheet_id.clone());
        self.settings.sheet.gid = Some(sheet.gid.clone());
        self.settings.sheet.csv_url = Some(sheet.csv_export_url());
        Ok(sheet)
    }

    /// Forgets the published sheet.
    pub fn clear_sheet_url(&mut self) {
        self.settings.sheet = Default::default();
    }

    /// Adds a guest by hand. Names must be unique, ignoring case.
    pub fn add_guest(
        &mut self,
        name: &str,
        address: Option<&str>,
        note: Option<&str>,
        social_profile: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<GuestId> {
        if self.store.find_by_name(name).is_some() {
            bail!("a guest named \"{}\" already exists", name.trim());
        }
        let guest = new_guest(name, address, note, social_profile)?;
        let status = guest.status;
        let id = self.store.insert(guest, now);
        self.store.record_action(ActionEntry::new(
            id,
            "add_guest",
            format!("Added with status {status}"),
            now,
        ));
        self.save_store()?;
        info!(guest_id = %id, name = redact_value(name), "guest added");
        Ok(id)
    }

    /// Applies an edit, logs it and writes it back to the uploaded CSV.
    pub fn edit_guest(
        &mut self,
        id: GuestId,
        edit: GuestEdit,
        now: DateTime<Utc>,
    ) -> Result<GuestChange> {
        let writes_address = matches!(edit, GuestEdit::Address(_));
        let guest = self.guest_mut(id)?;
        let change = apply_edit(guest, edit, now)?;
        let update = row_update(guest, writes_address, writes_address || change.status_changed());

        self.store.record_action(change.clone().into_entry(id, now));
        self.save_store()?;
        if let Some(update) = update {
            self.write_back(&update);
        }
        Ok(change)
    }

    /// Applies a manual mark, logs it and writes it back.
    pub fn mark_guest(
        &mut self,
        id: GuestId,
        action: MarkAction,
        now: DateTime<Utc>,
    ) -> Result<GuestChange> {
        let guest = self.guest_mut(id)?;
        let change = mark(guest, action, now);
        let update = row_update(guest, false, true);

        self.store.record_action(change.clone().into_entry(id, now));
        self.save_store()?;
        if let Some(update) = update {
            self.write_back(&update);
        }
        Ok(change)
    }

    /// Deletes a guest and its history.
    pub fn delete_guest(&mut self, id: GuestId) -> Result<GuestRecord> {
        let removed = self
            .store
            .remove(id)
            .ok_or_else(|| anyhow!("guest {id} not found"))?;
        self.save_store()?;
        info!(guest_id = %id, name = redact_value(&removed.name), "guest deleted");
        Ok(removed)
    }

    pub fn guest(&self, id: GuestId) -> Result<&GuestRecord> {
        self.store
            .get(id)
            .ok_or_else(|| anyhow!("guest {id} not found"))
    }

    fn guest_mut(&mut self, id: GuestId) -> Result<&mut GuestRecord> {
        self.store
            .get_mut(id)
            .ok_or_else(|| anyhow!("guest {id} not found"))
    }

    /// Best-effort write-back; failures are logged, never returned.
    fn write_back(&self, update: &RowUpdate) {
        let Some(path) = self.settings.csv.file_path.as_deref() else {
            return;
        };
        if let Err(e) = write_back(path, &self.settings.csv.mapping, std::slice::from_ref(update)) {
            warn!(path = %path.display(), error = %e, "failed to update CSV file");
        }
    }

    /// A drafter when the text-generation service is configured.
    pub fn drafter(&self) -> Option<OllamaClient> {
        let ollama = &self.settings.ollama;
        if !ollama.is_configured() {
            return None;
        }
        match OllamaClient::new(&ollama.base, &ollama.model) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "text generation unavailable");
                None
            }
        }
    }

    /// One page of the review queue with a message and link per guest.
    pub fn review_page(
        &self,
        query: &GuestQuery,
        drafter: Option<&dyn MessageDrafter>,
    ) -> Result<(Page<'_>, Vec<ReviewItem<'_>>)> {
        let page = query_guests(&self.store, query)?;
        let items = page
            .items
            .iter()
            .map(|&guest| {
                let message = draft_or_fallback(drafter, &guest.name, &self.settings.wedding);
                let link = build_messenger_link(
                    guest.social_profile.as_deref(),
                    Some(message.as_str()),
                    Some(guest.name.as_str()),
                );
                ReviewItem {
                    guest,
                    message,
                    link,
                }
            })
            .collect();
        Ok((page, items))
    }
}

/// The source-row update for a changed guest, if it came from an import.
fn row_update(guest: &GuestRecord, with_address: bool, with_status: bool) -> Option<RowUpdate> {
    let row_number = guest.import_row_number?;
    if !with_address && !with_status {
        return None;
    }
    Some(RowUpdate {
        row_number,
        address: with_address.then(|| guest.address_str().to_string()),
        status: with_status.then_some(guest.status),
    })
}
