//! Settings record and data directory layout.
//!
//! Everything lives in one data directory:
//! - `settings.toml`: sources, detected columns, drafting service, wedding details
//! - `guests.json`: the guest store
//! - `uploads/`: copies of imported CSV files, the target of write-back

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use outreach_model::{FieldMapping, WeddingDetails};

use crate::error::{Result, StoreError};
use crate::io::write_atomic;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "guest-outreach";
const APP_NAME: &str = "Guest Outreach";
const SETTINGS_FILENAME: &str = "settings.toml";
const GUESTS_FILENAME: &str = "guests.json";
const UPLOADS_DIRNAME: &str = "uploads";

pub const DEFAULT_OLLAMA_BASE: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama2";

/// Locations of the persisted files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `override_dir` when given, else the platform data directory.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| Self::new(dirs.data_dir()))
            .ok_or(StoreError::NoDataDir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILENAME)
    }

    pub fn guests_file(&self) -> PathBuf {
        self.root.join(GUESTS_FILENAME)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS_DIRNAME)
    }
}

/// The single settings record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub updated_at: Option<DateTime<Utc>>,
    pub sheet: SheetSettings,
    pub csv: CsvSettings,
    pub ollama: OllamaSettings,
    pub wedding: WeddingDetails,
}

/// Published spreadsheet used by `sync`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSettings {
    pub public_url: Option<String>,
    pub spreadsheet_id: Option<String>,
    pub gid: Option<String>,
    pub csv_url: Option<String>,
}

/// The last uploaded CSV and its detected columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvSettings {
    pub file_path: Option<PathBuf>,
    pub mapping: FieldMapping,
}

/// Text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaSettings {
    pub base: String,
    pub model: String,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base: DEFAULT_OLLAMA_BASE.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

impl OllamaSettings {
    /// Drafting is attempted only when both values are set.
    pub fn is_configured(&self) -> bool {
        !self.base.trim().is_empty() && !self.model.trim().is_empty()
    }
}

impl Settings {
    /// Marks the record as changed.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

/// Loads settings, falling back to defaults when the file is missing or
/// unreadable.
pub fn load_settings(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Saves settings, creating the data directory if needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let content = toml::to_string_pretty(settings)?;
    write_atomic(path, content.as_bytes())?;
    tracing::debug!("Saved settings to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_serializable() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings);
        assert!(toml.is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Settings = toml::from_str("[wedding]\nbride_name = \"Ana\"\n").unwrap();
        assert_eq!(parsed.ollama.base, DEFAULT_OLLAMA_BASE);
        assert_eq!(parsed.ollama.model, DEFAULT_OLLAMA_MODEL);
        assert_eq!(parsed.wedding.bride_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_data_paths_layout() {
        let paths = DataPaths::new("/tmp/outreach");
        assert_eq!(paths.guests_file(), PathBuf::from("/tmp/outreach/guests.json"));
        assert_eq!(paths.settings_file(), PathBuf::from("/tmp/outreach/settings.toml"));
    }
}
