//! Persistence for the guest outreach workflow.
//!
//! - [`GuestStore`]: guests and their action log in one JSON file
//! - [`Settings`]: the single TOML settings record
//! - [`DataPaths`]: where both live
//!
//! Writes go through a temp file and a rename, so a crash leaves either the
//! old or the new file. Concurrent writers are not coordinated; the last
//! write wins.

mod error;
mod io;
mod settings;
mod store;

pub use error::{Result, StoreError};
pub use settings::{
    CsvSettings, DEFAULT_OLLAMA_BASE, DEFAULT_OLLAMA_MODEL, DataPaths, OllamaSettings,
    SheetSettings, Settings, load_settings, save_settings,
};
pub use store::GuestStore;
