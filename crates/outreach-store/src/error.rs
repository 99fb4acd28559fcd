//! Error types for persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving data files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error with context.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic rename failed.
    #[error("failed to replace {target_path} with {temp_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Guest store file is not valid JSON.
    #[error("guest store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Guest store could not be serialized.
    #[error("failed to serialize guest store: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    /// No platform data directory and no override given.
    #[error("could not determine a data directory; pass --data-dir")]
    NoDataDir,
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, StoreError>;
