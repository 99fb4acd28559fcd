//! Error types for guest list ingestion.

use std::path::PathBuf;

use outreach_map::MappingError;
use thiserror::Error;

/// Errors that can occur while importing or writing back a guest list.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to {operation} {path}: {source}")]
    FileWrite {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Only `.csv` files can be imported.
    #[error("file must be a CSV file (.csv extension): {path}")]
    NotCsv { path: PathBuf },

    // === CSV Parsing Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV: {source}")]
    CsvParse {
        #[source]
        source: csv::Error,
    },

    /// CSV input has no header row.
    #[error("CSV input is empty")]
    EmptyCsv,

    // === Mapping Errors ===
    /// No name column could be detected.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    // === Spreadsheet Errors ===
    /// URL is not a spreadsheet link.
    #[error("not a spreadsheet URL: {url}")]
    InvalidSheetUrl { url: String },

    /// Network failure while fetching a sheet export.
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Sheet export answered with a non-success status.
    #[error("fetching {url} returned HTTP {status}; is the sheet shared publicly?")]
    HttpStatus { url: String, status: u16 },
}

impl From<csv::Error> for IngestError {
    fn from(source: csv::Error) -> Self {
        Self::CsvParse { source }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/guests.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/guests.csv");
    }

    #[test]
    fn test_mapping_error_is_transparent() {
        let err: IngestError = MappingError::NoNameColumn {
            headers: vec!["Phone".to_string()],
        }
        .into();
        assert!(err.to_string().contains("[Phone]"));
    }
}
