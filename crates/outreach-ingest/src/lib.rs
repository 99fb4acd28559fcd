//! Guest list ingestion.
//!
//! This crate reads guest tables from CSV files or published spreadsheets,
//! turns them into classified guests, and writes later edits back into the
//! uploaded CSV.
//!
//! # Features
//!
//! - **CSV Loading**: [`read_csv_path`] / [`read_csv_str`] into a [`CsvTable`]
//! - **Import**: [`import_table`] detects columns and classifies each row
//! - **Spreadsheets**: [`parse_public_url`] and [`fetch_csv`] for published sheets
//! - **Write-back**: [`write_back`] re-aligns edits by import row number

mod error;
mod import;
mod sheets;
mod table;
mod writeback;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use table::{CsvTable, read_csv_path, read_csv_str};

// === Import ===
pub use import::{ImportOutcome, import_table};

// === Spreadsheets ===
pub use sheets::{SheetRef, fetch_csv, fetch_sheet, parse_public_url};

// === Write-back ===
pub use writeback::{
    RowUpdate, WriteBackSummary, rewrite_csv, with_status_marker, write_back,
};
