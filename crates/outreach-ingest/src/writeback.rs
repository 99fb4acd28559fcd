//! Writing guest changes back into the source CSV.
//!
//! The file is re-read as raw records: cells keep their padding and rows
//! keep their length. Only the address and notes cells of updated rows are
//! replaced.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use csv::{ReaderBuilder, WriterBuilder};
use regex::Regex;

use outreach_model::{FieldMapping, GuestField, GuestStatus};

use crate::error::{IngestError, Result};
use crate::table::read_csv_text;

const REQUESTED_MARKER: &str = "Address Requested";
const NOT_ON_FB_MARKER: &str = "No Facebook Match";
const BOM: char = '\u{feff}';

/// Notes segments previously written as status markers.
static MARKER_SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(status:|address requested|no facebook match|facebook.*?20[0-9]{2}|fb.*?20[0-9]{2})")
        .expect("Invalid status marker regex")
});

/// A change to one source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    /// 1-based data row, as recorded at import.
    pub row_number: usize,
    pub address: Option<String>,
    pub status: Option<GuestStatus>,
}

/// Counts from a write-back pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteBackSummary {
    pub updated: usize,
    pub out_of_range: usize,
}

/// Applies updates to the CSV at `path` and rewrites it atomically.
///
/// The address cell is replaced when the mapping has an address column.
/// A status update rewrites the marker at the end of the notes cell.
pub fn write_back(
    path: &Path,
    mapping: &FieldMapping,
    updates: &[RowUpdate],
) -> Result<WriteBackSummary> {
    let text = read_csv_text(path)?;
    let (rewritten, summary) = rewrite_csv(&text, mapping, updates)?;
    write_csv_atomic(path, &rewritten)?;
    tracing::info!(
        path = %path.display(),
        updated = summary.updated,
        out_of_range = summary.out_of_range,
        "wrote guest changes back to CSV"
    );
    Ok(summary)
}

/// Applies updates to CSV text, leaving every other cell as it was.
///
/// Columns are found by comparing trimmed header text with the mapping.
/// Rows shorter than a target column are extended just far enough to hold
/// the new cell.
pub fn rewrite_csv(
    text: &str,
    mapping: &FieldMapping,
    updates: &[RowUpdate],
) -> Result<(String, WriteBackSummary)> {
    let (bom, body) = match text.strip_prefix(BOM) {
        Some(body) => (true, body),
        None => (false, text),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    let Some((headers, rows)) = records.split_first_mut() else {
        return Err(IngestError::EmptyCsv);
    };

    let address_col = column_position(headers, mapping.column(GuestField::Address));
    let notes_col = column_position(headers, mapping.column(GuestField::Notes));

    let mut summary = WriteBackSummary::default();
    for update in updates {
        let Some(row) = update
            .row_number
            .checked_sub(1)
            .and_then(|idx| rows.get_mut(idx))
        else {
            tracing::warn!(row = update.row_number, "write-back row out of range");
            summary.out_of_range += 1;
            continue;
        };

        if let (Some(address), Some(col)) = (&update.address, address_col) {
            *cell_mut(row, col) = address.clone();
        }
        if let (Some(status), Some(col)) = (update.status, notes_col) {
            let cell = cell_mut(row, col);
            *cell = with_status_marker(cell, status);
        }
        summary.updated += 1;
    }

    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for record in &records {
        writer.write_record(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| IngestError::from(csv::Error::from(e.into_error())))?;

    let mut rewritten = String::with_capacity(bytes.len() + BOM.len_utf8());
    if bom {
        rewritten.push(BOM);
    }
    rewritten.push_str(&String::from_utf8_lossy(&bytes));
    Ok((rewritten, summary))
}

fn column_position(headers: &[String], column: Option<&str>) -> Option<usize> {
    let column = column?.trim();
    headers
        .iter()
        .position(|header| header.trim_matches(BOM).trim() == column)
}

fn cell_mut(row: &mut Vec<String>, col: usize) -> &mut String {
    if row.len() <= col {
        row.resize(col + 1, String::new());
    }
    &mut row[col]
}

/// Replaces any status marker in a notes cell with the one for `status`.
///
/// Notes are `|`-separated segments; marker segments are dropped and the new
/// marker, if any, is appended.
pub fn with_status_marker(notes: &str, status: GuestStatus) -> String {
    let mut segments: Vec<&str> = notes
        .split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && !MARKER_SEGMENT_REGEX.is_match(segment))
        .collect();

    match status {
        GuestStatus::Requested => segments.push(REQUESTED_MARKER),
        GuestStatus::NotOnFb => segments.push(NOT_ON_FB_MARKER),
        GuestStatus::NeedsAddress | GuestStatus::HasAddress => {}
    }
    segments.join(" | ")
}

/// Replaces `path` through a sibling `<name>.tmp` file and a rename,
/// creating the parent directory first.
fn write_csv_atomic(path: &Path, text: &str) -> Result<()> {
    let write_error = |operation: &'static str, path: &Path, source| IngestError::FileWrite {
        operation,
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error("create directory", parent, e))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut file = File::create(&temp_path).map_err(|e| write_error("create", &temp_path, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| write_error("write", &temp_path, e))?;
    file.sync_all()
        .map_err(|e| write_error("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| write_error("replace", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_replaces_previous_markers() {
        assert_eq!(
            with_status_marker("college friend | Address Requested", GuestStatus::NotOnFb),
            "college friend | No Facebook Match"
        );
        assert_eq!(
            with_status_marker("Facebook Mar 2024 | plus one", GuestStatus::Requested),
            "plus one | Address Requested"
        );
        assert_eq!(
            with_status_marker("status: pending |", GuestStatus::HasAddress),
            ""
        );
    }

    #[test]
    fn short_target_row_is_extended_to_the_notes_column() {
        let mapping = FieldMapping {
            name: Some("Name".to_string()),
            notes: Some("Notes".to_string()),
            ..FieldMapping::default()
        };
        let update = RowUpdate {
            row_number: 1,
            address: None,
            status: Some(GuestStatus::NotOnFb),
        };
        let (text, summary) = rewrite_csv("\u{feff}Name,Age,Notes\nAda\n", &mapping, &[update]).unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(text, "\u{feff}Name,Age,Notes\nAda,,No Facebook Match\n");
    }

    #[test]
    fn marker_on_empty_notes() {
        assert_eq!(with_status_marker("", GuestStatus::Requested), "Address Requested");
    }
}
