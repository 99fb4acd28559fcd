//! CSV table reading.

use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{IngestError, Result};

/// An in-memory CSV table: header row plus data rows.
///
/// Every row has exactly as many cells as there are headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Cell at `column` in `row`, or `""` when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Reads a `.csv` file from disk.
pub fn read_csv_path(path: &Path) -> Result<CsvTable> {
    let text = read_csv_text(path)?;
    let table = read_csv_str(&text)?;
    tracing::debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.row_count(),
        "read CSV file"
    );
    Ok(table)
}

/// Raw text of a `.csv` file.
pub(crate) fn read_csv_text(path: &Path) -> Result<String> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(IngestError::NotCsv {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Parses CSV text. A UTF-8 byte-order mark is ignored, cells are trimmed,
/// short rows are padded and long rows truncated to the header width.
pub fn read_csv_str(text: &str) -> Result<CsvTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Err(IngestError::EmptyCsv),
    };
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv);
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let mut cells: Vec<String> = record
            .iter()
            .take(headers.len())
            .map(str::to_string)
            .collect();
        cells.resize(headers.len(), String::new());
        rows.push(cells);
    }

    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_rows_and_strips_bom() {
        let table = read_csv_str("\u{feff}Name,Address\nAda\nBob, 2 Oak St ,extra\n").unwrap();
        assert_eq!(table.headers, vec!["Name", "Address"]);
        assert_eq!(table.rows[0], vec!["Ada", ""]);
        assert_eq!(table.rows[1], vec!["Bob", "2 Oak St"]);
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(read_csv_str(""), Err(IngestError::EmptyCsv)));
    }
}
