//! Turning a CSV table into classified guests.

use outreach_core::classify_new;
use outreach_map::detect_fields;
use outreach_model::{FieldMapping, GuestField, NewGuest};

use crate::table::CsvTable;
use crate::error::Result;

/// Name cells that mean "no guest on this row".
const PLACEHOLDER_NAMES: &[&str] = &["nan", "none"];

/// Result of importing one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub mapping: FieldMapping,
    pub guests: Vec<NewGuest>,
    /// 1-based data rows skipped for a missing name.
    pub skipped_rows: Vec<usize>,
}

/// Detects columns and extracts one classified guest per named row.
///
/// Each guest remembers its 1-based data row so later edits can be written
/// back to the same line of the source file.
pub fn import_table(table: &CsvTable) -> Result<ImportOutcome> {
    let mapping = detect_fields(&table.headers)?;
    let column = |field| mapping.column_index(field, &table.headers);
    let name_col = column(GuestField::Name);
    let address_col = column(GuestField::Address);
    let notes_col = column(GuestField::Notes);
    let profile_col = column(GuestField::SocialProfile);

    let cell = |row: usize, col: Option<usize>| col.map_or("", |c| table.cell(row, c));

    let mut guests = Vec::new();
    let mut skipped_rows = Vec::new();
    for row in 0..table.row_count() {
        let row_number = row + 1;
        let name = cell(row, name_col);
        if is_placeholder_name(name) {
            tracing::debug!(row = row_number, "skipping row without a guest name");
            skipped_rows.push(row_number);
            continue;
        }
        let Ok(guest) = NewGuest::new(name) else {
            skipped_rows.push(row_number);
            continue;
        };
        let guest = guest
            .with_address(cell(row, address_col))
            .with_note(cell(row, notes_col))
            .with_social_profile(cell(row, profile_col))
            .with_row_number(row_number);
        guests.push(classify_new(guest));
    }

    tracing::info!(
        imported = guests.len(),
        skipped = skipped_rows.len(),
        "imported guest table"
    );
    Ok(ImportOutcome {
        mapping,
        guests,
        skipped_rows,
    })
}

fn is_placeholder_name(name: &str) -> bool {
    let name = name.trim();
    name.is_empty()
        || PLACEHOLDER_NAMES
            .iter()
            .any(|placeholder| name.eq_ignore_ascii_case(placeholder))
}
