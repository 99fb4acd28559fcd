//! Column detection engine.

use tracing::debug;

use outreach_model::{FieldMapping, GuestField};

use crate::error::{MappingError, Result};
use crate::patterns::candidates_for;
use crate::utils::normalize_header;

/// Guesses which header holds each guest field.
///
/// Candidates are tried in priority order and the first one contained in
/// any header wins; among headers matching the same candidate the earliest
/// one is taken. The returned mapping carries the header text exactly as
/// given. Fails only when no name column can be found.
pub fn detect_fields(headers: &[String]) -> Result<FieldMapping> {
    let normalized: Vec<String> = headers
        .iter()
        .map(String::as_str)
        .map(normalize_header)
        .collect();

    let mut mapping = FieldMapping::default();
    for field in GuestField::ALL {
        let column = find_column(field, &normalized).map(|idx| headers[idx].clone());
        if let Some(column) = &column {
            debug!(field = field.as_str(), column = %column, "detected column");
        }
        mapping.set_column(field, column);
    }

    if mapping.name.is_none() {
        return Err(MappingError::NoNameColumn {
            headers: headers.to_vec(),
        });
    }
    Ok(mapping)
}

/// Index of the header matching the highest-priority candidate for `field`.
fn find_column(field: GuestField, normalized: &[String]) -> Option<usize> {
    candidates_for(field).iter().find_map(|candidate| {
        normalized
            .iter()
            .position(|header| header.contains(candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn specific_phrase_beats_earlier_generic_header() {
        let cols = headers(&["Guest", "Guest Name"]);
        let mapping = detect_fields(&cols).unwrap();
        assert_eq!(mapping.name.as_deref(), Some("Guest Name"));
    }

    #[test]
    fn header_order_breaks_ties() {
        let cols = headers(&["First Name", "Last Name"]);
        let mapping = detect_fields(&cols).unwrap();
        assert_eq!(mapping.name.as_deref(), Some("First Name"));
    }

    #[test]
    fn optional_fields_left_empty() {
        let cols = headers(&["Name"]);
        let mapping = detect_fields(&cols).unwrap();
        assert_eq!(mapping.address, None);
        assert_eq!(mapping.notes, None);
        assert_eq!(mapping.social_profile, None);
    }
}
