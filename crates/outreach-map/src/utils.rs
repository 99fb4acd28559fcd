//! Utility functions for header matching.

/// Normalizes a header for keyword matching: byte-order mark removed,
/// trimmed, lower-cased.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_header("  Guest NAME "), "guest name");
        assert_eq!(normalize_header("\u{feff}Name"), "name");
    }
}
