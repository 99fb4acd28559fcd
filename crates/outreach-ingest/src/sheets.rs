//! Published spreadsheet sources.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Timeout for downloading a sheet export.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

static SPREADSHEET_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").expect("Invalid spreadsheet id regex")
});

static GID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#?&]gid=([0-9]+)").expect("Invalid gid regex"));

/// A published sheet tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub spreadsheet_id: String,
    /// Tab id; `"0"` is the first tab.
    pub gid: String,
}

impl SheetRef {
    /// The CSV export URL for this tab.
    pub fn csv_export_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
            self.spreadsheet_id, self.gid
        )
    }
}

/// Extracts the spreadsheet id and tab from a share or edit URL.
pub fn parse_public_url(url: &str) -> Option<SheetRef> {
    let spreadsheet_id = SPREADSHEET_ID_REGEX.captures(url)?[1].to_string();
    let gid = GID_REGEX
        .captures(url)
        .map_or_else(|| "0".to_string(), |caps| caps[1].to_string());
    Some(SheetRef {
        spreadsheet_id,
        gid,
    })
}

/// Downloads CSV text from an export URL.
pub fn fetch_csv(url: &str) -> Result<String> {
    let network = |source| IngestError::Network {
        url: url.to_string(),
        source,
    };
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(network)?;

    debug!(url, "fetching sheet export");
    let response = client
        .get(url)
        .header(
            USER_AGENT,
            format!("guest-outreach/{}", env!("CARGO_PKG_VERSION")),
        )
        .send()
        .map_err(network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(network)
}

/// Resolves a share URL and downloads its CSV export.
pub fn fetch_sheet(share_url: &str) -> Result<String> {
    let sheet = parse_public_url(share_url).ok_or_else(|| IngestError::InvalidSheetUrl {
        url: share_url.to_string(),
    })?;
    fetch_csv(&sheet.csv_export_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edit_url_with_gid() {
        let sheet = parse_public_url(
            "https://docs.google.com/spreadsheets/d/1AbC-d_9/edit#gid=123456",
        )
        .unwrap();
        assert_eq!(sheet.spreadsheet_id, "1AbC-d_9");
        assert_eq!(sheet.gid, "123456");
        assert_eq!(
            sheet.csv_export_url(),
            "https://docs.google.com/spreadsheets/d/1AbC-d_9/export?format=csv&gid=123456"
        );
    }

    #[test]
    fn gid_defaults_to_first_tab() {
        let sheet = parse_public_url("https://docs.google.com/spreadsheets/d/xyz/edit").unwrap();
        assert_eq!(sheet.gid, "0");
    }

    #[test]
    fn rejects_other_urls() {
        assert_eq!(parse_public_url("https://example.com/doc/1"), None);
        assert!(matches!(
            fetch_sheet("not a url"),
            Err(IngestError::InvalidSheetUrl { .. })
        ));
    }
}
