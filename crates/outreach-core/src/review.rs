//! Filtering, search and pagination over the guest list.

use std::fmt;
use std::str::FromStr;

use outreach_model::{GuestRecord, GuestStatus};

use crate::error::{CoreError, Result};

/// Guests per page in the outreach review queue.
pub const REVIEW_PAGE_SIZE: usize = 5;
/// Guests per page in the management listing.
pub const MANAGE_PAGE_SIZE: usize = 50;

/// Status filter for a guest query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(GuestStatus),
}

impl StatusFilter {
    pub fn matches(self, status: GuestStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        Ok(StatusFilter::Only(s.parse()?))
    }
}

/// A guest list query. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestQuery {
    pub status: StatusFilter,
    pub search: Option<String>,
    pub page: usize,
    pub per_page: usize,
}

impl GuestQuery {
    /// The review queue default: guests still needing an address.
    pub fn review() -> Self {
        Self {
            status: StatusFilter::Only(GuestStatus::NeedsAddress),
            search: None,
            page: 1,
            per_page: REVIEW_PAGE_SIZE,
        }
    }

    /// The management listing default: everyone.
    pub fn manage() -> Self {
        Self {
            status: StatusFilter::All,
            search: None,
            page: 1,
            per_page: MANAGE_PAGE_SIZE,
        }
    }
}

impl Default for GuestQuery {
    fn default() -> Self {
        Self::manage()
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: Vec<&'a GuestRecord>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl Page<'_> {
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Runs a query: status filter, case-insensitive name search, ordering by
/// name then id. Pages past the end come back empty.
pub fn query_guests<'a, I>(guests: I, query: &GuestQuery) -> Result<Page<'a>>
where
    I: IntoIterator<Item = &'a GuestRecord>,
{
    if query.per_page == 0 {
        return Err(CoreError::InvalidPageSize);
    }
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<&GuestRecord> = guests
        .into_iter()
        .filter(|guest| query.status.matches(guest.status))
        .filter(|guest| {
            needle
                .as_deref()
                .is_none_or(|needle| guest.name.to_lowercase().contains(needle))
        })
        .collect();
    matched.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.id.cmp(&b.id))
    });

    let page = query.page.max(1);
    let total = matched.len();
    let items = matched
        .into_iter()
        .skip((page - 1).saturating_mul(query.per_page))
        .take(query.per_page)
        .collect();

    Ok(Page {
        items,
        page,
        per_page: query.per_page,
        total,
    })
}

/// Per-status guest counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub needs_address: usize,
    pub has_address: usize,
    pub requested: usize,
    pub not_on_fb: usize,
}

impl StatusCounts {
    pub fn tally<'a>(guests: impl IntoIterator<Item = &'a GuestRecord>) -> Self {
        let mut counts = Self::default();
        for guest in guests {
            match guest.status {
                GuestStatus::NeedsAddress => counts.needs_address += 1,
                GuestStatus::HasAddress => counts.has_address += 1,
                GuestStatus::Requested => counts.requested += 1,
                GuestStatus::NotOnFb => counts.not_on_fb += 1,
            }
        }
        counts
    }

    pub fn get(&self, status: GuestStatus) -> usize {
        match status {
            GuestStatus::NeedsAddress => self.needs_address,
            GuestStatus::HasAddress => self.has_address,
            GuestStatus::Requested => self.requested,
            GuestStatus::NotOnFb => self.not_on_fb,
        }
    }

    pub fn total(&self) -> usize {
        self.needs_address + self.has_address + self.requested + self.not_on_fb
    }

    /// Share of guests with an address, as a whole percentage.
    pub fn completion_percent(&self) -> usize {
        match self.total() {
            0 => 0,
            total => self.has_address * 100 / total,
        }
    }
}
