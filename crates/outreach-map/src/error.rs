//! Error types for column detection.

use thiserror::Error;

/// Errors from column detection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// No header matched any name candidate.
    #[error(
        "could not detect a name column; found columns: [{}]. Please ensure a column has \"name\" in its title",
        .headers.join(", ")
    )]
    NoNameColumn { headers: Vec<String> },
}

pub type Result<T> = std::result::Result<T, MappingError>;
