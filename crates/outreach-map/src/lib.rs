//! Header-based column detection for guest list imports.
//!
//! Given the header row of an arbitrary table, [`detect_fields`] picks the
//! columns holding the guest name, mailing address, notes and social
//! profile using ordered keyword candidates.

#![deny(unsafe_code)]

pub mod detect;
pub mod error;
pub mod patterns;
mod utils;

pub use detect::detect_fields;
pub use error::{MappingError, Result};
pub use utils::normalize_header;
