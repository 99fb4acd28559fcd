//! Outreach message drafting.
//!
//! Messages come from a local Ollama server through [`OllamaClient`]. The
//! service is optional: [`draft_or_fallback`] never fails and substitutes a
//! deterministic per-guest template whenever drafting is unavailable or the
//! reply is unusable.

#![deny(unsafe_code)]

mod client;
mod error;
mod fallback;
mod prompt;

pub use client::{GenerateOptions, OllamaClient, model_names};
pub use error::{DraftError, Result};
pub use fallback::{FALLBACK_TEMPLATES, MAX_MESSAGE_CHARS, clean_response, fallback_message};
pub use prompt::{PromptVariant, SCENARIOS, STYLES, build_prompt};

use outreach_model::{WeddingDetails, first_name};

/// Something that can write an outreach message for one guest.
pub trait MessageDrafter {
    /// Drafts a message addressed to `first_name`.
    fn draft(&self, first_name: &str, details: &WeddingDetails) -> Result<String>;
}

/// Drafts a message, or falls back to the guest's template.
///
/// Draft replies are cleaned of non-ASCII text and must be non-empty and
/// shorter than [`MAX_MESSAGE_CHARS`]. Errors are logged, never returned.
pub fn draft_or_fallback(
    drafter: Option<&dyn MessageDrafter>,
    guest_name: &str,
    details: &WeddingDetails,
) -> String {
    let Some(drafter) = drafter else {
        return fallback_message(guest_name);
    };
    match drafter.draft(first_name(guest_name), details) {
        Ok(text) => clean_response(&text).unwrap_or_else(|| {
            tracing::debug!("drafted message rejected, using fallback");
            fallback_message(guest_name)
        }),
        Err(e) => {
            tracing::warn!(error = %e, "message drafting failed, using fallback");
            fallback_message(guest_name)
        }
    }
}
