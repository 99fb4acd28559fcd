//! Error types for message drafting.

use thiserror::Error;

/// Errors from the text-generation service.
#[derive(Debug, Error)]
pub enum DraftError {
    /// Base URL or model is blank.
    #[error("text generation is not configured: {0}")]
    NotConfigured(&'static str),

    /// The request did not complete in time.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The server could not be reached.
    #[error("cannot connect to {url}; check the URL and ensure Ollama is running")]
    Connect { url: String },

    /// Any other transport or decoding failure.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    HttpStatus { status: u16 },

    /// The model produced no text.
    #[error("model '{model}' returned an empty response")]
    EmptyResponse { model: String },
}

impl DraftError {
    /// Classifies a transport error for `url`.
    pub fn from_request(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            Self::Timeout { url }
        } else if source.is_connect() {
            Self::Connect { url }
        } else {
            Self::Request { url, source }
        }
    }
}

/// Result type for drafting operations.
pub type Result<T> = std::result::Result<T, DraftError>;
