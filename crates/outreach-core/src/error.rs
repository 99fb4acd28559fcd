use outreach_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("page size must be at least 1")]
    InvalidPageSize,
    #[error("unknown mark action: {0} (expected requested or not_on_fb)")]
    UnknownMarkAction(String),
    #[error("unknown guest field: {0} (expected name, address, note, profile or status)")]
    UnknownEditField(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
