use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown guest status: {0}")]
    UnknownStatus(String),
    #[error("unknown message sender: {0}")]
    UnknownSender(String),
    #[error("guest name must not be empty")]
    EmptyName,
}

pub type Result<T> = std::result::Result<T, ModelError>;
