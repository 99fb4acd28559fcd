//! Wedding details used to personalise outreach messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const DEFAULT_BRIDE: &str = "Jessica";
const DEFAULT_GROOM: &str = "Charles";

/// Who the outreach messages are sent on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    Bride,
    Groom,
    #[default]
    Both,
}

impl MessageSender {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageSender::Bride => "bride",
            MessageSender::Groom => "groom",
            MessageSender::Both => "both",
        }
    }
}

impl fmt::Display for MessageSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageSender {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bride" => Ok(MessageSender::Bride),
            "groom" => Ok(MessageSender::Groom),
            "both" => Ok(MessageSender::Both),
            _ => Err(ModelError::UnknownSender(s.to_string())),
        }
    }
}

/// Optional context handed to the message drafter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeddingDetails {
    pub bride_name: Option<String>,
    pub groom_name: Option<String>,
    pub wedding_date: Option<String>,
    pub message_sender: MessageSender,
}

impl WeddingDetails {
    pub fn bride(&self) -> &str {
        self.bride_name.as_deref().unwrap_or(DEFAULT_BRIDE)
    }

    pub fn groom(&self) -> &str {
        self.groom_name.as_deref().unwrap_or(DEFAULT_GROOM)
    }

    /// Name the messages are sent as, e.g. `Charles & Jessica`.
    pub fn sender_name(&self) -> String {
        match self.message_sender {
            MessageSender::Bride => self.bride().to_string(),
            MessageSender::Groom => self.groom().to_string(),
            MessageSender::Both => format!("{} & {}", self.groom(), self.bride()),
        }
    }
}
