use serde::{Deserialize, Serialize};

/// What a payload means to the receiving client: server feedback, a
/// rejected command, or chat content from another user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Error,
    Message,
}

/// A single payload sent to a client, serialized to JSON for the wire.
///
/// Messages are built per response or broadcast and handed straight to the
/// transport; the server never stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
}

impl Message {
    /// Informational feedback about the caller's own command.
    pub fn info<T: Into<String>>(content: T) -> Self {
        Self {
            kind: MessageKind::Info,
            content: content.into(),
        }
    }

    /// A command that was rejected, with a human-readable reason.
    pub fn error<T: Into<String>>(content: T) -> Self {
        Self {
            kind: MessageKind::Error,
            content: content.into(),
        }
    }

    /// Chat content relayed from a user.
    pub fn chat<T: Into<String>>(content: T) -> Self {
        Self {
            kind: MessageKind::Message,
            content: content.into(),
        }
    }
}
