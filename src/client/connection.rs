use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;
use tungstenite::protocol::Message as WsMessage;

use crate::protocol::Message;

/// Handle to a connected client.
///
/// Cloning is cheap: clones share the same outbound channel, so the
/// registry and the dispatcher can each hold one.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Unique identifier for the connection.
    pub id: String,

    /// Channel drained into this client's socket by its send loop.
    sender: UnboundedSender<WsMessage>,
}

impl Connection {
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: format!("conn-{}", uuid::Uuid::new_v4()),
            sender,
        }
    }

    /// Serialize `message` and queue it for delivery.
    ///
    /// Fire-and-forget: a connection whose send loop has already stopped
    /// is logged and skipped, never an error for the caller.
    pub fn send(&self, message: &Message) {
        let text = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize outbound message: {e}");
                return;
            }
        };
        if self.sender.send(WsMessage::text(text)).is_err() {
            warn!("connection {} is gone, dropping message", self.id);
        }
    }
}
