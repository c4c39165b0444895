use super::Connection;
use crate::protocol::{Message, MessageKind};
use tokio::sync::mpsc;
use tungstenite::protocol::Message as WsMessage;

#[test]
fn connection_gets_an_id() {
    let (tx, _rx) = mpsc::unbounded_channel::<WsMessage>();
    let conn = Connection::new(tx);
    assert!(!conn.id.is_empty());
}

#[test]
fn send_queues_json() {
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    let conn = Connection::new(tx);

    conn.send(&Message::info("welcome"));

    let queued = rx.try_recv().unwrap();
    if let WsMessage::Text(text) = queued {
        let parsed: Message = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.kind, MessageKind::Info);
        assert_eq!(parsed.content, "welcome");
    } else {
        panic!("expected a text frame");
    }
}

#[test]
fn send_to_a_closed_connection_is_ignored() {
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let conn = Connection::new(tx);
    drop(rx);

    // Must not panic; the message is simply dropped.
    conn.send(&Message::info("anyone there?"));
}
