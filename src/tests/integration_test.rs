use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tungstenite::protocol::Message as WsMessage;

use crate::protocol::{Message, MessageKind};
use crate::server::ConnectedClients;
use crate::services::{TopicsService, UserService};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn send_line(ws: &mut WsClient, line: &str) {
    ws.send(WsMessage::text(line.to_string())).await.unwrap();
}

async fn next_message(ws: &mut WsClient) -> Message {
    let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for a message")
        .expect("connection closed")
        .expect("websocket error");
    match frame {
        WsMessage::Text(text) => serde_json::from_str(&text).unwrap(),
        other => panic!("unexpected frame: {other:?}"),
    }
}

#[tokio::test]
async fn chat_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let db = sled::open(dir.path()).unwrap();
    let clients = Arc::new(ConnectedClients::new());
    let users = UserService::new(db.clone());
    let topics = TopicsService::new(db);

    let addr = "127.0.0.1:9301";
    tokio::spawn(async move {
        crate::transport::start_server(addr, clients, users, topics).await;
    });

    tokio::time::sleep(Duration::from_millis(300)).await;

    let (mut alice, _) = connect_async(format!("ws://{addr}"))
        .await
        .expect("client A connect");
    let (mut bob, _) = connect_async(format!("ws://{addr}"))
        .await
        .expect("client B connect");

    send_line(&mut alice, "register alice secret").await;
    assert_eq!(next_message(&mut alice).await.kind, MessageKind::Info);

    send_line(&mut alice, "create-topic rust").await;
    assert_eq!(
        next_message(&mut alice).await.content,
        "Topic rust created and joined."
    );

    send_line(&mut bob, "register bob hunter2").await;
    assert_eq!(next_message(&mut bob).await.kind, MessageKind::Info);

    send_line(&mut bob, "join rust").await;
    assert_eq!(next_message(&mut bob).await.content, "Joined topic rust");

    // A broadcast reaches every member, the sender included.
    send_line(&mut alice, "say rust hello from the other side").await;
    let expected = Message::chat("[alice@rust] - hello from the other side");
    assert_eq!(next_message(&mut bob).await, expected);
    assert_eq!(next_message(&mut alice).await, expected);

    // A private message lands at the receiver with an echo to the sender.
    send_line(&mut bob, "mp alice psst").await;
    assert_eq!(next_message(&mut alice).await, Message::chat("[From: bob] - psst"));
    assert_eq!(next_message(&mut bob).await, Message::chat("[To: alice] - psst"));
}
