use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tracing::{info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::client::Connection;
use crate::server::{ClientHandler, ConnectedClients};
use crate::services::{TopicsService, UserService};

/// Accept connections forever, one spawned task per client.
pub async fn start_server(
    addr: &str,
    clients: Arc<ConnectedClients>,
    users: UserService,
    topics: TopicsService,
) {
    let listener = TcpListener::bind(addr).await.expect("Can't bind");

    info!("chat server listening on ws://{addr}");

    while let Ok((stream, _)) = listener.accept().await {
        let clients = clients.clone();
        let users = users.clone();
        let topics = topics.clone();

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    warn!("WebSocket handshake error: {e}");
                    return;
                }
            };

            let (mut ws_sender, mut ws_receiver) = ws_stream.split();

            let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
            let conn = Connection::new(tx);
            let conn_id = conn.id.clone();
            let mut handler = ClientHandler::new(conn, clients, users, topics);

            info!("{conn_id} connected");

            // Forward queued outbound messages into the socket.
            {
                let conn_id = conn_id.clone();
                spawn(async move {
                    while let Some(msg) = rx.recv().await {
                        if let Err(e) = ws_sender.send(msg).await {
                            warn!("failed to send to {conn_id}: {e}");
                            break;
                        }
                    }
                });
            }

            // One text frame is one command line. Dispatch never blocks:
            // all sends go through the connections' queues.
            while let Some(Ok(msg)) = ws_receiver.next().await {
                if msg.is_text() {
                    handler.handle_line(msg.to_text().unwrap());
                }
            }

            info!("{conn_id} disconnected");
            handler.disconnect();
        });
    }
}
