use std::sync::Arc;

use tracing::{error, info};

use parley::config::load_config;
use parley::server::ConnectedClients;
use parley::services::{TopicsService, UserService};
use parley::transport::start_server;
use parley::utils::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("info");

    let config = load_config().expect("Failed to load configuration");
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let db = sled::open(&config.storage.data_dir).expect("Failed to open database");
    let clients = Arc::new(ConnectedClients::new());
    let users = UserService::new(db.clone());
    let topics = TopicsService::new(db);

    tokio::select! {
        _ = start_server(&addr, clients, users, topics) => {
            error!("server exited unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, exiting");
        }
    }
}
