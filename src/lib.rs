//! # Parley
//!
//! `parley` is a minimal topic-based chat server built with Rust. Clients
//! connect over WebSockets, authenticate, join named topics, and exchange
//! broadcast or direct messages using a small line-oriented command
//! protocol.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `protocol`: The command grammar and the response payloads sent to clients.
//! - `server`: The dispatch engine: per-connection command handling and the
//!   registry of connected clients used for broadcasts.
//! - `client`: Represents the server's handle to one connected client.
//! - `services`: Persistent user and topic data on an embedded store.
//! - `transport`: The WebSocket server and per-connection read/send loops.
//! - `config`: Handles loading and managing server configuration.
//! - `utils`: Shared utilities: error types and logging setup.

pub mod client;
pub mod config;
pub mod protocol;
pub mod server;
pub mod services;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;
