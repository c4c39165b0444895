//! The `transport` module handles network communication with clients
//! over WebSockets.
//!
//! Each inbound text frame carries one raw command line; each outbound
//! frame carries one JSON-serialized protocol message. Parsing and
//! dispatch live in `protocol` and `server`; this module only moves
//! bytes and owns connection lifetime.

pub mod websocket;

pub use websocket::start_server;
