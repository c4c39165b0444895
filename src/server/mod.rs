//! The `server` module is the dispatch engine: the shared registry of
//! connected clients and the per-connection handler that validates
//! commands against it and fans messages out.

pub mod dispatcher;
pub mod registry;

pub use dispatcher::{ClientHandler, Dispatch};
pub use registry::ConnectedClients;
