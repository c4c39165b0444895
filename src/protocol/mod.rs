//! The `protocol` module defines the textual command protocol spoken by
//! clients and the payloads the server sends back.
//!
//! Inbound traffic is one raw command line per frame, turned into a
//! structured [`Command`] by [`prepare`]. Outbound traffic is a
//! [`Message`] serialized to JSON.

pub mod command;
pub mod message;

pub use command::{Command, ParseError, prepare};
pub use message::{Message, MessageKind};
