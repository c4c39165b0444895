//! Error types for the chat server.
//!
//! Store failures are real errors and are propagated; a command that
//! merely fails a precondition (unknown topic, not logged in, ...) is
//! answered with an error-typed protocol message instead and never
//! surfaces here.

use std::fmt;

/// Failure talking to the user/topic store.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying database failure
    Db(sled::Error),
    /// A stored record could not be encoded or decoded
    Codec(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Db(e) => write!(f, "database error: {e}"),
            StoreError::Codec(e) => write!(f, "codec error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Db(e) => Some(e),
            StoreError::Codec(e) => Some(e),
        }
    }
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::Db(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Codec(err)
    }
}
