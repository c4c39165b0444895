//! The `services` module owns persistent user and topic data.
//!
//! Both services share one embedded `sled` database, one tree per
//! concern, with records encoded as JSON. They are cheap to clone, so
//! every connection's dispatcher holds its own handle.

pub mod topics;
pub mod users;

pub use topics::{Topic, TopicsService};
pub use users::{User, UserService};
