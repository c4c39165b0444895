use std::collections::HashMap;
use std::sync::RwLock;

use crate::client::Connection;
use crate::services::User;

/// The registry of currently connected, authenticated users.
///
/// One instance is built at startup and shared by every connection's
/// dispatcher; entries appear on login and disappear on logout or
/// disconnect. Broadcasts iterate over a snapshot taken under the lock,
/// so sends never hold it and a concurrently removed entry is simply a
/// handle whose send is dropped.
#[derive(Debug, Default)]
pub struct ConnectedClients {
    inner: RwLock<HashMap<String, Entry>>,
}

#[derive(Debug, Clone)]
struct Entry {
    user: User,
    conn: Connection,
}

impl ConnectedClients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a logged-in user to its connection. A second login for the
    /// same account replaces the previous binding.
    pub fn add(&self, user: User, conn: Connection) {
        let mut inner = self.inner.write().unwrap();
        inner.insert(user.id.clone(), Entry { user, conn });
    }

    /// Drop a user's binding. Returns whether one was present.
    pub fn remove(&self, user_id: &str) -> bool {
        let mut inner = self.inner.write().unwrap();
        inner.remove(user_id).is_some()
    }

    /// Refresh the stored copy of a connected user after a membership
    /// change, so later broadcasts see the new topic set. A no-op for
    /// users that are not connected.
    pub fn update_user(&self, user: &User) {
        let mut inner = self.inner.write().unwrap();
        if let Some(entry) = inner.get_mut(&user.id) {
            entry.user = user.clone();
        }
    }

    /// The connected user with this username, if any.
    pub fn find_by_username(&self, username: &str) -> Option<(User, Connection)> {
        let inner = self.inner.read().unwrap();
        inner
            .values()
            .find(|entry| entry.user.username == username)
            .map(|entry| (entry.user.clone(), entry.conn.clone()))
    }

    /// Clone out every (user, connection) pair. Callers iterate the
    /// snapshot without holding the lock.
    pub fn snapshot(&self) -> Vec<(User, Connection)> {
        let inner = self.inner.read().unwrap();
        inner
            .values()
            .map(|entry| (entry.user.clone(), entry.conn.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
