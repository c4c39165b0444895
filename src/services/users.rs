use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sled::Db;
use uuid::Uuid;

use crate::utils::error::StoreError;

const TREE: &str = "users";

/// A registered account.
///
/// `topics` is the set of topic names this user has joined; broadcast
/// eligibility is decided by membership here, not by anything on the
/// topic itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub topics: HashSet<String>,
    pub created_at: i64,
}

impl User {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: password.to_string(),
            topics: HashSet::new(),
            created_at: Utc::now().timestamp(),
        }
    }
}

/// Store of registered users, keyed by username.
#[derive(Debug, Clone)]
pub struct UserService {
    db: Db,
}

impl UserService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    fn tree(&self) -> Result<sled::Tree, StoreError> {
        Ok(self.db.open_tree(TREE)?)
    }

    pub fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        match self.tree()?.get(username)? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.tree()?.contains_key(username)?)
    }

    /// Persist a new account. Callers check [`exists`](Self::exists)
    /// first; creating over an existing username overwrites it.
    pub fn create(&self, user: &User) -> Result<(), StoreError> {
        self.put(user)
    }

    /// Overwrite the stored record after a membership change.
    pub fn update(&self, user: &User) -> Result<(), StoreError> {
        self.put(user)
    }

    fn put(&self, user: &User) -> Result<(), StoreError> {
        let raw = serde_json::to_vec(user)?;
        self.tree()?.insert(user.username.as_str(), raw)?;
        Ok(())
    }
}
