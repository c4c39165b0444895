use serde::{Deserialize, Serialize};
use sled::Db;

use crate::utils::error::StoreError;

const TREE: &str = "topics";

/// A named broadcast channel. Membership lives on the [`User`] record,
/// so a topic is nothing but its unique name.
///
/// [`User`]: crate::services::User
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
}

/// Store of existing topics, keyed by name.
#[derive(Debug, Clone)]
pub struct TopicsService {
    db: Db,
}

impl TopicsService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    fn tree(&self) -> Result<sled::Tree, StoreError> {
        Ok(self.db.open_tree(TREE)?)
    }

    pub fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.tree()?.contains_key(name)?)
    }

    pub fn create(&self, name: &str) -> Result<(), StoreError> {
        let topic = Topic {
            name: name.to_string(),
        };
        let raw = serde_json::to_vec(&topic)?;
        self.tree()?.insert(name, raw)?;
        Ok(())
    }

    /// All topic names, sorted for stable listings.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in self.tree()?.iter() {
            let (_, raw) = entry?;
            let topic: Topic = serde_json::from_slice(&raw)?;
            names.push(topic.name);
        }
        names.sort();
        Ok(names)
    }
}
