use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::Result;
use crate::storage::KeyValueStore;

/// In-memory key-value store. Nothing survives the process; useful for
/// tests and for embedding the store without a data directory.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }

    /// Pre-populate a key, e.g. to simulate an existing install.
    pub async fn preload(&self, key: &str, value: &str) {
        self.entries.write().await.insert(key.to_string(), value.to_string());
    }

    /// Raw stored text for a key, bypassing the store facade.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}
