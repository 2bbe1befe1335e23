//! In-memory slot store.

use crate::{KeyValueStore, Result, validate_key};
use async_trait::async_trait;
use std::collections::HashMap;

/// Ephemeral [`KeyValueStore`] backed by a `HashMap`.
///
/// Contents are lost when the store is dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.slots.get(key).cloned())
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.slots.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.slots.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("issues").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let mut store = MemoryStore::new();
        store.set_item("issues", "[]").await.unwrap();
        assert_eq!(store.get_item("issues").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let mut store = MemoryStore::new();
        store.set_item("issues", "[]").await.unwrap();
        store.set_item("issues", "[1]").await.unwrap();
        assert_eq!(store.get_item("issues").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_remove_then_get() {
        let mut store = MemoryStore::new();
        store.set_item("issues", "[]").await.unwrap();
        store.remove_item("issues").await.unwrap();
        assert_eq!(store.get_item("issues").await.unwrap(), None);

        // Removing again is a no-op
        store.remove_item("issues").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_sorted() {
        let mut store = MemoryStore::new();
        store.set_item("zeta", "1").await.unwrap();
        store.set_item("alpha", "2").await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let mut store = MemoryStore::new();
        assert!(store.set_item("../escape", "x").await.is_err());
        assert!(store.get_item("").await.is_err());
    }
}
