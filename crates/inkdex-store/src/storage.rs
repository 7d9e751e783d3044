//! Key/value storage abstraction

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::{Result, StoreError};

/// Durable string storage keyed by name, in the manner of browser local storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key has never been written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-process storage
///
/// Can be capped with a byte quota or switched off entirely, which is how
/// quota-exceeded and storage-disabled conditions are reproduced.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once the stored values exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Storage that fails every operation
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    fn check_enabled(&self) -> Result<()> {
        if self.disabled {
            Err(StoreError::Disabled)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_enabled()?;
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_enabled()?;
        let mut values = self.values.lock().await;

        if let Some(quota) = self.quota {
            let used: usize = values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let available = quota.saturating_sub(used);
            if value.len() > available {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed: value.len(),
                    available,
                });
            }
        }

        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.check_enabled()?;
        self.values.lock().await.remove(key);
        Ok(())
    }
}

/// Load a JSON list stored under `key`
///
/// Missing keys, read failures and corrupt JSON all yield an empty list.
pub async fn load_list<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Could not read '{}' from storage: {}", key, e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Discarding corrupt '{}' in storage: {}", key, e);
            Vec::new()
        }
    }
}

/// Store a list as JSON under `key`
pub async fn store_list<T: Serialize + Sync>(storage: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    storage.set(key, &json).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").await.unwrap(), None);

        storage.set("k", "v").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));

        storage.remove("k").await.unwrap();
        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quota_counts_other_keys() {
        let storage = MemoryStorage::with_quota(10);
        storage.set("a", "123456").await.unwrap();
        // replacing a key does not count its old value
        storage.set("a", "1234567").await.unwrap();

        let err = storage.set("b", "1234").await.unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { available: 3, .. }));
    }

    #[tokio::test]
    async fn test_disabled_storage() {
        let storage = MemoryStorage::disabled();
        assert!(matches!(storage.get("k").await, Err(StoreError::Disabled)));
        assert!(matches!(storage.set("k", "v").await, Err(StoreError::Disabled)));
    }

    #[tokio::test]
    async fn test_load_list_degrades() {
        let storage = MemoryStorage::new();
        let empty: Vec<String> = load_list(&storage, "missing").await;
        assert!(empty.is_empty());

        storage.set("bad", "{not json").await.unwrap();
        let corrupt: Vec<String> = load_list(&storage, "bad").await;
        assert!(corrupt.is_empty());

        let disabled: Vec<String> = load_list(&MemoryStorage::disabled(), "k").await;
        assert!(disabled.is_empty());

        store_list(&storage, "ok", &["x".to_string()]).await.unwrap();
        let ok: Vec<String> = load_list(&storage, "ok").await;
        assert_eq!(ok, vec!["x"]);
    }
}
