//! Local file-based storage

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::storage::KeyValueStore;

/// Storage backed by a directory on the filesystem
///
/// Directory structure:
/// ```text
/// .inkdex/
/// ├── tattoo_recent_searches.json
/// └── tattoo_saved_searches.json
/// ```
pub struct LocalStorage {
    /// Path to the storage directory
    pub path: PathBuf,
}

impl LocalStorage {
    const EXTENSION: &'static str = "json";

    /// Open a storage directory, creating it if needed
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if path.exists() && !path.is_dir() {
            return Err(StoreError::InvalidPath(format!(
                "{} is not a directory",
                path.display()
            )));
        }
        fs::create_dir_all(&path).await?;

        info!("Opened local storage at {:?}", path);
        Ok(Self { path })
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.path.join(format!("{}.{}", key, Self::EXTENSION)))
    }
}

#[async_trait]
impl KeyValueStore for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path).await?;
        debug!("Read '{}' ({} bytes)", key, value.len());
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        // Readers never see a partially written blob
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;

        debug!("Wrote '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(&path).await?;
            debug!("Removed '{}'", key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state");

        LocalStorage::open(&path).await.unwrap();
        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::open(dir.path()).await.unwrap();

        assert_eq!(storage.get("tattoo_recent_searches").await.unwrap(), None);

        storage.set("tattoo_recent_searches", "[]").await.unwrap();
        assert!(dir.path().join("tattoo_recent_searches.json").exists());
        assert_eq!(
            storage.get("tattoo_recent_searches").await.unwrap().as_deref(),
            Some("[]")
        );

        storage.remove("tattoo_recent_searches").await.unwrap();
        assert_eq!(storage.get("tattoo_recent_searches").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let storage = LocalStorage::open(dir.path()).await.unwrap();
            storage.set("k", "persisted").await.unwrap();
        }
        let storage = LocalStorage::open(dir.path()).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("persisted"));
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::open(dir.path()).await.unwrap();
        assert!(matches!(
            storage.set("../escape", "x").await,
            Err(StoreError::InvalidKey(_))
        ));
    }
}
