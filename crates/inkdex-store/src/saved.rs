//! User-named saved searches

use std::sync::Arc;

use chrono::{DateTime, Utc};
use inkdex_search::SearchQuery;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::storage::{load_list, store_list, KeyValueStore};

/// Storage key holding the saved search list
pub const SAVED_SEARCHES_KEY: &str = "tattoo_saved_searches";

/// A query configuration the user chose to keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub query: SearchQuery,

    /// How many times the search has been re-run
    pub use_count: u32,

    /// Result count of the most recent run
    pub last_result_count: Option<usize>,

    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl SavedSearch {
    pub fn new(name: impl Into<String>, description: Option<String>, query: SearchQuery) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            query,
            use_count: 0,
            last_result_count: None,
            created_at: Utc::now(),
            last_used_at: None,
        }
    }
}

/// The saved search list, newest first
pub struct SavedSearches {
    storage: Arc<dyn KeyValueStore>,
    searches: Vec<SavedSearch>,
}

impl SavedSearches {
    /// Load stored searches; unreadable data yields an empty list
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let searches = load_list(storage.as_ref(), SAVED_SEARCHES_KEY).await;
        Self { storage, searches }
    }

    pub fn list(&self) -> &[SavedSearch] {
        &self.searches
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedSearch> {
        self.searches.iter().find(|s| s.id == id)
    }

    /// Save a query under a name
    ///
    /// Saving again under an existing name replaces that entry but keeps its
    /// id and counters.
    pub async fn save(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        query: SearchQuery,
    ) -> SavedSearch {
        let name = name.into();

        let saved = match self.searches.iter().position(|s| s.name == name) {
            Some(pos) => {
                let mut existing = self.searches.remove(pos);
                existing.description = description;
                existing.query = query;
                existing
            }
            None => SavedSearch::new(name, description, query),
        };

        self.searches.insert(0, saved.clone());
        self.persist().await;
        info!("Saved search '{}' ({})", saved.name, saved.id);
        saved
    }

    pub async fn remove(&mut self, id: Uuid) -> Result<SavedSearch> {
        let pos = self
            .searches
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::SavedSearchNotFound(id))?;
        let removed = self.searches.remove(pos);
        self.persist().await;
        info!("Deleted saved search '{}'", removed.name);
        Ok(removed)
    }

    /// Record a run of a saved search
    pub async fn mark_used(&mut self, id: Uuid, result_count: usize) -> Result<SavedSearch> {
        let search = self
            .searches
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::SavedSearchNotFound(id))?;
        search.use_count += 1;
        search.last_result_count = Some(result_count);
        search.last_used_at = Some(Utc::now());
        let updated = search.clone();

        self.persist().await;
        Ok(updated)
    }

    async fn persist(&self) {
        if let Err(e) = store_list(self.storage.as_ref(), SAVED_SEARCHES_KEY, &self.searches).await {
            warn!("Could not persist saved searches: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[tokio::test]
    async fn test_save_and_reload() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let mut saved = SavedSearches::load(Arc::clone(&storage)).await;
        let entry = saved
            .save("London realism", Some("for my sleeve".to_string()), SearchQuery::new("realism"))
            .await;

        let reloaded = SavedSearches::load(storage).await;
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(reloaded.get(entry.id).unwrap().query.text, "realism");
    }

    #[tokio::test]
    async fn test_same_name_replaces() {
        let mut saved = SavedSearches::load(Arc::new(MemoryStorage::new())).await;
        let first = saved.save("koi", None, SearchQuery::new("koi")).await;
        saved.save("rose", None, SearchQuery::new("rose")).await;
        let second = saved.save("koi", None, SearchQuery::new("koi carp")).await;

        assert_eq!(first.id, second.id);
        assert_eq!(saved.list().len(), 2);
        assert_eq!(saved.list()[0].query.text, "koi carp");
    }

    #[tokio::test]
    async fn test_mark_used_bumps_counters() {
        let mut saved = SavedSearches::load(Arc::new(MemoryStorage::new())).await;
        let entry = saved.save("koi", None, SearchQuery::new("koi")).await;

        saved.mark_used(entry.id, 3).await.unwrap();
        let updated = saved.mark_used(entry.id, 5).await.unwrap();
        assert_eq!(updated.use_count, 2);
        assert_eq!(updated.last_result_count, Some(5));
        assert!(updated.last_used_at.is_some());
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let mut saved = SavedSearches::load(Arc::new(MemoryStorage::new())).await;
        let id = Uuid::new_v4();
        assert!(matches!(saved.remove(id).await, Err(StoreError::SavedSearchNotFound(_))));
        assert!(matches!(saved.mark_used(id, 1).await, Err(StoreError::SavedSearchNotFound(_))));
    }

    #[tokio::test]
    async fn test_corrupt_blob_loads_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(SAVED_SEARCHES_KEY, "42").await.unwrap();
        let saved = SavedSearches::load(storage).await;
        assert!(saved.list().is_empty());
    }
}
