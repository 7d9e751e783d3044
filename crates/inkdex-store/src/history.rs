//! Recent search history

use std::sync::Arc;

use chrono::{DateTime, Utc};
use inkdex_search::SearchOptions;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::storage::{load_list, store_list, KeyValueStore};

/// Storage key holding the recent search list
pub const RECENT_SEARCHES_KEY: &str = "tattoo_recent_searches";

pub const DEFAULT_MAX_RECENT: usize = 10;

/// One remembered search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearchEntry {
    pub id: Uuid,
    pub query: String,
    pub options: SearchOptions,
    pub timestamp: DateTime<Utc>,
}

impl RecentSearchEntry {
    pub fn new(query: impl Into<String>, options: SearchOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            options,
            timestamp: Utc::now(),
        }
    }
}

/// Prepend `entry`, dropping any older entry with the same query text and
/// keeping at most `max_entries`
pub fn push_recent(entries: &mut Vec<RecentSearchEntry>, entry: RecentSearchEntry, max_entries: usize) {
    entries.retain(|e| e.query != entry.query);
    entries.insert(0, entry);
    entries.truncate(max_entries);
}

/// Most-recent-first, deduplicated, capped list of past searches
///
/// This is the only search state that outlives a session. Storage failures
/// are logged and otherwise ignored: the in-memory list stays usable.
pub struct SearchHistory {
    storage: Arc<dyn KeyValueStore>,
    max_entries: usize,
    entries: Vec<RecentSearchEntry>,
}

impl SearchHistory {
    /// Load the stored history; unreadable data yields an empty history
    pub async fn load(storage: Arc<dyn KeyValueStore>, max_entries: usize) -> Self {
        let mut entries: Vec<RecentSearchEntry> = load_list(storage.as_ref(), RECENT_SEARCHES_KEY).await;
        entries.truncate(max_entries);
        debug!("Loaded {} recent searches", entries.len());

        Self {
            storage,
            max_entries,
            entries,
        }
    }

    pub fn entries(&self) -> &[RecentSearchEntry] {
        &self.entries
    }

    /// Remember a search; blank queries are ignored
    pub async fn record(&mut self, query: &str, options: &SearchOptions) -> Option<RecentSearchEntry> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let entry = RecentSearchEntry::new(query, options.clone());
        push_recent(&mut self.entries, entry.clone(), self.max_entries);
        self.persist().await;
        Some(entry)
    }

    pub async fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.persist().await;
        }
        removed
    }

    pub async fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.storage.remove(RECENT_SEARCHES_KEY).await {
            warn!("Could not clear recent searches: {}", e);
        }
    }

    async fn persist(&self) {
        if let Err(e) = store_list(self.storage.as_ref(), RECENT_SEARCHES_KEY, &self.entries).await {
            warn!("Could not persist recent searches: {}", e);
        }
    }
}
