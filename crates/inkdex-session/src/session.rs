//! The search session controller
//!
//! State machine: idle -> searching -> (success | error) -> idle.
//!
//! `execute_search` is debounced. Every call bumps a generation counter,
//! cancels the previous call's pending task and schedules its own. Only a
//! task whose quiet period elapses uncancelled runs the pipeline. Finished
//! outcomes are published on a watch channel tagged with their generation,
//! and each caller waits for the first outcome at or after its own
//! generation. Superseded callers therefore resolve with the result of the
//! call that replaced them.

use std::sync::Arc;

use inkdex_core::{RecordId, SearchHit};
use inkdex_search::{
    export_results, search, sort_hits, suggestions, Export, ExportFormat, ExportSnapshot, FilterPatch,
    SearchFilters, SearchOptions, SearchQuery, Suggestion, MIN_SUGGESTION_QUERY_LEN,
};
use inkdex_store::{KeyValueStore, RecentSearchEntry, SavedSearch, SavedSearches, SearchHistory};
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{MapView, RecordSource, Result, SearchState, SessionConfig, SessionError, StatePatch};

/// A finished pipeline run
#[derive(Debug, Clone)]
struct Completed {
    generation: u64,
    result: std::result::Result<Arc<Vec<SearchHit>>, String>,
}

/// State guarded by one lock so generation checks and state updates are atomic
struct Shared {
    state: SearchState,
    generation: u64,
    pending: Option<CancellationToken>,
}

struct Inner {
    source: Arc<dyn RecordSource>,
    config: SessionConfig,
    shared: RwLock<Shared>,
    outcomes: watch::Sender<Option<Completed>>,
    history: Mutex<SearchHistory>,
    saved: Mutex<SavedSearches>,
}

/// One user's search session
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SearchSession {
    inner: Arc<Inner>,
}

impl SearchSession {
    /// Open a session, loading recent and saved searches from `storage`
    pub async fn open(
        source: Arc<dyn RecordSource>,
        storage: Arc<dyn KeyValueStore>,
        config: SessionConfig,
    ) -> Self {
        let history = SearchHistory::load(Arc::clone(&storage), config.max_recent).await;
        let saved = SavedSearches::load(storage).await;

        let mut state = SearchState::new(config.page_size);
        state.recent_searches = history.entries().to_vec();

        let (outcomes, _) = watch::channel(None);

        Self {
            inner: Arc::new(Inner {
                source,
                config,
                shared: RwLock::new(Shared {
                    state,
                    generation: 0,
                    pending: None,
                }),
                outcomes,
                history: Mutex::new(history),
                saved: Mutex::new(saved),
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> SearchState {
        self.inner.shared.read().await.state.clone()
    }

    /// Schedule a search and wait for the outcome of the debounce window it
    /// lands in
    ///
    /// On failure the previous results stay in place and the error message
    /// is recorded on the state.
    pub async fn execute_search(&self, text: impl Into<String>, options: SearchOptions) -> Result<Vec<SearchHit>> {
        let query = SearchQuery {
            text: text.into(),
            options,
        };
        let token = CancellationToken::new();

        // Subscribe before scheduling so the outcome cannot be missed
        let mut outcomes = self.inner.outcomes.subscribe();

        let generation = {
            let mut shared = self.inner.shared.write().await;
            shared.generation += 1;
            if let Some(previous) = shared.pending.replace(token.clone()) {
                previous.cancel();
                debug!("Search generation {} superseded", shared.generation - 1);
            }

            let state = &mut shared.state;
            state.loading = true;
            state.error = None;
            state.active_filters = query.options.filters.clone();
            state.sort_by = query.options.sort_by;
            state.query = query.clone();

            shared.generation
        };
        debug!("Scheduled search '{}' (generation {})", query.text, generation);

        let inner = Arc::clone(&self.inner);
        let debounce = self.inner.config.debounce;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(debounce) => inner.complete(generation, query).await,
            }
        });

        let outcome = outcomes
            .wait_for(|o| o.as_ref().is_some_and(|c| c.generation >= generation))
            .await
            .map_err(|_| SessionError::Closed)?
            .clone();

        match outcome {
            Some(Completed { result: Ok(hits), .. }) => Ok(hits.as_ref().clone()),
            Some(Completed { result: Err(message), .. }) => Err(SessionError::Pipeline(message)),
            None => Err(SessionError::Closed),
        }
    }

    /// Merge `patch` into the active filters and search again with the
    /// current text
    pub async fn apply_filters(&self, patch: FilterPatch) -> Result<Vec<SearchHit>> {
        let (text, options) = {
            let shared = self.inner.shared.read().await;
            let mut options = shared.state.query.options.clone();
            options.filters = shared.state.active_filters.clone();
            options.filters.merge(patch);
            (shared.state.query.text.clone(), options)
        };
        self.execute_search(text, options).await
    }

    /// Drop every filter and search again with the current text
    pub async fn clear_filters(&self) -> Result<Vec<SearchHit>> {
        let (text, options) = {
            let shared = self.inner.shared.read().await;
            let mut options = shared.state.query.options.clone();
            options.filters = SearchFilters::default();
            (shared.state.query.text.clone(), options)
        };
        self.execute_search(text, options).await
    }

    /// Update paging, ordering or layout without running a new search
    ///
    /// A new sort mode re-sorts the current results in place.
    pub async fn update_search_state(&self, patch: StatePatch) {
        let mut shared = self.inner.shared.write().await;
        let state = &mut shared.state;

        if let Some(limit) = patch.limit {
            state.pagination.limit = limit.max(1);
            state.pagination.page = 1;
        }
        if let Some(page) = patch.page {
            state.pagination.page = page.clamp(1, state.pagination.page_count().max(1));
        }
        if let Some(sort_by) = patch.sort_by {
            if sort_by != state.sort_by {
                sort_hits(&mut state.results, sort_by);
            }
            state.sort_by = sort_by;
            state.query.options.sort_by = sort_by;
        }
        if let Some(view_mode) = patch.view_mode {
            state.view_mode = view_mode;
        }
    }

    /// The current page of results
    pub async fn current_page(&self) -> Vec<SearchHit> {
        self.inner.shared.read().await.state.current_page().to_vec()
    }

    /// Remember a search in the recent list; blank queries are ignored
    pub async fn save_search(&self, query: &str, options: &SearchOptions) -> Option<RecentSearchEntry> {
        let (entry, entries) = {
            let mut history = self.inner.history.lock().await;
            let entry = history.record(query, options).await;
            (entry, history.entries().to_vec())
        };
        self.inner.shared.write().await.state.recent_searches = entries;
        entry
    }

    pub async fn recent_searches(&self) -> Vec<RecentSearchEntry> {
        self.inner.history.lock().await.entries().to_vec()
    }

    pub async fn clear_recent_searches(&self) {
        self.inner.history.lock().await.clear().await;
        self.inner.shared.write().await.state.recent_searches.clear();
    }

    /// Completions for a partial query, alphabetically ordered
    pub async fn get_search_suggestions(&self, query: &str) -> Vec<Suggestion> {
        if query.trim().chars().count() < MIN_SUGGESTION_QUERY_LEN {
            return Vec::new();
        }
        match self.inner.source.catalog().await {
            Ok(catalog) => suggestions(&catalog, query, self.inner.config.max_suggestions),
            Err(e) => {
                warn!("Could not load suggestions for '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    /// Export the current results
    pub async fn export_results(&self, format: ExportFormat) -> Result<Export> {
        Ok(export_results(self.snapshot().await, format)?)
    }

    /// Point-in-time copy of the current results
    pub async fn snapshot(&self) -> ExportSnapshot {
        let shared = self.inner.shared.read().await;
        let state = &shared.state;
        ExportSnapshot::new(
            state.query.text.clone(),
            state.active_filters.clone(),
            state.results.clone(),
            state.sort_by,
        )
    }

    /// Values for the map widget
    pub async fn map_view(&self) -> MapView {
        let shared = self.inner.shared.read().await;
        MapView::from_hits(&shared.state.results, shared.state.active_filters.radius)
    }

    /// Resolve a map marker click to its result
    pub async fn select_marker(&self, id: &RecordId) -> Result<SearchHit> {
        let shared = self.inner.shared.read().await;
        shared
            .state
            .results
            .iter()
            .find(|hit| hit.id() == id)
            .cloned()
            .ok_or_else(|| SessionError::RecordNotFound(id.clone()))
    }

    /// Save the current query under a name
    pub async fn save_named_search(&self, name: &str, description: Option<String>) -> SavedSearch {
        let query = self.inner.shared.read().await.state.query.clone();
        self.inner.saved.lock().await.save(name, description, query).await
    }

    pub async fn saved_searches(&self) -> Vec<SavedSearch> {
        self.inner.saved.lock().await.list().to_vec()
    }

    /// Run a saved search and update its usage counters
    pub async fn run_saved_search(&self, id: Uuid) -> Result<Vec<SearchHit>> {
        let query = {
            let saved = self.inner.saved.lock().await;
            saved
                .get(id)
                .map(|s| s.query.clone())
                .ok_or(inkdex_store::StoreError::SavedSearchNotFound(id))?
        };

        let hits = self.execute_search(query.text, query.options).await?;
        self.inner.saved.lock().await.mark_used(id, hits.len()).await?;
        Ok(hits)
    }

    pub async fn delete_saved_search(&self, id: Uuid) -> Result<SavedSearch> {
        Ok(self.inner.saved.lock().await.remove(id).await?)
    }
}

impl Inner {
    async fn run_pipeline(&self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        let catalog = self.source.catalog().await?;
        Ok(search(&catalog, query))
    }

    /// Run the pipeline for `generation` and publish its outcome
    ///
    /// The pipeline runs on its own task; a panic there becomes a failed
    /// search rather than an outcome that never arrives.
    async fn complete(self: Arc<Self>, generation: u64, query: SearchQuery) {
        let pipeline = {
            let inner = Arc::clone(&self);
            let query = query.clone();
            tokio::spawn(async move { inner.run_pipeline(&query).await })
        };
        let result = match pipeline.await {
            Ok(result) => result,
            Err(e) => Err(SessionError::Pipeline(join_failure(e))),
        };

        let recorded = {
            let mut shared = self.shared.write().await;
            let latest = shared.generation == generation;
            if latest {
                shared.pending = None;
                let state = &mut shared.state;
                state.loading = false;
                match &result {
                    Ok(hits) => {
                        state.results = hits.clone();
                        state.pagination.total = hits.len();
                        state.pagination.page = 1;
                        state.error = None;
                    }
                    Err(e) => state.error = Some(e.to_string()),
                }
            }
            latest
        };

        match &result {
            Ok(hits) => {
                info!("Search '{}' returned {} results", query.text, hits.len());
                if recorded {
                    let entries = {
                        let mut history = self.history.lock().await;
                        history.record(&query.text, &query.options).await;
                        history.entries().to_vec()
                    };
                    self.shared.write().await.state.recent_searches = entries;
                }
            }
            Err(e) => warn!("Search '{}' failed: {}", query.text, e),
        }

        self.outcomes.send_replace(Some(Completed {
            generation,
            result: result.map(Arc::new).map_err(|e| match e {
                SessionError::Pipeline(message) => message,
                other => other.to_string(),
            }),
        }));
    }
}

fn join_failure(err: JoinError) -> String {
    if !err.is_panic() {
        return "search task was cancelled".to_string();
    }
    let payload = err.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("search task panicked: {}", message)
}
