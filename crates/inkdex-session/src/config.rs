//! Session configuration

use std::time::Duration;

use inkdex_search::DEFAULT_SUGGESTION_LIMIT;
use inkdex_store::DEFAULT_MAX_RECENT;

/// Configuration for a search session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet period after the last `execute_search` call before the pipeline runs
    pub debounce: Duration,

    /// Maximum recent searches to keep
    pub max_recent: usize,

    /// Maximum suggestions returned per query
    pub max_suggestions: usize,

    /// Results per page
    pub page_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            max_recent: DEFAULT_MAX_RECENT,
            max_suggestions: DEFAULT_SUGGESTION_LIMIT,
            page_size: 20,
        }
    }
}

impl SessionConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}
