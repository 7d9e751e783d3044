//! Session state

use inkdex_core::SearchHit;
use inkdex_search::{SearchFilters, SearchQuery, SortBy};
use inkdex_store::RecentSearchEntry;
use serde::{Deserialize, Serialize};

/// How results are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

impl Pagination {
    pub fn new(limit: usize) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.limit)
    }

    /// Index range of the current page within the full result list
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page.saturating_sub(1) * self.limit).min(self.total);
        let end = (start + self.limit).min(self.total);
        start..end
    }
}

/// Everything the UI renders for one search session
///
/// While `loading` is set, `results` still holds the previous completed
/// search. A failed search sets `error` and leaves `results` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub query: SearchQuery,
    pub active_filters: SearchFilters,
    pub results: Vec<SearchHit>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
    pub sort_by: SortBy,
    pub view_mode: ViewMode,
    pub recent_searches: Vec<RecentSearchEntry>,
}

impl SearchState {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: SearchQuery::default(),
            active_filters: SearchFilters::default(),
            results: Vec::new(),
            loading: false,
            error: None,
            pagination: Pagination::new(page_size),
            sort_by: SortBy::default(),
            view_mode: ViewMode::default(),
            recent_searches: Vec::new(),
        }
    }

    /// The slice of results on the current page
    pub fn current_page(&self) -> &[SearchHit] {
        let mut pagination = self.pagination;
        pagination.total = self.results.len();
        &self.results[pagination.range()]
    }
}

/// A partial update to the presentational parts of `SearchState`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<SortBy>,
    pub view_mode: Option<ViewMode>,
}

impl StatePatch {
    pub fn page(page: usize) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn sort_by(sort_by: SortBy) -> Self {
        Self {
            sort_by: Some(sort_by),
            ..Default::default()
        }
    }

    pub fn view_mode(view_mode: ViewMode) -> Self {
        Self {
            view_mode: Some(view_mode),
            ..Default::default()
        }
    }
}
