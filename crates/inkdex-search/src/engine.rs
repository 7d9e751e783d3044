//! The composed search pipeline: filter, tag, score, sort

use inkdex_core::{Catalog, RecordKind, SearchHit, SearchRecord, StyleIndex};
use tracing::debug;

use crate::{matches_filters, matches_text, relevance_score, sort_hits, SearchQuery};

/// Runs queries against a catalog
///
/// Source records are never mutated; each result is a tagged copy carrying
/// its relevance score.
pub struct SearchEngine<'a> {
    catalog: &'a Catalog,
    styles: StyleIndex,
}

impl<'a> SearchEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            styles: catalog.style_index(),
        }
    }

    pub fn style_index(&self) -> &StyleIndex {
        &self.styles
    }

    /// Filter each record type independently, score the survivors,
    /// concatenate artists, studios and styles, then sort
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchHit> {
        let options = &query.options;
        let mut hits = Vec::new();

        if options.includes(RecordKind::Artist) {
            let records = self.catalog.artists.iter().cloned().map(SearchRecord::Artist);
            self.collect(records, query, &mut hits);
        }
        if options.includes(RecordKind::Studio) {
            let records = self.catalog.studios.iter().cloned().map(SearchRecord::Studio);
            self.collect(records, query, &mut hits);
        }
        if options.includes(RecordKind::Style) {
            let records = self.catalog.styles.iter().cloned().map(SearchRecord::Style);
            self.collect(records, query, &mut hits);
        }

        sort_hits(&mut hits, options.sort_by);

        debug!(
            "Search '{}' matched {} of {} records (sort: {})",
            query.text,
            hits.len(),
            self.catalog.len(),
            options.sort_by
        );
        hits
    }

    fn collect(
        &self,
        records: impl Iterator<Item = SearchRecord>,
        query: &SearchQuery,
        out: &mut Vec<SearchHit>,
    ) {
        out.extend(
            records
                .filter(|r| matches_text(r, &query.text))
                .filter(|r| matches_filters(r, &query.options.filters, &self.styles))
                .map(|record| {
                    let score = relevance_score(&record, &query.text);
                    SearchHit::new(record, score)
                }),
        );
    }
}

/// One-shot search over a catalog
pub fn search(catalog: &Catalog, query: &SearchQuery) -> Vec<SearchHit> {
    SearchEngine::new(catalog).search(query)
}
