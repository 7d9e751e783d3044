//! Catalog - the record arrays a search runs against

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::{Artist, RecordId, SearchRecord, Studio, Style, StyleIndex};

/// Already-deserialized directory data
///
/// Records are read-only for the lifetime of a session; searches produce
/// derived copies rather than mutating these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub artists: Vec<Artist>,
    pub studios: Vec<Studio>,
    pub styles: Vec<Style>,
}

impl Catalog {
    pub fn new(artists: Vec<Artist>, studios: Vec<Studio>, styles: Vec<Style>) -> Self {
        Self {
            artists,
            studios,
            styles,
        }
    }

    /// Parse a catalog from a JSON document `{ artists, studios, styles }`
    ///
    /// A document without `styles` falls back to the built-in catalogue.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut catalog: Catalog = serde_json::from_str(json)?;
        if catalog.styles.is_empty() {
            catalog.styles = StyleIndex::builtin().iter().cloned().collect();
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded catalog from {:?}: {} artists, {} studios, {} styles",
            path,
            catalog.artists.len(),
            catalog.studios.len(),
            catalog.styles.len()
        );
        Ok(catalog)
    }

    /// Index over this catalog's styles, or the built-in catalogue when it has none
    pub fn style_index(&self) -> StyleIndex {
        if self.styles.is_empty() {
            StyleIndex::builtin()
        } else {
            StyleIndex::new(self.styles.clone())
        }
    }

    pub fn len(&self) -> usize {
        self.artists.len() + self.studios.len() + self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find any record by id
    pub fn find(&self, id: &RecordId) -> Option<SearchRecord> {
        self.artists
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .map(SearchRecord::Artist)
            .or_else(|| self.studios.iter().find(|s| &s.id == id).cloned().map(SearchRecord::Studio))
            .or_else(|| self.styles.iter().find(|s| &s.id == id).cloned().map(SearchRecord::Style))
    }
}
