//! Result export as JSON or CSV

use chrono::{DateTime, Utc};
use inkdex_core::SearchHit;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{SearchFilters, SortBy};

/// Requested export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    /// Anything else: the snapshot itself, unserialized
    Raw,
}

impl ExportFormat {
    /// Parse a format name; unknown names select `Raw`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => ExportFormat::Json,
            "csv" => ExportFormat::Csv,
            _ => ExportFormat::Raw,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json | ExportFormat::Raw => "json",
        }
    }
}

/// Point-in-time copy of a session's results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub search_query: String,
    pub active_filters: SearchFilters,
    pub results: Vec<SearchHit>,
    pub total_results: usize,
    pub timestamp: DateTime<Utc>,
    pub sort_by: SortBy,
}

impl ExportSnapshot {
    pub fn new(
        search_query: impl Into<String>,
        active_filters: SearchFilters,
        results: Vec<SearchHit>,
        sort_by: SortBy,
    ) -> Self {
        let total_results = results.len();
        Self {
            search_query: search_query.into(),
            active_filters,
            results,
            total_results,
            timestamp: Utc::now(),
            sort_by,
        }
    }

    /// Download name, `tattoo-search-<epoch-ms>.<ext>`
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "tattoo-search-{}.{}",
            self.timestamp.timestamp_millis(),
            format.extension()
        )
    }
}

/// An exported result set
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    Json(String),
    Csv(String),
    Snapshot(ExportSnapshot),
}

impl Export {
    /// Text form of the export; `Snapshot` is rendered as pretty JSON
    pub fn into_text(self) -> Result<String> {
        match self {
            Export::Json(text) | Export::Csv(text) => Ok(text),
            Export::Snapshot(snapshot) => Ok(serde_json::to_string_pretty(&snapshot)?),
        }
    }
}

pub fn export_results(snapshot: ExportSnapshot, format: ExportFormat) -> Result<Export> {
    match format {
        ExportFormat::Json => Ok(Export::Json(serde_json::to_string_pretty(&snapshot)?)),
        ExportFormat::Csv => Ok(Export::Csv(results_to_csv(&snapshot.results))),
        ExportFormat::Raw => Ok(Export::Snapshot(snapshot)),
    }
}

const BASE_COLUMNS: [&str; 4] = ["Type", "Name", "Location", "Rating"];
const STYLES_COLUMN: &str = "Styles/Specialties";

/// Quoted CSV of the results; empty string for no results
///
/// The `Styles/Specialties` column is only emitted when at least one result
/// carries styles or specialties.
pub fn results_to_csv(results: &[SearchHit]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let with_styles = results
        .iter()
        .any(|hit| !hit.record.styles_or_specialties().is_empty());

    let mut header: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    if with_styles {
        header.push(STYLES_COLUMN.to_string());
    }

    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(csv_line(&header));

    for hit in results {
        let record = &hit.record;
        let mut row = vec![
            record.kind().to_string(),
            record.name().to_string(),
            record.location().unwrap_or_default().to_string(),
            record.rating_opt().map(|r| r.to_string()).unwrap_or_default(),
        ];
        if with_styles {
            row.push(record.styles_or_specialties().join(", "));
        }
        lines.push(csv_line(&row));
    }

    lines.join("\n")
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkdex_core::{Artist, Studio};

    fn snapshot(results: Vec<SearchHit>) -> ExportSnapshot {
        ExportSnapshot::new("test", SearchFilters::default(), results, SortBy::Relevance)
    }

    #[test]
    fn test_csv_empty_results() {
        assert_eq!(results_to_csv(&[]), "");
        let export = export_results(snapshot(Vec::new()), ExportFormat::Csv).unwrap();
        assert_eq!(export, Export::Csv(String::new()));
    }

    #[test]
    fn test_csv_minimal_artist() {
        let hit = SearchHit::new(
            Artist::new("1", "Test Artist").with_location("London").with_rating(4.5),
            0.0,
        );
        assert_eq!(
            results_to_csv(&[hit]),
            "\"Type\",\"Name\",\"Location\",\"Rating\"\n\"artist\",\"Test Artist\",\"London\",\"4.5\""
        );
    }

    #[test]
    fn test_csv_with_styles_and_quotes() {
        let hits = vec![
            SearchHit::new(Artist::new("1", "Jo \"Ink\" Lee").with_styles(&["realism", "portrait"]), 0.0),
            SearchHit::new(Studio::new("2", "Bare Studio"), 0.0),
        ];
        let csv = results_to_csv(&hits);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "\"Type\",\"Name\",\"Location\",\"Rating\",\"Styles/Specialties\"");
        assert_eq!(lines[1], "\"artist\",\"Jo \"\"Ink\"\" Lee\",\"\",\"\",\"realism, portrait\"");
        assert_eq!(lines[2], "\"studio\",\"Bare Studio\",\"\",\"\",\"\"");
    }

    #[test]
    fn test_json_export_shape() {
        let hit = SearchHit::new(Artist::new("1", "Test Artist"), 10.0);
        let export = export_results(snapshot(vec![hit]), ExportFormat::Json).unwrap();
        let Export::Json(text) = export else {
            panic!("expected json export");
        };
        assert!(text.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["searchQuery"], "test");
        assert_eq!(value["totalResults"], 1);
        assert_eq!(value["sortBy"], "relevance");
        assert_eq!(value["results"][0]["type"], "artist");
    }

    #[test]
    fn test_unknown_format_returns_snapshot() {
        assert_eq!(ExportFormat::parse("xml"), ExportFormat::Raw);
        let export = export_results(snapshot(Vec::new()), ExportFormat::parse("xml")).unwrap();
        assert!(matches!(export, Export::Snapshot(s) if s.total_results == 0));
    }

    #[test]
    fn test_file_name() {
        let snap = snapshot(Vec::new());
        let name = snap.file_name(ExportFormat::Json);
        assert_eq!(name, format!("tattoo-search-{}.json", snap.timestamp.timestamp_millis()));
    }
}
