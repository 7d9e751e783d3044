//! Search query types

use std::fmt;
use std::str::FromStr;

use inkdex_core::{Availability, Difficulty, RecordKind};
use serde::{Deserialize, Serialize};

use crate::SearchError;

/// Experience bracket derived from `yearsActive`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Up to 2 years
    Apprentice,
    /// More than 2, up to 5 years
    Junior,
    /// More than 5, up to 10 years
    Experienced,
    /// More than 10 years
    Master,
}

impl ExperienceLevel {
    pub fn for_years(years: f64) -> Self {
        if years <= 2.0 {
            ExperienceLevel::Apprentice
        } else if years <= 5.0 {
            ExperienceLevel::Junior
        } else if years <= 10.0 {
            ExperienceLevel::Experienced
        } else {
            ExperienceLevel::Master
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Apprentice => "apprentice",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Experienced => "experienced",
            ExperienceLevel::Master => "master",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apprentice" => Ok(ExperienceLevel::Apprentice),
            "junior" => Ok(ExperienceLevel::Junior),
            "experienced" => Ok(ExperienceLevel::Experienced),
            "master" => Ok(ExperienceLevel::Master),
            _ => Err(SearchError::InvalidFilter {
                facet: "experience",
                value: s.to_string(),
            }),
        }
    }
}

/// Price bracket derived from `hourlyRate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    /// 50 to 100 inclusive
    Budget,
    /// Above 100, up to 150
    Mid,
    /// Above 150, up to 200
    Premium,
    /// Above 200
    Luxury,
}

impl PriceRange {
    /// The bracket a rate falls in; rates below 50 have none
    pub fn for_rate(rate: f64) -> Option<Self> {
        if (50.0..=100.0).contains(&rate) {
            Some(PriceRange::Budget)
        } else if rate > 100.0 && rate <= 150.0 {
            Some(PriceRange::Mid)
        } else if rate > 150.0 && rate <= 200.0 {
            Some(PriceRange::Premium)
        } else if rate > 200.0 {
            Some(PriceRange::Luxury)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Budget => "budget",
            PriceRange::Mid => "mid",
            PriceRange::Premium => "premium",
            PriceRange::Luxury => "luxury",
        }
    }
}

impl FromStr for PriceRange {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(PriceRange::Budget),
            "mid" => Ok(PriceRange::Mid),
            "premium" => Ok(PriceRange::Premium),
            "luxury" => Ok(PriceRange::Luxury),
            _ => Err(SearchError::InvalidFilter {
                facet: "price",
                value: s.to_string(),
            }),
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Relevance,
    Rating,
    Experience,
    PriceLow,
    PriceHigh,
    /// Accepted but leaves the order unchanged
    Distance,
    /// Accepted but leaves the order unchanged
    Availability,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Rating => "rating",
            SortBy::Experience => "experience",
            SortBy::PriceLow => "price_low",
            SortBy::PriceHigh => "price_high",
            SortBy::Distance => "distance",
            SortBy::Availability => "availability",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relevance" => Ok(SortBy::Relevance),
            "rating" => Ok(SortBy::Rating),
            "experience" => Ok(SortBy::Experience),
            "price_low" => Ok(SortBy::PriceLow),
            "price_high" => Ok(SortBy::PriceHigh),
            "distance" => Ok(SortBy::Distance),
            "availability" => Ok(SortBy::Availability),
            other => Err(SearchError::InvalidSort(other.to_string())),
        }
    }
}

/// Active facet values
///
/// Empty lists, `None` and a rating of 0 all mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Style ids
    pub styles: Vec<String>,

    /// Free text matched against location or postcode
    pub location: Option<String>,

    /// Search radius in km, passed through to the map view
    pub radius: Option<f64>,

    pub difficulty: Vec<Difficulty>,

    pub experience: Vec<ExperienceLevel>,

    pub price_range: Vec<PriceRange>,

    pub availability: Vec<Availability>,

    /// Minimum rating
    pub rating: f64,
}

impl SearchFilters {
    /// Number of facets currently constraining results
    pub fn active_count(&self) -> usize {
        [
            !self.styles.is_empty(),
            self.location.as_deref().is_some_and(|l| !l.trim().is_empty()),
            !self.difficulty.is_empty(),
            !self.experience.is_empty(),
            !self.price_range.is_empty(),
            !self.availability.is_empty(),
            self.rating > 0.0,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Shallow merge: every field present in the patch replaces the current value
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(styles) = patch.styles {
            self.styles = styles;
        }
        if let Some(location) = patch.location {
            self.location = if location.trim().is_empty() { None } else { Some(location) };
        }
        if let Some(radius) = patch.radius {
            self.radius = Some(radius);
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(experience) = patch.experience {
            self.experience = experience;
        }
        if let Some(price_range) = patch.price_range {
            self.price_range = price_range;
        }
        if let Some(availability) = patch.availability {
            self.availability = availability;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
    }
}

/// A partial update to `SearchFilters`
///
/// An empty location string clears the location facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterPatch {
    pub styles: Option<Vec<String>>,
    pub location: Option<String>,
    pub radius: Option<f64>,
    pub difficulty: Option<Vec<Difficulty>>,
    pub experience: Option<Vec<ExperienceLevel>>,
    pub price_range: Option<Vec<PriceRange>>,
    pub availability: Option<Vec<Availability>>,
    pub rating: Option<f64>,
}

impl FilterPatch {
    pub fn styles(styles: &[&str]) -> Self {
        Self {
            styles: Some(styles.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Default::default()
        }
    }

    pub fn min_rating(rating: f64) -> Self {
        Self {
            rating: Some(rating),
            ..Default::default()
        }
    }
}

/// Everything about a search except its text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    #[serde(flatten)]
    pub filters: SearchFilters,

    pub sort_by: SortBy,

    /// Record types to search; empty searches all of them
    pub kinds: Vec<RecordKind>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_kinds(mut self, kinds: Vec<RecordKind>) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn includes(&self, kind: RecordKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }
}

/// A complete search request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    pub text: String,

    #[serde(flatten)]
    pub options: SearchOptions,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.options.filters
    }

    pub fn sort_by(&self) -> SortBy {
        self.options.sort_by
    }
}
