//! Record types - the searchable entities of the directory

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Identifier of a record as issued by the upstream API
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Geographic position used by the map collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const LONDON: GeoPoint = GeoPoint { lat: 51.5074, lng: -0.1278 };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// How hard a style is to execute well
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(CoreError::InvalidValue {
                field: "difficulty",
                value: s.to_string(),
            }),
        }
    }
}

/// Booking availability of an artist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    BookingSoon,
    Waitlist,
    BooksClosed,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::BookingSoon => "booking_soon",
            Availability::Waitlist => "waitlist",
            Availability::BooksClosed => "books_closed",
        }
    }
}

impl FromStr for Availability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Availability::Available),
            "booking_soon" => Ok(Availability::BookingSoon),
            "waitlist" => Ok(Availability::Waitlist),
            "books_closed" => Ok(Availability::BooksClosed),
            _ => Err(CoreError::InvalidValue {
                field: "availability",
                value: s.to_string(),
            }),
        }
    }
}

/// A tattoo artist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artist {
    pub id: RecordId,

    pub name: String,

    pub bio: String,

    /// Name of the studio the artist works from
    pub studio_name: Option<String>,

    pub specialties: Vec<String>,

    /// Style ids (see `StyleIndex`)
    pub styles: Vec<String>,

    pub location: Option<String>,

    pub postcode: Option<String>,

    /// Average review rating, 0-5
    pub rating: Option<f64>,

    pub years_active: Option<f64>,

    /// Hourly rate in GBP
    pub hourly_rate: Option<f64>,

    pub availability: Option<Availability>,

    pub coordinates: Option<GeoPoint>,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_styles(mut self, styles: &[&str]) -> Self {
        self.styles = styles.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_studio(mut self, studio_name: impl Into<String>) -> Self {
        self.studio_name = Some(studio_name.into());
        self
    }

    pub fn with_years_active(mut self, years: f64) -> Self {
        self.years_active = Some(years);
        self
    }

    pub fn with_hourly_rate(mut self, rate: f64) -> Self {
        self.hourly_rate = Some(rate);
        self
    }
}

/// A tattoo studio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Studio {
    pub id: RecordId,

    pub name: String,

    pub description: String,

    /// Free-text specialties, cross-matched against the style catalogue
    pub specialties: Vec<String>,

    pub location: Option<String>,

    pub postcode: Option<String>,

    pub rating: Option<f64>,

    pub coordinates: Option<GeoPoint>,
}

impl Studio {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_specialties(mut self, specialties: &[&str]) -> Self {
        self.specialties = specialties.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A tattoo style
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    pub id: RecordId,

    pub name: String,

    pub description: String,

    /// Alternative names people search for
    pub aliases: Vec<String>,

    pub difficulty: Difficulty,

    /// Popularity, 0-100
    pub popularity: u32,

    pub characteristics: Vec<String>,
}

/// The type tag of a searchable record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Artist,
    Studio,
    Style,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Artist => "artist",
            RecordKind::Studio => "studio",
            RecordKind::Style => "style",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "artist" | "artists" => Ok(RecordKind::Artist),
            "studio" | "studios" => Ok(RecordKind::Studio),
            "style" | "styles" => Ok(RecordKind::Style),
            _ => Err(CoreError::InvalidValue {
                field: "type",
                value: s.to_string(),
            }),
        }
    }
}

/// Any record the search pipeline can return
///
/// The `type` tag is fixed by the variant, so a record can never change
/// kind after the search pass that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchRecord {
    Artist(Artist),
    Studio(Studio),
    Style(Style),
}

impl SearchRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            SearchRecord::Artist(_) => RecordKind::Artist,
            SearchRecord::Studio(_) => RecordKind::Studio,
            SearchRecord::Style(_) => RecordKind::Style,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            SearchRecord::Artist(a) => &a.id,
            SearchRecord::Studio(s) => &s.id,
            SearchRecord::Style(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SearchRecord::Artist(a) => &a.name,
            SearchRecord::Studio(s) => &s.name,
            SearchRecord::Style(s) => &s.name,
        }
    }

    /// Rating, with a missing rating read as 0
    pub fn rating(&self) -> f64 {
        match self {
            SearchRecord::Artist(a) => a.rating.unwrap_or(0.0),
            SearchRecord::Studio(s) => s.rating.unwrap_or(0.0),
            SearchRecord::Style(_) => 0.0,
        }
    }

    pub fn rating_opt(&self) -> Option<f64> {
        match self {
            SearchRecord::Artist(a) => a.rating,
            SearchRecord::Studio(s) => s.rating,
            SearchRecord::Style(_) => None,
        }
    }

    pub fn years_active(&self) -> f64 {
        match self {
            SearchRecord::Artist(a) => a.years_active.unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn hourly_rate(&self) -> f64 {
        match self {
            SearchRecord::Artist(a) => a.hourly_rate.unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            SearchRecord::Artist(a) => a.location.as_deref(),
            SearchRecord::Studio(s) => s.location.as_deref(),
            SearchRecord::Style(_) => None,
        }
    }

    /// Artist styles or studio specialties (empty for styles)
    pub fn styles_or_specialties(&self) -> &[String] {
        match self {
            SearchRecord::Artist(a) => &a.styles,
            SearchRecord::Studio(s) => &s.specialties,
            SearchRecord::Style(_) => &[],
        }
    }

    pub fn coordinates(&self) -> Option<GeoPoint> {
        match self {
            SearchRecord::Artist(a) => a.coordinates,
            SearchRecord::Studio(s) => s.coordinates,
            SearchRecord::Style(_) => None,
        }
    }
}

impl From<Artist> for SearchRecord {
    fn from(artist: Artist) -> Self {
        SearchRecord::Artist(artist)
    }
}

impl From<Studio> for SearchRecord {
    fn from(studio: Studio) -> Self {
        SearchRecord::Studio(studio)
    }
}

impl From<Style> for SearchRecord {
    fn from(style: Style) -> Self {
        SearchRecord::Style(style)
    }
}

/// A record as produced by a search pass, carrying its relevance score
///
/// The score only orders results; it is never persisted with the source
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub record: SearchRecord,

    pub relevance_score: f64,
}

impl SearchHit {
    pub fn new(record: impl Into<SearchRecord>, relevance_score: f64) -> Self {
        Self {
            record: record.into(),
            relevance_score,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.record.kind()
    }

    pub fn id(&self) -> &RecordId {
        self.record.id()
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_type_tag() {
        let record = SearchRecord::from(Artist::new("a1", "Test Artist").with_rating(4.5));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "artist");
        assert_eq!(json["name"], "Test Artist");
        assert_eq!(json["rating"], 4.5);
    }

    #[test]
    fn test_hit_flattens_record() {
        let hit = SearchHit::new(Studio::new("s1", "Black Lotus"), 12.0);
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["type"], "studio");
        assert_eq!(json["relevanceScore"], 12.0);

        let back: SearchHit = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), RecordKind::Studio);
        assert_eq!(back.name(), "Black Lotus");
    }

    #[test]
    fn test_upstream_payload_with_missing_fields() {
        let json = r#"{"type":"artist","id":"42","name":"Sam","yearsActive":7}"#;
        let record: SearchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.years_active(), 7.0);
        assert_eq!(record.rating(), 0.0);
        assert!(record.location().is_none());
    }

    #[test]
    fn test_fractional_years_active() {
        let json = r#"{"type":"artist","id":"43","name":"Ana","yearsActive":7.5}"#;
        let record: SearchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.years_active(), 7.5);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert_eq!("studios".parse::<RecordKind>().unwrap(), RecordKind::Studio);
        assert_eq!("waitlist".parse::<Availability>().unwrap(), Availability::Waitlist);
        assert!("expert".parse::<Difficulty>().is_err());
    }
}
