//! Relevance scoring
//!
//! Scores only order results relative to each other. They are not
//! normalized and carry no meaning as a confidence value.

use inkdex_core::{Artist, SearchRecord, Studio, Style};

const NAME_MATCH: f64 = 10.0;
const EXACT_STYLE_NAME: f64 = 20.0;
const STUDIO_NAME_MATCH: f64 = 5.0;
const ARTIST_SPECIALTY_MATCH: f64 = 3.0;
const STUDIO_SPECIALTY_MATCH: f64 = 5.0;
const ALIAS_MATCH: f64 = 8.0;
const DESCRIPTION_MATCH: f64 = 3.0;

/// Score a record against the query text
///
/// An empty query scores every record 0.
pub fn relevance_score(record: &SearchRecord, query: &str) -> f64 {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return 0.0;
    }

    match record {
        SearchRecord::Artist(artist) => score_artist(artist, &needle),
        SearchRecord::Studio(studio) => score_studio(studio, &needle),
        SearchRecord::Style(style) => score_style(style, &needle),
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn any_contains(haystacks: &[String], needle: &str) -> bool {
    haystacks.iter().any(|h| contains(h, needle))
}

fn score_artist(artist: &Artist, needle: &str) -> f64 {
    let mut score = 0.0;
    if contains(&artist.name, needle) {
        score += NAME_MATCH;
    }
    if artist.studio_name.as_deref().is_some_and(|s| contains(s, needle)) {
        score += STUDIO_NAME_MATCH;
    }
    if any_contains(&artist.specialties, needle) {
        score += ARTIST_SPECIALTY_MATCH;
    }
    score + artist.rating.unwrap_or(0.0)
}

fn score_studio(studio: &Studio, needle: &str) -> f64 {
    let mut score = 0.0;
    if contains(&studio.name, needle) {
        score += NAME_MATCH;
    }
    if any_contains(&studio.specialties, needle) {
        score += STUDIO_SPECIALTY_MATCH;
    }
    score + studio.rating.unwrap_or(0.0)
}

fn score_style(style: &Style, needle: &str) -> f64 {
    let mut score = 0.0;
    let name = style.name.to_lowercase();
    if name == needle {
        score += EXACT_STYLE_NAME;
    } else if name.contains(needle) {
        score += NAME_MATCH;
    }
    if any_contains(&style.aliases, needle) {
        score += ALIAS_MATCH;
    }
    if contains(&style.description, needle) {
        score += DESCRIPTION_MATCH;
    }
    score + f64::from(style.popularity) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkdex_core::StyleIndex;

    #[test]
    fn test_empty_query_scores_zero() {
        let record = SearchRecord::from(Artist::new("a1", "Test Artist").with_rating(5.0));
        assert_eq!(relevance_score(&record, ""), 0.0);
        assert_eq!(relevance_score(&record, "  "), 0.0);
    }

    #[test]
    fn test_rating_breaks_name_ties() {
        let high = SearchRecord::from(Artist::new("a1", "Test Artist").with_rating(5.0));
        let low = SearchRecord::from(Artist::new("a2", "Test Artist").with_rating(2.0));

        let high_score = relevance_score(&high, "Test Artist");
        let low_score = relevance_score(&low, "Test Artist");
        assert_eq!(high_score, 15.0);
        assert_eq!(low_score, 12.0);
        assert!(high_score > low_score);
    }

    #[test]
    fn test_artist_components() {
        let mut artist = Artist::new("a1", "Koi Kate")
            .with_studio("Koi Pond Tattoo")
            .with_rating(4.0);
        artist.specialties = vec!["Koi fish".to_string()];
        let record = SearchRecord::from(artist);

        assert_eq!(relevance_score(&record, "koi"), 10.0 + 5.0 + 3.0 + 4.0);
        assert_eq!(relevance_score(&record, "pond"), 5.0 + 4.0);
        assert_eq!(relevance_score(&record, "zzz"), 4.0);
    }

    #[test]
    fn test_studio_components() {
        let record = SearchRecord::from(
            Studio::new("s1", "Dotwork Den")
                .with_specialties(&["Dotwork", "Geometric"])
                .with_rating(4.5),
        );
        assert_eq!(relevance_score(&record, "dotwork"), 10.0 + 5.0 + 4.5);
        assert_eq!(relevance_score(&record, "geometric"), 5.0 + 4.5);
    }

    #[test]
    fn test_style_exact_name_beats_partial() {
        let index = StyleIndex::builtin();
        let japanese = SearchRecord::from(index.get("japanese").unwrap().clone());

        // exact name, alias "Japanese Traditional", description has no "japanese"
        assert_eq!(relevance_score(&japanese, "JAPANESE"), 20.0 + 8.0 + 8.8);
        // partial name only
        assert_eq!(relevance_score(&japanese, "japan"), 10.0 + 8.0 + 8.8);
        // alias and description
        assert_eq!(relevance_score(&japanese, "irezumi"), 8.0 + 3.0 + 8.8);
    }
}
