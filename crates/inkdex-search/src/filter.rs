//! Facet predicates
//!
//! Every predicate is total: a record missing the field a facet needs
//! simply fails that facet. An inactive facet (empty set, no location,
//! rating 0) accepts everything.

use inkdex_core::{Availability, Difficulty, SearchRecord, StyleIndex};

use crate::{ExperienceLevel, PriceRange, SearchFilters};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Free-text match over the searchable fields of a record
pub fn matches_text(record: &SearchRecord, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let any = |values: &[String]| values.iter().any(|v| contains_ci(v, &needle));

    match record {
        SearchRecord::Artist(a) => {
            contains_ci(&a.name, &needle)
                || contains_ci(&a.bio, &needle)
                || a.studio_name.as_deref().is_some_and(|s| contains_ci(s, &needle))
                || a.location.as_deref().is_some_and(|l| contains_ci(l, &needle))
                || any(&a.specialties)
                || any(&a.styles)
        }
        SearchRecord::Studio(s) => {
            contains_ci(&s.name, &needle)
                || contains_ci(&s.description, &needle)
                || s.location.as_deref().is_some_and(|l| contains_ci(l, &needle))
                || any(&s.specialties)
        }
        SearchRecord::Style(s) => {
            contains_ci(&s.name, &needle)
                || contains_ci(s.id.as_str(), &needle)
                || contains_ci(&s.description, &needle)
                || any(&s.aliases)
                || any(&s.characteristics)
        }
    }
}

/// Style facet: the record's styles intersect the selected style ids
///
/// Studio specialties are free text and are resolved through the style
/// catalogue first.
pub fn matches_styles(record: &SearchRecord, styles: &[String], index: &StyleIndex) -> bool {
    if styles.is_empty() {
        return true;
    }
    let selected = |id: &str| styles.iter().any(|s| s.eq_ignore_ascii_case(id));

    match record {
        SearchRecord::Artist(a) => a.styles.iter().any(|s| selected(s)),
        SearchRecord::Studio(s) => s.specialties.iter().any(|specialty| {
            selected(specialty)
                || index
                    .resolve_specialty(specialty)
                    .iter()
                    .any(|style| selected(style.id.as_str()))
        }),
        SearchRecord::Style(s) => selected(s.id.as_str()),
    }
}

/// Location facet: substring of location or postcode
pub fn matches_location(record: &SearchRecord, location: Option<&str>) -> bool {
    let needle = match location.map(|l| l.trim().to_lowercase()) {
        Some(needle) if !needle.is_empty() => needle,
        _ => return true,
    };

    let (location, postcode) = match record {
        SearchRecord::Artist(a) => (a.location.as_deref(), a.postcode.as_deref()),
        SearchRecord::Studio(s) => (s.location.as_deref(), s.postcode.as_deref()),
        SearchRecord::Style(_) => (None, None),
    };

    location.is_some_and(|l| contains_ci(l, &needle))
        || postcode.is_some_and(|p| contains_ci(p, &needle))
}

/// Rating facet: at least `min_rating`; 0 disables the facet
pub fn matches_rating(record: &SearchRecord, min_rating: f64) -> bool {
    if min_rating <= 0.0 {
        return true;
    }
    record.rating() >= min_rating
}

pub fn matches_experience(record: &SearchRecord, levels: &[ExperienceLevel]) -> bool {
    if levels.is_empty() {
        return true;
    }
    match record {
        SearchRecord::Artist(a) => a
            .years_active
            .is_some_and(|years| levels.contains(&ExperienceLevel::for_years(years))),
        _ => false,
    }
}

pub fn matches_price(record: &SearchRecord, ranges: &[PriceRange]) -> bool {
    if ranges.is_empty() {
        return true;
    }
    match record {
        SearchRecord::Artist(a) => a
            .hourly_rate
            .and_then(PriceRange::for_rate)
            .is_some_and(|range| ranges.contains(&range)),
        _ => false,
    }
}

pub fn matches_availability(record: &SearchRecord, wanted: &[Availability]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    match record {
        SearchRecord::Artist(a) => a.availability.is_some_and(|av| wanted.contains(&av)),
        _ => false,
    }
}

/// Difficulty facet; only constrains styles
pub fn matches_difficulty(record: &SearchRecord, wanted: &[Difficulty]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    match record {
        SearchRecord::Style(s) => wanted.contains(&s.difficulty),
        _ => true,
    }
}

/// All active facets, ANDed
pub fn matches_filters(record: &SearchRecord, filters: &SearchFilters, index: &StyleIndex) -> bool {
    matches_styles(record, &filters.styles, index)
        && matches_location(record, filters.location.as_deref())
        && matches_rating(record, filters.rating)
        && matches_experience(record, &filters.experience)
        && matches_price(record, &filters.price_range)
        && matches_availability(record, &filters.availability)
        && matches_difficulty(record, &filters.difficulty)
}
