//! Sort strategies

use std::cmp::Ordering;

use inkdex_core::SearchHit;

use crate::SortBy;

/// Comparator for a sort mode, or `None` when the mode leaves order unchanged
pub fn comparator(sort_by: SortBy) -> Option<fn(&SearchHit, &SearchHit) -> Ordering> {
    match sort_by {
        SortBy::Relevance => Some(|a, b| b.relevance_score.total_cmp(&a.relevance_score)),
        SortBy::Rating => Some(|a, b| b.record.rating().total_cmp(&a.record.rating())),
        SortBy::Experience => Some(|a, b| b.record.years_active().total_cmp(&a.record.years_active())),
        SortBy::PriceLow => Some(|a, b| a.record.hourly_rate().total_cmp(&b.record.hourly_rate())),
        SortBy::PriceHigh => Some(|a, b| b.record.hourly_rate().total_cmp(&a.record.hourly_rate())),
        // No distance or availability ordering exists yet; both keep input order
        SortBy::Distance | SortBy::Availability => None,
    }
}

/// Stable in-place sort; re-sorting sorted output leaves it unchanged
pub fn sort_hits(hits: &mut [SearchHit], sort_by: SortBy) {
    if let Some(cmp) = comparator(sort_by) {
        hits.sort_by(cmp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkdex_core::{Artist, StyleIndex};

    fn hits() -> Vec<SearchHit> {
        vec![
            SearchHit::new(Artist::new("a", "A").with_rating(4.0).with_hourly_rate(120.0).with_years_active(3.0), 11.0),
            SearchHit::new(Artist::new("b", "B").with_rating(4.8).with_hourly_rate(90.0).with_years_active(12.0), 4.8),
            SearchHit::new(Artist::new("c", "C").with_rating(4.0).with_hourly_rate(210.0), 14.0),
            SearchHit::new(StyleIndex::builtin().get("floral").unwrap().clone(), 7.8),
        ]
    }

    fn ids(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.id().as_str()).collect()
    }

    #[test]
    fn test_relevance_descending() {
        let mut h = hits();
        sort_hits(&mut h, SortBy::Relevance);
        assert_eq!(ids(&h), vec!["c", "a", "floral", "b"]);
    }

    #[test]
    fn test_rating_is_stable_for_ties() {
        let mut h = hits();
        sort_hits(&mut h, SortBy::Rating);
        assert_eq!(ids(&h), vec!["b", "a", "c", "floral"]);
    }

    #[test]
    fn test_price_and_experience() {
        let mut h = hits();
        sort_hits(&mut h, SortBy::PriceLow);
        assert_eq!(ids(&h), vec!["floral", "b", "a", "c"]);

        sort_hits(&mut h, SortBy::PriceHigh);
        assert_eq!(ids(&h), vec!["c", "a", "b", "floral"]);

        sort_hits(&mut h, SortBy::Experience);
        assert_eq!(ids(&h), vec!["b", "a", "c", "floral"]);
    }

    #[test]
    fn test_noop_modes_keep_order() {
        for mode in [SortBy::Distance, SortBy::Availability] {
            let mut h = hits();
            sort_hits(&mut h, mode);
            assert_eq!(ids(&h), vec!["a", "b", "c", "floral"]);
        }
    }

    #[test]
    fn test_resort_is_fixed_point() {
        for mode in [SortBy::Relevance, SortBy::Rating, SortBy::Experience, SortBy::PriceLow, SortBy::PriceHigh] {
            let mut once = hits();
            sort_hits(&mut once, mode);
            let mut twice = once.clone();
            sort_hits(&mut twice, mode);
            assert_eq!(once, twice);
        }
    }
}
