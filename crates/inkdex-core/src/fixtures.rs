//! Mock directory data used when no upstream dataset is configured

use crate::{Artist, Availability, Catalog, GeoPoint, RecordId, Studio, StyleIndex};

#[allow(clippy::too_many_arguments)]
fn artist(
    id: &str,
    name: &str,
    studio: &str,
    styles: &[&str],
    specialties: &[&str],
    location: &str,
    postcode: &str,
    rating: f64,
    years_active: f64,
    hourly_rate: f64,
    availability: Availability,
    coordinates: (f64, f64),
) -> Artist {
    Artist {
        id: RecordId::new(id),
        name: name.to_string(),
        bio: format!("{} works out of {} in {}.", name, studio, location),
        studio_name: Some(studio.to_string()),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        styles: styles.iter().map(|s| s.to_string()).collect(),
        location: Some(location.to_string()),
        postcode: Some(postcode.to_string()),
        rating: Some(rating),
        years_active: Some(years_active),
        hourly_rate: Some(hourly_rate),
        availability: Some(availability),
        coordinates: Some(GeoPoint::new(coordinates.0, coordinates.1)),
    }
}

fn studio(
    id: &str,
    name: &str,
    description: &str,
    specialties: &[&str],
    location: &str,
    postcode: &str,
    rating: f64,
    coordinates: (f64, f64),
) -> Studio {
    Studio {
        id: RecordId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        location: Some(location.to_string()),
        postcode: Some(postcode.to_string()),
        rating: Some(rating),
        coordinates: Some(GeoPoint::new(coordinates.0, coordinates.1)),
    }
}

pub fn sample_artists() -> Vec<Artist> {
    use Availability::*;

    vec![
        artist(
            "artist-1",
            "Sarah Johnson",
            "Black Rose Tattoo",
            &["realism", "portrait"],
            &["Black and grey portraits", "Realism"],
            "London",
            "E1 6AN",
            4.9,
            12.0,
            180.0,
            Waitlist,
            (51.5205, -0.0723),
        ),
        artist(
            "artist-2",
            "Marcus Chen",
            "Electric Dragon Studio",
            &["japanese", "neo_traditional"],
            &["Irezumi", "Full sleeves"],
            "Manchester",
            "M4 1HN",
            4.7,
            8.0,
            140.0,
            BookingSoon,
            (53.4839, -2.2360),
        ),
        artist(
            "artist-3",
            "Emma Williams",
            "Black Rose Tattoo",
            &["fineline", "minimalist", "floral"],
            &["Fine line florals", "Micro tattoos"],
            "London",
            "E2 7DJ",
            4.6,
            4.0,
            95.0,
            Available,
            (51.5290, -0.0690),
        ),
        artist(
            "artist-4",
            "Jake Morrison",
            "Anchor & Swallow",
            &["old_school", "traditional"],
            &["Sailor flash", "Bold colour"],
            "Brighton",
            "BN1 4GH",
            4.4,
            15.0,
            120.0,
            Available,
            (50.8225, -0.1372),
        ),
        artist(
            "artist-5",
            "Priya Patel",
            "Sacred Lines",
            &["geometric", "dotwork", "ornamental"],
            &["Mandalas", "Sacred geometry"],
            "Birmingham",
            "B5 4TR",
            4.8,
            7.0,
            130.0,
            BookingSoon,
            (52.4750, -1.8890),
        ),
        artist(
            "artist-6",
            "Liam O'Connor",
            "Electric Dragon Studio",
            &["blackwork", "tribal"],
            &["Blackout work", "Polynesian patterns"],
            "Manchester",
            "M1 2BN",
            4.1,
            2.0,
            70.0,
            Available,
            (53.4794, -2.2453),
        ),
        artist(
            "artist-7",
            "Sofia Rossi",
            "Colour Theory",
            &["watercolour", "illustrative"],
            &["Watercolour washes", "Botanical illustration"],
            "Bristol",
            "BS1 5TR",
            4.5,
            6.0,
            160.0,
            Waitlist,
            (51.4545, -2.5879),
        ),
        artist(
            "artist-8",
            "Dan Kowalski",
            "Iron Ink Collective",
            &["biomechanical", "realism", "trash_polka"],
            &["Biomech sleeves", "Colour realism"],
            "Leeds",
            "LS1 6LH",
            4.3,
            11.0,
            220.0,
            BooksClosed,
            (53.7997, -1.5492),
        ),
    ]
}

pub fn sample_studios() -> Vec<Studio> {
    vec![
        studio(
            "studio-1",
            "Black Rose Tattoo",
            "Award-winning East London studio known for realism and fine line work.",
            &["Realism", "Fine Line", "Portrait"],
            "London",
            "E1 6AN",
            4.8,
            (51.5205, -0.0723),
        ),
        studio(
            "studio-2",
            "Electric Dragon Studio",
            "Large-scale Japanese and blackwork projects in the Northern Quarter.",
            &["Japanese Irezumi", "Blackwork"],
            "Manchester",
            "M4 1HN",
            4.6,
            (53.4839, -2.2360),
        ),
        studio(
            "studio-3",
            "Anchor & Swallow",
            "Walk-in friendly traditional parlour by the seafront.",
            &["American Traditional", "Lettering"],
            "Brighton",
            "BN1 4GH",
            4.2,
            (50.8225, -0.1372),
        ),
        studio(
            "studio-4",
            "Sacred Lines",
            "Private studio specialising in dotwork and geometric pieces.",
            &["Dotwork", "Sacred Geometry"],
            "Birmingham",
            "B5 4TR",
            4.7,
            (52.4750, -1.8890),
        ),
    ]
}

/// The complete mock directory: sample artists and studios plus the
/// built-in style catalogue
pub fn sample_catalog() -> Catalog {
    Catalog::new(
        sample_artists(),
        sample_studios(),
        StyleIndex::builtin().iter().cloned().collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_styles_are_known() {
        let index = StyleIndex::builtin();
        for artist in sample_artists() {
            for style in &artist.styles {
                assert!(index.contains(style), "unknown style {} on {}", style, artist.name);
            }
        }
    }

    #[test]
    fn test_sample_studio_specialties_resolve() {
        let index = StyleIndex::builtin();
        for studio in sample_studios() {
            assert!(studio
                .specialties
                .iter()
                .any(|s| !index.resolve_specialty(s).is_empty()));
        }
    }
}
