//! Map view values handed to the mapping widget

use inkdex_core::{GeoPoint, RecordId, RecordKind, SearchHit};
use serde::{Deserialize, Serialize};

/// Radius used when the query does not set one
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub position: GeoPoint,
}

/// What the map widget needs: a center, a radius and markers keyed by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// Build a view over the results that have coordinates
    ///
    /// The center is the mean marker position, or London when there are no
    /// markers.
    pub fn from_hits(hits: &[SearchHit], radius_km: Option<f64>) -> Self {
        let markers: Vec<MapMarker> = hits
            .iter()
            .filter_map(|hit| {
                hit.record.coordinates().map(|position| MapMarker {
                    id: hit.id().clone(),
                    name: hit.name().to_string(),
                    kind: hit.kind(),
                    position,
                })
            })
            .collect();

        let center = if markers.is_empty() {
            GeoPoint::LONDON
        } else {
            let n = markers.len() as f64;
            let (lat, lng) = markers
                .iter()
                .fold((0.0, 0.0), |(lat, lng), m| (lat + m.position.lat, lng + m.position.lng));
            GeoPoint::new(lat / n, lng / n)
        };

        Self {
            center,
            radius_km: radius_km.filter(|r| *r > 0.0).unwrap_or(DEFAULT_RADIUS_KM),
            markers,
        }
    }
}
