use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::{Coordinate, LocationDocument, LocationStore, NearestHit, NearestQuery, StoreError};

/// Great-circle central angle between two points, in radians (haversine).
#[must_use]
pub fn central_angle(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    2.0 * h.sqrt().min(1.0).asin()
}

/// Euclidean distance over raw degrees, expressed in radians.
fn planar_angle(a: Coordinate, b: Coordinate) -> f64 {
    (b.longitude - a.longitude)
        .hypot(b.latitude - a.latitude)
        .to_radians()
}

/// In-process [`LocationStore`] backed by a linear scan.
#[derive(Debug, Default)]
pub struct MemoryLocationStore {
    entries: RwLock<Vec<(Coordinate, LocationDocument)>>,
}

impl MemoryLocationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the document with the same id.
    pub fn upsert(&self, coords: Coordinate, document: LocationDocument) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|(_, existing)| existing.id != document.id);
        entries.push((coords, document));
    }

    /// Returns `true` if a document was removed.
    pub fn remove(&self, id: Uuid) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(_, existing)| existing.id != id);
        entries.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn nearest_neighbors(&self, query: &NearestQuery) -> Result<Vec<NearestHit>, StoreError> {
        if query.max_angular_distance.is_nan() {
            return Err(StoreError::new("max distance must be a number"));
        }

        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let measure: fn(Coordinate, Coordinate) -> f64 = if query.spherical {
            central_angle
        } else {
            planar_angle
        };

        let mut hits: Vec<NearestHit> = entries
            .iter()
            .map(|(coords, document)| NearestHit {
                angular_distance: measure(query.center, *coords),
                document: document.clone(),
            })
            .filter(|hit| hit.angular_distance <= query.max_angular_distance)
            .collect();
        drop(entries);

        hits.sort_by(|a, b| {
            a.angular_distance
                .total_cmp(&b.angular_distance)
                .then_with(|| a.document.id.cmp(&b.document.id))
        });
        hits.truncate(usize::try_from(query.limit).unwrap_or(usize::MAX));

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceConverter;

    fn doc(name: &str) -> LocationDocument {
        LocationDocument {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: None,
            rating: Some(0),
            facilities: Vec::new(),
        }
    }

    fn query(center: Coordinate, km: f64, limit: u32) -> NearestQuery {
        NearestQuery {
            center,
            max_angular_distance: DistanceConverter::EARTH.to_angular(km),
            limit,
            spherical: true,
        }
    }

    #[test]
    fn central_angle_of_quarter_meridian() {
        let angle = central_angle(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 90.0));
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn central_angle_london_to_paris() {
        let london = Coordinate::new(-0.1278, 51.5074);
        let paris = Coordinate::new(2.3522, 48.8566);
        let km = DistanceConverter::EARTH.to_linear(central_angle(london, paris));
        assert!((km - 343.5).abs() < 1.0, "got {km}");
    }

    #[tokio::test]
    async fn returns_nearest_first_within_cutoff() {
        let store = MemoryLocationStore::new();
        let center = Coordinate::new(-0.1278, 51.5074);
        store.upsert(Coordinate::new(-0.1278, 51.55), doc("North"));
        store.upsert(Coordinate::new(-0.1278, 51.51), doc("Close"));
        store.upsert(Coordinate::new(2.3522, 48.8566), doc("Paris"));

        let hits = store
            .nearest_neighbors(&query(center, 20.0, 10))
            .await
            .expect("query");

        let names: Vec<&str> = hits.iter().map(|h| h.document.name.as_str()).collect();
        assert_eq!(names, ["Close", "North"]);
        assert!(hits[0].angular_distance < hits[1].angular_distance);
    }

    #[tokio::test]
    async fn applies_limit() {
        let store = MemoryLocationStore::new();
        for i in 0..15u32 {
            store.upsert(
                Coordinate::new(10.0, 10.0 + f64::from(i) * 0.001),
                doc(&format!("Venue {i}")),
            );
        }
        let hits = store
            .nearest_neighbors(&query(Coordinate::new(10.0, 10.0), 50.0, 10))
            .await
            .expect("query");
        assert_eq!(hits.len(), 10);
        assert_eq!(hits[0].document.name, "Venue 0");
    }

    #[tokio::test]
    async fn planar_mode_measures_degrees() {
        let store = MemoryLocationStore::new();
        store.upsert(Coordinate::new(3.0, 4.0), doc("Five degrees"));
        let hits = store
            .nearest_neighbors(&NearestQuery {
                center: Coordinate::new(0.0, 0.0),
                max_angular_distance: 1.0,
                limit: 10,
                spherical: false,
            })
            .await
            .expect("query");
        assert!((hits[0].angular_distance - 5.0_f64.to_radians()).abs() < 1e-12);
    }

    #[tokio::test]
    async fn upsert_replaces_and_remove_deletes() {
        let store = MemoryLocationStore::new();
        let mut venue = doc("Before");
        store.upsert(Coordinate::new(1.0, 1.0), venue.clone());
        venue.name = "After".to_string();
        store.upsert(Coordinate::new(1.0, 1.0), venue.clone());
        assert_eq!(store.len(), 1);

        let hits = store
            .nearest_neighbors(&query(Coordinate::new(1.0, 1.0), 1.0, 10))
            .await
            .expect("query");
        assert_eq!(hits[0].document.name, "After");

        assert!(store.remove(venue.id));
        assert!(!store.remove(venue.id));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn nan_cutoff_is_a_store_error() {
        let store = MemoryLocationStore::new();
        let result = store
            .nearest_neighbors(&NearestQuery {
                center: Coordinate::new(1.0, 1.0),
                max_angular_distance: f64::NAN,
                limit: 10,
                spherical: true,
            })
            .await;
        assert!(result.is_err());
    }
}
