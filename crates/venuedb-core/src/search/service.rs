use std::sync::Arc;

use crate::distance::DistanceConverter;

use super::{
    Coordinate, LocationStore, NearestHit, NearestQuery, SearchError, SearchQuery,
    SearchResultItem, DEFAULT_MAX_DISTANCE_KM, RESULT_LIMIT,
};

/// How a coordinate of exactly `0.0` is interpreted.
///
/// Existing callers were served by a check that rejected any falsy value, so
/// a venue on the equator or the prime meridian could never be searched
/// around. `TreatAsMissing` keeps that contract; `Accept` only rejects
/// coordinates that are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroCoordinatePolicy {
    #[default]
    TreatAsMissing,
    Accept,
}

impl ZeroCoordinatePolicy {
    /// Returns the coordinate if it counts as supplied. NaN never does.
    fn admit(self, value: Option<f64>) -> Option<f64> {
        value.filter(|v| match self {
            Self::TreatAsMissing => is_truthy(*v),
            Self::Accept => !v.is_nan(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub default_max_distance_km: f64,
    pub result_limit: u32,
    pub zero_coordinates: ZeroCoordinatePolicy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            result_limit: RESULT_LIMIT,
            zero_coordinates: ZeroCoordinatePolicy::default(),
        }
    }
}

/// Validates proximity queries, runs them against a [`LocationStore`], and
/// annotates each hit with its distance in kilometers.
///
/// Holds no per-request state; one instance is shared by every request.
#[derive(Clone)]
pub struct ProximitySearchService {
    store: Arc<dyn LocationStore>,
    settings: SearchSettings,
    converter: DistanceConverter,
}

impl std::fmt::Debug for ProximitySearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximitySearchService")
            .field("settings", &self.settings)
            .field("converter", &self.converter)
            .finish_non_exhaustive()
    }
}

impl ProximitySearchService {
    pub fn new(store: Arc<dyn LocationStore>, settings: SearchSettings) -> Self {
        Self {
            store,
            settings,
            converter: DistanceConverter::EARTH,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Run a proximity search.
    ///
    /// Hits are returned in the order the store produced them. The store is
    /// trusted to sort nearest-first and to honor the limit; nothing here
    /// re-sorts or truncates. Dropping the returned future abandons the
    /// store call and no result list is built.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingCoordinates`] without touching the store
    /// if either coordinate is missing, or [`SearchError::StoreFailure`] if
    /// the store query fails.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultItem>, SearchError> {
        let max_distance_km = query
            .max_distance_km
            .filter(|d| is_truthy(*d))
            .unwrap_or(self.settings.default_max_distance_km);

        let policy = self.settings.zero_coordinates;
        let (Some(longitude), Some(latitude)) =
            (policy.admit(query.longitude), policy.admit(query.latitude))
        else {
            tracing::debug!(?query, "proximity search rejected: missing coordinates");
            return Err(SearchError::MissingCoordinates);
        };

        let nearest = NearestQuery {
            center: Coordinate::new(longitude, latitude),
            max_angular_distance: self.converter.to_angular(max_distance_km),
            limit: self.settings.result_limit,
            spherical: true,
        };

        let hits = self.store.nearest_neighbors(&nearest).await.map_err(|e| {
            tracing::error!(error = %e, longitude, latitude, "location store query failed");
            SearchError::StoreFailure(e)
        })?;

        let results: Vec<SearchResultItem> =
            hits.into_iter().map(|hit| self.to_result_item(hit)).collect();

        tracing::debug!(
            longitude,
            latitude,
            max_distance_km,
            hits = results.len(),
            "proximity search complete"
        );

        Ok(results)
    }

    fn to_result_item(&self, hit: NearestHit) -> SearchResultItem {
        let NearestHit {
            document,
            angular_distance,
        } = hit;
        SearchResultItem {
            distance_km: self.converter.to_linear(angular_distance),
            name: document.name,
            address: document.address,
            rating: document.rating,
            facilities: document.facilities,
            id: document.id,
        }
    }
}

/// Zero and NaN are falsy; everything else, negatives included, is truthy.
fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
