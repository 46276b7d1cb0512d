//! Proximity search: the store port, its request/response types, and the
//! service that turns raw nearest-neighbor hits into distance-annotated
//! results.

mod memory;
mod service;

pub use memory::{central_angle, MemoryLocationStore};
pub use service::{ProximitySearchService, SearchSettings, ZeroCoordinatePolicy};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Radius applied when the caller does not supply a usable `maxDistance`.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 20.0;

/// Number of hits requested from the store for every search.
pub const RESULT_LIMIT: u32 = 10;

/// A point in degrees. No range checking or wrapping is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Caller-supplied search parameters, before defaults are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchQuery {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub max_distance_km: Option<f64>,
}

impl SearchQuery {
    #[must_use]
    pub fn at(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: Some(longitude),
            latitude: Some(latitude),
            max_distance_km: None,
        }
    }

    #[must_use]
    pub fn within_km(mut self, max_distance_km: f64) -> Self {
        self.max_distance_km = Some(max_distance_km);
        self
    }
}

/// The fields of a stored venue that proximity search reads.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDocument {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<i16>,
    pub facilities: Vec<String>,
}

/// Parameters of a single nearest-neighbor lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestQuery {
    pub center: Coordinate,
    /// Cutoff in radians; hits farther than this are excluded.
    pub max_angular_distance: f64,
    pub limit: u32,
    /// Great-circle distance when `true`, planar distance over degrees otherwise.
    pub spherical: bool,
}

/// One store match: the document plus its angular distance (radians) from the center.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestHit {
    pub document: LocationDocument,
    pub angular_distance: f64,
}

/// A caller-facing search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultItem {
    #[serde(rename = "distance")]
    pub distance_km: f64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i16>,
    pub facilities: Vec<String>,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

/// Failure reported by a [`LocationStore`] backend.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("lng and lat query parameters are required")]
    MissingCoordinates,

    #[error("location store query failed: {0}")]
    StoreFailure(#[source] StoreError),
}

/// A geospatially indexed store of venues.
///
/// Implementations must return hits sorted by ascending distance, apply the
/// angular cutoff and the limit themselves, and report failure as a single
/// error rather than a partial list.
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn nearest_neighbors(&self, query: &NearestQuery) -> Result<Vec<NearestHit>, StoreError>;
}
