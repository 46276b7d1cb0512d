//! Row types for the `locations` table.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;
use venuedb_core::{Coordinate, OpeningTime};

/// A row from the `locations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    /// 0–5; maintained outside the venue API.
    pub rating: i16,
    pub facilities: Vec<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub opening_times: Json<Vec<OpeningTime>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocationRow {
    #[must_use]
    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }
}

/// One candidate returned by the nearest-neighbor query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct NearestRow {
    pub public_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub rating: i16,
    pub facilities: Vec<String>,
    pub angular_distance: f64,
}
