//! Venue API handlers.
//!
//! - `GET /api/v1/locations?lng=&lat=&maxDistance=` proximity search
//! - `POST /api/v1/locations` create a venue
//! - `GET /api/v1/locations/{location_id}` read one venue
//! - `PUT /api/v1/locations/{location_id}` replace a venue
//! - `DELETE /api/v1/locations/{location_id}` delete a venue

mod detail;
mod search;
mod write;

pub(super) use detail::get_location;
pub(super) use search::list_locations_by_distance;
pub(super) use write::{create_location, delete_location, update_location};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use venuedb_core::OpeningTime;
use venuedb_db::{DbError, LocationRow};

use super::{map_db_error, ApiError};

/// A persisted venue as returned by the CRUD endpoints.
#[derive(Debug, Serialize)]
pub(in crate::api) struct LocationItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub rating: i16,
    pub facilities: Vec<String>,
    /// `[longitude, latitude]`
    pub coords: [f64; 2],
    pub opening_times: Vec<OpeningTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LocationRow> for LocationItem {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.public_id,
            name: row.name,
            address: row.address,
            rating: row.rating,
            facilities: row.facilities,
            coords: [row.longitude, row.latitude],
            opening_times: row.opening_times.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn not_found(request_id: &str) -> ApiError {
    ApiError::new(request_id, "not_found", "locationid not found")
}

/// Parse the `{location_id}` path segment, rejecting anything that is not a UUID.
fn parse_location_id(request_id: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        ApiError::new(
            request_id,
            "bad_request",
            format!("'{raw}' is not a valid location id"),
        )
    })
}

/// Wrap an extractor rejection (malformed JSON body or query string) in the
/// standard error envelope.
fn rejection_error(request_id: &str, body_text: String) -> ApiError {
    ApiError::new(request_id, "validation_error", body_text)
}

fn map_location_db_error(request_id: &str, error: &DbError) -> ApiError {
    match error {
        DbError::NotFound => not_found(request_id),
        other => map_db_error(request_id.to_owned(), other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    #[test]
    fn parse_location_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_location_id("req-1", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_location_id_rejects_garbage() {
        let err = parse_location_id("req-1", "5a1f0c").unwrap_err();
        assert_eq!(err.error.code, "bad_request");
        assert!(err.error.message.contains("5a1f0c"));
    }

    #[test]
    fn not_found_db_error_maps_to_not_found() {
        let err = map_location_db_error("req-1", &DbError::NotFound);
        assert_eq!(err.error.code, "not_found");
        assert_eq!(err.error.message, "locationid not found");
    }

    #[test]
    fn rejection_error_is_validation_error() {
        let err = rejection_error("req-1", "missing field `name`".to_string());
        assert_eq!(err.error.code, "validation_error");
        assert_eq!(err.error.message, "missing field `name`");
        assert_eq!(err.meta.request_id, "req-1");
    }

    #[test]
    fn location_item_exposes_public_id_and_coords() {
        let public_id = Uuid::new_v4();
        let row = LocationRow {
            id: 7,
            public_id,
            name: "Starcups".to_string(),
            address: None,
            rating: 3,
            facilities: vec!["Food".to_string()],
            longitude: -0.969,
            latitude: 51.455,
            opening_times: Json(Vec::new()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(LocationItem::from(row)).expect("serialize");
        assert_eq!(json["_id"], public_id.to_string());
        assert_eq!(json["coords"], serde_json::json!([-0.969, 51.455]));
        assert_eq!(json["rating"], 3);
        assert!(json["address"].is_null());
        assert!(json.get("id").is_none(), "internal id must not leak");
    }
}
