//! Write operations for the `locations` table.

use sqlx::{types::Json, PgPool};
use uuid::Uuid;
use venuedb_core::NewLocation;

use super::read::LOCATION_COLUMNS;
use super::types::LocationRow;
use crate::DbError;

/// Insert a new location and return the stored row.
///
/// `rating` is left at its column default.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including check-constraint
/// violations).
pub async fn create_location(pool: &PgPool, location: &NewLocation) -> Result<LocationRow, DbError> {
    let row = sqlx::query_as::<_, LocationRow>(&format!(
        "INSERT INTO locations \
             (name, address, facilities, longitude, latitude, opening_times) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {LOCATION_COLUMNS}"
    ))
    .bind(&location.name)
    .bind(location.address.as_deref())
    .bind(&location.facilities)
    .bind(location.coords.longitude)
    .bind(location.coords.latitude)
    .bind(Json(&location.opening_times))
    .fetch_one(pool)
    .await?;

    tracing::info!(public_id = %row.public_id, name = %row.name, "location created");
    Ok(row)
}

/// Replace the editable fields of a location. `rating` is never touched.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no location has `public_id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_location(
    pool: &PgPool,
    public_id: Uuid,
    location: &NewLocation,
) -> Result<LocationRow, DbError> {
    let row = sqlx::query_as::<_, LocationRow>(&format!(
        "UPDATE locations SET \
             name          = $2, \
             address       = $3, \
             facilities    = $4, \
             longitude     = $5, \
             latitude      = $6, \
             opening_times = $7, \
             updated_at    = NOW() \
         WHERE public_id = $1 \
         RETURNING {LOCATION_COLUMNS}"
    ))
    .bind(public_id)
    .bind(&location.name)
    .bind(location.address.as_deref())
    .bind(&location.facilities)
    .bind(location.coords.longitude)
    .bind(location.coords.latitude)
    .bind(Json(&location.opening_times))
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    tracing::info!(public_id = %row.public_id, "location updated");
    Ok(row)
}

/// Delete a location by public id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row was deleted, or [`DbError::Sqlx`]
/// if the delete fails.
pub async fn delete_location(pool: &PgPool, public_id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM locations WHERE public_id = $1")
        .bind(public_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    tracing::info!(%public_id, "location deleted");
    Ok(())
}
