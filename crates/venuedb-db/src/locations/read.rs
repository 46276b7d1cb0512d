//! Read operations for the `locations` table.

use sqlx::PgPool;
use uuid::Uuid;

use super::types::LocationRow;
use crate::DbError;

pub(super) const LOCATION_COLUMNS: &str = "id, public_id, name, address, rating, facilities, \
     longitude, latitude, opening_times, created_at, updated_at";

/// Fetch a single location by its public id, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_location_by_public_id(
    pool: &PgPool,
    public_id: Uuid,
) -> Result<Option<LocationRow>, DbError> {
    let row = sqlx::query_as::<_, LocationRow>(&format!(
        "SELECT {LOCATION_COLUMNS} FROM locations WHERE public_id = $1"
    ))
    .bind(public_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
