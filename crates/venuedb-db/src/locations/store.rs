//! Nearest-neighbor search over the `locations` table.

use async_trait::async_trait;
use sqlx::PgPool;
use venuedb_core::{LocationDocument, LocationStore, NearestHit, NearestQuery, StoreError};

use super::types::NearestRow;

// $1 = center longitude, $2 = center latitude, $3 = cutoff (radians),
// $4 = limit, $5 = spherical.
//
// Any point within angular distance r of the center lies within r of it in
// latitude (in either mode), so the band never drops a match and lets
// `idx_locations_latitude` narrow the scan before distances are computed.
const NEAREST_SQL: &str = "\
    SELECT public_id, name, address, rating, facilities, angular_distance \
    FROM ( \
        SELECT public_id, name, address, rating, facilities, \
               CASE WHEN $5 THEN \
                   2 * asin(LEAST(1.0::float8, sqrt( \
                       power(sin(radians(latitude - $2) / 2), 2) \
                       + cos(radians($2)) * cos(radians(latitude)) \
                         * power(sin(radians(longitude - $1) / 2), 2) \
                   ))) \
               ELSE radians(sqrt(power(longitude - $1, 2) + power(latitude - $2, 2))) \
               END AS angular_distance \
        FROM locations \
        WHERE latitude BETWEEN $2 - degrees($3) AND $2 + degrees($3) \
    ) candidates \
    WHERE angular_distance <= $3 \
    ORDER BY angular_distance ASC, public_id ASC \
    LIMIT $4";

/// [`LocationStore`] backed by the Postgres `locations` table.
#[derive(Debug, Clone)]
pub struct PgLocationStore {
    pool: PgPool,
}

impl PgLocationStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for PgLocationStore {
    async fn nearest_neighbors(&self, query: &NearestQuery) -> Result<Vec<NearestHit>, StoreError> {
        // Postgres orders NaN above every number, so a NaN cutoff would match all rows.
        if query.max_angular_distance.is_nan() {
            return Err(StoreError::new("max distance must be a number"));
        }

        let rows = sqlx::query_as::<_, NearestRow>(NEAREST_SQL)
            .bind(query.center.longitude)
            .bind(query.center.latitude)
            .bind(query.max_angular_distance)
            .bind(i64::from(query.limit))
            .bind(query.spherical)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::with_source("nearest-neighbor query failed", e))?;

        Ok(rows
            .into_iter()
            .map(|row| NearestHit {
                angular_distance: row.angular_distance,
                document: LocationDocument {
                    id: row.public_id,
                    name: row.name,
                    address: row.address,
                    rating: Some(row.rating),
                    facilities: row.facilities,
                },
            })
            .collect())
    }
}
