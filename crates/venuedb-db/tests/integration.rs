//! Offline unit tests for venuedb-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use sqlx::types::Json;
use venuedb_core::{AppConfig, Coordinate, Environment, OpeningTime};
use venuedb_db::{LocationRow, PoolConfig};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        request_timeout_secs: 30,
        search_default_max_distance_km: 20.0,
        search_result_limit: 10,
        search_accept_zero_coordinates: false,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`LocationRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn location_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = LocationRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        name: "Starcups".to_string(),
        address: Some("125 High Street, Reading".to_string()),
        rating: 3_i16,
        facilities: vec!["Hot drinks".to_string(), "Food".to_string()],
        longitude: -0.969_089_9,
        latitude: 51.455_041,
        opening_times: Json(vec![OpeningTime {
            days: "Saturday".to_string(),
            opening: Some("8:00am".to_string()),
            closing: Some("5:00pm".to_string()),
            closed: false,
        }]),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.coords(), Coordinate::new(-0.969_089_9, 51.455_041));
    assert_eq!(row.rating, 3);
    assert_eq!(row.facilities.len(), 2);
    assert_eq!(row.opening_times.0[0].days, "Saturday");
}
