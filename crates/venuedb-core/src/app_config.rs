use std::net::SocketAddr;

use crate::search::{SearchSettings, ZeroCoordinatePolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub search_default_max_distance_km: f64,
    pub search_result_limit: u32,
    pub search_accept_zero_coordinates: bool,
}

impl AppConfig {
    /// Proximity search tuning derived from the `VENUEDB_SEARCH_*` variables.
    #[must_use]
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            default_max_distance_km: self.search_default_max_distance_km,
            result_limit: self.search_result_limit,
            zero_coordinates: if self.search_accept_zero_coordinates {
                ZeroCoordinatePolicy::Accept
            } else {
                ZeroCoordinatePolicy::TreatAsMissing
            },
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field(
                "search_default_max_distance_km",
                &self.search_default_max_distance_km,
            )
            .field("search_result_limit", &self.search_result_limit)
            .field(
                "search_accept_zero_coordinates",
                &self.search_accept_zero_coordinates,
            )
            .finish()
    }
}
