use crate::app_config::{AppConfig, Environment};
use crate::search::{DEFAULT_MAX_DISTANCE_KM, RESULT_LIMIT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, for use in tests
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so tests can drive it
/// with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("VENUEDB_ENV", "development"))?;

    let bind_addr = parse_addr("VENUEDB_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VENUEDB_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("VENUEDB_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("VENUEDB_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "VENUEDB_DB_MIN_CONNECTIONS",
            format!("must not exceed VENUEDB_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("VENUEDB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let request_timeout_secs = parse_u64("VENUEDB_REQUEST_TIMEOUT_SECS", "30")?;

    let search_default_max_distance_km = {
        let var = "VENUEDB_SEARCH_DEFAULT_MAX_DISTANCE_KM";
        let km = or_default(var, &DEFAULT_MAX_DISTANCE_KM.to_string())
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !km.is_finite() || km <= 0.0 {
            return Err(invalid(var, format!("must be a positive distance, got {km}")));
        }
        km
    };

    let search_result_limit = {
        let var = "VENUEDB_SEARCH_RESULT_LIMIT";
        let limit = parse_u32(var, &RESULT_LIMIT.to_string())?;
        if limit == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        limit
    };

    let search_accept_zero_coordinates =
        parse_bool("VENUEDB_SEARCH_ACCEPT_ZERO_COORDINATES", "false")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        request_timeout_secs,
        search_default_max_distance_km,
        search_result_limit,
        search_accept_zero_coordinates,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VENUEDB_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
