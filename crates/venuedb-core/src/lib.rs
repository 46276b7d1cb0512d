pub mod app_config;
pub mod config;
pub mod distance;
pub mod locations;
pub mod search;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{DistanceConverter, EARTH_RADIUS_KM};
pub use locations::{parse_facilities, LocationInput, LocationInputError, NewLocation, OpeningTime};
pub use search::{
    Coordinate, LocationDocument, LocationStore, MemoryLocationStore, NearestHit, NearestQuery,
    ProximitySearchService, SearchError, SearchQuery, SearchResultItem, SearchSettings, StoreError,
    ZeroCoordinatePolicy, DEFAULT_MAX_DISTANCE_KM, RESULT_LIMIT,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
