use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use venuedb_core::{SearchError, SearchQuery, SearchResultItem};

use crate::middleware::RequestId;

use super::super::{ApiError, ApiResponse, AppState, ResponseMeta};
use super::rejection_error;

/// Raw query string. Values stay strings so that an unparseable number reads
/// as "not supplied" instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub(in crate::api) struct DistanceQuery {
    pub lng: Option<String>,
    pub lat: Option<String>,
    #[serde(rename = "maxDistance")]
    pub max_distance: Option<String>,
}

impl DistanceQuery {
    fn to_search_query(&self) -> SearchQuery {
        SearchQuery {
            longitude: parse_number(self.lng.as_deref()),
            latitude: parse_number(self.lat.as_deref()),
            max_distance_km: parse_number(self.max_distance.as_deref()),
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
}

fn map_search_error(request_id: &str, error: &SearchError) -> ApiError {
    match error {
        SearchError::MissingCoordinates => {
            ApiError::new(request_id, "validation_error", error.to_string())
        }
        SearchError::StoreFailure(cause) => {
            tracing::debug!(request_id, error = %cause, "proximity search failed");
            ApiError::new(request_id, "store_unavailable", "location search failed")
        }
    }
}

/// GET /api/v1/locations: venues nearest to `lng`/`lat`, closest first.
pub(in crate::api) async fn list_locations_by_distance(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<DistanceQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<SearchResultItem>>>, ApiError> {
    let Query(params) = params.map_err(|e| rejection_error(&req_id.0, e.body_text()))?;
    let data = state
        .search
        .search(&params.to_search_query())
        .await
        .map_err(|e| map_search_error(&req_id.0, &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
