use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::middleware::RequestId;

use super::super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::{not_found, parse_location_id, LocationItem};

/// GET /api/v1/locations/{location_id}
pub(in crate::api) async fn get_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(location_id): Path<String>,
) -> Result<Json<ApiResponse<LocationItem>>, ApiError> {
    let rid = &req_id.0;
    let id = parse_location_id(rid, &location_id)?;

    let row = venuedb_db::get_location_by_public_id(&state.pool, id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .ok_or_else(|| not_found(rid))?;

    Ok(Json(ApiResponse {
        data: LocationItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}
