//! Venue write handlers: create, replace, delete.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use venuedb_core::{LocationInput, NewLocation};

use crate::middleware::RequestId;

use super::super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::{map_location_db_error, parse_location_id, rejection_error, LocationItem};

fn validate_input(
    request_id: &str,
    body: Result<Json<LocationInput>, JsonRejection>,
) -> Result<NewLocation, ApiError> {
    let Json(body) = body.map_err(|e| rejection_error(request_id, e.body_text()))?;
    body.validate()
        .map_err(|e| ApiError::new(request_id, "validation_error", e.to_string()))
}

/// POST /api/v1/locations: create a venue.
pub(in crate::api) async fn create_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<LocationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<LocationItem>>), ApiError> {
    let rid = &req_id.0;
    let location = validate_input(rid, body)?;

    let row = venuedb_db::create_location(&state.pool, &location)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: LocationItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// PUT /api/v1/locations/{location_id}: replace every editable field.
///
/// The rating is owned by the review subsystem and is left as stored.
pub(in crate::api) async fn update_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(location_id): Path<String>,
    body: Result<Json<LocationInput>, JsonRejection>,
) -> Result<Json<ApiResponse<LocationItem>>, ApiError> {
    let rid = &req_id.0;
    let id = parse_location_id(rid, &location_id)?;
    let location = validate_input(rid, body)?;

    let row = venuedb_db::update_location(&state.pool, id, &location)
        .await
        .map_err(|e| map_location_db_error(rid, &e))?;

    Ok(Json(ApiResponse {
        data: LocationItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// DELETE /api/v1/locations/{location_id}
pub(in crate::api) async fn delete_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(location_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let rid = &req_id.0;
    let id = parse_location_id(rid, &location_id)?;

    venuedb_db::delete_location(&state.pool, id)
        .await
        .map_err(|e| map_location_db_error(rid, &e))?;

    Ok(StatusCode::NO_CONTENT)
}
