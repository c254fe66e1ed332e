use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use tracing::info;
use venue_core::CallerContext;

use crate::dto::{
    CreateLocationRequest, LocationResponse, MessageResponse, UpdateLocationRequest,
};
use crate::error::ApiResult;
use crate::middleware::AuthenticatedCaller;
use crate::state::AppState;

pub async fn list_locations_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerContext>,
) -> ApiResult<Json<Vec<LocationResponse>>> {
    let locations = state
        .venue_service
        .list_locations(&caller)
        .await?
        .into_iter()
        .map(LocationResponse::from)
        .collect();

    Ok(Json(locations))
}

pub async fn create_location_handler(
    State(state): State<AppState>,
    caller: AuthenticatedCaller,
    Json(payload): Json<CreateLocationRequest>,
) -> ApiResult<(StatusCode, Json<LocationResponse>)> {
    let location = state.venue_service.create_location(payload.into()).await?;
    info!(
        caller_id = caller.caller_id(),
        location_id = %location.id(),
        "location created"
    );

    Ok((StatusCode::CREATED, Json(LocationResponse::from(location))))
}

pub async fn get_location_handler(
    State(state): State<AppState>,
    _caller: AuthenticatedCaller,
    Path(location_id): Path<String>,
) -> ApiResult<Json<LocationResponse>> {
    let location = state
        .venue_service
        .get_location(location_id.as_str())
        .await?;

    Ok(Json(LocationResponse::from(location)))
}

pub async fn update_location_handler(
    State(state): State<AppState>,
    caller: AuthenticatedCaller,
    Path(location_id): Path<String>,
    Json(payload): Json<UpdateLocationRequest>,
) -> ApiResult<Json<LocationResponse>> {
    let location = state
        .venue_service
        .update_location(location_id.as_str(), payload.into())
        .await?;
    info!(caller_id = caller.caller_id(), %location_id, "location updated");

    Ok(Json(LocationResponse::from(location)))
}

pub async fn delete_location_handler(
    State(state): State<AppState>,
    caller: AuthenticatedCaller,
    Path(location_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .venue_service
        .delete_location(location_id.as_str())
        .await?;
    info!(caller_id = caller.caller_id(), %location_id, "location deactivated");

    Ok(Json(MessageResponse {
        message: "location deleted successfully".to_owned(),
    }))
}
