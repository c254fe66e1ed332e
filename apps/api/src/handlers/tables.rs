use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use tracing::info;
use venue_application::UpdateTableInput;
use venue_core::CallerContext;
use venue_domain::TableStatus;

use crate::dto::{
    CreateTableRequest, MessageResponse, TableResponse, UpdateTableRequest,
    UpdateTableStatusRequest,
};
use crate::error::ApiResult;
use crate::middleware::AuthenticatedCaller;
use crate::state::AppState;

pub async fn list_location_tables_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerContext>,
    Path(location_id): Path<String>,
) -> ApiResult<Json<Vec<TableResponse>>> {
    let tables = state
        .venue_service
        .list_tables_for_location(location_id.as_str(), &caller)
        .await?
        .into_iter()
        .map(TableResponse::from)
        .collect();

    Ok(Json(tables))
}

pub async fn create_table_handler(
    State(state): State<AppState>,
    caller: AuthenticatedCaller,
    Json(payload): Json<CreateTableRequest>,
) -> ApiResult<(StatusCode, Json<TableResponse>)> {
    let table = state.venue_service.create_table(payload.into()).await?;
    info!(
        caller_id = caller.caller_id(),
        table_id = %table.id(),
        location_id = %table.location_id(),
        "table created"
    );

    Ok((StatusCode::CREATED, Json(TableResponse::from(table))))
}

pub async fn get_table_handler(
    State(state): State<AppState>,
    _caller: AuthenticatedCaller,
    Path(table_id): Path<String>,
) -> ApiResult<Json<TableResponse>> {
    let table = state.venue_service.get_table(table_id.as_str()).await?;

    Ok(Json(TableResponse::from(table)))
}

pub async fn update_table_handler(
    State(state): State<AppState>,
    caller: AuthenticatedCaller,
    Path(table_id): Path<String>,
    Json(payload): Json<UpdateTableRequest>,
) -> ApiResult<Json<TableResponse>> {
    let input = UpdateTableInput::try_from(payload)?;
    let table = state
        .venue_service
        .update_table(table_id.as_str(), input)
        .await?;
    info!(caller_id = caller.caller_id(), %table_id, "table updated");

    Ok(Json(TableResponse::from(table)))
}

pub async fn update_table_status_handler(
    State(state): State<AppState>,
    caller: AuthenticatedCaller,
    Path(table_id): Path<String>,
    Json(payload): Json<UpdateTableStatusRequest>,
) -> ApiResult<Json<TableResponse>> {
    let status = TableStatus::parse(payload.status.trim())?;
    let table = state
        .venue_service
        .update_table_status(table_id.as_str(), status)
        .await?;
    info!(
        caller_id = caller.caller_id(),
        %table_id,
        status = status.as_str(),
        "table status changed"
    );

    Ok(Json(TableResponse::from(table)))
}

pub async fn delete_table_handler(
    State(state): State<AppState>,
    caller: AuthenticatedCaller,
    Path(table_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.venue_service.delete_table(table_id.as_str()).await?;
    info!(caller_id = caller.caller_id(), %table_id, "table deactivated");

    Ok(Json(MessageResponse {
        message: "table deleted successfully".to_owned(),
    }))
}
