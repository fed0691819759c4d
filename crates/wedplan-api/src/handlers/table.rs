//! Reception table handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::request::{CreateTableRequest, UpdateTableRequest};
use crate::dto::response::{ApiResponse, FreeSeatResponse, TableDeletedResponse};
use crate::error::ApiError;
use crate::extractors::{ClientContext, ValidatedJson, parse_table_id};
use crate::state::AppState;

/// GET /api/tables
pub async fn list_tables(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tables = state.table_service.list_tables().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tables })))
}

/// GET /api/tables/{id}
pub async fn get_table(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let table = state.table_service.get_table(parse_table_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": table })))
}

/// POST /api/tables
pub async fn create_table(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    ValidatedJson(req): ValidatedJson<CreateTableRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let table = state.table_service.create_table(&ctx, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": table })),
    ))
}

/// PUT /api/tables/{id}
pub async fn update_table(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTableRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let table = state
        .table_service
        .update_table(&ctx, parse_table_id(&id)?, req.into())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": table })))
}

/// DELETE /api/tables/{id}
///
/// Clears every guest's seat at the table before the table is removed.
pub async fn delete_table(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TableDeletedResponse>>, ApiError> {
    let unassigned_guests = state
        .table_service
        .delete_table(&ctx, parse_table_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(TableDeletedResponse {
        deleted: true,
        unassigned_guests,
    })))
}

/// GET /api/tables/{id}/occupancy
pub async fn occupancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let occupancy = state.table_service.occupancy(parse_table_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": occupancy })))
}

/// GET /api/tables/{id}/first-free-seat
pub async fn first_free_seat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FreeSeatResponse>>, ApiError> {
    let seat_index = state
        .table_service
        .first_free_seat(parse_table_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(FreeSeatResponse {
        seat_index,
        is_full: seat_index.is_none(),
    })))
}
