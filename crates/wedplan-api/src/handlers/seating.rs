//! Seat assignment handlers.

use axum::Json;
use axum::extract::State;

use wedplan_core::types::{GuestId, TableId};

use crate::dto::request::{AssignToSeatRequest, AssignToTableRequest, UnassignRequest};
use crate::error::ApiError;
use crate::extractors::{ClientContext, ValidatedJson};
use crate::state::AppState;

/// POST /api/seating/assign
///
/// Seats the guest at the lowest free seat of the table.
pub async fn assign_to_table(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    ValidatedJson(req): ValidatedJson<AssignToTableRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let guest = state
        .seating_service
        .assign_to_table(
            &ctx,
            GuestId::from_uuid(req.guest_id),
            TableId::from_uuid(req.table_id),
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": guest })))
}

/// POST /api/seating/assign-seat
pub async fn assign_to_seat(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    ValidatedJson(req): ValidatedJson<AssignToSeatRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let guest = state
        .seating_service
        .assign_to_seat(
            &ctx,
            GuestId::from_uuid(req.guest_id),
            TableId::from_uuid(req.table_id),
            req.seat_index,
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": guest })))
}

/// POST /api/seating/unassign
pub async fn unassign(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    ValidatedJson(req): ValidatedJson<UnassignRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let guest = state
        .seating_service
        .unassign(&ctx, GuestId::from_uuid(req.guest_id))
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": guest })))
}

/// GET /api/seating/chart
pub async fn chart(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let chart = state.seating_service.chart().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": chart })))
}
