//! Guest list handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use wedplan_entity::guest::RsvpStatus;

use crate::dto::request::{CreateGuestRequest, UpdateRsvpRequest};
use crate::error::ApiError;
use crate::extractors::{ClientContext, ValidatedJson, parse_guest_id};
use crate::state::AppState;

/// GET /api/guests
pub async fn list_guests(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let guests = state.guest_service.list_guests().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": guests })))
}

/// GET /api/guests/summary
pub async fn rsvp_summary(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let summary = state.guest_service.rsvp_summary().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": summary })))
}

/// GET /api/guests/{id}
pub async fn get_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let guest = state.guest_service.get_guest(parse_guest_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": guest })))
}

/// POST /api/guests
pub async fn create_guest(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    ValidatedJson(req): ValidatedJson<CreateGuestRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let guest = state.guest_service.create_guest(&ctx, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": guest })),
    ))
}

/// PUT /api/guests/{id}/rsvp
pub async fn update_rsvp(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRsvpRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_guest_id(&id)?;
    let status: RsvpStatus = req.rsvp_status.parse()?;
    let guest = state.guest_service.update_rsvp(&ctx, id, status).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": guest })))
}

/// DELETE /api/guests/{id}
pub async fn delete_guest(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .guest_service
        .delete_guest(&ctx, parse_guest_id(&id)?)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "message": "Guest deleted" })))
}
