//! Route definitions for the Wedplan HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with per-request middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(guest_routes())
        .merge(table_routes())
        .merge(seating_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Guest list and RSVP
fn guest_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/guests",
            get(handlers::guest::list_guests).post(handlers::guest::create_guest),
        )
        .route("/guests/summary", get(handlers::guest::rsvp_summary))
        .route(
            "/guests/{id}",
            get(handlers::guest::get_guest).delete(handlers::guest::delete_guest),
        )
        .route("/guests/{id}/rsvp", put(handlers::guest::update_rsvp))
}

/// Table CRUD and capacity queries
fn table_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tables",
            get(handlers::table::list_tables).post(handlers::table::create_table),
        )
        .route(
            "/tables/{id}",
            get(handlers::table::get_table)
                .put(handlers::table::update_table)
                .delete(handlers::table::delete_table),
        )
        .route("/tables/{id}/occupancy", get(handlers::table::occupancy))
        .route(
            "/tables/{id}/first-free-seat",
            get(handlers::table::first_free_seat),
        )
}

/// Seat assignment
fn seating_routes() -> Router<AppState> {
    Router::new()
        .route("/seating/assign", post(handlers::seating::assign_to_table))
        .route("/seating/assign-seat", post(handlers::seating::assign_to_seat))
        .route("/seating/unassign", post(handlers::seating::unassign))
        .route("/seating/chart", get(handlers::seating::chart))
}
