//! # wedplan-api
//!
//! HTTP API layer for Wedplan built on Axum.
//!
//! Provides the REST endpoints for guests, tables, and seating, the
//! middleware stack (rate limiting, CORS, request logging), extractors,
//! DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
