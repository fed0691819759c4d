//! Typed path parameter helpers.

use wedplan_core::error::AppError;
use wedplan_core::types::{GuestId, TableId};

/// Parses a guest ID from a path segment.
pub fn parse_guest_id(s: &str) -> Result<GuestId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid guest ID: {s}")))
}

/// Parses a table ID from a path segment.
pub fn parse_table_id(s: &str) -> Result<TableId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid table ID: {s}")))
}
