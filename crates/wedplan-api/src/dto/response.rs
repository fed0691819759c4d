//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Seat ledger backend in use.
    pub ledger: String,
    /// Uptime.
    pub uptime_seconds: u64,
}

/// First free seat lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeSeatResponse {
    /// Lowest free seat index, `null` when the table is full.
    pub seat_index: Option<i32>,
    /// Convenience flag, `true` when `seat_index` is `null`.
    pub is_full: bool,
}

/// Result of deleting a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDeletedResponse {
    /// Whether the table was removed.
    pub deleted: bool,
    /// Guests whose seat was cleared.
    pub unassigned_guests: u64,
}
