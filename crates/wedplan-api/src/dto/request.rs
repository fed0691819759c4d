//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use wedplan_entity::guest::{CreateGuest, RsvpStatus};
use wedplan_entity::table::{CreateTable, UpdateTable};

/// Create guest request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGuestRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    /// Contact email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Initial RSVP status; defaults to pending.
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
    /// Catering notes.
    #[validate(length(max = 1000))]
    pub dietary_notes: Option<String>,
}

impl From<CreateGuestRequest> for CreateGuest {
    fn from(req: CreateGuestRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            rsvp_status: req.rsvp_status,
            dietary_notes: req.dietary_notes,
        }
    }
}

/// RSVP update body. The status is parsed leniently (`" Declined "` works).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRsvpRequest {
    /// `pending`, `confirmed`, or `declined`.
    #[validate(length(min = 1))]
    pub rsvp_status: String,
}

/// Create table request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTableRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Number of seats.
    #[validate(range(min = 1, max = 100))]
    pub seat_count: i32,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Mark as head table.
    #[serde(default)]
    pub is_head: bool,
}

impl From<CreateTableRequest> for CreateTable {
    fn from(req: CreateTableRequest) -> Self {
        Self {
            name: req.name,
            seat_count: req.seat_count,
            notes: req.notes,
            is_head: req.is_head,
        }
    }
}

/// Partial table update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTableRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New seat count.
    #[validate(range(min = 1, max = 100))]
    pub seat_count: Option<i32>,
    /// New notes. An empty string clears them.
    pub notes: Option<String>,
    /// Set or clear the head-table flag.
    pub is_head: Option<bool>,
}

impl From<UpdateTableRequest> for UpdateTable {
    fn from(req: UpdateTableRequest) -> Self {
        Self {
            name: req.name,
            seat_count: req.seat_count,
            notes: req.notes,
            is_head: req.is_head,
        }
    }
}

/// Seat a guest at the first free seat of a table.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignToTableRequest {
    /// Guest to seat.
    pub guest_id: Uuid,
    /// Target table.
    pub table_id: Uuid,
}

/// Seat a guest at a specific seat. The index is range-checked against the
/// table, not here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignToSeatRequest {
    /// Guest to seat.
    pub guest_id: Uuid,
    /// Target table.
    pub table_id: Uuid,
    /// Seat index at the table.
    pub seat_index: i32,
}

/// Clear a guest's seat.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UnassignRequest {
    /// Guest to unseat.
    pub guest_id: Uuid,
}
