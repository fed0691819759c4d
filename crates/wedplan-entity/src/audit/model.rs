//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use wedplan_core::types::AuditLogId;

/// An immutable audit log entry recording a seating or guest-list change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: AuditLogId,
    /// The action performed (e.g. `"seating.assign"`, `"table.delete"`).
    pub action: String,
    /// Target resource type (`"guest"` or `"table"`).
    pub target_type: String,
    /// Target resource ID.
    pub target_id: Option<Uuid>,
    /// Additional details (JSON).
    pub details: Option<serde_json::Value>,
    /// IP address of the caller.
    pub ip_address: Option<String>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The action performed.
    pub action: String,
    /// Target resource type.
    pub target_type: String,
    /// Target resource ID.
    pub target_id: Option<Uuid>,
    /// Additional details.
    pub details: Option<serde_json::Value>,
    /// Caller's IP address.
    pub ip_address: Option<String>,
}
