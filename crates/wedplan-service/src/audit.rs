//! Audit trail for seating changes.
//!
//! Auditing never blocks the operation it describes: every event is logged
//! through `tracing`, and persisting it is best effort.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use wedplan_database::repositories::AuditLogRepository;
use wedplan_entity::audit::CreateAuditLogEntry;

use crate::context::RequestContext;

/// Audit action names.
pub mod actions {
    /// A guest was placed at a seat.
    pub const SEAT_ASSIGN: &str = "seating.assign";
    /// A guest's seat was cleared.
    pub const SEAT_UNASSIGN: &str = "seating.unassign";
    /// A table was created.
    pub const TABLE_CREATE: &str = "table.create";
    /// A table was edited.
    pub const TABLE_UPDATE: &str = "table.update";
    /// A table was deleted together with its assignments.
    pub const TABLE_DELETE: &str = "table.delete";
    /// A guest was added.
    pub const GUEST_CREATE: &str = "guest.create";
    /// A guest was removed.
    pub const GUEST_DELETE: &str = "guest.delete";
    /// A guest's RSVP changed.
    pub const GUEST_RSVP: &str = "guest.rsvp";
}

/// Records audit events.
#[derive(Debug, Clone, Default)]
pub struct SeatingAudit {
    /// Audit log repository; `None` keeps events in the log output only.
    repo: Option<Arc<AuditLogRepository>>,
}

impl SeatingAudit {
    /// Creates an audit service that persists events.
    pub fn new(repo: Arc<AuditLogRepository>) -> Self {
        Self { repo: Some(repo) }
    }

    /// Creates an audit service that only logs events.
    pub fn log_only() -> Self {
        Self { repo: None }
    }

    /// Records an event. Failures to persist are logged and swallowed.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        action: &str,
        target_type: &str,
        target_id: Option<Uuid>,
        details: Option<Value>,
    ) {
        info!(
            action = %action,
            target_type = %target_type,
            target_id = ?target_id,
            ip = %ctx.ip_address,
            "Audit event"
        );

        let Some(repo) = &self.repo else {
            return;
        };

        let entry = CreateAuditLogEntry {
            action: action.to_string(),
            target_type: target_type.to_string(),
            target_id,
            details,
            ip_address: Some(ctx.ip_address.clone()),
        };
        if let Err(e) = repo.create(&entry).await {
            warn!(action = %action, error = %e, "Failed to persist audit event");
        }
    }
}
