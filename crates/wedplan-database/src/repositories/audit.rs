//! Audit log repository implementation.

use sqlx::PgPool;

use wedplan_core::error::{AppError, ErrorKind};
use wedplan_core::result::AppResult;
use wedplan_core::types::AuditLogId;
use wedplan_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

/// Repository for audit log entries.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an audit entry.
    pub async fn create(&self, data: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log (id, action, target_type, target_id, details, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(AuditLogId::new())
        .bind(&data.action)
        .bind(&data.target_type)
        .bind(data.target_id)
        .bind(&data.details)
        .bind(&data.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write audit entry", e))
    }

    /// Most recent entries, newest first.
    pub async fn find_recent(&self, limit: i64) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list audit log", e))
    }
}
