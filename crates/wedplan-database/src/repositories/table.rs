//! Reception table repository implementation.

use chrono::Utc;
use sqlx::PgPool;

use wedplan_core::error::{AppError, ErrorKind};
use wedplan_core::result::AppResult;
use wedplan_core::types::TableId;
use wedplan_entity::table::{CreateTable, Table, UpdateTable};

/// Repository for reception table CRUD and the delete cascade.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: PgPool,
}

impl TableRepository {
    /// Create a new table repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a table by ID.
    pub async fn find_by_id(&self, id: TableId) -> AppResult<Option<Table>> {
        sqlx::query_as::<_, Table>("SELECT * FROM reception_tables WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find table", e))
    }

    /// List all tables, head table first, then by name.
    pub async fn find_all(&self) -> AppResult<Vec<Table>> {
        sqlx::query_as::<_, Table>(
            "SELECT * FROM reception_tables ORDER BY is_head DESC, name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tables", e))
    }

    /// Create a new table. When it is flagged as head table, the flag is
    /// cleared on every other table in the same transaction.
    pub async fn create(&self, id: TableId, data: &CreateTable) -> AppResult<Table> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        if data.is_head {
            sqlx::query("UPDATE reception_tables SET is_head = FALSE, updated_at = $1 WHERE is_head")
                .bind(Utc::now())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to clear head table", e)
                })?;
        }

        let table = sqlx::query_as::<_, Table>(
            "INSERT INTO reception_tables (id, name, seat_count, notes, is_head) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.seat_count)
        .bind(&data.notes)
        .bind(data.is_head)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create table", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit table creation", e)
        })?;
        Ok(table)
    }

    /// Apply a partial update to a table.
    ///
    /// The row is locked before a resize is checked against the guests
    /// seated there, so a concurrent seat write either commits first and
    /// is counted or waits for the new size. An empty `notes` string
    /// clears the notes.
    pub async fn update(&self, id: TableId, data: &UpdateTable) -> AppResult<Option<Table>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let Some(current) =
            sqlx::query_as::<_, Table>("SELECT * FROM reception_tables WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock table", e))?
        else {
            return Ok(None);
        };

        if let Some(seat_count) = data.seat_count {
            let (highest, assigned) = sqlx::query_as::<_, (Option<i32>, i64)>(
                "SELECT MAX(seat_index), COUNT(*) FROM guests WHERE table_id = $1",
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count table guests", e)
            })?;
            current.check_resize(seat_count, highest, assigned)?;
        }

        if data.is_head == Some(true) {
            sqlx::query(
                "UPDATE reception_tables SET is_head = FALSE, updated_at = $2 \
                 WHERE is_head AND id <> $1",
            )
            .bind(id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear head table", e)
            })?;
        }

        let table = sqlx::query_as::<_, Table>(
            "UPDATE reception_tables SET \
                name = COALESCE($2, name), \
                seat_count = COALESCE($3, seat_count), \
                notes = CASE WHEN $4::TEXT IS NULL THEN notes \
                    WHEN BTRIM($4) = '' THEN NULL ELSE $4 END, \
                is_head = COALESCE($5, is_head), \
                updated_at = $6 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.seat_count)
        .bind(&data.notes)
        .bind(data.is_head)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update table", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit table update", e)
        })?;
        Ok(table)
    }

    /// Unassign every guest at the table, then delete the table, in one
    /// transaction. Returns the number of guests unassigned, or `None` if
    /// the table did not exist.
    pub async fn delete_with_unassign(&self, id: TableId) -> AppResult<Option<u64>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let cleared = sqlx::query(
            "UPDATE guests SET table_id = NULL, seat_index = NULL, updated_at = $2 \
             WHERE table_id = $1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to unassign table guests", e)
        })?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM reception_tables WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete table", e))?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back table delete", e)
            })?;
            return Ok(None);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit table delete", e)
        })?;
        Ok(Some(cleared))
    }
}
