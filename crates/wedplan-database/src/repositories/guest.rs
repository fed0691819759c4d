//! Guest repository implementation. The `guests` table is the seat ledger.

use chrono::Utc;
use sqlx::PgPool;

use wedplan_core::error::{AppError, ErrorKind};
use wedplan_core::result::AppResult;
use wedplan_core::types::{GuestId, TableId};
use wedplan_entity::guest::{CreateGuest, Guest, RsvpStatus};

const SEAT_UNIQUE_CONSTRAINT: &str = "guests_table_seat_unique";
const TABLE_FK_CONSTRAINT: &str = "guests_table_id_fkey";

/// Repository for guest CRUD and seat ledger reads/writes.
#[derive(Debug, Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Create a new guest repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a guest by ID.
    pub async fn find_by_id(&self, id: GuestId) -> AppResult<Option<Guest>> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find guest", e))
    }

    /// List every guest ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<Guest>> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list guests", e))
    }

    /// List guests assigned to a table, ordered by seat index with
    /// seatless assignments last.
    pub async fn find_by_table(&self, table_id: TableId) -> AppResult<Vec<Guest>> {
        sqlx::query_as::<_, Guest>(
            "SELECT * FROM guests WHERE table_id = $1 \
             ORDER BY seat_index ASC NULLS LAST, name ASC",
        )
        .bind(table_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list guests at table", e)
        })
    }

    /// Create a new guest.
    pub async fn create(&self, id: GuestId, data: &CreateGuest) -> AppResult<Guest> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, name, email, rsvp_status, dietary_notes) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.rsvp_status)
        .bind(&data.dietary_notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create guest", e))
    }

    /// Change a guest's RSVP status.
    pub async fn update_rsvp(&self, id: GuestId, status: RsvpStatus) -> AppResult<Option<Guest>> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET rsvp_status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update RSVP", e))
    }

    /// Write a table/seat pair onto a guest.
    ///
    /// The table row is share-locked for the transaction, so the range
    /// check holds against a concurrent resize. A concurrent writer that
    /// took the seat first trips the partial unique index and is reported
    /// as `SeatTaken`.
    pub async fn set_seat(
        &self,
        id: GuestId,
        table_id: TableId,
        seat_index: i32,
    ) -> AppResult<Option<Guest>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let table = sqlx::query_as::<_, (String, i32)>(
            "SELECT name, seat_count FROM reception_tables WHERE id = $1 FOR SHARE",
        )
        .bind(table_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock table", e))?;

        let Some((table_name, seat_count)) = table else {
            return Err(AppError::not_found(format!("Table {table_id} not found")));
        };
        if !(0..seat_count).contains(&seat_index) {
            return Err(AppError::out_of_range(format!(
                "Seat {seat_index} is outside table '{table_name}' (seats 0..{seat_count})"
            )));
        }

        let guest = sqlx::query_as::<_, Guest>(
            "UPDATE guests SET table_id = $2, seat_index = $3, updated_at = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(table_id)
        .bind(seat_index)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(SEAT_UNIQUE_CONSTRAINT) =>
            {
                AppError::seat_taken(format!(
                    "Seat {seat_index} at table {table_id} is already taken"
                ))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(TABLE_FK_CONSTRAINT) => {
                AppError::not_found(format!("Table {table_id} not found"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to assign seat", e),
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit seat assignment", e)
        })?;
        Ok(guest)
    }

    /// Clear both the table reference and the seat index of a guest.
    pub async fn clear_seat(&self, id: GuestId) -> AppResult<Option<Guest>> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET table_id = NULL, seat_index = NULL, updated_at = $2 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unassign guest", e))
    }

    /// Delete a guest. Returns `true` if a row was removed.
    pub async fn delete(&self, id: GuestId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete guest", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count guests grouped by RSVP status.
    pub async fn count_by_rsvp(&self) -> AppResult<Vec<(RsvpStatus, i64)>> {
        sqlx::query_as::<_, (RsvpStatus, i64)>(
            "SELECT rsvp_status, COUNT(*) FROM guests GROUP BY rsvp_status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count guests", e))
    }
}
