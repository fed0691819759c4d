//! PostgreSQL seat ledger backed by the guest and table repositories.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use wedplan_core::config::RetryConfig;
use wedplan_core::result::AppResult;
use wedplan_core::retry::with_retry;
use wedplan_core::types::{GuestId, TableId};
use wedplan_database::repositories::{GuestRepository, TableRepository};
use wedplan_entity::guest::{CreateGuest, Guest, RsvpStatus};
use wedplan_entity::table::{CreateTable, Table, UpdateTable};

use crate::ledger::SeatLedger;

/// Seat ledger stored in PostgreSQL.
///
/// Seat uniqueness is enforced by a partial unique index on
/// `(table_id, seat_index)`, so two writers racing for the same seat cannot
/// both commit. Every call is wrapped in the configured retry policy.
#[derive(Debug, Clone)]
pub struct PostgresSeatLedger {
    guests: Arc<GuestRepository>,
    tables: Arc<TableRepository>,
    retry: RetryConfig,
}

impl PostgresSeatLedger {
    /// Creates a ledger over the given pool.
    pub fn new(pool: PgPool, retry: RetryConfig) -> Self {
        Self {
            guests: Arc::new(GuestRepository::new(pool.clone())),
            tables: Arc::new(TableRepository::new(pool)),
            retry,
        }
    }
}

#[async_trait]
impl SeatLedger for PostgresSeatLedger {
    async fn find_guest(&self, id: GuestId) -> AppResult<Option<Guest>> {
        with_retry(&self.retry, "find_guest", || self.guests.find_by_id(id)).await
    }

    async fn list_guests(&self) -> AppResult<Vec<Guest>> {
        with_retry(&self.retry, "list_guests", || self.guests.find_all()).await
    }

    async fn guests_at_table(&self, table_id: TableId) -> AppResult<Vec<Guest>> {
        with_retry(&self.retry, "guests_at_table", || {
            self.guests.find_by_table(table_id)
        })
        .await
    }

    async fn create_guest(&self, data: CreateGuest) -> AppResult<Guest> {
        let id = GuestId::new();
        with_retry(&self.retry, "create_guest", || self.guests.create(id, &data)).await
    }

    async fn update_rsvp(&self, id: GuestId, status: RsvpStatus) -> AppResult<Option<Guest>> {
        with_retry(&self.retry, "update_rsvp", || {
            self.guests.update_rsvp(id, status)
        })
        .await
    }

    async fn delete_guest(&self, id: GuestId) -> AppResult<bool> {
        with_retry(&self.retry, "delete_guest", || self.guests.delete(id)).await
    }

    async fn count_by_rsvp(&self) -> AppResult<Vec<(RsvpStatus, i64)>> {
        with_retry(&self.retry, "count_by_rsvp", || self.guests.count_by_rsvp()).await
    }

    async fn find_table(&self, id: TableId) -> AppResult<Option<Table>> {
        with_retry(&self.retry, "find_table", || self.tables.find_by_id(id)).await
    }

    async fn list_tables(&self) -> AppResult<Vec<Table>> {
        with_retry(&self.retry, "list_tables", || self.tables.find_all()).await
    }

    async fn create_table(&self, data: CreateTable) -> AppResult<Table> {
        let id = TableId::new();
        with_retry(&self.retry, "create_table", || self.tables.create(id, &data)).await
    }

    async fn update_table(&self, id: TableId, data: UpdateTable) -> AppResult<Option<Table>> {
        with_retry(&self.retry, "update_table", || self.tables.update(id, &data)).await
    }

    async fn write_seat(
        &self,
        guest_id: GuestId,
        table_id: TableId,
        seat_index: i32,
    ) -> AppResult<Option<Guest>> {
        with_retry(&self.retry, "write_seat", || {
            self.guests.set_seat(guest_id, table_id, seat_index)
        })
        .await
    }

    async fn clear_seat(&self, guest_id: GuestId) -> AppResult<Option<Guest>> {
        with_retry(&self.retry, "clear_seat", || self.guests.clear_seat(guest_id)).await
    }

    async fn remove_table(&self, id: TableId) -> AppResult<Option<u64>> {
        with_retry(&self.retry, "remove_table", || {
            self.tables.delete_with_unassign(id)
        })
        .await
    }
}
