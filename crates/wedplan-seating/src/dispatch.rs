//! Ledger backend selection.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use wedplan_core::config::{LedgerBackend, SeatingConfig};
use wedplan_core::error::AppError;
use wedplan_core::result::AppResult;
use wedplan_core::types::{GuestId, TableId};
use wedplan_entity::guest::{CreateGuest, Guest, RsvpStatus};
use wedplan_entity::table::{CreateTable, Table, UpdateTable};

use crate::ledger::SeatLedger;
use crate::memory::MemorySeatLedger;
use crate::postgres::PostgresSeatLedger;

/// Dispatcher for seat ledger backends.
///
/// Switches between the in-memory and PostgreSQL ledgers based on
/// `seating.ledger` in the configuration.
#[derive(Debug, Clone)]
pub enum SeatLedgerDispatch {
    /// In-memory ledger (single node, tests).
    Memory(MemorySeatLedger),
    /// PostgreSQL ledger.
    Postgres(PostgresSeatLedger),
}

impl SeatLedgerDispatch {
    /// Builds the configured backend. The PostgreSQL backend needs a pool.
    pub fn from_config(config: &SeatingConfig, pool: Option<PgPool>) -> AppResult<Self> {
        match (config.ledger, pool) {
            (LedgerBackend::Memory, _) => {
                info!("Using in-memory seat ledger");
                Ok(Self::Memory(MemorySeatLedger::new()))
            }
            (LedgerBackend::Postgres, Some(pool)) => {
                info!("Using PostgreSQL seat ledger");
                Ok(Self::Postgres(PostgresSeatLedger::new(
                    pool,
                    config.retry.clone(),
                )))
            }
            (LedgerBackend::Postgres, None) => Err(AppError::configuration(
                "PostgreSQL seat ledger selected but no database pool is available",
            )),
        }
    }

    /// Name of the active backend, for logs and health output.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

#[async_trait]
impl SeatLedger for SeatLedgerDispatch {
    async fn find_guest(&self, id: GuestId) -> AppResult<Option<Guest>> {
        match self {
            Self::Memory(inner) => inner.find_guest(id).await,
            Self::Postgres(inner) => inner.find_guest(id).await,
        }
    }

    async fn list_guests(&self) -> AppResult<Vec<Guest>> {
        match self {
            Self::Memory(inner) => inner.list_guests().await,
            Self::Postgres(inner) => inner.list_guests().await,
        }
    }

    async fn guests_at_table(&self, table_id: TableId) -> AppResult<Vec<Guest>> {
        match self {
            Self::Memory(inner) => inner.guests_at_table(table_id).await,
            Self::Postgres(inner) => inner.guests_at_table(table_id).await,
        }
    }

    async fn create_guest(&self, data: CreateGuest) -> AppResult<Guest> {
        match self {
            Self::Memory(inner) => inner.create_guest(data).await,
            Self::Postgres(inner) => inner.create_guest(data).await,
        }
    }

    async fn update_rsvp(&self, id: GuestId, status: RsvpStatus) -> AppResult<Option<Guest>> {
        match self {
            Self::Memory(inner) => inner.update_rsvp(id, status).await,
            Self::Postgres(inner) => inner.update_rsvp(id, status).await,
        }
    }

    async fn delete_guest(&self, id: GuestId) -> AppResult<bool> {
        match self {
            Self::Memory(inner) => inner.delete_guest(id).await,
            Self::Postgres(inner) => inner.delete_guest(id).await,
        }
    }

    async fn count_by_rsvp(&self) -> AppResult<Vec<(RsvpStatus, i64)>> {
        match self {
            Self::Memory(inner) => inner.count_by_rsvp().await,
            Self::Postgres(inner) => inner.count_by_rsvp().await,
        }
    }

    async fn find_table(&self, id: TableId) -> AppResult<Option<Table>> {
        match self {
            Self::Memory(inner) => inner.find_table(id).await,
            Self::Postgres(inner) => inner.find_table(id).await,
        }
    }

    async fn list_tables(&self) -> AppResult<Vec<Table>> {
        match self {
            Self::Memory(inner) => inner.list_tables().await,
            Self::Postgres(inner) => inner.list_tables().await,
        }
    }

    async fn create_table(&self, data: CreateTable) -> AppResult<Table> {
        match self {
            Self::Memory(inner) => inner.create_table(data).await,
            Self::Postgres(inner) => inner.create_table(data).await,
        }
    }

    async fn update_table(&self, id: TableId, data: UpdateTable) -> AppResult<Option<Table>> {
        match self {
            Self::Memory(inner) => inner.update_table(id, data).await,
            Self::Postgres(inner) => inner.update_table(id, data).await,
        }
    }

    async fn write_seat(
        &self,
        guest_id: GuestId,
        table_id: TableId,
        seat_index: i32,
    ) -> AppResult<Option<Guest>> {
        match self {
            Self::Memory(inner) => inner.write_seat(guest_id, table_id, seat_index).await,
            Self::Postgres(inner) => inner.write_seat(guest_id, table_id, seat_index).await,
        }
    }

    async fn clear_seat(&self, guest_id: GuestId) -> AppResult<Option<Guest>> {
        match self {
            Self::Memory(inner) => inner.clear_seat(guest_id).await,
            Self::Postgres(inner) => inner.clear_seat(guest_id).await,
        }
    }

    async fn remove_table(&self, id: TableId) -> AppResult<Option<u64>> {
        match self {
            Self::Memory(inner) => inner.remove_table(id).await,
            Self::Postgres(inner) => inner.remove_table(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wedplan_core::error::ErrorKind;

    #[test]
    fn test_memory_backend_needs_no_pool() {
        let config = SeatingConfig {
            ledger: LedgerBackend::Memory,
            ..Default::default()
        };
        let ledger = SeatLedgerDispatch::from_config(&config, None).unwrap();
        assert_eq!(ledger.backend_name(), "memory");
    }

    #[test]
    fn test_postgres_backend_requires_pool() {
        let config = SeatingConfig::default();
        let err = SeatLedgerDispatch::from_config(&config, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
