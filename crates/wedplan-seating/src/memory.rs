//! In-memory seat ledger using a Tokio mutex for single-node deployments
//! and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use wedplan_core::error::AppError;
use wedplan_core::result::AppResult;
use wedplan_core::types::{GuestId, TableId};
use wedplan_entity::guest::{CreateGuest, Guest, RsvpStatus};
use wedplan_entity::table::{CreateTable, Table, UpdateTable};

use crate::ledger::SeatLedger;

/// Internal state for the memory-based ledger.
#[derive(Debug, Default)]
struct InnerState {
    guests: HashMap<GuestId, Guest>,
    tables: HashMap<TableId, Table>,
}

impl InnerState {
    fn clear_head_flag(&mut self, except: Option<TableId>) {
        let now = Utc::now();
        for table in self.tables.values_mut() {
            if table.is_head && Some(table.id) != except {
                table.is_head = false;
                table.updated_at = now;
            }
        }
    }
}

/// In-memory seat ledger.
///
/// Every mutation takes the single state lock, so the seat uniqueness check
/// and the write it guards cannot interleave with another writer. The table
/// delete cascade runs under one lock scope and is therefore atomic.
#[derive(Debug, Clone, Default)]
pub struct MemorySeatLedger {
    state: Arc<Mutex<InnerState>>,
}

impl MemorySeatLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger pre-populated with existing records, e.g. from an
    /// import. Records are stored as given, including partial assignments
    /// (a table reference without a seat index).
    pub fn with_records(guests: Vec<Guest>, tables: Vec<Table>) -> Self {
        let state = InnerState {
            guests: guests.into_iter().map(|g| (g.id, g)).collect(),
            tables: tables.into_iter().map(|t| (t.id, t)).collect(),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }
}

#[async_trait]
impl SeatLedger for MemorySeatLedger {
    async fn find_guest(&self, id: GuestId) -> AppResult<Option<Guest>> {
        let state = self.state.lock().await;
        Ok(state.guests.get(&id).cloned())
    }

    async fn list_guests(&self) -> AppResult<Vec<Guest>> {
        let state = self.state.lock().await;
        let mut guests: Vec<Guest> = state.guests.values().cloned().collect();
        guests.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(guests)
    }

    async fn guests_at_table(&self, table_id: TableId) -> AppResult<Vec<Guest>> {
        let state = self.state.lock().await;
        let mut guests: Vec<Guest> = state
            .guests
            .values()
            .filter(|g| g.is_at_table(table_id))
            .cloned()
            .collect();
        // Seated first by index, seatless assignments last.
        guests.sort_by(|a, b| {
            let key = |g: &Guest| (g.seat_index.is_none(), g.seat_index);
            key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
        });
        Ok(guests)
    }

    async fn create_guest(&self, data: CreateGuest) -> AppResult<Guest> {
        let mut state = self.state.lock().await;
        let guest = Guest::from_create(GuestId::new(), data, Utc::now());
        state.guests.insert(guest.id, guest.clone());
        debug!(guest_id = %guest.id, "Guest stored");
        Ok(guest)
    }

    async fn update_rsvp(&self, id: GuestId, status: RsvpStatus) -> AppResult<Option<Guest>> {
        let mut state = self.state.lock().await;
        Ok(state.guests.get_mut(&id).map(|guest| {
            guest.rsvp_status = status;
            guest.updated_at = Utc::now();
            guest.clone()
        }))
    }

    async fn delete_guest(&self, id: GuestId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.guests.remove(&id).is_some())
    }

    async fn count_by_rsvp(&self) -> AppResult<Vec<(RsvpStatus, i64)>> {
        let state = self.state.lock().await;
        let mut counts: HashMap<RsvpStatus, i64> = HashMap::new();
        for guest in state.guests.values() {
            *counts.entry(guest.rsvp_status).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn find_table(&self, id: TableId) -> AppResult<Option<Table>> {
        let state = self.state.lock().await;
        Ok(state.tables.get(&id).cloned())
    }

    async fn list_tables(&self) -> AppResult<Vec<Table>> {
        let state = self.state.lock().await;
        let mut tables: Vec<Table> = state.tables.values().cloned().collect();
        tables.sort_by(|a, b| {
            b.is_head
                .cmp(&a.is_head)
                .then_with(|| a.name.cmp(&b.name))
                .then(a.id.cmp(&b.id))
        });
        Ok(tables)
    }

    async fn create_table(&self, data: CreateTable) -> AppResult<Table> {
        let mut state = self.state.lock().await;
        if data.is_head {
            state.clear_head_flag(None);
        }
        let table = Table::from_create(TableId::new(), data, Utc::now());
        state.tables.insert(table.id, table.clone());
        debug!(table_id = %table.id, "Table stored");
        Ok(table)
    }

    async fn update_table(&self, id: TableId, data: UpdateTable) -> AppResult<Option<Table>> {
        let mut state = self.state.lock().await;
        let Some(table) = state.tables.get(&id) else {
            return Ok(None);
        };
        if let Some(seat_count) = data.seat_count {
            let at_table = state.guests.values().filter(|g| g.is_at_table(id));
            let (highest, assigned) = at_table.fold((None, 0i64), |(highest, n), g| {
                (highest.max(g.seat_index), n + 1)
            });
            table.check_resize(seat_count, highest, assigned)?;
        }
        if data.is_head == Some(true) {
            state.clear_head_flag(Some(id));
        }
        Ok(state.tables.get_mut(&id).map(|table| {
            data.apply_to(table);
            table.updated_at = Utc::now();
            table.clone()
        }))
    }

    async fn write_seat(
        &self,
        guest_id: GuestId,
        table_id: TableId,
        seat_index: i32,
    ) -> AppResult<Option<Guest>> {
        let mut state = self.state.lock().await;

        let Some(table) = state.tables.get(&table_id) else {
            return Err(AppError::not_found(format!("Table {table_id} not found")));
        };
        if !table.contains_seat(seat_index) {
            return Err(AppError::out_of_range(format!(
                "Seat {seat_index} is outside table '{}' (seats 0..{})",
                table.name, table.seat_count
            )));
        }
        let holder = state
            .guests
            .values()
            .find(|g| g.id != guest_id && g.seat() == Some((table_id, seat_index)));
        if holder.is_some() {
            return Err(AppError::seat_taken(format!(
                "Seat {seat_index} at table {table_id} is already taken"
            )));
        }

        Ok(state.guests.get_mut(&guest_id).map(|guest| {
            guest.table_id = Some(table_id);
            guest.seat_index = Some(seat_index);
            guest.updated_at = Utc::now();
            guest.clone()
        }))
    }

    async fn clear_seat(&self, guest_id: GuestId) -> AppResult<Option<Guest>> {
        let mut state = self.state.lock().await;
        Ok(state.guests.get_mut(&guest_id).map(|guest| {
            if guest.is_assigned() || guest.seat_index.is_some() {
                guest.table_id = None;
                guest.seat_index = None;
                guest.updated_at = Utc::now();
            }
            guest.clone()
        }))
    }

    async fn remove_table(&self, id: TableId) -> AppResult<Option<u64>> {
        let mut state = self.state.lock().await;
        if state.tables.remove(&id).is_none() {
            return Ok(None);
        }

        let now = Utc::now();
        let mut cleared = 0u64;
        for guest in state.guests.values_mut().filter(|g| g.is_at_table(id)) {
            guest.table_id = None;
            guest.seat_index = None;
            guest.updated_at = now;
            cleared += 1;
        }
        Ok(Some(cleared))
    }
}
