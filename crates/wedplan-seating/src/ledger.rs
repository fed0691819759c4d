//! Seat ledger trait.

use async_trait::async_trait;

use wedplan_core::result::AppResult;
use wedplan_core::types::{GuestId, TableId};
use wedplan_entity::guest::{CreateGuest, Guest, RsvpStatus};
use wedplan_entity::table::{CreateTable, Table, UpdateTable};

/// Storage for guests and tables, including the seat assignment fields.
///
/// Implementations hold no derived occupancy state: every read reflects the
/// backing store at call time. Lookups of missing records return `Ok(None)`
/// rather than an error so callers decide how to report them.
#[async_trait]
pub trait SeatLedger: Send + Sync + std::fmt::Debug {
    /// Find a guest by ID.
    async fn find_guest(&self, id: GuestId) -> AppResult<Option<Guest>>;

    /// List all guests, ordered by name.
    async fn list_guests(&self) -> AppResult<Vec<Guest>>;

    /// Guests whose table reference equals `table_id`, ordered by seat
    /// index with seatless assignments last.
    async fn guests_at_table(&self, table_id: TableId) -> AppResult<Vec<Guest>>;

    /// Create an unassigned guest.
    async fn create_guest(&self, data: CreateGuest) -> AppResult<Guest>;

    /// Change a guest's RSVP status.
    async fn update_rsvp(&self, id: GuestId, status: RsvpStatus) -> AppResult<Option<Guest>>;

    /// Delete a guest. Returns `true` if the guest existed.
    async fn delete_guest(&self, id: GuestId) -> AppResult<bool>;

    /// Guest counts per RSVP status. Statuses with no guests may be omitted.
    async fn count_by_rsvp(&self) -> AppResult<Vec<(RsvpStatus, i64)>>;

    /// Find a table by ID.
    async fn find_table(&self, id: TableId) -> AppResult<Option<Table>>;

    /// List all tables, head table first, then by name.
    async fn list_tables(&self) -> AppResult<Vec<Table>>;

    /// Create a table. Flagging it as head table clears the flag elsewhere.
    async fn create_table(&self, data: CreateTable) -> AppResult<Table>;

    /// Apply a partial update. Setting `is_head` clears the flag elsewhere.
    async fn update_table(&self, id: TableId, data: UpdateTable) -> AppResult<Option<Table>>;

    /// Write `(table_id, seat_index)` onto a guest.
    ///
    /// Fails with `SeatTaken` if another guest already holds the seat and
    /// with `NotFound` if the table does not exist. Returns `Ok(None)` if
    /// the guest does not exist.
    async fn write_seat(
        &self,
        guest_id: GuestId,
        table_id: TableId,
        seat_index: i32,
    ) -> AppResult<Option<Guest>>;

    /// Clear a guest's table reference and seat index.
    async fn clear_seat(&self, guest_id: GuestId) -> AppResult<Option<Guest>>;

    /// Unassign every guest at the table, then delete it, atomically.
    /// Returns the number of guests unassigned, or `None` if no such table.
    async fn remove_table(&self, id: TableId) -> AppResult<Option<u64>>;
}
