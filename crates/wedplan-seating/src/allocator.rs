//! The seat allocator: the only code path that writes seat indices.

use std::sync::Arc;

use tracing::{debug, info};

use wedplan_core::error::{AppError, ErrorKind};
use wedplan_core::result::AppResult;
use wedplan_core::types::{GuestId, TableId};
use wedplan_entity::guest::{Guest, RsvpStatus};
use wedplan_entity::table::Table;

use crate::capacity::Occupancy;
use crate::finder;
use crate::ledger::SeatLedger;

/// How often automatic placement re-runs the search after losing a seat to
/// a concurrent writer.
const AUTO_SEAT_ATTEMPTS: usize = 3;

/// Validates and applies seat assignments against a [`SeatLedger`].
#[derive(Debug, Clone)]
pub struct SeatAllocator {
    ledger: Arc<dyn SeatLedger>,
}

impl SeatAllocator {
    /// Creates an allocator over the given ledger.
    pub fn new(ledger: Arc<dyn SeatLedger>) -> Self {
        Self { ledger }
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &Arc<dyn SeatLedger> {
        &self.ledger
    }

    /// Places a guest at a specific seat.
    ///
    /// Checks run in a fixed order, each with its own error kind:
    /// unknown table or guest (`NotFound`), seat outside the table
    /// (`OutOfRange`), seat held by someone else (`SeatTaken`), declined
    /// guest (`GuestDeclined`). The occupant check re-reads the ledger at
    /// call time. Re-assigning a guest to the seat they already hold
    /// succeeds and leaves the ledger unchanged.
    pub async fn assign_guest_to_seat(
        &self,
        guest_id: GuestId,
        table_id: TableId,
        seat_index: i32,
    ) -> AppResult<Guest> {
        let table = self.require_table(table_id).await?;
        let guest = self.require_guest(guest_id).await?;

        if !table.contains_seat(seat_index) {
            return Err(AppError::out_of_range(format!(
                "Seat {seat_index} is outside table '{}' (seats 0..{})",
                table.name, table.seat_count
            )));
        }

        let occupants = self.ledger.guests_at_table(table_id).await?;
        if let Some(holder) = occupants
            .iter()
            .find(|g| g.seat_index == Some(seat_index) && g.id != guest_id)
        {
            debug!(seat = seat_index, holder = %holder.id, "Seat already held");
            return Err(AppError::seat_taken(format!(
                "Seat {seat_index} at table '{}' is already taken",
                table.name
            )));
        }

        if guest.rsvp_status == RsvpStatus::Declined {
            return Err(AppError::guest_declined(format!(
                "Guest {guest_id} has declined and cannot be seated"
            )));
        }

        if guest.seat() == Some((table_id, seat_index)) {
            return Ok(guest);
        }

        let seated = self
            .ledger
            .write_seat(guest_id, table_id, seat_index)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest {guest_id} not found")))?;

        info!(
            guest_id = %guest_id,
            table_id = %table_id,
            seat = seat_index,
            "Guest seated"
        );
        Ok(seated)
    }

    /// Places a guest at the lowest free seat of a table.
    ///
    /// Fails with `GuestDeclined` for a declined guest, even one still
    /// holding a seat, and with `TableFull` when no seat is free. Any other
    /// guest already holding a seat at this table keeps it. If a concurrent
    /// writer takes the chosen seat first, the search is repeated a bounded
    /// number of times.
    pub async fn assign_to_table(&self, guest_id: GuestId, table_id: TableId) -> AppResult<Guest> {
        let table = self.require_table(table_id).await?;
        let guest = self.require_guest(guest_id).await?;

        if guest.rsvp_status == RsvpStatus::Declined {
            return Err(AppError::guest_declined(format!(
                "Guest {guest_id} has declined and cannot be seated"
            )));
        }
        if guest.is_at_table(table_id) && guest.seat_index.is_some() {
            return Ok(guest);
        }

        let mut last_err = None;
        for _ in 0..AUTO_SEAT_ATTEMPTS {
            let Some(seat) =
                finder::find_first_free_seat(self.ledger.as_ref(), table_id, table.seat_count)
                    .await?
            else {
                return Err(AppError::table_full(format!(
                    "Table '{}' has no free seat",
                    table.name
                )));
            };

            match self.assign_guest_to_seat(guest_id, table_id, seat).await {
                Err(err) if err.kind == ErrorKind::SeatTaken => {
                    debug!(seat = seat, "Lost seat to concurrent assignment, searching again");
                    last_err = Some(err);
                }
                other => return other,
            }
        }

        Err(last_err.unwrap_or_else(|| {
            AppError::seat_taken(format!("No seat could be claimed at table '{}'", table.name))
        }))
    }

    /// Clears a guest's table reference and seat index.
    ///
    /// Idempotent: an unassigned guest is returned unchanged.
    pub async fn unassign_guest(&self, guest_id: GuestId) -> AppResult<Guest> {
        let guest = self
            .ledger
            .clear_seat(guest_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest {guest_id} not found")))?;
        info!(guest_id = %guest_id, "Guest unassigned");
        Ok(guest)
    }

    /// Unassigns every guest at the table and deletes it. Returns the
    /// number of guests that were unassigned.
    pub async fn delete_table(&self, table_id: TableId) -> AppResult<u64> {
        let cleared = self
            .ledger
            .remove_table(table_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {table_id} not found")))?;
        info!(table_id = %table_id, unassigned = cleared, "Table deleted");
        Ok(cleared)
    }

    /// Current occupancy of a table.
    pub async fn occupancy(&self, table_id: TableId) -> AppResult<Occupancy> {
        let table = self.require_table(table_id).await?;
        let guests = self.ledger.guests_at_table(table_id).await?;
        Ok(Occupancy::of(&table, &guests))
    }

    /// Lowest free seat at a table, or `None` if it is full.
    pub async fn first_free_seat(&self, table_id: TableId) -> AppResult<Option<i32>> {
        let table = self.require_table(table_id).await?;
        finder::find_first_free_seat(self.ledger.as_ref(), table_id, table.seat_count).await
    }

    async fn require_table(&self, table_id: TableId) -> AppResult<Table> {
        self.ledger
            .find_table(table_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {table_id} not found")))
    }

    async fn require_guest(&self, guest_id: GuestId) -> AppResult<Guest> {
        self.ledger
            .find_guest(guest_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest {guest_id} not found")))
    }
}
