//! Seat assignment service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use wedplan_core::error::AppError;
use wedplan_core::redact::mask_name;
use wedplan_core::result::AppResult;
use wedplan_core::types::{GuestId, TableId};
use wedplan_entity::guest::Guest;
use wedplan_seating::SeatAllocator;

use crate::audit::{SeatingAudit, actions};
use crate::context::RequestContext;

use super::chart::SeatingChart;

/// Caller-facing seat assignment operations.
#[derive(Debug, Clone)]
pub struct SeatingService {
    /// Seat allocator (sole writer of seat indices).
    allocator: Arc<SeatAllocator>,
    /// Audit trail.
    audit: Arc<SeatingAudit>,
}

impl SeatingService {
    /// Creates a new seating service.
    pub fn new(allocator: Arc<SeatAllocator>, audit: Arc<SeatingAudit>) -> Self {
        Self { allocator, audit }
    }

    /// Seats a guest at the lowest free seat of a table.
    pub async fn assign_to_table(
        &self,
        ctx: &RequestContext,
        guest_id: GuestId,
        table_id: TableId,
    ) -> AppResult<Guest> {
        let guest = self
            .allocator
            .assign_to_table(guest_id, table_id)
            .await
            .inspect_err(|e| log_rejection(e, guest_id, table_id))?;
        self.record_assignment(ctx, &guest, "auto").await;
        Ok(guest)
    }

    /// Seats a guest at a specific seat.
    pub async fn assign_to_seat(
        &self,
        ctx: &RequestContext,
        guest_id: GuestId,
        table_id: TableId,
        seat_index: i32,
    ) -> AppResult<Guest> {
        let guest = self
            .allocator
            .assign_guest_to_seat(guest_id, table_id, seat_index)
            .await
            .inspect_err(|e| log_rejection(e, guest_id, table_id))?;
        self.record_assignment(ctx, &guest, "direct").await;
        Ok(guest)
    }

    /// Clears a guest's seat. Unassigning an unseated guest succeeds.
    pub async fn unassign(&self, ctx: &RequestContext, guest_id: GuestId) -> AppResult<Guest> {
        let guest = self.allocator.unassign_guest(guest_id).await?;
        self.audit
            .record(
                ctx,
                actions::SEAT_UNASSIGN,
                "guest",
                Some(guest_id.into_uuid()),
                Some(json!({ "guest": mask_name(&guest.name) })),
            )
            .await;
        Ok(guest)
    }

    /// Full seating chart.
    pub async fn chart(&self) -> AppResult<SeatingChart> {
        let ledger = self.allocator.ledger();
        let tables = ledger.list_tables().await?;
        let guests = ledger.list_guests().await?;
        Ok(SeatingChart::build(tables, &guests))
    }

    async fn record_assignment(&self, ctx: &RequestContext, guest: &Guest, mode: &str) {
        let masked = mask_name(&guest.name);
        info!(
            guest = %masked,
            table_id = ?guest.table_id,
            seat = ?guest.seat_index,
            mode = %mode,
            "Seat assignment recorded"
        );
        self.audit
            .record(
                ctx,
                actions::SEAT_ASSIGN,
                "guest",
                Some(guest.id.into_uuid()),
                Some(json!({
                    "guest": masked,
                    "table_id": guest.table_id,
                    "seat_index": guest.seat_index,
                    "mode": mode,
                })),
            )
            .await;
    }
}

fn log_rejection(err: &AppError, guest_id: GuestId, table_id: TableId) {
    if err.kind.is_seating_rule() {
        info!(
            guest_id = %guest_id,
            table_id = %table_id,
            reason = %err.kind,
            "Seat assignment rejected"
        );
    }
}

#[cfg(test)]
mod tests {
    use wedplan_core::error::ErrorKind;
    use wedplan_entity::guest::{CreateGuest, RsvpStatus};
    use wedplan_entity::table::CreateTable;
    use wedplan_seating::{MemorySeatLedger, SeatLedger};

    use super::*;

    async fn service() -> (SeatingService, Arc<MemorySeatLedger>) {
        let ledger = Arc::new(MemorySeatLedger::new());
        let allocator = Arc::new(SeatAllocator::new(ledger.clone()));
        let svc = SeatingService::new(allocator, Arc::new(SeatingAudit::log_only()));
        (svc, ledger)
    }

    #[tokio::test]
    async fn test_assign_and_chart() {
        let (svc, ledger) = service().await;
        let ctx = RequestContext::system("test");
        let table = ledger
            .create_table(CreateTable {
                name: "Family".into(),
                seat_count: 2,
                notes: None,
                is_head: true,
            })
            .await
            .unwrap();
        let guest = ledger
            .create_guest(CreateGuest {
                name: "Ada Lovelace".into(),
                email: None,
                rsvp_status: RsvpStatus::Confirmed,
                dietary_notes: None,
            })
            .await
            .unwrap();

        let seated = svc.assign_to_table(&ctx, guest.id, table.id).await.unwrap();
        assert_eq!(seated.seat_index, Some(0));

        let chart = svc.chart().await.unwrap();
        assert_eq!(chart.tables.len(), 1);
        assert_eq!(chart.tables[0].occupancy.assigned_count, 1);
        assert!(chart.unassigned.is_empty());

        let err = svc.assign_to_seat(&ctx, guest.id, table.id, 2).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfRange);

        svc.unassign(&ctx, guest.id).await.unwrap();
        let chart = svc.chart().await.unwrap();
        assert_eq!(chart.unassigned.len(), 1);
    }
}
