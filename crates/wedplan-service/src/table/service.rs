//! Table CRUD, capacity queries, and the delete cascade.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use wedplan_core::error::AppError;
use wedplan_core::result::AppResult;
use wedplan_core::types::TableId;
use wedplan_entity::table::{CreateTable, Table, UpdateTable};
use wedplan_seating::{Occupancy, SeatAllocator, SeatLedger};

use crate::audit::{SeatingAudit, actions};
use crate::context::RequestContext;

/// Largest table the planner accepts.
pub const MAX_SEATS_PER_TABLE: i32 = 100;

/// A table together with its current occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    /// The table.
    #[serde(flatten)]
    pub table: Table,
    /// Occupancy at read time.
    pub occupancy: Occupancy,
}

/// Manages reception tables.
#[derive(Debug, Clone)]
pub struct TableService {
    ledger: Arc<dyn SeatLedger>,
    allocator: Arc<SeatAllocator>,
    audit: Arc<SeatingAudit>,
}

impl TableService {
    /// Creates a new table service.
    pub fn new(allocator: Arc<SeatAllocator>, audit: Arc<SeatingAudit>) -> Self {
        Self {
            ledger: allocator.ledger().clone(),
            allocator,
            audit,
        }
    }

    /// Lists all tables with occupancy, head table first.
    pub async fn list_tables(&self) -> AppResult<Vec<TableSummary>> {
        let tables = self.ledger.list_tables().await?;
        let guests = self.ledger.list_guests().await?;
        Ok(tables
            .into_iter()
            .map(|table| TableSummary {
                occupancy: Occupancy::of(&table, &guests),
                table,
            })
            .collect())
    }

    /// Gets one table with occupancy.
    pub async fn get_table(&self, id: TableId) -> AppResult<TableSummary> {
        let table = self.require_table(id).await?;
        let guests = self.ledger.guests_at_table(id).await?;
        Ok(TableSummary {
            occupancy: Occupancy::of(&table, &guests),
            table,
        })
    }

    /// Creates a table. Marking it as head table demotes the current one.
    pub async fn create_table(&self, ctx: &RequestContext, mut data: CreateTable) -> AppResult<Table> {
        data.name = validate_name(&data.name)?;
        validate_seat_count(data.seat_count)?;

        let table = self.ledger.create_table(data).await?;
        info!(table_id = %table.id, seats = table.seat_count, head = table.is_head, "Table created");
        self.audit
            .record(
                ctx,
                actions::TABLE_CREATE,
                "table",
                Some(table.id.into_uuid()),
                Some(json!({ "name": table.name, "seat_count": table.seat_count })),
            )
            .await;
        Ok(table)
    }

    /// Applies a partial update.
    ///
    /// Shrinking a table fails with `Conflict` while any guest sits at a
    /// seat that would disappear, or while more guests are assigned than the
    /// new size allows. The ledger checks this atomically with the write.
    pub async fn update_table(
        &self,
        ctx: &RequestContext,
        id: TableId,
        mut data: UpdateTable,
    ) -> AppResult<Table> {
        if let Some(name) = &data.name {
            data.name = Some(validate_name(name)?);
        }

        if let Some(seat_count) = data.seat_count {
            validate_seat_count(seat_count)?;
        }

        let table = self
            .ledger
            .update_table(id, data.clone())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
        self.audit
            .record(
                ctx,
                actions::TABLE_UPDATE,
                "table",
                Some(id.into_uuid()),
                Some(serde_json::to_value(&data)?),
            )
            .await;
        Ok(table)
    }

    /// Unassigns every guest at the table, then deletes it. Returns the
    /// number of guests unassigned.
    pub async fn delete_table(&self, ctx: &RequestContext, id: TableId) -> AppResult<u64> {
        let cleared = self.allocator.delete_table(id).await?;
        self.audit
            .record(
                ctx,
                actions::TABLE_DELETE,
                "table",
                Some(id.into_uuid()),
                Some(json!({ "unassigned": cleared })),
            )
            .await;
        Ok(cleared)
    }

    /// Current occupancy of a table.
    pub async fn occupancy(&self, id: TableId) -> AppResult<Occupancy> {
        self.allocator.occupancy(id).await
    }

    /// Lowest free seat, or `None` if the table is full.
    pub async fn first_free_seat(&self, id: TableId) -> AppResult<Option<i32>> {
        self.allocator.first_free_seat(id).await
    }

    async fn require_table(&self, id: TableId) -> AppResult<Table> {
        self.ledger
            .find_table(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Table name must not be empty"));
    }
    Ok(name.to_string())
}

fn validate_seat_count(seat_count: i32) -> AppResult<()> {
    if !(1..=MAX_SEATS_PER_TABLE).contains(&seat_count) {
        return Err(AppError::validation(format!(
            "Seat count must be between 1 and {MAX_SEATS_PER_TABLE}, got {seat_count}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use wedplan_core::error::ErrorKind;
    use wedplan_entity::guest::{CreateGuest, RsvpStatus};
    use wedplan_seating::MemorySeatLedger;

    use super::*;

    struct Fixture {
        tables: TableService,
        allocator: Arc<SeatAllocator>,
        ledger: Arc<MemorySeatLedger>,
        ctx: RequestContext,
    }

    fn fixture() -> Fixture {
        let ledger = Arc::new(MemorySeatLedger::new());
        let allocator = Arc::new(SeatAllocator::new(ledger.clone()));
        Fixture {
            tables: TableService::new(allocator.clone(), Arc::new(SeatingAudit::log_only())),
            allocator,
            ledger,
            ctx: RequestContext::system("test"),
        }
    }

    fn table(name: &str, seats: i32) -> CreateTable {
        CreateTable {
            name: name.into(),
            seat_count: seats,
            notes: None,
            is_head: false,
        }
    }

    async fn seated_guest(f: &Fixture, table_id: TableId, seat: i32) {
        let g = f
            .ledger
            .create_guest(CreateGuest {
                name: format!("Guest {seat}"),
                email: None,
                rsvp_status: RsvpStatus::Confirmed,
                dietary_notes: None,
            })
            .await
            .unwrap();
        f.allocator.assign_guest_to_seat(g.id, table_id, seat).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_validation() {
        let f = fixture();
        for (name, seats) in [("", 4), ("T", 0), ("T", -2), ("T", MAX_SEATS_PER_TABLE + 1)] {
            let err = f.tables.create_table(&f.ctx, table(name, seats)).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }

    #[tokio::test]
    async fn test_shrink_below_occupied_seat_conflicts() {
        let f = fixture();
        let t = f.tables.create_table(&f.ctx, table("T1", 8)).await.unwrap();
        seated_guest(&f, t.id, 5).await;

        let shrink = |n| UpdateTable {
            seat_count: Some(n),
            ..Default::default()
        };
        let err = f.tables.update_table(&f.ctx, t.id, shrink(4)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let updated = f.tables.update_table(&f.ctx, t.id, shrink(6)).await.unwrap();
        assert_eq!(updated.seat_count, 6);
    }

    #[tokio::test]
    async fn test_list_includes_occupancy() {
        let f = fixture();
        let t = f.tables.create_table(&f.ctx, table("T1", 3)).await.unwrap();
        seated_guest(&f, t.id, 0).await;
        seated_guest(&f, t.id, 2).await;

        let list = f.tables.list_tables().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].occupancy.assigned_count, 2);
        assert_eq!(list[0].occupancy.free_seats, 1);
        assert_eq!(f.tables.first_free_seat(t.id).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_delete_reports_unassigned() {
        let f = fixture();
        let t = f.tables.create_table(&f.ctx, table("T1", 3)).await.unwrap();
        seated_guest(&f, t.id, 0).await;
        seated_guest(&f, t.id, 1).await;

        assert_eq!(f.tables.delete_table(&f.ctx, t.id).await.unwrap(), 2);
        let err = f.tables.get_table(t.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(f.ledger.list_guests().await.unwrap().iter().all(|g| !g.is_assigned()));
    }
}
