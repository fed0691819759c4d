//! Capacity resolution: occupancy of a table derived from the guest ledger.

use serde::{Deserialize, Serialize};

use wedplan_core::types::TableId;
use wedplan_entity::guest::Guest;
use wedplan_entity::table::Table;

/// Occupancy snapshot for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    /// Total seats at the table.
    pub seat_count: i32,
    /// Guests whose table reference points at the table, seated or not.
    pub assigned_count: i32,
    /// Remaining seats, clamped at zero.
    pub free_seats: i32,
    /// Whether no seat remains.
    pub is_full: bool,
}

impl Occupancy {
    /// Computes occupancy of `table` from any guest collection. Guests at
    /// other tables are ignored, so the full guest list may be passed.
    pub fn of<'a, I>(table: &Table, guests: I) -> Self
    where
        I: IntoIterator<Item = &'a Guest>,
    {
        Self::resolve(table.id, table.seat_count, guests)
    }

    /// Computes occupancy for a table identifier and seat count. An unknown
    /// identifier matches no guest and yields an assigned count of zero.
    pub fn resolve<'a, I>(table_id: TableId, seat_count: i32, guests: I) -> Self
    where
        I: IntoIterator<Item = &'a Guest>,
    {
        let assigned = guests
            .into_iter()
            .filter(|g| g.is_at_table(table_id))
            .count();
        let assigned_count = i32::try_from(assigned).unwrap_or(i32::MAX);
        let free_seats = seat_count.saturating_sub(assigned_count).max(0);

        Self {
            seat_count,
            assigned_count,
            free_seats,
            is_full: free_seats == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use wedplan_core::types::GuestId;
    use wedplan_entity::guest::{CreateGuest, RsvpStatus};
    use wedplan_entity::table::CreateTable;

    use super::*;

    fn table(seats: i32) -> Table {
        Table::from_create(
            TableId::new(),
            CreateTable {
                name: "T".into(),
                seat_count: seats,
                notes: None,
                is_head: false,
            },
            Utc::now(),
        )
    }

    fn guest_at(table_id: Option<TableId>, seat: Option<i32>) -> Guest {
        let mut guest = Guest::from_create(
            GuestId::new(),
            CreateGuest {
                name: "G".into(),
                email: None,
                rsvp_status: RsvpStatus::Confirmed,
                dietary_notes: None,
            },
            Utc::now(),
        );
        guest.table_id = table_id;
        guest.seat_index = seat;
        guest
    }

    #[test]
    fn test_counts_only_guests_at_table() {
        let t = table(4);
        let other = table(4);
        let guests = vec![
            guest_at(Some(t.id), Some(0)),
            guest_at(Some(t.id), None),
            guest_at(Some(other.id), Some(0)),
            guest_at(None, None),
        ];
        let occ = Occupancy::of(&t, &guests);
        assert_eq!(occ.assigned_count, 2);
        assert_eq!(occ.free_seats, 2);
        assert!(!occ.is_full);
    }

    #[test]
    fn test_over_capacity_never_negative() {
        let t = table(1);
        let guests = vec![guest_at(Some(t.id), Some(0)), guest_at(Some(t.id), None)];
        let occ = Occupancy::of(&t, &guests);
        assert_eq!(occ.assigned_count, 2);
        assert_eq!(occ.free_seats, 0);
        assert!(occ.is_full);
    }

    #[test]
    fn test_unknown_table_is_empty() {
        let guests = vec![guest_at(Some(TableId::new()), Some(0))];
        let occ = Occupancy::resolve(TableId::new(), 6, &guests);
        assert_eq!(occ.assigned_count, 0);
        assert_eq!(occ.free_seats, 6);
    }
}
