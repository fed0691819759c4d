//! Seating chart: every table with its seats laid out, plus the guests
//! still waiting for a seat.

use serde::{Deserialize, Serialize};

use wedplan_entity::guest::Guest;
use wedplan_entity::table::Table;
use wedplan_seating::Occupancy;

/// One seat position at a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatSlot {
    /// Seat index, starting at zero.
    pub seat_index: i32,
    /// The guest holding the seat, if any.
    pub guest: Option<Guest>,
}

/// A table with its seats in index order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableChart {
    /// The table.
    pub table: Table,
    /// Occupancy derived from the guests below.
    pub occupancy: Occupancy,
    /// One slot per seat, `0..seat_count`.
    pub seats: Vec<SeatSlot>,
    /// Guests assigned to the table without a specific seat.
    pub unplaced: Vec<Guest>,
}

/// The complete seating chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatingChart {
    /// Tables, head table first.
    pub tables: Vec<TableChart>,
    /// Guests who have not declined and hold no table reference.
    pub unassigned: Vec<Guest>,
}

impl SeatingChart {
    /// Builds the chart from full table and guest listings.
    pub fn build(tables: Vec<Table>, guests: &[Guest]) -> Self {
        let tables = tables
            .into_iter()
            .map(|table| TableChart::build(table, guests))
            .collect();
        let unassigned = guests
            .iter()
            .filter(|g| !g.is_assigned() && g.rsvp_status.can_be_seated())
            .cloned()
            .collect();
        Self { tables, unassigned }
    }
}

impl TableChart {
    fn build(table: Table, guests: &[Guest]) -> Self {
        let occupancy = Occupancy::of(&table, guests);
        let at_table: Vec<&Guest> = guests.iter().filter(|g| g.is_at_table(table.id)).collect();

        let seats = (0..table.seat_count)
            .map(|seat_index| SeatSlot {
                seat_index,
                guest: at_table
                    .iter()
                    .find(|g| g.seat_index == Some(seat_index))
                    .map(|g| (*g).clone()),
            })
            .collect();
        let unplaced = at_table
            .iter()
            .filter(|g| g.seat_index.is_none())
            .map(|g| (*g).clone())
            .collect();

        Self {
            table,
            occupancy,
            seats,
            unplaced,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use wedplan_core::types::{GuestId, TableId};
    use wedplan_entity::guest::{CreateGuest, RsvpStatus};
    use wedplan_entity::table::CreateTable;

    use super::*;

    fn guest(name: &str, rsvp: RsvpStatus) -> Guest {
        Guest::from_create(
            GuestId::new(),
            CreateGuest {
                name: name.into(),
                email: None,
                rsvp_status: rsvp,
                dietary_notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_chart_layout() {
        let table = Table::from_create(
            TableId::new(),
            CreateTable {
                name: "T1".into(),
                seat_count: 3,
                notes: None,
                is_head: false,
            },
            Utc::now(),
        );
        let mut seated = guest("Ana", RsvpStatus::Confirmed);
        seated.table_id = Some(table.id);
        seated.seat_index = Some(1);
        let mut partial = guest("Ben", RsvpStatus::Confirmed);
        partial.table_id = Some(table.id);
        let waiting = guest("Cy", RsvpStatus::Pending);
        let declined = guest("Di", RsvpStatus::Declined);

        let guests = vec![seated.clone(), partial.clone(), waiting.clone(), declined];
        let chart = SeatingChart::build(vec![table], &guests);

        let t = &chart.tables[0];
        assert_eq!(t.seats.len(), 3);
        assert!(t.seats[0].guest.is_none());
        assert_eq!(t.seats[1].guest.as_ref().map(|g| g.id), Some(seated.id));
        assert_eq!(t.unplaced.len(), 1);
        assert_eq!(t.occupancy.assigned_count, 2);
        assert_eq!(chart.unassigned.len(), 1);
        assert_eq!(chart.unassigned[0].id, waiting.id);
    }
}
