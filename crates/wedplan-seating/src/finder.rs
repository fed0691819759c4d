//! First-free-seat search.

use std::collections::HashSet;

use wedplan_core::result::AppResult;
use wedplan_core::types::TableId;

use crate::ledger::SeatLedger;

/// Lowest seat index in `0..total_seats` not present in `occupied`.
///
/// `None` entries stand for guests assigned to the table without a specific
/// seat and occupy nothing. Returns `None` when every seat is taken.
pub fn first_free_seat<I>(occupied: I, total_seats: i32) -> Option<i32>
where
    I: IntoIterator<Item = Option<i32>>,
{
    let taken: HashSet<i32> = occupied.into_iter().flatten().collect();
    (0..total_seats).find(|seat| !taken.contains(seat))
}

/// Reads current occupancy of `table_id` from the ledger and returns the
/// lowest free seat index, or `None` if the table is full.
pub async fn find_first_free_seat<L>(
    ledger: &L,
    table_id: TableId,
    total_seats: i32,
) -> AppResult<Option<i32>>
where
    L: SeatLedger + ?Sized,
{
    let guests = ledger.guests_at_table(table_id).await?;
    Ok(first_free_seat(
        guests.iter().map(|g| g.seat_index),
        total_seats,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_gap() {
        assert_eq!(first_free_seat([Some(0), Some(1), Some(3)], 4), Some(2));
        assert_eq!(first_free_seat([Some(2), Some(0)], 4), Some(1));
        assert_eq!(first_free_seat(Vec::new(), 4), Some(0));
    }

    #[test]
    fn test_full_table() {
        assert_eq!(first_free_seat([Some(0), Some(1), Some(2)], 3), None);
        assert_eq!(first_free_seat(Vec::new(), 0), None);
    }

    #[test]
    fn test_seatless_and_out_of_range_entries_ignored() {
        assert_eq!(first_free_seat([None, Some(0), None], 2), Some(1));
        assert_eq!(first_free_seat([Some(7), Some(0)], 2), Some(1));
    }

    #[test]
    fn test_matches_min_of_complement() {
        for n in 0..6 {
            for mask in 0u32..(1 << n) {
                let occupied: Vec<Option<i32>> =
                    (0..n).filter(|i| mask & (1 << i) != 0).map(Some).collect();
                let expected = (0..n).find(|i| mask & (1 << i) == 0);
                assert_eq!(first_free_seat(occupied, n), expected);
            }
        }
    }
}
