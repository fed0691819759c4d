//! Table entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use wedplan_core::error::AppError;
use wedplan_core::result::AppResult;
use wedplan_core::types::TableId;

/// A reception table. Occupancy is never stored here; it is always derived
/// from the guests whose `table_id` points at this table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Table {
    /// Unique table identifier.
    pub id: TableId,
    /// Display name (e.g. "Table 4" or "Family").
    pub name: String,
    /// Total number of seats. Always positive.
    pub seat_count: i32,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Whether this is the designated head table.
    pub is_head: bool,
    /// When the table was created.
    pub created_at: DateTime<Utc>,
    /// When the table was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Table {
    /// Build a table from a create payload.
    pub fn from_create(id: TableId, data: CreateTable, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name,
            seat_count: data.seat_count,
            notes: data.notes,
            is_head: data.is_head,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `seat_index` addresses a seat at this table.
    pub fn contains_seat(&self, seat_index: i32) -> bool {
        (0..self.seat_count).contains(&seat_index)
    }

    /// Rejects a resize that would leave an assigned guest without a seat.
    /// `highest_seat` is the largest occupied seat index at the table and
    /// `assigned` the number of guests referencing it.
    pub fn check_resize(
        &self,
        new_seat_count: i32,
        highest_seat: Option<i32>,
        assigned: i64,
    ) -> AppResult<()> {
        if let Some(highest) = highest_seat.filter(|&h| h >= new_seat_count) {
            return Err(AppError::conflict(format!(
                "Seat {highest} at table '{}' is occupied; unassign it before shrinking to {new_seat_count} seats",
                self.name
            )));
        }
        if assigned > i64::from(new_seat_count) {
            return Err(AppError::conflict(format!(
                "Table '{}' has {assigned} guests assigned, more than {new_seat_count} seats",
                self.name
            )));
        }
        Ok(())
    }
}

/// Data required to create a new table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTable {
    /// Display name.
    pub name: String,
    /// Number of seats.
    pub seat_count: i32,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Mark as head table.
    #[serde(default)]
    pub is_head: bool,
}

/// Partial update for a table. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTable {
    /// New display name.
    pub name: Option<String>,
    /// New seat count.
    pub seat_count: Option<i32>,
    /// New notes. An empty string clears them.
    pub notes: Option<String>,
    /// Set or clear the head-table flag.
    pub is_head: Option<bool>,
}

impl UpdateTable {
    /// Apply this update to a table in place.
    pub fn apply_to(&self, table: &mut Table) {
        if let Some(name) = &self.name {
            table.name = name.clone();
        }
        if let Some(seat_count) = self.seat_count {
            table.seat_count = seat_count;
        }
        if let Some(notes) = &self.notes {
            table.notes = (!notes.trim().is_empty()).then(|| notes.clone());
        }
        if let Some(is_head) = self.is_head {
            table.is_head = is_head;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(seats: i32) -> Table {
        Table::from_create(
            TableId::new(),
            CreateTable {
                name: "Table 1".into(),
                seat_count: seats,
                notes: None,
                is_head: false,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_contains_seat_bounds() {
        let t = table(4);
        assert!(t.contains_seat(0));
        assert!(t.contains_seat(3));
        assert!(!t.contains_seat(4));
        assert!(!t.contains_seat(-1));
    }

    #[test]
    fn test_update_apply_partial() {
        let mut t = table(8);
        UpdateTable {
            seat_count: Some(10),
            is_head: Some(true),
            ..Default::default()
        }
        .apply_to(&mut t);
        assert_eq!(t.seat_count, 10);
        assert!(t.is_head);
        assert_eq!(t.name, "Table 1");
    }

    #[test]
    fn test_empty_notes_clear() {
        let mut t = table(4);
        let notes = |n: &str| UpdateTable {
            notes: Some(n.into()),
            ..Default::default()
        };
        notes("Near the stage").apply_to(&mut t);
        assert_eq!(t.notes.as_deref(), Some("Near the stage"));

        UpdateTable::default().apply_to(&mut t);
        assert_eq!(t.notes.as_deref(), Some("Near the stage"));

        notes("  ").apply_to(&mut t);
        assert_eq!(t.notes, None);
    }

    #[test]
    fn test_check_resize() {
        let t = table(8);
        assert!(t.check_resize(4, Some(3), 4).is_ok());
        assert!(t.check_resize(4, None, 0).is_ok());
        assert_eq!(
            t.check_resize(4, Some(5), 1).unwrap_err().kind,
            wedplan_core::error::ErrorKind::Conflict
        );
        assert_eq!(
            t.check_resize(2, Some(1), 3).unwrap_err().kind,
            wedplan_core::error::ErrorKind::Conflict
        );
    }
}
