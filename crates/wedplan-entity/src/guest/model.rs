//! Guest entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use wedplan_core::types::{GuestId, TableId};

use super::rsvp::RsvpStatus;

/// An invited guest. The set of guest rows is the seat ledger: a guest's
/// `table_id` / `seat_index` pair is the only record of who sits where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Guest {
    /// Unique guest identifier.
    pub id: GuestId,
    /// Display name.
    pub name: String,
    /// Contact email (optional).
    pub email: Option<String>,
    /// RSVP answer.
    pub rsvp_status: RsvpStatus,
    /// Dietary restrictions or other catering notes.
    pub dietary_notes: Option<String>,
    /// Table the guest is assigned to, if any.
    pub table_id: Option<TableId>,
    /// Seat index at that table. Only meaningful together with `table_id`.
    pub seat_index: Option<i32>,
    /// When the guest was created.
    pub created_at: DateTime<Utc>,
    /// When the guest was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Guest {
    /// Build a fresh, unassigned guest from a create payload.
    pub fn from_create(id: GuestId, data: CreateGuest, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name,
            email: data.email,
            rsvp_status: data.rsvp_status,
            dietary_notes: data.dietary_notes,
            table_id: None,
            seat_index: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the guest is assigned to the given table.
    pub fn is_at_table(&self, table_id: TableId) -> bool {
        self.table_id == Some(table_id)
    }

    /// The (table, seat) pair if the guest holds a specific seat.
    pub fn seat(&self) -> Option<(TableId, i32)> {
        self.table_id.zip(self.seat_index)
    }

    /// Whether the guest currently holds any table reference.
    pub fn is_assigned(&self) -> bool {
        self.table_id.is_some()
    }
}

/// Data required to create a new guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Initial RSVP status.
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
    /// Catering notes.
    pub dietary_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_requires_both_fields() {
        let now = Utc::now();
        let mut guest = Guest::from_create(
            GuestId::new(),
            CreateGuest {
                name: "Ada".into(),
                email: None,
                rsvp_status: RsvpStatus::Confirmed,
                dietary_notes: None,
            },
            now,
        );
        assert!(!guest.is_assigned());
        assert_eq!(guest.seat(), None);

        let table = TableId::new();
        guest.table_id = Some(table);
        assert!(guest.is_assigned());
        assert!(guest.is_at_table(table));
        assert_eq!(guest.seat(), None);

        guest.seat_index = Some(2);
        assert_eq!(guest.seat(), Some((table, 2)));
    }
}
