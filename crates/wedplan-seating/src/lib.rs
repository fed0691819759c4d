//! # wedplan-seating
//!
//! Seat assignment for reception tables.
//!
//! The guest records are the seat ledger: a guest's `(table_id, seat_index)`
//! pair is the only place occupancy is stored. This crate defines the
//! [`SeatLedger`] trait over that data, two implementations (PostgreSQL and
//! in-memory) behind [`SeatLedgerDispatch`], and the [`SeatAllocator`], which
//! is the single gate through which seat indices are written.

pub mod allocator;
pub mod capacity;
pub mod dispatch;
pub mod finder;
pub mod ledger;
pub mod memory;
pub mod postgres;

pub use allocator::SeatAllocator;
pub use capacity::Occupancy;
pub use dispatch::SeatLedgerDispatch;
pub use finder::{find_first_free_seat, first_free_seat};
pub use ledger::SeatLedger;
pub use memory::MemorySeatLedger;
pub use postgres::PostgresSeatLedger;
