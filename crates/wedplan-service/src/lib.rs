//! # wedplan-service
//!
//! Business logic service layer for Wedplan. Services validate input,
//! delegate seat mutations to the [`wedplan_seating::SeatAllocator`], and
//! record audit events.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod audit;
pub mod context;
pub mod guest;
pub mod seating;
pub mod table;

pub use audit::SeatingAudit;
pub use context::RequestContext;
pub use guest::{GuestService, RsvpSummary};
pub use seating::{SeatingChart, SeatingService};
pub use table::{TableService, TableSummary};
