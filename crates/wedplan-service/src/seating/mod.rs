//! Seat assignment use cases and the seating chart.

pub mod chart;
pub mod service;

pub use chart::{SeatSlot, SeatingChart, TableChart};
pub use service::SeatingService;
