//! Guest domain entities.

pub mod model;
pub mod rsvp;

pub use model::{CreateGuest, Guest};
pub use rsvp::RsvpStatus;
