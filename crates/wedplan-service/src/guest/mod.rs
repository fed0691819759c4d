//! Guest management.

pub mod service;

pub use service::{GuestService, RsvpSummary};
