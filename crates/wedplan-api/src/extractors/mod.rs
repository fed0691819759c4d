//! Custom Axum extractors.

pub mod client;
pub mod path;
pub mod validated;

pub use client::ClientContext;
pub use path::{parse_guest_id, parse_table_id};
pub use validated::ValidatedJson;
