//! Reception table entities.

pub mod model;

pub use model::{CreateTable, Table, UpdateTable};
