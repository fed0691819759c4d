//! # wedplan-entity
//!
//! Domain entity models for Wedplan. Every struct in this crate represents
//! a database table row or a payload used to create or change one. Row
//! types additionally derive `sqlx::FromRow`.

pub mod audit;
pub mod guest;
pub mod table;
