//! # wedplan-database
//!
//! PostgreSQL connection management, migrations, and concrete repository
//! implementations for guests, reception tables, and the audit log.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
