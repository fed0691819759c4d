//! # wedplan-core
//!
//! Core crate for Wedplan. Contains configuration schemas, typed
//! identifiers, the unified error system, the store retry helper,
//! and redaction helpers for personal data in logs.
//!
//! This crate has **no** internal dependencies on other Wedplan crates.

pub mod config;
pub mod error;
pub mod redact;
pub mod result;
pub mod retry;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
