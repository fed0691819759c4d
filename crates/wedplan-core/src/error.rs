//! Unified application error types for Wedplan.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Seating rule violations get their
//! own [`ErrorKind`] variants so callers can tell them apart without
//! parsing messages.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested guest or table was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, capacity shrink below occupancy, etc.).
    Conflict,
    /// The seat index lies outside the table's capacity.
    OutOfRange,
    /// The seat is already held by a different guest.
    SeatTaken,
    /// The guest has declined and cannot be seated.
    GuestDeclined,
    /// The table has no free seat left.
    TableFull,
    /// A rate limit was exceeded.
    RateLimit,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The backing store is temporarily unavailable or timed out.
    ServiceUnavailable,
}

impl ErrorKind {
    /// Whether an operation failing with this kind may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database | Self::ServiceUnavailable)
    }

    /// Whether this kind is one of the seating rule violations.
    pub fn is_seating_rule(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange | Self::SeatTaken | Self::GuestDeclined | Self::TableFull
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::OutOfRange => write!(f, "OUT_OF_RANGE"),
            Self::SeatTaken => write!(f, "SEAT_TAKEN"),
            Self::GuestDeclined => write!(f, "GUEST_DECLINED"),
            Self::TableFull => write!(f, "TABLE_FULL"),
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The unified application error used throughout Wedplan.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an out-of-range seat error.
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfRange, message)
    }

    /// Create a seat-taken error.
    pub fn seat_taken(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SeatTaken, message)
    }

    /// Create a guest-declined error.
    pub fn guest_declined(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::GuestDeclined, message)
    }

    /// Create a table-full error.
    pub fn table_full(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TableFull, message)
    }

    /// Create a rate-limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Whether retrying the failed operation might succeed.
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::seat_taken("Seat 3 is taken");
        assert_eq!(err.to_string(), "SEAT_TAKEN: Seat 3 is taken");
    }

    #[test]
    fn test_transient_kinds() {
        assert!(AppError::database("down").is_transient());
        assert!(AppError::service_unavailable("timeout").is_transient());
        assert!(!AppError::seat_taken("taken").is_transient());
        assert!(!AppError::not_found("gone").is_transient());
    }

    #[test]
    fn test_seating_rule_kinds() {
        assert!(ErrorKind::OutOfRange.is_seating_rule());
        assert!(ErrorKind::TableFull.is_seating_rule());
        assert!(!ErrorKind::Conflict.is_seating_rule());
    }
}
