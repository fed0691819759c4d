//! Convenience result type alias for Wedplan.

use crate::error::AppError;

/// A specialized `Result` type for Wedplan operations.
pub type AppResult<T> = Result<T, AppError>;
