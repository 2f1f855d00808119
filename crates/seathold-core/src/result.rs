//! Convenience result type alias for Seathold.

use crate::error::AppError;

/// A specialized `Result` type for Seathold operations.
pub type AppResult<T> = Result<T, AppError>;
