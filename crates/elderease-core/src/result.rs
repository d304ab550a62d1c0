//! Convenience result type alias for ElderEase.

use crate::error::AppError;

/// A specialized `Result` type for ElderEase operations.
pub type AppResult<T> = Result<T, AppError>;
