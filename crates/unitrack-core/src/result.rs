//! Convenience result type alias for Unitrack.

use crate::error::AppError;

/// A specialized `Result` type for Unitrack operations.
pub type AppResult<T> = Result<T, AppError>;
