//! Convenience result type alias for exthost.

use crate::error::AppError;

/// A specialized `Result` type for exthost operations.
pub type AppResult<T> = Result<T, AppError>;
