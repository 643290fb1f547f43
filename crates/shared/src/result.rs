//! Result alias for shared error handling.

use crate::errors::AppError;

/// Shared result type used across the workspace.
pub type Result<T, E = AppError> = std::result::Result<T, E>;
