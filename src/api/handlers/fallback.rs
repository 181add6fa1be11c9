//! JSON responses for unmatched methods and paths.

use crate::error::AppError;

/// Rejects any method other than GET on a known route.
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

/// Rejects unknown paths.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("not found")
}
