/// Route handlers
///
/// - `health`: Health check endpoint (JSON)
/// - `users`: The user CRUD pages (HTML)

pub mod health;
pub mod users;

use crate::error::AppError;
use axum::http::Uri;

/// Fallback for every unmatched path
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("There is no page at {}", uri.path()))
}
