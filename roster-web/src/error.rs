/// Error handling for the web server
///
/// Handlers return `AppResult<T>`; the error half renders as an HTML error
/// page with the matching status code.
///
/// # Example
///
/// ```
/// use roster_web::error::{AppError, AppResult};
/// use axum::response::Html;
///
/// async fn handler(found: bool) -> AppResult<Html<String>> {
///     if !found {
///         return Err(AppError::NotFound("User not found".to_string()));
///     }
///     Ok(Html("<p>ok</p>".to_string()))
/// }
/// ```

use crate::views;
use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_shared::store::StoreError;
use std::fmt;

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Unified web error type
#[derive(Debug)]
pub enum AppError {
    /// Bad request (400), for form bodies that cannot be decoded
    BadRequest(String),

    /// Not found (404), for unknown ids and routes
    NotFound(String),

    /// Conflict (409)
    Conflict(String),

    /// Internal server error (500)
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                "Something went wrong on our side. Please try again.".to_string()
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => msg,
        };

        (status, views::errors::error_page(status, &message)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => {
                AppError::Conflict(format!("A user with email {} already exists", email))
            }
            StoreError::Database(e) => AppError::Internal(format!("Database error: {}", e)),
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected form submission");
        AppError::BadRequest("The submitted form could not be read.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = AppError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::BadRequest(String::new()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound(String::new()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict(String::new()).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Internal(String::new()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_store_error() {
        let err: AppError = StoreError::DuplicateEmail("a@example.com".to_string()).into();
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("a@example.com")));

        let err: AppError = StoreError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_into_response_is_html() {
        let response = AppError::NotFound("No user with id 9999".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/html"));
    }
}
