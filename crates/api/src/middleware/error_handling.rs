//! # Error Handling Middleware
//!
//! Maps [`CampusError`] values to HTTP status codes and JSON error bodies so
//! every handler reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use campus_core::errors::CampusError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `CampusError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use campus_api::middleware::error_handling::AppError;
/// use campus_core::errors::CampusError;
///
/// async fn handler(found: bool) -> Result<Json<String>, AppError> {
///     if !found {
///         return Err(AppError(CampusError::NotFound("Note not found".to_string())));
///     }
///     Ok(Json("ok".to_string()))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CampusError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CampusError::NotFound(_) => StatusCode::NOT_FOUND,
            CampusError::Validation(_) => StatusCode::BAD_REQUEST,
            CampusError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CampusError::Authorization(_) => StatusCode::FORBIDDEN,
            CampusError::Gateway(_) => StatusCode::BAD_GATEWAY,
            CampusError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts application errors to HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Automatic conversion from CampusError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, CampusError>` in handler functions that return `Result<T, AppError>`.
impl From<CampusError> for AppError {
    fn from(err: CampusError) -> Self {
        AppError(err)
    }
}

/// Maps a CampusError to an HTTP response
pub fn map_error(err: CampusError) -> Response {
    AppError(err).into_response()
}
