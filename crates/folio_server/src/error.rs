//! Mapping from core errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::AppError;
use serde_json::json;

/// Handler error wrapper that renders as a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, message) = if err.is_client_error() {
            (StatusCode::BAD_REQUEST, err.to_string())
        } else if matches!(err, AppError::NotFound) {
            (StatusCode::NOT_FOUND, "Not found".to_string())
        } else {
            tracing::error!("Request failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
