//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use roombook_domain::error::RoombookError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

/// Maps [`RoombookError`] to an HTTP response with appropriate status code.
pub struct ApiError(RoombookError);

impl From<RoombookError> for ApiError {
    fn from(err: RoombookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            RoombookError::InvalidArgument(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            RoombookError::IllegalState(err) => (StatusCode::CONFLICT, err.to_string()),
            RoombookError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            RoombookError::Notification(err) => {
                tracing::error!(error = %err, "notification error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            RoombookError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
