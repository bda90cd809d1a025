use activator_core::error::ActivatorError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Handler error: an [`ActivatorError`] rendered as a JSON body.
///
/// Client errors carry the error message. Server errors are logged and
/// answered with a generic message.
#[derive(Debug)]
pub struct ApiError(pub ActivatorError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ActivatorError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ActivatorError::NotFound { .. } => StatusCode::NOT_FOUND,
            ActivatorError::AlreadyExists { .. } => StatusCode::CONFLICT,
            ActivatorError::UnexpectedRowCount { .. } | ActivatorError::Unknown(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ActivatorError> for ApiError {
    fn from(err: ActivatorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, kind = self.0.kind(), "Request failed");
            "internal server error".to_string()
        } else {
            tracing::info!(error = %self.0, kind = self.0.kind(), "Request rejected");
            self.0.to_string()
        };

        let body = json!({
            "error": self.0.kind(),
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}
