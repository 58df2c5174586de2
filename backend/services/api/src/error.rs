use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leanval_common::error::LeanvalError;
use leanval_evaluation::ValueParseError;

#[derive(Debug)]
pub struct ApiError(pub LeanvalError);

impl From<LeanvalError> for ApiError {
    fn from(err: LeanvalError) -> Self {
        Self(err)
    }
}

impl From<ValueParseError> for ApiError {
    fn from(err: ValueParseError) -> Self {
        Self(LeanvalError::Validation(err.to_string()))
    }
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(LeanvalError::NotFound(msg.into()))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self(LeanvalError::Validation(msg.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            LeanvalError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            LeanvalError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => {
                tracing::error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
