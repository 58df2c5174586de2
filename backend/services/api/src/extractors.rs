use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Caller identity, set by the upstream auth proxy.
pub struct UserId(pub Uuid);

#[derive(Debug)]
pub struct UserIdRejection(String);

impl IntoResponse for UserIdRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0 });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = UserIdRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| UserIdRejection(format!("missing {USER_ID_HEADER} header")))?;

        let value = header
            .to_str()
            .map_err(|_| UserIdRejection(format!("invalid {USER_ID_HEADER} header value")))?;

        let uuid = Uuid::parse_str(value.trim())
            .map_err(|_| UserIdRejection(format!("invalid UUID in {USER_ID_HEADER}: {value}")))?;

        if uuid.is_nil() {
            return Err(UserIdRejection(format!(
                "{USER_ID_HEADER} must not be the nil UUID"
            )));
        }

        Ok(UserId(uuid))
    }
}
