//! Request authentication helpers and error-to-response mapping.

use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use tracing::error;

use ytgate_shared::errors::{GateError, ToolError};
use ytgate_shared::models::ErrorBody;

use crate::AppState;

/// Error half of every handler's result.
pub type ApiRejection = (StatusCode, Json<ErrorBody>);

/// Raw `Authorization` header value, if present and valid UTF-8.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
}

/// Require the static bearer token. Used by every trusted endpoint.
pub fn require_bearer(headers: &HeaderMap, state: &AppState) -> Result<(), ApiRejection> {
    state
        .gateway
        .bearer()
        .check(authorization_header(headers))
        .map_err(reject)
}

pub fn status_for(err: &GateError) -> StatusCode {
    match err {
        GateError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        GateError::Forbidden(_) => StatusCode::FORBIDDEN,
        GateError::NotFound(_) => StatusCode::NOT_FOUND,
        GateError::BadRequest(_) => StatusCode::BAD_REQUEST,
        GateError::Tool(ToolError::Exited { .. }) => StatusCode::BAD_REQUEST,
        GateError::Tool(ToolError::InvalidOutput(_)) => StatusCode::BAD_GATEWAY,
        GateError::Tool(ToolError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        GateError::Tool(ToolError::SpawnFailed { .. })
        | GateError::MissingOutput(_)
        | GateError::Config(_)
        | GateError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Malformed query string or body, reported in the standard error shape.
pub fn bad_input(rejection: impl std::fmt::Display) -> ApiRejection {
    reject(GateError::BadRequest(rejection.to_string()))
}

/// Convert a core error into the response sent to the client.
pub fn reject(err: GateError) -> ApiRejection {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("Request failed: {}", err);
    }
    (
        status,
        Json(ErrorBody {
            detail: err.public_message(),
        }),
    )
}
