use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use formwarden_core::{InstanceError, SourcedError};

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// `{"detail": "<message>"}` with the given status.
pub fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

/// 422 listing every violated constraint, each with its source, field path, kind and message.
pub fn validation_failed(route: &str, errors: Vec<SourcedError>) -> Response {
    tracing::debug!(route, errors = errors.len(), "request validation failed");
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": errors }))).into_response()
}

/// A validated instance did not fit its typed model: schema and model have drifted apart.
pub fn instance_error(route: &str, err: InstanceError) -> Response {
    tracing::error!(route, error = %err, "validated instance does not match model");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", err.to_string())
}
