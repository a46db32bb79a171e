use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn index() -> impl IntoResponse {
    Json(json!({ "Hello": "World!" }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
