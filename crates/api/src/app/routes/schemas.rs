use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::app::errors;
use crate::context::AppContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_schemas))
        .route("/:name", get(get_schema))
}

pub async fn list_schemas(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    let schemas = ctx.schemas();
    let items = schemas
        .names()
        .into_iter()
        .filter_map(|name| schemas.describe(name))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}

pub async fn get_schema(
    Extension(ctx): Extension<Arc<AppContext>>,
    Path(name): Path<String>,
) -> Response {
    match ctx.schemas().describe(&name) {
        Some(description) => Json(description).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", format!("unknown schema: {name}")),
    }
}
