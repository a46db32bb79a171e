use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde_json::json;

use formwarden_core::{FromInstance, RawRequest, Source, Validate};
use formwarden_people::LoginOut;

use crate::app::{errors, extract};
use crate::context::AppContext;

/// Accepts any credentials; the reply is checked against the `LoginOut` model.
pub async fn login(
    Extension(ctx): Extension<Arc<AppContext>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let binding = &ctx.bindings().login;
    let raw = RawRequest::new().with(Source::Form, extract::form_fields(form));
    let bound = match binding.apply(&raw) {
        Ok(b) => b,
        Err(errs) => return errors::validation_failed(binding.route(), errs),
    };
    let username = match bound.get(Source::Form).and_then(|f| f.str("username")) {
        Ok(u) => u.to_string(),
        Err(e) => return errors::instance_error(binding.route(), e),
    };

    // Response model violations are server errors, never client errors.
    let reply = match ctx.schemas().login_out.validate(&json!({ "username": username })) {
        Ok(instance) => instance,
        Err(errs) => {
            tracing::error!(
                route = binding.route(),
                errors = errs.len(),
                "login reply violates LoginOut"
            );
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "response_validation_failed",
                "response does not match LoginOut",
            );
        }
    };

    match LoginOut::from_instance(&reply) {
        Ok(out) => Json(out).into_response(),
        Err(e) => errors::instance_error(binding.route(), e),
    }
}
