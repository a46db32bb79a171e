use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Extension},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form, Json,
};

use formwarden_core::{RawRequest, Source};

use crate::app::{errors, extract};
use crate::context::AppContext;

/// Validates the contact form and echoes the caller's `User-Agent` (or `null`).
pub async fn contact(
    Extension(ctx): Extension<Arc<AppContext>>,
    headers: HeaderMap,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let binding = &ctx.bindings().contact;
    let raw = RawRequest::new()
        .with(Source::Form, extract::form_fields(form))
        .with(Source::Header, extract::header_fields(&headers))
        .with(Source::Cookie, extract::cookie_fields(&headers));

    let bound = match binding.apply(&raw) {
        Ok(b) => b,
        Err(errs) => return errors::validation_failed(binding.route(), errs),
    };

    match bound.get(Source::Header).and_then(|h| h.opt_str("user_agent")) {
        Ok(user_agent) => Json(user_agent).into_response(),
        Err(e) => errors::instance_error(binding.route(), e),
    }
}
