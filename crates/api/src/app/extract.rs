//! Raw request extraction.
//!
//! Everything here is deliberately untyped: values are gathered per source as
//! JSON maps of strings (or the parsed JSON body) and handed to the binding
//! layer, which owns all coercion and constraint checking.

use std::collections::HashMap;

use axum::extract::Path;
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::http::{HeaderMap, header};
use axum::{Form, Json};
use serde_json::{Map, Value};

use formwarden_core::{Source, SourcedError, ValidationError};

/// A JSON object of string values.
pub fn string_map<I, K, V>(pairs: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let map: Map<String, Value> = pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect();
    Value::Object(map)
}

/// The parsed JSON body. A body sent without a JSON content type counts as empty.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, Vec<SourcedError>> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Map::new())),
        Err(rejection) => Err(vec![SourcedError {
            source: Source::Body,
            error: ValidationError::type_mismatch("", rejection.body_text()),
        }]),
    }
}

/// Path parameters. Segments that cannot be decoded are a root `type_mismatch` in `path`.
pub fn path_params(
    params: Result<Path<HashMap<String, String>>, PathRejection>,
) -> Result<Value, Vec<SourcedError>> {
    match params {
        Ok(Path(params)) => Ok(string_map(params)),
        Err(rejection) => Err(vec![SourcedError {
            source: Source::Path,
            error: ValidationError::type_mismatch("", rejection.body_text()),
        }]),
    }
}

/// Url-encoded form fields. A missing or non-form body counts as empty.
pub fn form_fields(form: Result<Form<HashMap<String, String>>, FormRejection>) -> Value {
    match form {
        Ok(Form(fields)) => string_map(fields),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "form body not usable; treating as empty");
            Value::Object(Map::new())
        }
    }
}

/// Header values keyed by parameter name: `User-Agent` binds to `user_agent`.
///
/// When a header repeats, the first value wins. Non-UTF-8 values are skipped.
pub fn header_fields(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else { continue };
        map.entry(name.as_str().replace('-', "_"))
            .or_insert_with(|| Value::String(value.to_string()));
    }
    Value::Object(map)
}

/// Cookies from every `Cookie` header, as `name -> value`.
pub fn cookie_fields(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for header_value in headers.get_all(header::COOKIE) {
        let Ok(raw) = header_value.to_str() else { continue };
        for pair in raw.split(';') {
            let Some((name, value)) = pair.split_once('=') else { continue };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim().trim_matches('"');
            map.entry(name.to_string())
                .or_insert_with(|| Value::String(value.to_string()));
        }
    }
    Value::Object(map)
}
