use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use formwarden_core::{FromInstance, PersonId, RawRequest, Source};
use formwarden_people::{Location, Person, PersonBase};

use crate::app::{dto, errors, extract};
use crate::context::AppContext;

pub const PERSON_NOT_FOUND: &str = "This person doesn't exist!";

pub async fn create_person(
    Extension(ctx): Extension<Arc<AppContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let binding = &ctx.bindings().create_person;
    let body = match extract::json_body(body) {
        Ok(v) => v,
        Err(errs) => return errors::validation_failed(binding.route(), errs),
    };

    let bound = match binding.apply(&RawRequest::new().with(Source::Body, body)) {
        Ok(b) => b,
        Err(errs) => return errors::validation_failed(binding.route(), errs),
    };
    let person = match bound.get(Source::Body).and_then(Person::from_instance) {
        Ok(p) => p,
        Err(e) => return errors::instance_error(binding.route(), e),
    };

    tracing::info!(first_name = %person.base.first_name, "person accepted");
    (StatusCode::CREATED, Json(person.public())).into_response()
}

pub async fn show_person(
    Extension(ctx): Extension<Arc<AppContext>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Response {
    let binding = &ctx.bindings().person_detail;
    let query = match query {
        Ok(Query(params)) => extract::string_map(params),
        Err(_) => Value::Object(Map::new()),
    };

    let bound = match binding.apply(&RawRequest::new().with(Source::Query, query)) {
        Ok(b) => b,
        Err(errs) => return errors::validation_failed(binding.route(), errs),
    };
    let (name, age) = match bound
        .get(Source::Query)
        .and_then(|q| Ok((q.opt_str("name")?, q.str("age")?)))
    {
        Ok((name, age)) => (name.unwrap_or("null").to_string(), age.to_string()),
        Err(e) => return errors::instance_error(binding.route(), e),
    };

    let mut body = Map::new();
    body.insert(name, Value::String(age));
    Json(Value::Object(body)).into_response()
}

pub async fn person_exists(
    Extension(ctx): Extension<Arc<AppContext>>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
) -> Response {
    let binding = &ctx.bindings().person_exists;
    let path = match extract::path_params(params) {
        Ok(v) => v,
        Err(errs) => return errors::validation_failed(binding.route(), errs),
    };
    let bound = match binding.apply(&RawRequest::new().with(Source::Path, path)) {
        Ok(b) => b,
        Err(errs) => return errors::validation_failed(binding.route(), errs),
    };
    let id = match bound.get(Source::Path).and_then(|p| p.integer("person_id")) {
        Ok(id) => PersonId::new(id),
        Err(e) => return errors::instance_error(binding.route(), e),
    };

    if !ctx.persons().contains(id) {
        tracing::debug!(person_id = %id, "unknown person");
        return errors::detail(StatusCode::NOT_FOUND, PERSON_NOT_FOUND);
    }

    let mut body = Map::new();
    body.insert(id.to_string(), Value::String("It exists!".to_string()));
    Json(Value::Object(body)).into_response()
}

pub async fn update_person(
    Extension(ctx): Extension<Arc<AppContext>>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let binding = &ctx.bindings().update_person;
    let (path, body) = match (extract::path_params(params), extract::json_body(body)) {
        (Ok(path), Ok(body)) => (path, body),
        (path, body) => {
            let errs = path.err().into_iter().chain(body.err()).flatten().collect();
            return errors::validation_failed(binding.route(), errs);
        }
    };

    let raw = RawRequest::new()
        .with(Source::Path, path)
        .with(Source::Body, body);
    let bound = match binding.apply(&raw) {
        Ok(b) => b,
        Err(errs) => return errors::validation_failed(binding.route(), errs),
    };

    let parsed = bound.get(Source::Body).and_then(|b| {
        Ok((
            PersonBase::from_instance(b.object("person")?)?,
            Location::from_instance(b.object("location")?)?,
        ))
    });
    let (person, location) = match parsed {
        Ok(parts) => parts,
        Err(e) => return errors::instance_error(binding.route(), e),
    };

    Json(dto::PersonAtLocation {
        person: &person,
        location: &location,
    })
    .into_response()
}
