use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::config::ApiConfig;

pub mod contact;
pub mod files;
pub mod login;
pub mod persons;
pub mod schemas;
pub mod system;

/// Router for every public endpoint.
pub fn router(config: &ApiConfig) -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/health", get(system::health))
        .route("/person/new", post(persons::create_person))
        .route("/person/detail", get(persons::show_person))
        .route("/person/detail/:person_id", get(persons::person_exists))
        .route("/person/:person_id", put(persons::update_person))
        .route("/login", post(login::login))
        .route("/contact", post(contact::contact))
        .route(
            "/post-image",
            post(files::post_image).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .nest("/schemas", schemas::router())
}
