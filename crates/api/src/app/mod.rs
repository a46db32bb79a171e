//! HTTP API application wiring (Axum router + context wiring).
//!
//! This folder is structured like:
//! - `bindings.rs`: which schema governs which request source, per route
//! - `extract.rs`: turning axum extractors into a raw, untyped request
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use formwarden_core::SchemaResult;

use crate::config::ApiConfig;
use crate::context::AppContext;
use crate::middleware;

pub mod bindings;
pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Fails only when a schema declaration is inconsistent, which must abort startup.
pub fn build_app(config: &ApiConfig) -> SchemaResult<Router> {
    let context = Arc::new(AppContext::new(config)?);
    tracing::info!(
        schemas = context.schemas().names().len(),
        known_persons = context.persons().len(),
        "application context ready"
    );

    Ok(routes::router(config).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::trace_requests))
            .layer(Extension(context)),
    ))
}
