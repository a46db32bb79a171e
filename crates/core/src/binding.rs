//! Request-to-model binding.
//!
//! A route declares which [`ObjectSchema`] governs which request [`Source`].
//! [`RequestBinding::apply`] validates every declared source and returns either
//! one validated instance per source or every error from every source together.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{InstanceError, SchemaError, SchemaResult, ValidationError};
use crate::instance::ValidatedInstance;
use crate::schema::ObjectSchema;
use crate::validator::Validate;

/// Where in the request a raw value came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Path,
    Query,
    Form,
    Body,
    Header,
    Cookie,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Path => "path",
            Source::Query => "query",
            Source::Form => "form",
            Source::Body => "body",
            Source::Header => "header",
            Source::Cookie => "cookie",
        }
    }
}

impl core::fmt::Display for Source {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untyped request data, one raw value per source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    parts: BTreeMap<Source, Value>,
}

impl RawRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: Source, value: Value) -> Self {
        self.insert(source, value);
        self
    }

    pub fn insert(&mut self, source: Source, value: Value) {
        self.parts.insert(source, value);
    }

    pub fn get(&self, source: Source) -> Option<&Value> {
        self.parts.get(&source)
    }
}

/// A validation error tagged with the request source it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcedError {
    pub source: Source,
    #[serde(flatten)]
    pub error: ValidationError,
}

/// Per-route declaration of which schema governs which source.
#[derive(Debug, Clone)]
pub struct RequestBinding {
    route: String,
    parts: Vec<(Source, Arc<ObjectSchema>)>,
}

impl RequestBinding {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            parts: Vec::new(),
        }
    }

    /// Declare the schema for `source`. Each source may be bound once.
    pub fn bind(mut self, source: Source, schema: Arc<ObjectSchema>) -> SchemaResult<Self> {
        if self.parts.iter().any(|(s, _)| *s == source) {
            return Err(SchemaError::DuplicateSource {
                route: self.route,
                source_name: source.as_str(),
            });
        }
        self.parts.push((source, schema));
        Ok(self)
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn schema(&self, source: Source) -> Option<&Arc<ObjectSchema>> {
        self.parts.iter().find(|(s, _)| *s == source).map(|(_, schema)| schema)
    }

    /// Validate every bound source. A source absent from `raw` is an empty object.
    ///
    /// Rejections are not logged here; the HTTP layer reports them once.
    pub fn apply(&self, raw: &RawRequest) -> Result<BoundRequest, Vec<SourcedError>> {
        let empty = Value::Object(Map::new());
        let mut bound = BTreeMap::new();
        let mut errors = Vec::new();

        for (source, schema) in &self.parts {
            let value = raw.get(*source).unwrap_or(&empty);
            match schema.validate(value) {
                Ok(instance) => {
                    bound.insert(*source, instance);
                }
                Err(errs) => errors.extend(errs.into_iter().map(|error| SourcedError {
                    source: *source,
                    error,
                })),
            }
        }

        if errors.is_empty() {
            Ok(BoundRequest { parts: bound })
        } else {
            Err(errors)
        }
    }
}

/// Validated request: one instance per bound source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundRequest {
    parts: BTreeMap<Source, ValidatedInstance>,
}

impl BoundRequest {
    pub fn get(&self, source: Source) -> Result<&ValidatedInstance, InstanceError> {
        self.parts
            .get(&source)
            .ok_or(InstanceError::UnboundSource(source.as_str()))
    }
}
