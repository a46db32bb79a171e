//! Error model.
//!
//! Two families live here and they never mix:
//! - [`SchemaError`]: a schema declaration is internally inconsistent. Raised while
//!   schemas are built at startup and meant to abort the process.
//! - [`ValidationError`]: one constraint violation found in an incoming payload.
//!   These are plain data, collected into lists and rendered back to the caller.

use serde::Serialize;
use thiserror::Error;

/// Result type for schema construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema-definition error (configuration error, not a runtime one).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema `{schema}`: duplicate field `{field}`")]
    DuplicateField { schema: String, field: String },

    #[error("schema `{schema}`: required field `{field}` must not carry a default")]
    RequiredWithDefault { schema: String, field: String },

    #[error("schema `{schema}`: field `{field}` has contradictory numeric bounds ({detail})")]
    ContradictoryBounds {
        schema: String,
        field: String,
        detail: String,
    },

    #[error("schema `{schema}`: field `{field}` has min_length {min} > max_length {max}")]
    InvertedLength {
        schema: String,
        field: String,
        min: usize,
        max: usize,
    },

    #[error("schema `{schema}`: constraint `{constraint}` does not apply to {field_type} field `{field}`")]
    InapplicableConstraint {
        schema: String,
        field: String,
        field_type: &'static str,
        constraint: &'static str,
    },

    #[error("schema `{schema}`: default for field `{field}` is invalid: {reason}")]
    InvalidDefault {
        schema: String,
        field: String,
        reason: String,
    },

    #[error("enum `{0}` declares no labels")]
    EmptyEnum(String),

    #[error("enum `{name}`: duplicate label `{label}`")]
    DuplicateEnumLabel { name: String, label: String },

    #[error("binding `{route}`: source `{source_name}` bound twice")]
    DuplicateSource {
        route: String,
        source_name: &'static str,
    },
}

/// Failure taxonomy for payload validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingRequired,
    TypeMismatch,
    OutOfRange,
    TooShort,
    TooLong,
    NotInEnum,
    MalformedFormat,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingRequired => "missing_required",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::TooShort => "too_short",
            ErrorKind::TooLong => "too_long",
            ErrorKind::NotInEnum => "not_in_enum",
            ErrorKind::MalformedFormat => "malformed_format",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded constraint violation, located by dotted field path.
///
/// The root of a payload has the empty path.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{}: {message} ({kind})", display_path(.path))]
pub struct ValidationError {
    #[serde(rename = "field")]
    pub path: String,
    pub kind: ErrorKind,
    pub message: String,
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "$root" } else { path }
}

impl ValidationError {
    pub fn new(path: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::MissingRequired, "field required")
    }

    pub fn type_mismatch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::TypeMismatch, message)
    }

    /// Prefix the path with a parent segment (used when errors bubble out of nested objects).
    pub fn nested_under(mut self, parent: &str) -> Self {
        self.path = join_path(parent, &self.path);
        self
    }
}

/// Join two dotted path segments; either side may be empty.
pub fn join_path(prefix: &str, field: &str) -> String {
    match (prefix.is_empty(), field.is_empty()) {
        (true, _) => field.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}.{field}"),
    }
}

/// A validated instance did not have the shape a typed domain struct expected.
///
/// This signals drift between a schema and the struct built from it, never bad input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("instance has no field `{0}`")]
    MissingField(String),

    #[error("field `{field}` is not a {expected}")]
    WrongType { field: String, expected: &'static str },

    #[error("field `{field}` holds unknown label `{label}`")]
    UnknownLabel { field: String, label: String },

    #[error("no schema bound for request source `{0}`")]
    UnboundSource(&'static str),
}
