//! `formwarden-core`: declarative schemas and payload validation.
//!
//! This crate is pure computation (no IO, no HTTP): schema definitions, the
//! generic validator that interprets them, and the binding step that maps raw
//! request sources onto schemas.

pub mod binding;
pub mod error;
pub mod format;
pub mod id;
pub mod instance;
pub mod schema;
pub mod validator;
pub mod value_object;

pub use binding::{BoundRequest, RawRequest, RequestBinding, Source, SourcedError};
pub use error::{ErrorKind, InstanceError, SchemaError, SchemaResult, ValidationError};
pub use id::PersonId;
pub use instance::{FieldValue, FromInstance, ValidatedInstance};
pub use schema::{Constraints, EnumSchema, FieldMeta, FieldSpec, FieldType, ObjectSchema, ObjectSchemaBuilder};
pub use validator::{Validate, validate};
pub use value_object::ValueObject;
