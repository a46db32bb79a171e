//! Validated values.
//!
//! A [`ValidatedInstance`] is produced only by the validator and is immutable:
//! every field in it satisfies its field declaration, required fields are present, and absent
//! optional fields hold their default or [`FieldValue::Null`].

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::InstanceError;
use crate::schema::ObjectSchema;

/// A typed, constraint-satisfying field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    String(String),
    Integer(i64),
    Boolean(bool),
    Email(String),
    Url(String),
    /// The matched enum label.
    Enum(String),
    Object(ValidatedInstance),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Text content for string-like values (string, email, url, enum label).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) | FieldValue::Email(s) | FieldValue::Url(s) | FieldValue::Enum(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ValidatedInstance> {
        match self {
            FieldValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Raw JSON form; validating it again yields this same value.
    pub fn to_value(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::String(s) | FieldValue::Email(s) | FieldValue::Url(s) | FieldValue::Enum(s) => {
                Value::String(s.clone())
            }
            FieldValue::Integer(n) => Value::from(*n),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Object(o) => o.to_value(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_none(),
            FieldValue::String(s) | FieldValue::Email(s) | FieldValue::Url(s) | FieldValue::Enum(s) => {
                serializer.serialize_str(s)
            }
            FieldValue::Integer(n) => serializer.serialize_i64(*n),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
            FieldValue::Object(o) => o.serialize(serializer),
        }
    }
}

/// Mapping from field name to validated value, in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedInstance {
    fields: Vec<(String, FieldValue)>,
}

impl ValidatedInstance {
    pub(crate) fn from_fields(fields: Vec<(String, FieldValue)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(n, v)| (n.clone(), v.to_value()))
            .collect();
        Value::Object(map)
    }

    /// Keep only the fields `schema` declares (e.g. a response model that hides secrets).
    pub fn project(&self, schema: &ObjectSchema) -> ValidatedInstance {
        let fields = self
            .fields
            .iter()
            .filter(|(n, _)| schema.field(n).is_some())
            .cloned()
            .collect();
        ValidatedInstance { fields }
    }

    fn require(&self, name: &str) -> Result<&FieldValue, InstanceError> {
        self.get(name)
            .ok_or_else(|| InstanceError::MissingField(name.to_string()))
    }

    fn wrong(name: &str, expected: &'static str) -> InstanceError {
        InstanceError::WrongType {
            field: name.to_string(),
            expected,
        }
    }

    pub fn str(&self, name: &str) -> Result<&str, InstanceError> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| Self::wrong(name, "string"))
    }

    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, InstanceError> {
        match self.require(name)? {
            FieldValue::Null => Ok(None),
            v => v.as_str().map(Some).ok_or_else(|| Self::wrong(name, "string")),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, InstanceError> {
        self.require(name)?
            .as_i64()
            .ok_or_else(|| Self::wrong(name, "integer"))
    }

    pub fn opt_boolean(&self, name: &str) -> Result<Option<bool>, InstanceError> {
        match self.require(name)? {
            FieldValue::Null => Ok(None),
            v => v.as_bool().map(Some).ok_or_else(|| Self::wrong(name, "boolean")),
        }
    }

    pub fn object(&self, name: &str) -> Result<&ValidatedInstance, InstanceError> {
        self.require(name)?
            .as_object()
            .ok_or_else(|| Self::wrong(name, "object"))
    }
}

impl Serialize for ValidatedInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Conversion from a validated instance into a typed domain struct.
pub trait FromInstance: Sized {
    fn from_instance(instance: &ValidatedInstance) -> Result<Self, InstanceError>;
}
