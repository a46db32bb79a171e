//! Person, location and login models.
//!
//! Each model pairs a schema declaration (the constraint table the validator
//! interprets) with a typed struct built from the validated instance.

use std::sync::Arc;

use serde::Serialize;

use formwarden_core::{
    EnumSchema, FieldSpec, FromInstance, InstanceError, ObjectSchema, SchemaResult,
    ValidatedInstance, ValueObject,
};

/// Hair color: a closed set of labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HairColor {
    White,
    Black,
    Brown,
    Blonde,
    Red,
}

impl HairColor {
    pub const ALL: [HairColor; 5] = [
        HairColor::White,
        HairColor::Black,
        HairColor::Brown,
        HairColor::Blonde,
        HairColor::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HairColor::White => "white",
            HairColor::Black => "black",
            HairColor::Brown => "brown",
            HairColor::Blonde => "blonde",
            HairColor::Red => "red",
        }
    }

    /// Exact, case-sensitive label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    pub fn schema() -> SchemaResult<EnumSchema> {
        EnumSchema::new("HairColor", Self::ALL.iter().map(|c| c.as_str()))
    }
}

/// A place a person lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl ValueObject for Location {}

impl Location {
    pub fn schema() -> SchemaResult<ObjectSchema> {
        let part = |name: &str, example: &str| {
            FieldSpec::string(name)
                .min_length(1)
                .max_length(50)
                .example(example)
        };

        ObjectSchema::builder("Location")
            .field(part("city", "Mexico"))
            .field(part("state", "Distrito Capital"))
            .field(part("country", "Mexico"))
            .build()
    }
}

impl FromInstance for Location {
    fn from_instance(i: &ValidatedInstance) -> Result<Self, InstanceError> {
        Ok(Self {
            city: i.str("city")?.to_string(),
            state: i.str("state")?.to_string(),
            country: i.str("country")?.to_string(),
        })
    }
}

/// Public person fields (the response model: never carries the password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonBase {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub hair_color: Option<HairColor>,
    pub is_married: Option<bool>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl ValueObject for PersonBase {}

impl PersonBase {
    pub fn schema(hair_color: Arc<EnumSchema>) -> SchemaResult<ObjectSchema> {
        ObjectSchema::builder("PersonBase")
            .field(
                FieldSpec::string("first_name")
                    .min_length(1)
                    .max_length(50)
                    .example("Miguel"),
            )
            .field(
                FieldSpec::string("last_name")
                    .min_length(1)
                    .max_length(50)
                    .example("Torres"),
            )
            .field(FieldSpec::integer("age").gt(0).le(115).example(25))
            .field(
                FieldSpec::enumeration("hair_color", hair_color)
                    .optional()
                    .example("black"),
            )
            .field(FieldSpec::boolean("is_married").optional().example(false))
            .field(
                FieldSpec::email("email")
                    .optional()
                    .example("miguel@hola.com"),
            )
            .field(
                FieldSpec::url("website")
                    .optional()
                    .example("https://www.platzi.com"),
            )
            .build()
    }
}

impl FromInstance for PersonBase {
    fn from_instance(i: &ValidatedInstance) -> Result<Self, InstanceError> {
        let hair_color = match i.opt_str("hair_color")? {
            None => None,
            Some(label) => Some(HairColor::from_label(label).ok_or_else(|| {
                InstanceError::UnknownLabel {
                    field: "hair_color".to_string(),
                    label: label.to_string(),
                }
            })?),
        };

        Ok(Self {
            first_name: i.str("first_name")?.to_string(),
            last_name: i.str("last_name")?.to_string(),
            age: i.integer("age")?,
            hair_color,
            is_married: i.opt_boolean("is_married")?,
            email: i.opt_str("email")?.map(str::to_string),
            website: i.opt_str("website")?.map(str::to_string),
        })
    }
}

/// A person as submitted on creation: public fields plus a password.
///
/// Deliberately not `Serialize`; respond with [`Person::public`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub base: PersonBase,
    pub password: String,
}

impl Person {
    pub fn schema(base: &ObjectSchema) -> SchemaResult<ObjectSchema> {
        ObjectSchema::builder("Person")
            .extend(base)
            .field(FieldSpec::string("password").min_length(8))
            .build()
    }

    pub fn public(&self) -> &PersonBase {
        &self.base
    }
}

impl FromInstance for Person {
    fn from_instance(i: &ValidatedInstance) -> Result<Self, InstanceError> {
        Ok(Self {
            base: PersonBase::from_instance(i)?,
            password: i.str("password")?.to_string(),
        })
    }
}

/// Login response model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOut {
    pub username: String,
    pub message: String,
}

impl LoginOut {
    pub const DEFAULT_MESSAGE: &'static str = "Login successfully!";

    pub fn schema() -> SchemaResult<ObjectSchema> {
        ObjectSchema::builder("LoginOut")
            .field(
                FieldSpec::string("username")
                    .max_length(20)
                    .example("miguel2021"),
            )
            .field(
                FieldSpec::string("message")
                    .optional()
                    .default(Self::DEFAULT_MESSAGE),
            )
            .build()
    }
}

impl FromInstance for LoginOut {
    fn from_instance(i: &ValidatedInstance) -> Result<Self, InstanceError> {
        Ok(Self {
            username: i.str("username")?.to_string(),
            message: i.str("message")?.to_string(),
        })
    }
}
