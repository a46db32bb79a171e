//! Process-wide schema registry.
//!
//! Built once at startup by [`Schemas::build`]; any inconsistent declaration
//! aborts the build. Afterwards everything is read-only and shared via `Arc`.

use std::sync::Arc;

use serde_json::Value;

use formwarden_core::{EnumSchema, FieldSpec, ObjectSchema, SchemaResult};

use crate::person::{HairColor, Location, LoginOut, Person, PersonBase};

/// Every schema the service validates against.
#[derive(Debug, Clone)]
pub struct Schemas {
    pub hair_color: Arc<EnumSchema>,
    pub location: Arc<ObjectSchema>,
    pub person_base: Arc<ObjectSchema>,
    pub person: Arc<ObjectSchema>,
    pub login_out: Arc<ObjectSchema>,

    /// `GET /person/detail` query string.
    pub person_detail_query: Arc<ObjectSchema>,
    /// `{person_id}` path parameter.
    pub person_id_path: Arc<ObjectSchema>,
    /// Body of a person update: a person embedded beside a location.
    pub person_update_body: Arc<ObjectSchema>,
    pub login_form: Arc<ObjectSchema>,
    pub contact_form: Arc<ObjectSchema>,
    pub contact_headers: Arc<ObjectSchema>,
    pub contact_cookies: Arc<ObjectSchema>,
}

impl Schemas {
    pub fn build() -> SchemaResult<Self> {
        let hair_color = Arc::new(HairColor::schema()?);
        let location = Arc::new(Location::schema()?);
        let person_base = Arc::new(PersonBase::schema(hair_color.clone())?);
        let person = Arc::new(Person::schema(&person_base)?);
        let login_out = Arc::new(LoginOut::schema()?);

        let person_detail_query = ObjectSchema::builder("PersonDetailQuery")
            .field(
                FieldSpec::string("name")
                    .optional()
                    .min_length(1)
                    .max_length(50)
                    .title("Person Name")
                    .description("This is the person name. It's between 1 and 50 characters")
                    .example("Rocío"),
            )
            .field(
                FieldSpec::string("age")
                    .title("Person Age")
                    .description("This is the person age. It's required")
                    .example("25"),
            )
            .build()?;

        let person_id_path = ObjectSchema::builder("PersonIdPath")
            .field(
                FieldSpec::integer("person_id")
                    .gt(0)
                    .title("Person ID")
                    .description("This is the person ID")
                    .example(123),
            )
            .build()?;

        let person_update_body = ObjectSchema::builder("PersonUpdateBody")
            .field(FieldSpec::object("person", person_base.clone()))
            .field(FieldSpec::object("location", location.clone()))
            .build()?;

        let login_form = ObjectSchema::builder("LoginForm")
            .field(FieldSpec::string("username"))
            .field(FieldSpec::string("password"))
            .build()?;

        let contact_form = ObjectSchema::builder("ContactForm")
            .field(FieldSpec::string("first_name").min_length(1).max_length(20))
            .field(FieldSpec::email("email"))
            .field(FieldSpec::string("message").min_length(20))
            .build()?;

        let contact_headers = ObjectSchema::builder("ContactHeaders")
            .field(FieldSpec::string("user_agent").optional())
            .build()?;

        let contact_cookies = ObjectSchema::builder("ContactCookies")
            .field(FieldSpec::string("ads").optional())
            .build()?;

        let schemas = Self {
            hair_color,
            location,
            person_base,
            person,
            login_out,
            person_detail_query: Arc::new(person_detail_query),
            person_id_path: Arc::new(person_id_path),
            person_update_body: Arc::new(person_update_body),
            login_form: Arc::new(login_form),
            contact_form: Arc::new(contact_form),
            contact_headers: Arc::new(contact_headers),
            contact_cookies: Arc::new(contact_cookies),
        };
        tracing::debug!(objects = schemas.objects().len(), "schema registry built");
        Ok(schemas)
    }

    /// All object schemas, in registration order.
    pub fn objects(&self) -> Vec<&Arc<ObjectSchema>> {
        vec![
            &self.location,
            &self.person_base,
            &self.person,
            &self.login_out,
            &self.person_detail_query,
            &self.person_id_path,
            &self.person_update_body,
            &self.login_form,
            &self.contact_form,
            &self.contact_headers,
            &self.contact_cookies,
        ]
    }

    /// Names of every registered schema (enums included).
    pub fn names(&self) -> Vec<&str> {
        std::iter::once(self.hair_color.name())
            .chain(self.objects().into_iter().map(|s| s.name()))
            .collect()
    }

    /// JSON description of the named schema: fields, constraints and metadata.
    pub fn describe(&self, name: &str) -> Option<Value> {
        if self.hair_color.name() == name {
            return serde_json::to_value(self.hair_color.as_ref()).ok();
        }
        self.objects()
            .into_iter()
            .find(|s| s.name() == name)
            .and_then(|s| serde_json::to_value(s.as_ref()).ok())
    }
}
