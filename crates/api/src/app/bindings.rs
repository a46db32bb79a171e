//! Per-route request bindings, declared once at startup.

use formwarden_core::{RequestBinding, SchemaResult, Source};
use formwarden_people::Schemas;

#[derive(Debug, Clone)]
pub struct RouteBindings {
    pub create_person: RequestBinding,
    pub person_detail: RequestBinding,
    pub person_exists: RequestBinding,
    pub update_person: RequestBinding,
    pub login: RequestBinding,
    pub contact: RequestBinding,
}

impl RouteBindings {
    pub fn new(schemas: &Schemas) -> SchemaResult<Self> {
        Ok(Self {
            create_person: RequestBinding::new("persons.create")
                .bind(Source::Body, schemas.person.clone())?,
            person_detail: RequestBinding::new("persons.detail")
                .bind(Source::Query, schemas.person_detail_query.clone())?,
            person_exists: RequestBinding::new("persons.exists")
                .bind(Source::Path, schemas.person_id_path.clone())?,
            update_person: RequestBinding::new("persons.update")
                .bind(Source::Path, schemas.person_id_path.clone())?
                .bind(Source::Body, schemas.person_update_body.clone())?,
            login: RequestBinding::new("login").bind(Source::Form, schemas.login_form.clone())?,
            contact: RequestBinding::new("contact")
                .bind(Source::Form, schemas.contact_form.clone())?
                .bind(Source::Header, schemas.contact_headers.clone())?
                .bind(Source::Cookie, schemas.contact_cookies.clone())?,
        })
    }
}
