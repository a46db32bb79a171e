use std::collections::BTreeSet;

use formwarden_core::{PersonId, SchemaResult};
use formwarden_people::Schemas;

use crate::app::bindings::RouteBindings;
use crate::config::ApiConfig;

/// Identifiers the person-existence lookup checks against.
///
/// Reference data owned by the HTTP layer; read-only once the context is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDirectory {
    ids: BTreeSet<PersonId>,
}

impl PersonDirectory {
    pub fn new(ids: impl IntoIterator<Item = PersonId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Everything a handler needs, constructed once by the entry point and
/// shared immutably across requests.
#[derive(Debug, Clone)]
pub struct AppContext {
    schemas: Schemas,
    bindings: RouteBindings,
    persons: PersonDirectory,
}

impl AppContext {
    pub fn new(config: &ApiConfig) -> SchemaResult<Self> {
        let schemas = Schemas::build()?;
        let bindings = RouteBindings::new(&schemas)?;
        let persons = PersonDirectory::new(config.known_person_ids.iter().copied());

        Ok(Self {
            schemas,
            bindings,
            persons,
        })
    }

    pub fn schemas(&self) -> &Schemas {
        &self.schemas
    }

    pub fn bindings(&self) -> &RouteBindings {
        &self.bindings
    }

    pub fn persons(&self) -> &PersonDirectory {
        &self.persons
    }
}
