//! People domain module (persons, locations, logins, contact messages).
//!
//! This crate declares the domain's schemas and the typed models built from
//! validated instances. It performs no IO.

pub mod person;
pub mod registry;

pub use person::{HairColor, LoginOut, Location, Person, PersonBase};
pub use registry::Schemas;
