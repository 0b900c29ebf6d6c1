//! Form schema subsystem
//!
//! The declarative description of a form: field names, labels, types,
//! option lists, and constraint bundles. This module is pure data plus a
//! loader; turning a schema into executable rules is the job of
//! [`crate::validate`].
//!
//! The same vocabulary drives the client-side renderer, so both validators
//! interpret field semantics identically.

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use loader::{load_schema, parse_schema};
pub use types::{FieldOption, FieldSchema, FieldType, FieldValidations, FormSchema};
