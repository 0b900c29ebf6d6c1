//! Schema-driven validation core
//!
//! Two halves, both pure:
//!
//! - the **compiler** ([`compile`]) turns a [`crate::schema::FormSchema`]
//!   into a [`CompiledForm`]: one ordered rule chain per field, constraint
//!   artifacts built once;
//! - the **executor** ([`CompiledForm::validate`]) runs a payload through
//!   the compiled rules and returns either a normalized payload or a
//!   field-keyed [`ErrorMap`].
//!
//! Validation failures are always returned as data, never as errors that
//! propagate past this boundary.

mod compiler;
mod executor;
mod rules;

pub use compiler::{compile, compile_field, FieldValidator};
pub use executor::{CompiledForm, ErrorMap};
pub use rules::Rule;
