//! dynaform - a schema-driven dynamic form service
//!
//! A declarative form schema is compiled once into an executable validator
//! ([`validate`]); the HTTP layer ([`http`]) gates submissions through it
//! before they reach the store ([`store`]). The client-side renderer
//! consumes the same [`schema`] vocabulary, so both validators agree on
//! field semantics.

pub mod cli;
pub mod http;
pub mod observability;
pub mod schema;
pub mod store;
pub mod validate;
