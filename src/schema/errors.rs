//! Schema configuration errors
//!
//! These cover faults in the schema document itself: a missing or
//! unreadable file, invalid JSON, structural violations, or constraint
//! values the compiler cannot build (bad regex, unparseable minDate).
//! They are configuration errors, never validation-time verdicts.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while loading or compiling a form schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema file could not be read
    #[error("failed to read schema file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Schema file is not valid JSON or does not match the document shape
    #[error("malformed schema document '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// Schema document violates a structural rule
    #[error("invalid schema structure: {0}")]
    Structure(String),

    /// A constraint value could not be compiled
    #[error("field '{field}': {reason}")]
    Constraint { field: String, reason: String },
}

impl SchemaError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn constraint(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Constraint {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
