//! Schema loader
//!
//! Reads the form schema document from disk once at startup. The schema in
//! effect is whatever the file held at the instant it was loaded; there is
//! no versioning and no reload. A missing or malformed document is fatal to
//! serving and surfaces as a server error on schema-dependent endpoints.

use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::FormSchema;

/// Loads a form schema document from a JSON file.
pub fn load_schema(path: &Path) -> SchemaResult<FormSchema> {
    let content = fs::read_to_string(path).map_err(|e| SchemaError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_schema(&content, &path.display().to_string())
}

/// Parses a schema document from a JSON string.
pub fn parse_schema(content: &str, origin: &str) -> SchemaResult<FormSchema> {
    let schema: FormSchema = serde_json::from_str(content)
        .map_err(|e| SchemaError::malformed(origin, e.to_string()))?;

    schema
        .validate_structure()
        .map_err(SchemaError::Structure)?;

    Ok(schema)
}
