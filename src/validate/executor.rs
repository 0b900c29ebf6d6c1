//! Validation executor
//!
//! Runs a compiled form against one submission payload. Pure and
//! deterministic: identical (schema, payload) pairs always produce the same
//! verdict, every input maps to a verdict, and nothing is retained after
//! the verdict is produced. A `CompiledForm` is immutable and safe to share
//! across concurrent requests.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::compiler::FieldValidator;

/// Field-name-keyed error collection; one message per field, first
/// violated rule wins.
pub type ErrorMap = BTreeMap<String, String>;

/// A fully compiled form validator
#[derive(Debug)]
pub struct CompiledForm {
    fields: Vec<FieldValidator>,
}

impl CompiledForm {
    pub(super) fn new(fields: Vec<FieldValidator>) -> Self {
        Self { fields }
    }

    /// Number of compiled fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates a whole payload.
    ///
    /// Every field's rule chain runs against `payload[name]` (absent keys
    /// count as empty). On success returns the normalized payload: numeric
    /// coercions applied, empty optional fields and undeclared keys
    /// dropped. On failure returns the error map; a field never appears
    /// more than once even if several of its rules would fail.
    ///
    /// A non-object payload carries no field values, so it validates as if
    /// every field were absent.
    pub fn validate(&self, payload: &Value) -> Result<Map<String, Value>, ErrorMap> {
        let empty = Map::new();
        let data = payload.as_object().unwrap_or(&empty);

        let mut normalized = Map::new();
        let mut errors = ErrorMap::new();

        for field in &self.fields {
            match field.validate(data.get(field.name())) {
                Ok(Some(value)) => {
                    normalized.insert(field.name().to_string(), value);
                }
                Ok(None) => {} // empty optional field, omitted
                Err(message) => {
                    errors.insert(field.name().to_string(), message);
                }
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }

    /// Validates a single field's value, for callers mirroring per-widget
    /// client-side checks. Names with no compiled validator pass
    /// automatically with the value unchanged.
    pub fn validate_field(
        &self,
        name: &str,
        value: Option<&Value>,
    ) -> Result<Option<Value>, String> {
        match self.fields.iter().find(|f| f.name() == name) {
            Some(field) => field.validate(value),
            None => Ok(value.cloned()),
        }
    }
}
