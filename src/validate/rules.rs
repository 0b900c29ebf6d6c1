//! Validation rule primitives
//!
//! A [`Rule`] is one independent predicate plus its pre-rendered failure
//! message. Per-field rule chains are built once by the compiler and
//! evaluated in order, stopping at the first failure, so the first violated
//! rule's message always wins.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// One predicate + message pair
pub struct Rule {
    message: String,
    check: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Rule {
    pub fn new<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            check: Box::new(check),
        }
    }

    /// Runs the predicate against a value.
    pub fn check(&self, value: &Value) -> bool {
        (self.check)(value)
    }

    /// The failure message for this rule.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("message", &self.message).finish()
    }
}

/// True for the values treated as "empty": null, empty string, empty array.
///
/// An empty value on an optional field short-circuits to valid; on a
/// required field it is the only thing that produces "<label> is required".
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// Coerces a value to a JSON number, mirroring the permissive intake of
/// number fields: numbers pass through, numeric strings are parsed
/// (integers kept integral).
pub fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Some(Value::Number(i.into()));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
        }
        _ => None,
    }
}

/// Numeric view of a coercible value, for bound checks.
pub fn as_number(value: &Value) -> Option<f64> {
    match coerce_number(value)? {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Parses a date value: `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn as_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?;
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
