//! Schema compiler
//!
//! Turns each declarative [`FieldSchema`] into a [`FieldValidator`]: an
//! ordered rule chain with every constraint artifact (regex, option set,
//! minDate) built exactly once. The hot validation path never branches on
//! type strings; the type dispatch happens here, at compile time.

use std::collections::HashSet;

use regex::Regex;
use serde_json::Value;

use crate::schema::{FieldSchema, FieldType, FormSchema, SchemaError, SchemaResult};

use super::executor::CompiledForm;
use super::rules::{as_date, as_number, coerce_number, is_empty, Rule};

/// How a passing value is normalized before it reaches the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Normalize {
    /// Keep the value as submitted
    Raw,
    /// Replace with the coerced JSON number
    Number,
}

/// Compiled validator for a single field
#[derive(Debug)]
pub struct FieldValidator {
    name: String,
    label: String,
    required: bool,
    normalize: Normalize,
    rules: Vec<Rule>,
}

impl FieldValidator {
    /// The field name this validator applies to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validates one value for this field.
    ///
    /// `None` means the field was absent from the payload, which counts as
    /// empty. Returns the normalized value on success (`Ok(None)` for an
    /// empty optional field, which is then omitted from the normalized
    /// payload) or the first violated rule's message.
    pub fn validate(&self, value: Option<&Value>) -> Result<Option<Value>, String> {
        let value = match value {
            Some(v) if !is_empty(v) => v,
            // Empty short-circuits: required fails, optional passes with no
            // further rules run.
            _ => {
                return if self.required {
                    Err(format!("{} is required", self.label))
                } else {
                    Ok(None)
                };
            }
        };

        for rule in &self.rules {
            if !rule.check(value) {
                return Err(rule.message().to_string());
            }
        }

        let normalized = match self.normalize {
            Normalize::Raw => value.clone(),
            // The coercion rule has already passed, so this cannot miss;
            // fall back to the raw value rather than panic if it ever does.
            Normalize::Number => coerce_number(value).unwrap_or_else(|| value.clone()),
        };

        Ok(Some(normalized))
    }
}

/// Compiles a whole form schema into an executable validator.
pub fn compile(schema: &FormSchema) -> SchemaResult<CompiledForm> {
    schema
        .validate_structure()
        .map_err(SchemaError::Structure)?;

    let fields = schema
        .fields
        .iter()
        .map(compile_field)
        .collect::<SchemaResult<Vec<_>>>()?;

    Ok(CompiledForm::new(fields))
}

/// Compiles one field definition into its rule chain.
pub fn compile_field(field: &FieldSchema) -> SchemaResult<FieldValidator> {
    let label = &field.label;
    let v = &field.validations;
    let mut rules = Vec::new();
    let mut normalize = Normalize::Raw;

    match &field.field_type {
        FieldType::Text | FieldType::Textarea => {
            rules.push(Rule::new(
                format!("{label} must be a string"),
                |val: &Value| val.is_string(),
            ));
            if let Some(min) = v.min_length {
                rules.push(Rule::new(
                    format!("{label} must be at least {min} characters"),
                    move |val| val.as_str().map_or(false, |s| s.chars().count() >= min),
                ));
            }
            if let Some(max) = v.max_length {
                rules.push(Rule::new(
                    format!("{label} must be at most {max} characters"),
                    move |val| val.as_str().map_or(false, |s| s.chars().count() <= max),
                ));
            }
            if let Some(pattern) = &v.regex {
                let re = Regex::new(pattern).map_err(|e| {
                    SchemaError::constraint(&field.name, format!("invalid regex: {e}"))
                })?;
                rules.push(Rule::new(format!("{label} is invalid"), move |val| {
                    val.as_str().map_or(false, |s| re.is_match(s))
                }));
            }
        }

        FieldType::Number => {
            normalize = Normalize::Number;
            rules.push(Rule::new(
                format!("{label} must be a number"),
                |val: &Value| as_number(val).is_some(),
            ));
            if let Some(min) = v.min {
                rules.push(Rule::new(format!("{label} must be >= {min}"), move |val| {
                    as_number(val).map_or(false, |n| n >= min)
                }));
            }
            if let Some(max) = v.max {
                rules.push(Rule::new(format!("{label} must be <= {max}"), move |val| {
                    as_number(val).map_or(false, |n| n <= max)
                }));
            }
        }

        FieldType::Select => {
            let allowed = option_values(field);
            rules.push(Rule::new(
                format!("{label} must be a string"),
                |val: &Value| val.is_string(),
            ));
            rules.push(Rule::new(
                format!("{label} has an invalid value"),
                move |val| val.as_str().map_or(false, |s| allowed.contains(s)),
            ));
        }

        FieldType::MultiSelect => {
            let allowed = option_values(field);
            rules.push(Rule::new(
                format!("{label} must be an array"),
                |val: &Value| val.is_array(),
            ));
            rules.push(Rule::new(
                format!("{label} contains invalid selections"),
                move |val| {
                    val.as_array().map_or(false, |items| {
                        items
                            .iter()
                            .all(|i| i.as_str().map_or(false, |s| allowed.contains(s)))
                    })
                },
            ));
            if let Some(min) = v.min_selected {
                rules.push(Rule::new(
                    format!("{label} must have at least {min} selection(s)"),
                    move |val| val.as_array().map_or(false, |a| a.len() >= min),
                ));
            }
            if let Some(max) = v.max_selected {
                rules.push(Rule::new(
                    format!("{label} must have at most {max} selections"),
                    move |val| val.as_array().map_or(false, |a| a.len() <= max),
                ));
            }
        }

        FieldType::Date => {
            rules.push(Rule::new(
                format!("{label} must be a string"),
                |val: &Value| val.is_string(),
            ));
            rules.push(Rule::new(
                format!("{label} must be a valid date"),
                |val: &Value| as_date(val).is_some(),
            ));
            if let Some(raw) = &v.min_date {
                let min_date = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|e| {
                        SchemaError::constraint(
                            &field.name,
                            format!("invalid minDate '{raw}': {e}"),
                        )
                    })?;
                rules.push(Rule::new(
                    format!("{label} cannot be before {raw}"),
                    move |val| as_date(val).map_or(false, |d| d >= min_date),
                ));
            }
        }

        FieldType::Switch => {
            rules.push(Rule::new(
                format!("{label} must be a boolean"),
                |val: &Value| val.is_boolean(),
            ));
        }

        // Deliberate escape hatch: unknown types are unconstrained.
        FieldType::Other(_) => {}
    }

    Ok(FieldValidator {
        name: field.name.clone(),
        label: field.label.clone(),
        required: field.required,
        normalize,
        rules,
    })
}

fn option_values(field: &FieldSchema) -> HashSet<String> {
    field.options.iter().map(|o| o.value.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldOption, FieldValidations};
    use serde_json::json;

    fn field(name: &str, field_type: FieldType, required: bool) -> FieldSchema {
        FieldSchema {
            name: name.into(),
            label: name.to_uppercase(),
            field_type,
            placeholder: None,
            required,
            options: vec![],
            validations: FieldValidations::default(),
        }
    }

    fn options(values: &[&str]) -> Vec<FieldOption> {
        values
            .iter()
            .map(|v| FieldOption {
                label: v.to_uppercase(),
                value: v.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_required_empty_values_all_fail_the_same_way() {
        let fv = compile_field(&field("name", FieldType::Text, true)).unwrap();

        for empty in [None, Some(json!(null)), Some(json!("")), Some(json!([]))] {
            let err = fv.validate(empty.as_ref()).unwrap_err();
            assert_eq!(err, "NAME is required");
        }
    }

    #[test]
    fn test_optional_empty_short_circuits_past_constraints() {
        let mut f = field("bio", FieldType::Text, false);
        f.validations.min_length = Some(10);
        let fv = compile_field(&f).unwrap();

        // Empty never reaches minLength.
        assert_eq!(fv.validate(None).unwrap(), None);
        assert_eq!(fv.validate(Some(&json!(""))).unwrap(), None);

        // Present-but-invalid still fails normally.
        let err = fv.validate(Some(&json!("short"))).unwrap_err();
        assert_eq!(err, "BIO must be at least 10 characters");
    }

    #[test]
    fn test_text_rule_priority_order() {
        let mut f = field("code", FieldType::Text, true);
        f.validations.min_length = Some(3);
        f.validations.max_length = Some(6);
        f.validations.regex = Some("^[a-z]+$".into());
        let fv = compile_field(&f).unwrap();

        assert_eq!(
            fv.validate(Some(&json!(12))).unwrap_err(),
            "CODE must be a string"
        );
        assert_eq!(
            fv.validate(Some(&json!("ab"))).unwrap_err(),
            "CODE must be at least 3 characters"
        );
        assert_eq!(
            fv.validate(Some(&json!("abcdefg"))).unwrap_err(),
            "CODE must be at most 6 characters"
        );
        assert_eq!(fv.validate(Some(&json!("ABC"))).unwrap_err(), "CODE is invalid");
        assert_eq!(
            fv.validate(Some(&json!("abcd"))).unwrap(),
            Some(json!("abcd"))
        );
    }

    #[test]
    fn test_number_bounds_inclusive_and_coerced() {
        let mut f = field("age", FieldType::Number, true);
        f.validations.min = Some(0.0);
        f.validations.max = Some(100.0);
        let fv = compile_field(&f).unwrap();

        assert_eq!(fv.validate(Some(&json!(0))).unwrap(), Some(json!(0)));
        assert_eq!(fv.validate(Some(&json!(100))).unwrap(), Some(json!(100)));
        assert_eq!(
            fv.validate(Some(&json!(-1))).unwrap_err(),
            "AGE must be >= 0"
        );
        assert_eq!(
            fv.validate(Some(&json!(101))).unwrap_err(),
            "AGE must be <= 100"
        );
        // String input is coerced and normalized to a JSON number.
        assert_eq!(fv.validate(Some(&json!("42"))).unwrap(), Some(json!(42)));
        assert_eq!(
            fv.validate(Some(&json!("nope"))).unwrap_err(),
            "AGE must be a number"
        );
    }

    #[test]
    fn test_select_membership() {
        let mut f = field("role", FieldType::Select, true);
        f.options = options(&["a", "b"]);
        let fv = compile_field(&f).unwrap();

        assert_eq!(fv.validate(Some(&json!("a"))).unwrap(), Some(json!("a")));
        assert_eq!(
            fv.validate(Some(&json!("c"))).unwrap_err(),
            "ROLE has an invalid value"
        );
        assert_eq!(
            fv.validate(Some(&json!(1))).unwrap_err(),
            "ROLE must be a string"
        );
    }

    #[test]
    fn test_multi_select_membership_and_cardinality() {
        let mut f = field("tags", FieldType::MultiSelect, true);
        f.options = options(&["a", "b", "c"]);
        f.validations.min_selected = Some(1);
        f.validations.max_selected = Some(2);
        let fv = compile_field(&f).unwrap();

        // Empty array counts as empty, so required wins over minSelected.
        assert_eq!(fv.validate(Some(&json!([]))).unwrap_err(), "TAGS is required");
        assert_eq!(
            fv.validate(Some(&json!(["a"]))).unwrap(),
            Some(json!(["a"]))
        );
        assert_eq!(
            fv.validate(Some(&json!(["a", "b", "c"]))).unwrap_err(),
            "TAGS must have at most 2 selections"
        );
        assert_eq!(
            fv.validate(Some(&json!(["a", "z"]))).unwrap_err(),
            "TAGS contains invalid selections"
        );
        assert_eq!(
            fv.validate(Some(&json!(["a", 2]))).unwrap_err(),
            "TAGS contains invalid selections"
        );
        assert_eq!(
            fv.validate(Some(&json!("a"))).unwrap_err(),
            "TAGS must be an array"
        );
    }

    #[test]
    fn test_date_parse_and_min_date() {
        let mut f = field("start", FieldType::Date, true);
        f.validations.min_date = Some("2024-01-01".into());
        let fv = compile_field(&f).unwrap();

        assert!(fv.validate(Some(&json!("2024-01-01"))).is_ok());
        assert_eq!(
            fv.validate(Some(&json!("2023-12-31"))).unwrap_err(),
            "START cannot be before 2024-01-01"
        );
        assert_eq!(
            fv.validate(Some(&json!("soon"))).unwrap_err(),
            "START must be a valid date"
        );
    }

    #[test]
    fn test_switch_requires_boolean() {
        let fv = compile_field(&field("subscribed", FieldType::Switch, true)).unwrap();

        assert_eq!(
            fv.validate(Some(&json!(false))).unwrap(),
            Some(json!(false))
        );
        assert_eq!(
            fv.validate(Some(&json!("true"))).unwrap_err(),
            "SUBSCRIBED must be a boolean"
        );
    }

    #[test]
    fn test_unknown_type_is_unconstrained() {
        let fv =
            compile_field(&field("extra", FieldType::Other("color".into()), false)).unwrap();

        assert_eq!(
            fv.validate(Some(&json!({"r": 255}))).unwrap(),
            Some(json!({"r": 255}))
        );
    }

    #[test]
    fn test_bad_regex_is_a_compile_error() {
        let mut f = field("email", FieldType::Text, true);
        f.validations.regex = Some("[".into());
        let err = compile_field(&f).unwrap_err();
        assert!(err.to_string().contains("regex"));
    }

    #[test]
    fn test_bad_min_date_is_a_compile_error() {
        let mut f = field("start", FieldType::Date, true);
        f.validations.min_date = Some("January 1st".into());
        let err = compile_field(&f).unwrap_err();
        assert!(err.to_string().contains("minDate"));
    }
}
