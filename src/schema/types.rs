//! Declarative form schema types
//!
//! A form is an ordered list of fields. Each field carries a closed type
//! tag, a `required` flag, an option list (select/multi-select only), and an
//! optional constraint bundle whose applicable keys depend on the type.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Supported field types
///
/// `Other` absorbs unrecognized type strings so a newer schema document
/// still loads; such fields validate permissively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text input
    Text,
    /// Numeric input
    Number,
    /// Single choice from a fixed option list
    Select,
    /// Multiple choices from a fixed option list
    #[serde(rename = "multi-select", alias = "multiselect")]
    MultiSelect,
    /// Calendar date
    Date,
    /// Multi-line text input
    Textarea,
    /// Boolean toggle
    Switch,
    /// Unrecognized type tag, passes through unconstrained
    #[serde(untagged)]
    Other(String),
}

impl FieldType {
    /// Returns the type name as it appears in schema documents.
    pub fn type_name(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::MultiSelect => "multi-select",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Switch => "switch",
            FieldType::Other(name) => name,
        }
    }

    /// True for types whose allowed values come from an option list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::MultiSelect)
    }
}

/// One allowed choice for select/multi-select fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// Constraint bundle; applicable keys depend on the field type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidations {
    /// text/textarea: minimum character count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// text/textarea: maximum character count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// text/textarea: full-value pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// number: inclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// number: inclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// date: inclusive lower bound, YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    /// multi-select: minimum number of selections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selected: Option<usize>,
    /// multi-select: maximum number of selections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selected: Option<usize>,
}

impl FieldValidations {
    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == FieldValidations::default()
    }
}

/// One form field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Unique key into submission payloads
    pub name: String,
    /// Display text, also used in generated error messages
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Allowed values for select/multi-select
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(
        default,
        alias = "validation",
        skip_serializing_if = "FieldValidations::is_empty"
    )]
    pub validations: FieldValidations,
}

/// Complete form definition: title, optional description, ordered fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Validates the schema document itself (not a submission).
    ///
    /// Field names must be unique and non-empty, and option-backed types
    /// must declare at least one option. Constraint values that need
    /// compiling (regex, minDate) are checked by the compiler.
    pub fn validate_structure(&self) -> Result<(), String> {
        let mut seen: HashSet<&str> = HashSet::new();

        for field in &self.fields {
            if field.name.is_empty() {
                return Err("field with empty 'name'".into());
            }
            if !seen.insert(field.name.as_str()) {
                return Err(format!("duplicate field name '{}'", field.name));
            }
            if field.field_type.has_options() && field.options.is_empty() {
                return Err(format!(
                    "field '{}' is {} but declares no options",
                    field.name,
                    field.field_type.type_name()
                ));
            }
        }

        Ok(())
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_field(name: &str) -> FieldSchema {
        FieldSchema {
            name: name.into(),
            label: name.into(),
            field_type: FieldType::Text,
            placeholder: None,
            required: true,
            options: vec![],
            validations: FieldValidations::default(),
        }
    }

    #[test]
    fn test_field_type_round_trip() {
        let parsed: FieldType = serde_json::from_value(json!("multi-select")).unwrap();
        assert_eq!(parsed, FieldType::MultiSelect);
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!("multi-select"));
    }

    #[test]
    fn test_multiselect_alias_accepted() {
        let parsed: FieldType = serde_json::from_value(json!("multiselect")).unwrap();
        assert_eq!(parsed, FieldType::MultiSelect);
    }

    #[test]
    fn test_unknown_type_parses_as_other() {
        let parsed: FieldType = serde_json::from_value(json!("color-picker")).unwrap();
        assert_eq!(parsed, FieldType::Other("color-picker".into()));
        assert_eq!(parsed.type_name(), "color-picker");
    }

    #[test]
    fn test_validation_bundle_alias() {
        let field: FieldSchema = serde_json::from_value(json!({
            "name": "bio",
            "label": "Bio",
            "type": "textarea",
            "required": false,
            "validation": { "maxLength": 200 }
        }))
        .unwrap();
        assert_eq!(field.validations.max_length, Some(200));
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let schema = FormSchema {
            title: "t".into(),
            description: None,
            fields: vec![text_field("a"), text_field("a")],
        };
        let err = schema.validate_structure().unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn test_select_requires_options() {
        let mut field = text_field("role");
        field.field_type = FieldType::Select;
        let schema = FormSchema {
            title: "t".into(),
            description: None,
            fields: vec![field],
        };
        let err = schema.validate_structure().unwrap_err();
        assert!(err.contains("options"));
    }

    #[test]
    fn test_full_document_parses() {
        let schema: FormSchema = serde_json::from_value(json!({
            "title": "Contact",
            "description": "Reach out",
            "fields": [
                {
                    "name": "email",
                    "label": "Email",
                    "type": "text",
                    "required": true,
                    "validations": { "regex": "^\\S+@\\S+$" }
                },
                {
                    "name": "topics",
                    "label": "Topics",
                    "type": "multi-select",
                    "required": false,
                    "options": [
                        { "label": "Sales", "value": "sales" },
                        { "label": "Support", "value": "support" }
                    ],
                    "validations": { "maxSelected": 2 }
                }
            ]
        }))
        .unwrap();

        assert!(schema.validate_structure().is_ok());
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.field("topics").unwrap().options.len(), 2);
    }
}
