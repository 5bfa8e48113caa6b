//! Presence and allowed-value checks for a single attribute
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use super::error::ValidationResult;
use crate::path::{FieldPath, PathSegment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Check that `attribute` exists in `object` and, when `possible_values` is
/// given, that its value is one of them
///
/// `attribute` may be a nested expression such as `address.lines[0]`. Any
/// error is reported at `path` (the location of `object`) and is left
/// untagged; callers mark it required with
/// [`ValidationResult::mark_required`] before aggregation. JSON `null`
/// counts as present.
///
/// # Examples
///
/// ```rust
/// use formcheck_validation::{validate_required_attribute, FieldPath};
/// use serde_json::json;
///
/// let form = json!({"kind": "circle"});
/// let at = FieldPath::root().child("shape");
///
/// let missing = validate_required_attribute(&form, &at, "radius", None);
/// assert_eq!(missing.errors[0].message(), "Missing required attribute \"radius\"");
///
/// let options = [json!("square"), json!("triangle")];
/// let invalid = validate_required_attribute(&form, &at, "kind", Some(&options));
/// assert_eq!(
///     invalid.errors[0].message(),
///     "Invalid value \"circle\" for \"kind\" Valid options are [\"square\",\"triangle\"]"
/// );
/// ```
pub fn validate_required_attribute(
    object: &Value,
    path: &FieldPath,
    attribute: &str,
    possible_values: Option<&[Value]>,
) -> ValidationResult {
    let Some(value) = attribute_path(attribute).lookup(object) else {
        return ValidationResult::error(
            path.clone(),
            format!("Missing required attribute \"{}\"", attribute),
        );
    };

    match possible_values {
        Some(options) if !options.contains(value) => ValidationResult::error(
            path.clone(),
            format!(
                "Invalid value \"{}\" for \"{}\" Valid options are {}",
                display_value(value),
                attribute,
                json_list(options)
            ),
        ),
        _ => ValidationResult::new(),
    }
}

/// Attribute names always address something below the object itself
fn attribute_path(attribute: &str) -> FieldPath {
    match FieldPath::parse(attribute) {
        Ok(path) if !path.is_root() => path,
        _ => FieldPath::from(vec![PathSegment::Key(attribute.to_string())]),
    }
}

/// Strings render bare, everything else as compact JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_list(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(Value::to_string).collect();
    format!("[{}]", items.join(","))
}

/// A declarative required-attribute rule, as found in rule files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredAttribute {
    /// Attribute expression looked up inside the checked object
    pub attribute: String,
    /// Allowed values; any value is accepted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
}

impl RequiredAttribute {
    pub fn new<A: Into<String>>(attribute: A) -> Self {
        Self {
            attribute: attribute.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Vec<Value>) -> Self {
        self.options = Some(options);
        self
    }

    /// Where the attribute lives once its object sits at `object_path`
    ///
    /// Sibling attributes of one object get unrelated locations.
    pub fn location(&self, object_path: &FieldPath) -> FieldPath {
        object_path
            .segments()
            .iter()
            .chain(attribute_path(&self.attribute).segments())
            .cloned()
            .collect()
    }

    /// Run the rule against `object`, reporting any failure at `path` untagged
    pub fn evaluate(&self, object: &Value, path: &FieldPath) -> ValidationResult {
        validate_required_attribute(object, path, &self.attribute, self.options.as_deref())
    }

    /// Run the rule against `object` located at `path`, tagging errors required
    pub fn check(&self, object: &Value, path: &FieldPath) -> ValidationResult {
        self.evaluate(object, path).mark_required()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(input: &str) -> FieldPath {
        FieldPath::parse(input).unwrap()
    }

    #[test]
    fn test_missing_attribute() {
        let result = validate_required_attribute(&json!({}), &at("form"), "name", None);
        assert_eq!(result.errors.len(), 1);
        assert!(result.warnings.is_empty());
        assert_eq!(result.errors[0].path(), &at("form"));
        assert_eq!(result.errors[0].message(), "Missing required attribute \"name\"");
        assert!(!result.errors[0].is_required());
    }

    #[test]
    fn test_null_counts_as_present() {
        let result = validate_required_attribute(&json!({"name": null}), &at("form"), "name", None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_nested_attribute_lookup() {
        let object = json!({"address": {"lines": ["1 Main St"]}});
        let check = |attribute| validate_required_attribute(&object, &at("a"), attribute, None);
        assert!(check("address.lines[0]").is_empty());
        assert!(!check("address.lines[1]").is_valid());
        assert!(!check("address.zip").is_valid());
    }

    #[test]
    fn test_value_outside_options() {
        let options = [json!(1), json!(2)];
        let result = validate_required_attribute(&json!({"n": 3}), &at("x"), "n", Some(&options));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].message(),
            "Invalid value \"3\" for \"n\" Valid options are [1,2]"
        );
    }

    #[test]
    fn test_value_within_options() {
        let options = [json!("a"), json!("b")];
        let result = validate_required_attribute(&json!({"v": "b"}), &at("x"), "v", Some(&options));
        assert!(result.is_empty());
    }

    #[test]
    fn test_non_scalar_value_rendering() {
        let options = [json!("a")];
        let object = json!({"v": {"k": true}});
        let result = validate_required_attribute(&object, &at("x"), "v", Some(&options));
        assert_eq!(
            result.errors[0].message(),
            "Invalid value \"{\"k\":true}\" for \"v\" Valid options are [\"a\"]"
        );
    }

    #[test]
    fn test_empty_and_unparsable_attribute_names_are_literal_keys() {
        let object = json!({"": 1, "a..b": 2});
        assert!(validate_required_attribute(&object, &at("x"), "", None).is_empty());
        assert!(validate_required_attribute(&object, &at("x"), "a..b", None).is_empty());
        assert!(!validate_required_attribute(&json!({}), &at("x"), "", None).is_valid());
    }

    #[test]
    fn test_non_object_input_reports_missing() {
        let result = validate_required_attribute(&Value::Null, &at("x"), "name", None);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_rule_check_tags_required() {
        let rule = RequiredAttribute::new("kind").with_options(vec![json!("a")]);
        let result = rule.check(&json!({"kind": "b"}), &at("shape"));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].is_required());

        assert!(rule.check(&json!({"kind": "a"}), &at("shape")).is_empty());
    }

    #[test]
    fn test_rule_location_extends_object_path() {
        assert_eq!(RequiredAttribute::new("email").location(&at("user")), at("user.email"));
        assert_eq!(
            RequiredAttribute::new("lines[0]").location(&FieldPath::root()),
            at("lines[0]")
        );
        assert_eq!(
            RequiredAttribute::new("a..b").location(&at("x")),
            FieldPath::root().child("x").child("a..b")
        );
    }

    #[test]
    fn test_rule_deserializes_from_json() {
        let rule: RequiredAttribute =
            serde_json::from_value(json!({"attribute": "kind", "options": ["a", "b"]})).unwrap();
        assert_eq!(rule, RequiredAttribute::new("kind").with_options(vec![json!("a"), json!("b")]));

        let bare: RequiredAttribute = serde_json::from_value(json!({"attribute": "kind"})).unwrap();
        assert_eq!(bare.options, None);
    }
}
