//! Ingestion of user-entered JSON
//!
//! Raw text is parsed into a [`serde_json::Value`] and checked for fidelity
//! against what was typed. Parse failures become an `Invalid JSON` error
//! result; fidelity problems (most often duplicate keys, which the parser
//! silently collapses) become warnings.
//!
//! Two fidelity checks are available:
//!
//! - **Length** (default): re-serialize with 4-space indentation and compare
//!   the length with the entered text after expanding tabs to two spaces.
//!   Cheap and approximate.
//! - **DuplicateKeys**: scan the text for repeated keys and warn at the path
//!   of each repetition.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

pub mod duplicates;

pub use duplicates::{find_duplicate_keys, DuplicateKey};

use crate::path::FieldPath;
use crate::validation::{ValidationResult, ValidationWarning};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

/// Message of the error returned for unparsable input
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON";

/// Message of the warning returned by the length check
pub const JSON_MISMATCH_MESSAGE: &str =
    "Parsed JSON does not match the entered JSON, check for duplicate keys";

/// How parsed JSON is compared with the entered text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonFidelity {
    /// Compare lengths after re-serialization
    #[default]
    Length,
    /// Report each repeated object key
    DuplicateKeys,
}

/// Compare `raw` with `parsed` using the length heuristic
///
/// # Examples
///
/// ```rust
/// use formcheck_validation::json::validate_json_string;
/// use serde_json::json;
///
/// let typed = "{\n    \"a\": 1\n}";
/// assert!(validate_json_string(typed, &json!({"a": 1})).is_empty());
///
/// let with_duplicate = "{\n    \"a\": 1,\n    \"a\": 1\n}";
/// assert_eq!(validate_json_string(with_duplicate, &json!({"a": 1})).warnings.len(), 1);
/// ```
pub fn validate_json_string(raw: &str, parsed: &Value) -> ValidationResult {
    let entered = raw.replace('\t', "  ");
    let rendered = match to_indented_string(parsed) {
        Ok(rendered) => rendered,
        Err(err) => {
            warn!(error = %err, "could not re-serialize parsed JSON");
            return ValidationResult::warning(FieldPath::root(), JSON_MISMATCH_MESSAGE);
        }
    };

    if rendered.len() == entered.len() {
        ValidationResult::new()
    } else {
        debug!(
            entered = entered.len(),
            parsed = rendered.len(),
            "parsed JSON length differs from entered text"
        );
        ValidationResult::warning(FieldPath::root(), JSON_MISMATCH_MESSAGE)
    }
}

/// Warn once per repeated key in `raw`
///
/// `raw` is expected to be the text `parsed` came from. When it does not
/// scan as JSON the length heuristic against `parsed` is used instead;
/// [`ensure_json_str_with`] never reaches that path since it parses first.
pub fn duplicate_key_warnings(raw: &str, parsed: &Value) -> ValidationResult {
    match find_duplicate_keys(raw) {
        Ok(duplicates) => ValidationResult {
            errors: Vec::new(),
            warnings: duplicates
                .into_iter()
                .map(|duplicate| {
                    ValidationWarning::new(
                        duplicate.path,
                        format!(
                            "Duplicate key \"{}\", only the last value is kept",
                            duplicate.key
                        ),
                    )
                })
                .collect(),
        },
        Err(err) => {
            warn!(error = %err, "duplicate key scan failed, using length comparison");
            validate_json_string(raw, parsed)
        }
    }
}

/// Normalize `json` into a parsed value
///
/// Non-string values are returned unchanged with no report. Strings are
/// parsed: on failure the value is `None` and the report holds a single
/// `Invalid JSON` error at the root; on success the report holds the
/// length-check outcome.
///
/// # Examples
///
/// ```rust
/// use formcheck_validation::json::ensure_json_object;
/// use serde_json::json;
///
/// let (value, report) = ensure_json_object(json!({"a": 1}));
/// assert_eq!(value, Some(json!({"a": 1})));
/// assert!(report.is_none());
///
/// let (value, report) = ensure_json_object(json!("{invalid"));
/// assert!(value.is_none());
/// assert_eq!(report.unwrap().errors[0].message(), "Invalid JSON");
/// ```
pub fn ensure_json_object(json: Value) -> (Option<Value>, Option<ValidationResult>) {
    ensure_json_object_with(json, JsonFidelity::default())
}

/// [`ensure_json_object`] with an explicit fidelity check
pub fn ensure_json_object_with(
    json: Value,
    fidelity: JsonFidelity,
) -> (Option<Value>, Option<ValidationResult>) {
    match json {
        Value::String(raw) => {
            let (value, report) = ensure_json_str_with(&raw, fidelity);
            (value, Some(report))
        }
        other => (Some(other), None),
    }
}

/// Parse raw JSON text, always producing a report
pub fn ensure_json_str(raw: &str) -> (Option<Value>, ValidationResult) {
    ensure_json_str_with(raw, JsonFidelity::default())
}

/// [`ensure_json_str`] with an explicit fidelity check
pub fn ensure_json_str_with(
    raw: &str,
    fidelity: JsonFidelity,
) -> (Option<Value>, ValidationResult) {
    let parsed = match serde_json::from_str::<Value>(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(error = %err, "rejecting unparsable JSON input");
            return (
                None,
                ValidationResult::error(FieldPath::root(), INVALID_JSON_MESSAGE),
            );
        }
    };

    let report = match fidelity {
        JsonFidelity::Length => validate_json_string(raw, &parsed),
        JsonFidelity::DuplicateKeys => duplicate_key_warnings(raw, &parsed),
    };
    (Some(parsed), report)
}

fn to_indented_string(value: &Value) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_key_triggers_length_warning() {
        let (value, report) = ensure_json_object(json!(r#"{"a":1,"a":2}"#));
        assert_eq!(value, Some(json!({"a": 2})));

        let report = report.unwrap();
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].path.is_root());
        assert_eq!(report.warnings[0].message, JSON_MISMATCH_MESSAGE);
    }

    #[test]
    fn test_invalid_json() {
        let (value, report) = ensure_json_object(json!("{invalid"));
        assert_eq!(value, None);
        assert_eq!(
            report,
            Some(ValidationResult::error(FieldPath::root(), INVALID_JSON_MESSAGE))
        );
    }

    #[test]
    fn test_non_string_passes_through() {
        for input in [json!({"a": 1}), json!([1, 2]), json!(3), Value::Null] {
            let (value, report) = ensure_json_object(input.clone());
            assert_eq!(value, Some(input));
            assert_eq!(report, None);
        }
    }

    #[test]
    fn test_matching_text_has_no_warning() {
        let raw = "{\n    \"name\": \"x\",\n    \"tags\": [\n        1,\n        2\n    ]\n}";
        let (value, report) = ensure_json_str(raw);
        assert!(value.is_some());
        assert!(report.is_empty());
    }

    #[test]
    fn test_tabs_count_as_two_spaces() {
        // a tab expands to two spaces, so tab-indented text never matches the
        // 4-space rendering of a nested object
        let raw = "{\n\t\"a\": 1\n}";
        assert_eq!(validate_json_string(raw, &json!({"a": 1})).warnings.len(), 1);

        let raw = "{\n\t\t\"a\": 1\n}";
        assert!(validate_json_string(raw, &json!({"a": 1})).is_empty());
    }

    #[test]
    fn test_duplicate_key_fidelity() {
        let raw = r#"{"a": {"b": 1, "b": 2}, "c": 3}"#;
        let (value, report) = ensure_json_str_with(raw, JsonFidelity::DuplicateKeys);
        assert_eq!(value, Some(json!({"a": {"b": 2}, "c": 3})));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path.to_string(), "a.b");
        assert_eq!(
            report.warnings[0].message,
            "Duplicate key \"b\", only the last value is kept"
        );

        // compact text without duplicates is clean under this mode
        let (_, report) = ensure_json_str_with(r#"{"a":1}"#, JsonFidelity::DuplicateKeys);
        assert!(report.is_empty());
    }

    #[test]
    fn test_fidelity_serde_names() {
        assert_eq!(
            serde_json::to_value(JsonFidelity::DuplicateKeys).unwrap(),
            json!("duplicate_keys")
        );
        let parsed: JsonFidelity = serde_json::from_value(json!("length")).unwrap();
        assert_eq!(parsed, JsonFidelity::Length);
    }

    #[test]
    fn test_unscannable_text_falls_back_to_length_check() {
        let report = duplicate_key_warnings(r#"{"a": 1"#, &json!({"a": 1}));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].path.is_root());
        assert_eq!(report.warnings[0].message, JSON_MISMATCH_MESSAGE);
    }
}
