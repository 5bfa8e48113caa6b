//! Formcheck Validation - result aggregation for JSON form checks
//!
//! This crate collects the outcome of many small checks run over a
//! user-entered JSON document and merges them into a single report:
//! - **Paths**: structured [`FieldPath`]s with segment-prefix ancestry
//! - **Results**: [`ValidationResult`] holding path-keyed errors and warnings
//! - **Aggregation**: required-attribute errors collapse to the most specific
//!   failing location, general errors and warnings pass through
//! - **Ingestion**: raw JSON text is parsed and checked for silent data loss
//!
//! ## Quick Start
//!
//! ```rust
//! use formcheck_validation::{ensure_json_object, FieldPath, RequiredAttribute, ResultCollector};
//! use serde_json::json;
//!
//! let (document, ingestion) = ensure_json_object(json!(r#"{"user": {"name": "Ada"}}"#));
//! let document = document.unwrap();
//!
//! let mut collector = ResultCollector::new();
//! collector.extend(ingestion);
//!
//! let user = FieldPath::root().child("user");
//! let object = user.lookup(&document).unwrap();
//! collector.push(RequiredAttribute::new("email").check(object, &user));
//!
//! let report = collector.finish();
//! assert_eq!(report.errors.len(), 1);
//! assert_eq!(report.errors[0].message(), "Missing required attribute \"email\"");
//! ```
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

pub mod json;
pub mod path;
pub mod validation;

// Re-export commonly used types for convenience
pub use json::{
    duplicate_key_warnings, ensure_json_object, ensure_json_object_with, ensure_json_str,
    ensure_json_str_with, find_duplicate_keys, validate_json_string, DuplicateKey, JsonFidelity,
    INVALID_JSON_MESSAGE, JSON_MISMATCH_MESSAGE,
};
pub use path::{FieldPath, PathError, PathSegment};
pub use validation::{
    add_error_result, add_warning_result, aggregate_results, validate_required_attribute,
    RequiredAttribute, RequiredErrors, RequiredInsert, ResultCollector, ResultsError,
    ValidationError, ValidationResult, ValidationWarning,
};
