//! Validation results and their aggregation
//!
//! Individual checks each produce a [`ValidationResult`]; callers collect them
//! (with [`ResultCollector`] or the `add_*_result` helpers) and fold them into
//! one report with [`aggregate_results`]:
//!
//! - **General** errors are reported as-is, in input order
//! - **Required** errors are collapsed along tree ancestry to the most
//!   specific failing location and reported once
//! - **Warnings** are advisory and never deduplicated
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

pub mod aggregate;
pub mod builder;
pub mod error;
pub mod required;

// Re-export commonly used types
pub use aggregate::{aggregate_results, RequiredErrors, RequiredInsert};
pub use builder::{add_error_result, add_warning_result, ResultCollector};
pub use error::{ResultsError, ValidationError, ValidationResult, ValidationWarning};
pub use required::{validate_required_attribute, RequiredAttribute};
