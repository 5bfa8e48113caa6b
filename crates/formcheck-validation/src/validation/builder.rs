//! Builders for accumulating results during a tree walk
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use super::aggregate::aggregate_results;
use super::error::{ResultsError, ValidationError, ValidationResult, ValidationWarning};
use crate::path::FieldPath;

/// Append a result holding one error at `path`
///
/// The path is mandatory because aggregation keys on it; `None` is a caller
/// bug and is reported as [`ResultsError::MissingPath`].
pub fn add_error_result<M: Into<String>>(
    results: &mut Vec<ValidationResult>,
    path: Option<&str>,
    message: M,
) -> Result<(), ResultsError> {
    let path = path.ok_or(ResultsError::MissingPath)?;
    let path = FieldPath::parse(path)?;
    results.push(ValidationResult::error(path, message));
    Ok(())
}

/// Append a result holding one warning at `path`
///
/// Unlike [`add_error_result`] this never fails: a missing path records the
/// warning at the root and an unparsable one is kept as a literal key.
pub fn add_warning_result<M: Into<String>>(
    results: &mut Vec<ValidationResult>,
    path: Option<&str>,
    message: M,
) {
    let path = path.map(FieldPath::parse_or_key).unwrap_or_default();
    results.push(ValidationResult::warning(path, message));
}

/// Owning accumulator for per-node results
///
/// # Examples
///
/// ```rust
/// use formcheck_validation::{FieldPath, ResultCollector};
///
/// let mut collector = ResultCollector::new();
/// let user = FieldPath::root().child("user");
/// collector
///     .add_required_error(user.clone(), "Missing required attribute \"user\"")
///     .add_required_error(user.child("email"), "Missing required attribute \"email\"")
///     .add_warning(FieldPath::root(), "Parsed JSON does not match the entered JSON");
///
/// let report = collector.finish();
/// assert_eq!(report.errors.len(), 1);
/// assert_eq!(report.errors[0].path().to_string(), "user.email");
/// assert_eq!(report.warnings.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResultCollector {
    results: Vec<ValidationResult>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a general error
    pub fn add_error<M: Into<String>>(&mut self, path: FieldPath, message: M) -> &mut Self {
        self.push(ValidationResult::error(path, message))
    }

    /// Record an error subject to required-error deduplication
    pub fn add_required_error<M: Into<String>>(
        &mut self,
        path: FieldPath,
        message: M,
    ) -> &mut Self {
        self.push(ValidationError::required(path, message).into())
    }

    pub fn add_warning<M: Into<String>>(&mut self, path: FieldPath, message: M) -> &mut Self {
        self.push(ValidationWarning::new(path, message).into())
    }

    /// Record the full outcome of a check
    pub fn push(&mut self, result: ValidationResult) -> &mut Self {
        self.results.push(result);
        self
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ValidationResult> {
        self.results
    }

    /// Aggregate everything recorded so far into a single report
    pub fn finish(self) -> ValidationResult {
        aggregate_results(self.results)
    }
}

impl Extend<ValidationResult> for ResultCollector {
    fn extend<I: IntoIterator<Item = ValidationResult>>(&mut self, iter: I) {
        self.results.extend(iter);
    }
}
