//! Merging of independent check results into one report
//!
//! General errors and warnings are concatenated in input order. Required
//! errors are collapsed along tree ancestry so that a failure reported at
//! several granularities (`user` missing, `user.email` missing) surfaces once,
//! at the most specific location.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use super::error::{ValidationError, ValidationResult};
use crate::path::FieldPath;
use tracing::{debug, trace};

/// What happened to a required error offered to [`RequiredErrors::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredInsert {
    /// No related entry existed; the error was appended
    Added,
    /// A related ancestor (or equal) entry now reports at the new, deeper path
    Narrowed,
    /// A more specific related entry already exists; nothing changed
    Absorbed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RequiredEntry {
    path: FieldPath,
    message: String,
}

/// Ordered list of required errors where no two paths are related by ancestry
#[derive(Debug, Clone, Default)]
pub struct RequiredErrors {
    entries: Vec<RequiredEntry>,
}

impl RequiredErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a required error to the list
    ///
    /// Because entries are pairwise unrelated, at most one existing entry can
    /// be an ancestor or descendant of `path`. When that entry is an ancestor
    /// (or the same path) it takes over `path` and keeps its message and
    /// position; when it is a descendant it wins and `path` is dropped.
    pub fn insert(&mut self, path: FieldPath, message: String) -> RequiredInsert {
        match self.entries.iter_mut().find(|entry| entry.path.is_related_to(&path)) {
            Some(similar) if path.starts_with(&similar.path) => {
                debug!(from = %similar.path, to = %path, "narrowing required error to deeper path");
                similar.path = path;
                RequiredInsert::Narrowed
            }
            Some(similar) => {
                trace!(
                    kept = %similar.path,
                    dropped = %path,
                    "required error already reported deeper"
                );
                RequiredInsert::Absorbed
            }
            None => {
                self.entries.push(RequiredEntry { path, message });
                RequiredInsert::Added
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.entries.iter().map(|entry| &entry.path)
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.entries
            .into_iter()
            .map(|entry| ValidationError::required(entry.path, entry.message))
            .collect()
    }
}

/// Merge results into one, general errors first then deduplicated required errors
///
/// # Examples
///
/// ```rust
/// use formcheck_validation::{aggregate_results, FieldPath, ValidationError, ValidationResult};
///
/// let at = |p: &str| FieldPath::parse(p).unwrap();
/// let report = aggregate_results(vec![
///     ValidationError::required(at("a.b.c"), "Missing required attribute \"c\"").into(),
///     ValidationError::required(at("a.b"), "Missing required attribute \"b\"").into(),
///     ValidationResult::error(at("x"), "Not a number"),
/// ]);
///
/// assert_eq!(report.errors.len(), 2);
/// assert!(!report.errors[0].is_required());
/// assert_eq!(report.errors[1].path(), &at("a.b.c"));
/// ```
pub fn aggregate_results<I>(results: I) -> ValidationResult
where
    I: IntoIterator<Item = ValidationResult>,
{
    let mut general = Vec::new();
    let mut required = RequiredErrors::new();
    let mut warnings = Vec::new();
    let mut inputs = 0usize;

    for result in results {
        inputs += 1;
        warnings.extend(result.warnings);

        for error in result.errors {
            match error {
                ValidationError::Required { path, message } => {
                    required.insert(path, message);
                }
                error @ ValidationError::General { .. } => general.push(error),
            }
        }
    }

    debug!(
        inputs,
        general = general.len(),
        required = required.len(),
        warnings = warnings.len(),
        "aggregated validation results"
    );

    let mut errors = general;
    errors.extend(required.into_errors());
    ValidationResult { errors, warnings }
}

impl FromIterator<ValidationResult> for ValidationResult {
    /// Collecting results aggregates them
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        aggregate_results(iter)
    }
}
