//! Validation result types shared by every check
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use crate::path::{FieldPath, PathError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A failed check, keyed by the path it applies to
///
/// `Required` errors report a missing or disallowed attribute value. They are
/// collapsed along tree ancestry when results are aggregated, while
/// `General` errors are always reported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Validation error at '{path}': {message}")]
    General { path: FieldPath, message: String },

    #[error("Required attribute error at '{path}': {message}")]
    Required { path: FieldPath, message: String },
}

impl ValidationError {
    /// Create an error that is never deduplicated
    pub fn general<M: Into<String>>(path: FieldPath, message: M) -> Self {
        Self::General {
            path,
            message: message.into(),
        }
    }

    /// Create an error subject to required-error deduplication
    pub fn required<M: Into<String>>(path: FieldPath, message: M) -> Self {
        Self::Required {
            path,
            message: message.into(),
        }
    }

    pub fn path(&self) -> &FieldPath {
        match self {
            Self::General { path, .. } | Self::Required { path, .. } => path,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::General { message, .. } | Self::Required { message, .. } => message,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required { .. })
    }

    /// Tag this error as originating from a required-attribute check
    pub fn into_required(self) -> Self {
        match self {
            Self::General { path, message } => Self::Required { path, message },
            required => required,
        }
    }
}

/// Advisory observation that does not block submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: FieldPath,
    pub message: String,
}

impl ValidationWarning {
    pub fn new<M: Into<String>>(path: FieldPath, message: M) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation warning at '{}': {}", self.path, self.message)
    }
}

/// Outcome of one check, or of an aggregation of many
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default)]
    pub errors: Vec<ValidationError>,
    #[serde(default)]
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// A result holding exactly one general error
    pub fn error<M: Into<String>>(path: FieldPath, message: M) -> Self {
        ValidationError::general(path, message).into()
    }

    /// A result holding exactly one warning
    pub fn warning<M: Into<String>>(path: FieldPath, message: M) -> Self {
        ValidationWarning::new(path, message).into()
    }

    /// True when there are no errors; warnings do not count
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Tag every error as a required-attribute error
    pub fn mark_required(mut self) -> Self {
        self.errors = self
            .errors
            .into_iter()
            .map(ValidationError::into_required)
            .collect();
        self
    }

    /// Errors reported at exactly `path`
    pub fn errors_at<'a>(
        &'a self,
        path: &'a FieldPath,
    ) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |error| error.path() == path)
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
            warnings: Vec::new(),
        }
    }
}

impl From<ValidationWarning> for ValidationResult {
    fn from(warning: ValidationWarning) -> Self {
        Self {
            errors: Vec::new(),
            warnings: vec![warning],
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No validation issues");
        }

        write!(
            f,
            "{} error(s), {} warning(s):",
            self.errors.len(),
            self.warnings.len()
        )?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        for warning in &self.warnings {
            write!(f, "\n  - {}", warning)?;
        }
        Ok(())
    }
}

/// Misuse of the result builders
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResultsError {
    /// Errors are keyed by path for deduplication, so one must be given
    #[error("A path is required to record a validation error")]
    MissingPath,

    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathError),
}
