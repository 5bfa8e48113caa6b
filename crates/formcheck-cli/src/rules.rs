//! Rule files for the check command
//!
//! A rule file lists required attributes by the location of the object that
//! must carry them. Failures are reported at the attribute itself, so
//! `user.email` below fails at `user.email` even when `user` is absent:
//!
//! ```yaml
//! rules:
//!   - path: user
//!     attribute: email
//!   - path: user.address
//!     attribute: country
//!     options: ["FR", "DE"]
//!     required: false
//! ```

use crate::config::FileFormat;
use crate::error::{Error, Result};
use formcheck_validation::{FieldPath, RequiredAttribute, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// A parsed rules file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// One required-attribute rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Location of the object holding the attribute; empty for the document root
    #[serde(default)]
    pub path: String,

    /// Attribute and allowed values checked inside that object
    #[serde(flatten)]
    pub check: RequiredAttribute,

    /// Whether failures collapse along path ancestry; falls back to config
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl RuleSet {
    /// Load a rule file, picking the format from its extension
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = FileFormat::from_path(path).ok_or_else(|| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML, JSON or TOML".to_string(),
        })?;

        let content = fs::read_to_string(path)?;
        let rules: RuleSet = format.parse(&content)?;
        debug!(count = rules.rules.len(), file = %path.display(), "Loaded rules");
        Ok(rules)
    }

    /// Run every rule against `document`, one result per rule
    pub fn evaluate(
        &self,
        document: &Value,
        required_by_default: bool,
    ) -> Result<Vec<ValidationResult>> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(document, required_by_default))
            .collect()
    }
}

impl Rule {
    /// Check this rule against `document`
    ///
    /// When nothing exists at `path` the attribute is checked against `null`
    /// and so reported missing.
    pub fn evaluate(
        &self,
        document: &Value,
        required_by_default: bool,
    ) -> Result<ValidationResult> {
        let path = FieldPath::parse(&self.path)?;
        let object = path.lookup(document).unwrap_or(&Value::Null);
        let location = self.check.location(&path);
        trace!(%location, "Evaluating rule");

        if self.required.unwrap_or(required_by_default) {
            Ok(self.check.check(object, &location))
        } else {
            Ok(self.check.evaluate(object, &location))
        }
    }
}
