//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod check;
mod parse;

pub use check::handle_check;
pub use parse::handle_parse;

use crate::cli::Fidelity;
use crate::config::Config;
use crate::error::{Error, Result};
use formcheck_validation::JsonFidelity;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a document as text, reporting a missing file distinctly
fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    debug!("Document read successfully, {} bytes", content.len());
    Ok(content)
}

/// The command-line flag wins over the configured fidelity
fn effective_fidelity(flag: Option<Fidelity>, config: &Config) -> JsonFidelity {
    flag.map(JsonFidelity::from)
        .unwrap_or(config.ingestion.fidelity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_fidelity() {
        let mut config = Config::default();
        assert_eq!(effective_fidelity(None, &config), JsonFidelity::Length);

        config.ingestion.fidelity = JsonFidelity::DuplicateKeys;
        assert_eq!(effective_fidelity(None, &config), JsonFidelity::DuplicateKeys);
        assert_eq!(
            effective_fidelity(Some(Fidelity::Length), &config),
            JsonFidelity::Length
        );
    }

    #[test]
    fn test_read_missing_document() {
        let err = read_document(Path::new("/nonexistent/form.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
