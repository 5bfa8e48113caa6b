//! Check command handler

use super::{effective_fidelity, read_document};
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use crate::rules::RuleSet;
use formcheck_validation::{ensure_json_str_with, JsonFidelity, ResultCollector, ValidationResult};
use tracing::{info, instrument, warn};

/// Handle the check command
#[instrument(
    skip(config, output),
    fields(document = %args.document.display(), rules = %args.rules.display())
)]
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer =
        Timer::with_details("check_command", &format!("file: {}", args.document.display()));
    output.info(&format!("Checking document: {}", args.document.display()))?;

    let text = read_document(&args.document)?;
    let rules = RuleSet::from_file(&args.rules)?;
    let fidelity = effective_fidelity(args.fidelity, config);

    let report = check_document(&text, &rules, fidelity, config.rules.required_by_default)?;
    output.report(&report)?;

    if report.is_valid() {
        info!(warnings = report.warnings.len(), "Document passed all rules");
        Ok(())
    } else {
        warn!(errors = report.errors.len(), "Document failed validation");
        output.error(&format!(
            "{} has {} error(s)",
            args.document.display(),
            report.errors.len()
        ))?;
        Err(Error::ValidationFailed {
            errors: report.errors.len(),
        })
    }
}

/// Parse `text`, run every rule and aggregate everything into one report
///
/// Rules are skipped when the text is not valid JSON; the report then only
/// holds the ingestion error.
pub fn check_document(
    text: &str,
    rules: &RuleSet,
    fidelity: JsonFidelity,
    required_by_default: bool,
) -> Result<ValidationResult> {
    let (document, ingestion) = ensure_json_str_with(text, fidelity);

    let mut collector = ResultCollector::new();
    collector.push(ingestion);

    if let Some(document) = document {
        let _timer = Timer::new("rule_evaluation");
        collector.extend(rules.evaluate(&document, required_by_default)?);
    }

    Ok(collector.finish())
}
