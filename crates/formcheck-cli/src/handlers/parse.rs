//! Parse command handler

use super::{effective_fidelity, read_document};
use crate::cli::ParseArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use formcheck_validation::ensure_json_str_with;
use tracing::{debug, instrument};

/// Handle the parse command
#[instrument(skip(config, output), fields(document = %args.document.display()))]
pub fn handle_parse(args: ParseArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer =
        Timer::with_details("parse_command", &format!("file: {}", args.document.display()));
    output.info(&format!("Parsing document: {}", args.document.display()))?;

    let text = read_document(&args.document)?;
    let fidelity = effective_fidelity(args.fidelity, config);
    debug!(?fidelity, "Running JSON ingestion");

    let (document, report) = ensure_json_str_with(&text, fidelity);
    output.report(&report)?;

    if let (Some(document), true) = (&document, args.show_document) {
        output.section("Document")?;
        output.data(document)?;
    }

    if report.is_valid() {
        Ok(())
    } else {
        output.error(&format!("{} is not valid JSON", args.document.display()))?;
        Err(Error::ValidationFailed {
            errors: report.errors.len(),
        })
    }
}
