// Tests for report formatting and the output writer
//
// These tests check the human layout of aggregated reports and that machine
// formats serialize the report unchanged.

use super::*;
use formcheck_validation::{aggregate_results, FieldPath};

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    SharedBuffer::writer(format, quiet)
}

fn sample_report() -> ValidationResult {
    let at = |p: &str| FieldPath::parse(p).unwrap();
    aggregate_results(vec![
        ValidationError::required(at("user"), "Missing required attribute \"email\"").into(),
        ValidationResult::error(at("age"), "Must be a number"),
        ValidationResult::warning(
            FieldPath::root(),
            "Parsed JSON does not match the entered JSON, check for duplicate keys",
        ),
    ])
}

#[test]
fn test_report_formatting_human() {
    let formatted = format_report_human(&sample_report());
    assert!(formatted.starts_with("✗ Validation failed - 2 error(s), 1 warning(s)\n"));
    assert!(formatted.contains("  1. 📍 age: Must be a number\n"));
    assert!(formatted
        .contains("  2. 📍 user [required]: Missing required attribute \"email\"\n"));
    assert!(formatted.contains("Warnings:\n  1. 📍 (root): Parsed JSON does not match"));
}

#[test]
fn test_empty_report_formatting_human() {
    assert_eq!(
        format_report_human(&ValidationResult::new()),
        "✓ No validation issues\n"
    );
}

#[test]
fn test_warning_only_headline() {
    let report = ValidationResult::warning(FieldPath::root().child("a"), "careful");
    assert!(format_report_human(&report).starts_with("⚠ Valid with 1 warning(s)"));
}

#[test]
fn test_writer_human_report_matches_formatter() {
    let report = sample_report();
    let (mut out, buffer) = writer(OutputFormat::Human, false);
    out.report(&report).unwrap();
    assert_eq!(buffer.contents(), format_report_human(&report));
}

#[test]
fn test_writer_json_report() {
    let report = sample_report();
    let (mut out, buffer) = writer(OutputFormat::Json, true);
    out.info("not shown for machine formats").unwrap();
    out.report(&report).unwrap();

    let written = buffer.contents();
    let parsed: ValidationResult = serde_json::from_str(written.trim()).unwrap();
    assert_eq!(parsed, report);
    assert!(!written.contains("not shown"));
}

#[test]
fn test_writer_yaml_report() {
    let (mut out, buffer) = writer(OutputFormat::Yaml, false);
    out.report(&sample_report()).unwrap();
    let written = buffer.contents();
    assert!(written.contains("kind: required"));
    assert!(written.contains("path: user"));
}

#[test]
fn test_quiet_suppresses_messages() {
    let (mut out, buffer) = writer(OutputFormat::Human, true);
    out.info("info").unwrap();
    out.success("done").unwrap();
    out.section("Title").unwrap();
    out.error("still shown").unwrap();
    assert_eq!(buffer.contents(), "ERROR: still shown\n");
}

#[test]
fn test_plain_messages() {
    let (mut out, buffer) = writer(OutputFormat::Human, false);
    out.info("Reading form.json").unwrap();
    out.section("Document").unwrap();
    out.data(&serde_json::json!({"a": 1})).unwrap();
    assert_eq!(
        buffer.contents(),
        "INFO: Reading form.json\n\n=== Document ===\n{\n  \"a\": 1\n}\n"
    );
}
