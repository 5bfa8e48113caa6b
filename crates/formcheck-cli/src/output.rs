//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with specialized
//! support for aggregated validation reports.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use formcheck_validation::{ValidationError, ValidationResult, ValidationWarning};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for reports
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format an aggregated validation report
    fn format_report(&self, report: &ValidationResult) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_report(&self, report: &ValidationResult) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.writeln(formatted.trim_end())
    }

    /// Write an aggregated report
    ///
    /// Human output colors error lines red and warning lines yellow; machine
    /// formats serialize the report as-is, even in quiet mode.
    pub fn report(&mut self, report: &ValidationResult) -> Result<()> {
        if self.format != OutputFormat::Human {
            let formatted = self.format.format_report(report)?;
            return self.writeln(formatted.trim_end());
        }

        if report.is_empty() {
            return self.success("✓ No validation issues");
        }

        self.writeln(&report_headline(report))?;
        for (i, error) in report.errors.iter().enumerate() {
            let line = format_error_line(i + 1, error);
            if self.use_color {
                self.writeln(&line.red().to_string())?;
            } else {
                self.writeln(&line)?;
            }
        }
        if !report.warnings.is_empty() {
            self.writeln("Warnings:")?;
        }
        for (i, warning) in report.warnings.iter().enumerate() {
            let line = format_warning_line(i + 1, warning);
            if self.use_color {
                self.writeln(&line.yellow().to_string())?;
            } else {
                self.writeln(&line)?;
            }
        }
        Ok(())
    }
}

/// Format an aggregated report for human reading
fn format_report_human(report: &ValidationResult) -> String {
    if report.is_empty() {
        return "✓ No validation issues\n".to_string();
    }

    let mut output = report_headline(report);
    output.push('\n');
    for (i, error) in report.errors.iter().enumerate() {
        output.push_str(&format_error_line(i + 1, error));
        output.push('\n');
    }
    if !report.warnings.is_empty() {
        output.push_str("Warnings:\n");
    }
    for (i, warning) in report.warnings.iter().enumerate() {
        output.push_str(&format_warning_line(i + 1, warning));
        output.push('\n');
    }
    output
}

fn report_headline(report: &ValidationResult) -> String {
    if report.is_valid() {
        format!("⚠ Valid with {} warning(s)", report.warnings.len())
    } else {
        format!(
            "✗ Validation failed - {} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        )
    }
}

fn format_error_line(number: usize, error: &ValidationError) -> String {
    let kind = if error.is_required() { " [required]" } else { "" };
    format!(
        "  {}. 📍 {}{}: {}",
        number,
        display_path(&error.path().to_string()),
        kind,
        error.message()
    )
}

fn format_warning_line(number: usize, warning: &ValidationWarning) -> String {
    format!(
        "  {}. 📍 {}: {}",
        number,
        display_path(&warning.path.to_string()),
        warning.message
    )
}

/// The root path displays as the empty string, which reads poorly
fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "(root)"
    } else {
        path
    }
}

/// Writer that keeps everything written for later inspection
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl SharedBuffer {
    /// An uncolored writer over a fresh buffer
    pub(crate) fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let writer = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
        (writer, buffer)
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}
