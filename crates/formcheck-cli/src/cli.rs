//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use formcheck_validation::JsonFidelity;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Formcheck CLI - Required-attribute checks for user-entered JSON
///
/// Parses a JSON document, runs required-attribute rules against it and
/// prints one aggregated report of errors and warnings.
#[derive(Parser, Debug)]
#[command(
    name = "formcheck",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FORMCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: human]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a JSON document against a set of required-attribute rules
    Check(CheckArgs),

    /// Parse a JSON document and report ingestion problems only
    Parse(ParseArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the JSON document to check
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Path to the rules file (YAML, JSON or TOML)
    #[arg(short, long, value_name = "RULES")]
    pub rules: PathBuf,

    /// How the parsed document is compared with its text
    #[arg(long, value_enum)]
    pub fidelity: Option<Fidelity>,
}

/// Arguments for the parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Path to the JSON document to parse
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// How the parsed document is compared with its text
    #[arg(long, value_enum)]
    pub fidelity: Option<Fidelity>,

    /// Print the parsed document after the report
    #[arg(long)]
    pub show_document: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Fidelity check applied to parsed JSON
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Fidelity {
    /// Compare re-serialized length with the entered text
    Length,
    /// Report every repeated object key with its path
    DuplicateKeys,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<Fidelity> for JsonFidelity {
    fn from(fidelity: Fidelity) -> Self {
        match fidelity {
            Fidelity::Length => JsonFidelity::Length,
            Fidelity::DuplicateKeys => JsonFidelity::DuplicateKeys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Parse(ParseArgs {
                document: PathBuf::from("form.json"),
                fidelity: None,
                show_document: false,
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_check_arguments() {
        let cli = Cli::parse_from([
            "formcheck",
            "-o",
            "json-pretty",
            "check",
            "form.json",
            "--rules",
            "rules.yaml",
            "--fidelity",
            "duplicate-keys",
        ]);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.document, PathBuf::from("form.json"));
                assert_eq!(args.rules, PathBuf::from("rules.yaml"));
                assert_eq!(args.fidelity, Some(Fidelity::DuplicateKeys));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_fidelity_conversion() {
        assert_eq!(JsonFidelity::from(Fidelity::Length), JsonFidelity::Length);
        assert_eq!(JsonFidelity::from(Fidelity::DuplicateKeys), JsonFidelity::DuplicateKeys);
    }
}
