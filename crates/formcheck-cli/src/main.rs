//! Formcheck CLI - Command-line interface for JSON form validation
//!
//! This is the main entry point for the formcheck CLI application, providing
//! commands for parsing user-entered JSON and checking it against
//! required-attribute rules.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;
mod rules;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Load configuration before logging so its settings apply
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(e, cli.use_color()),
    };

    // Set up colored output
    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    // Initialize logging
    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, config, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(e, use_color),
    }
}

/// Print an error and exit with its code
fn exit_with(e: error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(&e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = cli
        .output
        .or(config.output.format)
        .unwrap_or(OutputFormat::Human);
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Check(args) => handlers::handle_check(args, &config, &mut output),
        Commands::Parse(args) => handlers::handle_parse(args, &config, &mut output),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    // File settings first, then environment overrides
    logging_config.merge_with_settings(&config.logging, verbosity);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["formcheck", "parse", "form.json"]);
        assert_eq!(cli.verbosity_level(), 0);

        // Test verbose flag
        let cli = Cli::parse_from(["formcheck", "-vv", "parse", "form.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        // Test quiet flag
        let cli = Cli::parse_from([
            "formcheck",
            "--quiet",
            "check",
            "form.json",
            "-r",
            "rules.yaml",
        ]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(cli.quiet);
    }
}
