//! CLI module for the myunit harness
//!
//! ## Commands
//!
//! - `list` - Show the built-in suites
//! - `run [SUITE...]` - Run the named suites (all of them when none are given)
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `reporter` - Console output for suite runs
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod reporter;

use std::fmt;
use std::panic;
use std::process;
use std::sync::Once;

use clap::{Parser, Subcommand};

use crate::config::{OutputFormat, RunConfig};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run declared test suites and report per-test verdicts
#[derive(Parser, Debug)]
#[command(name = "myunit")]
#[command(version)]
#[command(about = "Run declared test suites and report per-test verdicts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run test suites
    Run {
        /// Suites to run, in order (default: all built-in suites)
        #[arg(value_name = "SUITE")]
        suites: Vec<String>,
        /// Show timings
        #[arg(short, long)]
        verbose: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the built-in suites
    List,
}

impl Command {
    /// Build the run configuration for a `run` invocation.
    fn run_config(verbose: bool, json: bool, no_color: bool) -> RunConfig {
        let output = if json { OutputFormat::Json } else { OutputFormat::Text };
        RunConfig::new()
            .with_verbose(verbose)
            .with_output(output)
            .with_color(!no_color)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    if matches!(cli.command, Command::Run { .. }) {
        route_panics_to_log();
    }

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Send panic messages to the log instead of stderr for the rest of the process.
///
/// Installed at most once, and only from `run()`. Code calling `commands` directly keeps its own hook.
fn route_panics_to_log() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        panic::set_hook(Box::new(|info| {
            tracing::debug!(%info, "panic captured by harness");
        }));
    });
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Run {
            suites,
            verbose,
            json,
            no_color,
        } => {
            let config = Command::run_config(verbose, json, no_color);
            commands::run_suites(&suites, &config)
        }
        Command::List => commands::list_suites(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::try_parse_from(["myunit", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn test_cli_parse_run_defaults() {
        let cli = Cli::try_parse_from(["myunit", "run"]).unwrap();
        if let Command::Run {
            suites,
            verbose,
            json,
            no_color,
        } = cli.command
        {
            assert!(suites.is_empty());
            assert!(!verbose);
            assert!(!json);
            assert!(!no_color);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_run_with_flags() {
        let cli = Cli::try_parse_from(["myunit", "run", "map-contract", "lifecycle", "-v", "--json"]).unwrap();
        if let Command::Run {
            suites, verbose, json, ..
        } = cli.command
        {
            assert_eq!(suites, vec!["map-contract", "lifecycle"]);
            assert!(verbose);
            assert!(json);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["myunit"]).is_err());
    }

    #[test]
    fn test_run_config_from_flags() {
        let config = Command::run_config(true, true, true);
        assert!(config.verbose);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(!config.color);
    }

    #[test]
    fn test_execute_unknown_suite_fails() {
        let cli = Cli::try_parse_from(["myunit", "run", "no-such-suite"]).unwrap();
        let err = execute(cli).err().unwrap();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
