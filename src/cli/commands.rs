//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io;

use myunit_core::{NoopReporter, SuiteError, SuiteReport, TestReporter};
use serde_json::{Value, json};

use super::reporter::ConsoleReporter;
use super::{CliError, CliResult, ExitCode};
use crate::config::{OutputFormat, RunConfig};
use crate::suites::{self, BUILTIN_SUITES, SuiteEntry};

// ============================================================================
// list
// ============================================================================

/// Print every built-in suite with its description.
pub fn list_suites() -> CliResult<ExitCode> {
    let width = BUILTIN_SUITES.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in BUILTIN_SUITES {
        println!("{:<width$}  {}", entry.name, entry.description, width = width);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// run
// ============================================================================

/// Result of running one suite: a report, a fatal error, or both (suite teardown failures keep their report).
pub struct SuiteOutcome {
    pub name: &'static str,
    pub report: Option<SuiteReport>,
    pub error: Option<SuiteError>,
}

impl SuiteOutcome {
    fn new(name: &'static str, result: Result<SuiteReport, SuiteError>) -> Self {
        match result {
            Ok(report) => Self {
                name,
                report: Some(report),
                error: None,
            },
            Err(error) => Self {
                name,
                report: error.partial_report().cloned(),
                error: Some(error),
            },
        }
    }

    /// True when the suite completed and no test failed.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.report.as_ref().is_some_and(|r| !r.summary().has_failures())
    }
}

/// Resolve suite names to built-in suites. No names selects every suite.
pub fn resolve_suites(names: &[String]) -> CliResult<Vec<&'static SuiteEntry>> {
    if names.is_empty() {
        return Ok(BUILTIN_SUITES.iter().collect());
    }
    names
        .iter()
        .map(|name| {
            suites::find(name).ok_or_else(|| {
                CliError::failure(format!(
                    "Unknown suite '{}'\nRun `myunit list` to see the available suites",
                    name
                ))
            })
        })
        .collect()
}

/// Run the selected suites in order, sending progress to `reporter`.
pub fn run_entries(entries: &[&'static SuiteEntry], reporter: &mut dyn TestReporter) -> Vec<SuiteOutcome> {
    entries
        .iter()
        .map(|entry| {
            tracing::debug!(suite = entry.name, "starting suite");
            SuiteOutcome::new(entry.name, entry.run(reporter))
        })
        .collect()
}

/// Run the named suites and print their results.
pub fn run_suites(names: &[String], config: &RunConfig) -> CliResult<ExitCode> {
    let entries = resolve_suites(names)?;

    let outcomes = match config.output {
        OutputFormat::Text => {
            let mut reporter = ConsoleReporter::new(io::stdout().lock(), config);
            run_entries(&entries, &mut reporter)
        }
        OutputFormat::Json => {
            let outcomes = run_entries(&entries, &mut NoopReporter);
            let document = outcomes_json(&outcomes)
                .and_then(|value| serde_json::to_string_pretty(&value))
                .map_err(|e| CliError::failure(format!("Failed to serialize results: {}", e)))?;
            println!("{}", document);
            outcomes
        }
    };

    let success = outcomes.iter().all(SuiteOutcome::is_success);

    if config.output == OutputFormat::Text {
        for outcome in outcomes {
            if let Some(error) = outcome.error {
                eprintln!("{:?}", miette::Report::new(error));
            }
        }
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        // Results already printed
        Err(CliError::new("", ExitCode::FAILURE))
    }
}

/// Build the `--json` document for a set of outcomes.
pub fn outcomes_json(outcomes: &[SuiteOutcome]) -> serde_json::Result<Value> {
    let mut suites = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        let (results, summary) = match &outcome.report {
            Some(report) => (
                serde_json::to_value(report.results())?,
                serde_json::to_value(report.summary())?,
            ),
            None => (Value::Array(Vec::new()), Value::Null),
        };
        suites.push(json!({
            "suite": outcome.name,
            "results": results,
            "summary": summary,
            "error": outcome.error.as_ref().map(|e| e.to_string()),
        }));
    }
    let success = outcomes.iter().all(SuiteOutcome::is_success);
    Ok(json!({ "success": success, "suites": suites }))
}
