//! Console reporter for `myunit run`.

use std::io::{self, Write};

use myunit_core::{Phase, SuiteReport, TestReporter, TestResult, Verdict};

use crate::config::RunConfig;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Writes one status line per test and a summary line per suite.
///
/// The first write error (a closed pipe, for instance) is kept and every later line is dropped.
pub struct ConsoleReporter<W: Write> {
    out: W,
    verbose: bool,
    color: bool,
    suite: String,
    write_error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, config: &RunConfig) -> Self {
        Self {
            out,
            verbose: config.verbose,
            color: config.color,
            suite: String::new(),
            write_error: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// The write error that stopped output, if any.
    pub fn write_error(&self) -> Option<&io::Error> {
        self.write_error.as_ref()
    }

    fn emit(&mut self, line: &str) {
        if self.write_error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::debug!(error = %e, "console output failed; dropping further lines");
            self.write_error = Some(e);
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn status(&self, result: &TestResult) -> String {
        let (label, color) = match result.verdict() {
            Verdict::Ok => ("OK", GREEN),
            Verdict::Failed => ("FAILED", RED),
            Verdict::Ignored => ("IGNORED", YELLOW),
        };
        let mut status = self.paint(label, color);
        match result.verdict() {
            Verdict::Ignored => {
                if !result.message().is_empty() {
                    status.push_str(&format!(" ({})", result.message()));
                }
            }
            _ if self.verbose => status.push_str(&format!(" ({}ms)", result.elapsed_millis())),
            _ => {}
        }
        status
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_suite_start(&mut self, suite: &str, test_count: usize) {
        self.suite = suite.to_string();
        self.emit(&format!("running {} test(s) from {}", test_count, suite));
    }

    fn on_test_complete(&mut self, result: &TestResult) {
        let line = format!("{}::{} {}", self.suite, result.name(), self.status(result));
        self.emit(&line);

        if result.verdict() == Verdict::Failed {
            for line in result.message().lines() {
                self.emit(&format!("    {}", line));
            }
            if let Some(phase @ (Phase::Setup | Phase::Teardown)) = result.failure_phase() {
                self.emit(&format!("    (raised by per-test {} hook)", phase));
            }
        }
    }

    fn on_suite_complete(&mut self, report: &SuiteReport) {
        let summary = report.summary();
        let mut parts = Vec::new();
        if summary.passed > 0 {
            parts.push(self.paint(&format!("{} passed", summary.passed), GREEN));
        }
        if summary.failed > 0 {
            parts.push(self.paint(&format!("{} failed", summary.failed), RED));
        }
        if summary.ignored > 0 {
            parts.push(self.paint(&format!("{} ignored", summary.ignored), YELLOW));
        }
        if parts.is_empty() {
            parts.push("no tests".to_string());
        }

        let line = if self.verbose {
            format!(
                "====== {}: {} in {:.2}s ======",
                report.suite_name(),
                parts.join(", "),
                summary.elapsed.as_secs_f64()
            )
        } else {
            format!("====== {}: {} ======", report.suite_name(), parts.join(", "))
        };
        self.emit(&line);
    }
}
