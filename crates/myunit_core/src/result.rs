//! Test results and the suite report.

use std::fmt;
use std::time::Duration;

/// Message used when a test declared an expected failure but finished cleanly.
pub const EXPECTED_FAILURE_NOT_RAISED_MSG: &str = "Expected exception was not thrown.";

/// Final classification of one test execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Verdict {
    Ok,
    Failed,
    Ignored,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::Failed => "FAILED",
            Verdict::Ignored => "IGNORED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step of a test's lifecycle that raised its deciding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    Setup,
    Body,
    Teardown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Setup => "setup",
            Phase::Body => "body",
            Phase::Teardown => "teardown",
        })
    }
}

/// Outcome of one test. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TestResult {
    name: String,
    verdict: Verdict,
    message: String,
    #[cfg_attr(feature = "serde", serde(rename = "elapsed_millis", serialize_with = "serialize_millis"))]
    elapsed: Duration,
    failure_phase: Option<Phase>,
}

impl TestResult {
    pub fn passed(name: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            verdict: Verdict::Ok,
            message: String::new(),
            elapsed,
            failure_phase: None,
        }
    }

    /// A failed result. `phase` is `None` when no failure was raised (a missing expected failure).
    pub fn failed(
        name: impl Into<String>,
        message: impl Into<String>,
        elapsed: Duration,
        phase: Option<Phase>,
    ) -> Self {
        Self {
            name: name.into(),
            verdict: Verdict::Failed,
            message: message.into(),
            elapsed,
            failure_phase: phase,
        }
    }

    pub fn ignored(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verdict: Verdict::Ignored,
            message: reason.into(),
            elapsed: Duration::ZERO,
            failure_phase: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Failure message or ignore reason; empty for passing tests.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Wall time spent in setup, body and teardown.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_millis(&self) -> u64 {
        duration_millis(self.elapsed)
    }

    /// Which phase raised the failure that decided a FAILED verdict.
    pub fn failure_phase(&self) -> Option<Phase> {
        self.failure_phase
    }

    pub fn is_failed(&self) -> bool {
        self.verdict == Verdict::Failed
    }
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(feature = "serde")]
fn serialize_millis<S: serde::Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration_millis(*d))
}

/// Counts derived from a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub ignored: usize,
    #[cfg_attr(feature = "serde", serde(rename = "elapsed_millis", serialize_with = "serialize_millis"))]
    pub elapsed: Duration,
}

impl TestSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Ordered results of one suite run, one entry per registered test.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SuiteReport {
    suite: String,
    results: Vec<TestResult>,
}

impl SuiteReport {
    pub fn new(suite: impl Into<String>, results: Vec<TestResult>) -> Self {
        Self {
            suite: suite.into(),
            results,
        }
    }

    pub fn suite_name(&self) -> &str {
        &self.suite
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestResult> {
        self.results.iter()
    }

    /// Look up a result by test name.
    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn summary(&self) -> TestSummary {
        let mut summary = TestSummary {
            total: self.results.len(),
            ..TestSummary::default()
        };
        for result in &self.results {
            match result.verdict {
                Verdict::Ok => summary.passed += 1,
                Verdict::Failed => summary.failed += 1,
                Verdict::Ignored => summary.ignored += 1,
            }
            summary.elapsed += result.elapsed;
        }
        summary
    }

    pub fn into_results(self) -> Vec<TestResult> {
        self.results
    }
}

impl<'a> IntoIterator for &'a SuiteReport {
    type Item = &'a TestResult;
    type IntoIter = std::slice::Iter<'a, TestResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl IntoIterator for SuiteReport {
    type Item = TestResult;
    type IntoIter = std::vec::IntoIter<TestResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
