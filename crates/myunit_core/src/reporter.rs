//! Progress notifications from a running suite.

use crate::result::{SuiteReport, TestResult};

/// Receives events while a suite runs.
///
/// Every method has an empty default so implementations only override what they need. Reporters observe; they
/// cannot change results.
pub trait TestReporter {
    /// Called after the instance exists and before suite setup runs.
    fn on_suite_start(&mut self, _suite: &str, _test_count: usize) {}

    /// Called before a test's lifecycle begins (including ignored tests).
    fn on_test_start(&mut self, _name: &str) {}

    /// Called once a test's result is final.
    fn on_test_complete(&mut self, _result: &TestResult) {}

    /// Called after suite teardown, when a report is available.
    fn on_suite_complete(&mut self, _report: &SuiteReport) {}
}

/// Reporter that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl TestReporter for NoopReporter {}

/// Reporter that keeps every completed result, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    pub started: Vec<String>,
    pub completed: Vec<TestResult>,
    pub suites_finished: usize,
}

impl TestReporter for CollectingReporter {
    fn on_test_start(&mut self, name: &str) {
        self.started.push(name.to_string());
    }

    fn on_test_complete(&mut self, result: &TestResult) {
        self.completed.push(result.clone());
    }

    fn on_suite_complete(&mut self, _report: &SuiteReport) {
        self.suites_finished += 1;
    }
}
