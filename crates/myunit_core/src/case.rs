//! Single-test lifecycle: per-test setup, body, per-test teardown, then verdict classification.

use std::time::Instant;

use crate::catalog::MethodCatalog;
use crate::descriptor::{Expectation, HookDescriptor, TestDescriptor};
use crate::failure::Failure;
use crate::result::{EXPECTED_FAILURE_NOT_RAISED_MSG, Phase, TestResult, Verdict};
use crate::role::MethodRole;

/// Runs one test at a time against a shared instance.
pub struct TestCaseExecutor<'a, T> {
    setup: &'a [HookDescriptor<T>],
    teardown: &'a [HookDescriptor<T>],
}

impl<'a, T> TestCaseExecutor<'a, T> {
    pub fn new(catalog: &'a MethodCatalog<T>) -> Self {
        Self {
            setup: catalog.hooks(MethodRole::TestSetup),
            teardown: catalog.hooks(MethodRole::TestTeardown),
        }
    }

    /// Run `test` to completion and classify the outcome.
    ///
    /// Ignored tests return at once with zero elapsed time. Otherwise setup hooks run in order until one fails,
    /// the body runs only if all of them succeeded, and every teardown hook runs regardless. The last failure
    /// seen in that sequence decides the verdict.
    #[tracing::instrument(level = "debug", skip_all, fields(test = test.name()))]
    pub fn execute(&self, instance: &mut T, test: &TestDescriptor<T>) -> TestResult {
        if let Some(reason) = test.ignore_reason() {
            tracing::debug!(reason, "test ignored");
            return TestResult::ignored(test.name(), reason);
        }

        let start = Instant::now();
        let mut last: Option<(Phase, Failure)> = None;

        for hook in self.setup {
            if let Err(failure) = hook.invoke(instance) {
                tracing::debug!(hook = hook.name(), %failure, "per-test setup failed");
                last = Some((Phase::Setup, failure));
                break;
            }
        }

        if last.is_none() {
            if let Err(failure) = test.invoke(instance) {
                tracing::debug!(%failure, "test body raised");
                last = Some((Phase::Body, failure));
            }
        }

        for hook in self.teardown {
            if let Err(failure) = hook.invoke(instance) {
                tracing::debug!(hook = hook.name(), %failure, "per-test teardown failed");
                last = Some((Phase::Teardown, failure));
            }
        }

        let elapsed = start.elapsed();
        let (phase, failure) = match last {
            Some((phase, failure)) => (Some(phase), Some(failure)),
            None => (None, None),
        };

        match classify(failure.as_ref(), test.expected_failure()) {
            (Verdict::Ok, _) => TestResult::passed(test.name(), elapsed),
            // `phase` stays None for a missing expected failure: nothing was raised.
            (_, message) => TestResult::failed(test.name(), message, elapsed, phase),
        }
    }
}

/// Classify the failure that escaped a test (if any) against its declared expectation.
///
/// Returns the verdict and the message to report. Never yields [`Verdict::Ignored`].
pub fn classify(raised: Option<&Failure>, expected: Option<&Expectation>) -> (Verdict, String) {
    match (raised, expected) {
        (None, None) => (Verdict::Ok, String::new()),
        (None, Some(_)) => (Verdict::Failed, EXPECTED_FAILURE_NOT_RAISED_MSG.to_string()),
        (Some(failure), Some(expectation)) if expectation.matches(failure) => (Verdict::Ok, String::new()),
        (Some(failure), _) => (Verdict::Failed, failure.message()),
    }
}
