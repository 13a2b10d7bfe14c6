//! Suite-level orchestration.
//!
//! ## Protocol
//!
//! One call to [`SuiteExecutor::run_all`] is one run:
//!
//! 1. Create exactly one instance of the suite type. Failure is fatal.
//! 2. Run every suite setup hook once, in order. The first failure is fatal and no test runs.
//! 3. Run each test through [`TestCaseExecutor`], in declaration order. Test failures never abort the run.
//! 4. Run every suite teardown hook once, in order. A failure is reported as an error that still carries the
//!    finished report.
//!
//! The instance is dropped when the run ends.

use std::fmt;

use crate::case::TestCaseExecutor;
use crate::catalog::{CatalogError, MethodCatalog, Suite};
use crate::failure::{self, BoxError, Failure};
use crate::reporter::{NoopReporter, TestReporter};
use crate::result::SuiteReport;
use crate::role::MethodRole;

type Factory<T> = Box<dyn Fn() -> Result<T, BoxError> + Send + Sync>;

/// Errors that abort a suite run.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SuiteError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error("could not create an instance of suite `{suite}`: {failure}")]
    #[diagnostic(code(myunit::instantiate))]
    Instantiate { suite: String, failure: Failure },

    #[error("suite setup `{hook}` failed: {failure}")]
    #[diagnostic(code(myunit::suite_setup), help("no test ran because suite setup did not complete"))]
    SuiteSetup { hook: String, failure: Failure },

    #[error("suite teardown `{hook}` failed: {failure}")]
    #[diagnostic(
        code(myunit::suite_teardown),
        help("all tests ran; their results are still available from the error")
    )]
    SuiteTeardown {
        hook: String,
        failure: Failure,
        report: SuiteReport,
    },
}

impl SuiteError {
    /// The report computed before a suite teardown failure. `None` for every other error.
    pub fn partial_report(&self) -> Option<&SuiteReport> {
        match self {
            SuiteError::SuiteTeardown { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn into_partial_report(self) -> Option<SuiteReport> {
        match self {
            SuiteError::SuiteTeardown { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Runs every test of one suite type.
pub struct SuiteExecutor<T> {
    catalog: MethodCatalog<T>,
    factory: Factory<T>,
}

impl<T: Default + 'static> SuiteExecutor<T> {
    /// Executor that creates its instance with `T::default()`.
    pub fn new(catalog: MethodCatalog<T>) -> Self {
        Self::with_factory(catalog, || Ok(T::default()))
    }
}

impl<T: Suite + Default> SuiteExecutor<T> {
    /// Scan `T` and build an executor for it.
    pub fn for_suite() -> Result<Self, SuiteError> {
        Ok(Self::new(MethodCatalog::<T>::scan()?))
    }
}

impl<T> SuiteExecutor<T> {
    /// Executor that creates its instance with a fallible constructor.
    pub fn with_factory(
        catalog: MethodCatalog<T>,
        factory: impl Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            catalog,
            factory: Box::new(factory),
        }
    }

    pub fn catalog(&self) -> &MethodCatalog<T> {
        &self.catalog
    }

    pub fn suite_name(&self) -> &str {
        self.catalog.suite_name()
    }

    /// Run the whole suite once.
    pub fn run_all(&self) -> Result<SuiteReport, SuiteError> {
        self.run_all_with(&mut NoopReporter)
    }

    /// Run the whole suite once, notifying `reporter` as it goes.
    #[tracing::instrument(skip_all, fields(suite = self.suite_name()))]
    pub fn run_all_with(&self, reporter: &mut dyn TestReporter) -> Result<SuiteReport, SuiteError> {
        let suite = self.suite_name();

        let mut instance = failure::invoke(|| (self.factory)()).map_err(|failure| {
            tracing::warn!(%failure, "suite instantiation failed");
            SuiteError::Instantiate {
                suite: suite.to_string(),
                failure,
            }
        })?;

        let tests = self.catalog.tests();
        reporter.on_suite_start(suite, tests.len());

        for hook in self.catalog.hooks(MethodRole::SuiteSetup) {
            tracing::debug!(hook = hook.name(), "running suite setup");
            hook.invoke(&mut instance).map_err(|failure| {
                tracing::warn!(hook = hook.name(), %failure, "suite setup failed");
                SuiteError::SuiteSetup {
                    hook: hook.name().to_string(),
                    failure,
                }
            })?;
        }

        let executor = TestCaseExecutor::new(&self.catalog);
        let mut results = Vec::with_capacity(tests.len());
        for test in tests {
            reporter.on_test_start(test.name());
            let result = executor.execute(&mut instance, test);
            tracing::debug!(
                test = result.name(),
                verdict = %result.verdict(),
                elapsed_ms = result.elapsed_millis(),
                "test finished"
            );
            reporter.on_test_complete(&result);
            results.push(result);
        }
        let report = SuiteReport::new(suite, results);

        let mut teardown_failure = None;
        for hook in self.catalog.hooks(MethodRole::SuiteTeardown) {
            tracing::debug!(hook = hook.name(), "running suite teardown");
            if let Err(failure) = hook.invoke(&mut instance) {
                tracing::warn!(hook = hook.name(), %failure, "suite teardown failed");
                if teardown_failure.is_none() {
                    teardown_failure = Some((hook.name().to_string(), failure));
                }
            }
        }
        drop(instance);

        reporter.on_suite_complete(&report);

        let summary = report.summary();
        tracing::info!(
            passed = summary.passed,
            failed = summary.failed,
            ignored = summary.ignored,
            "suite finished"
        );

        match teardown_failure {
            Some((hook, failure)) => Err(SuiteError::SuiteTeardown { hook, failure, report }),
            None => Ok(report),
        }
    }
}

impl<T> fmt::Debug for SuiteExecutor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteExecutor")
            .field("suite", &self.suite_name())
            .field("tests", &self.catalog.count(MethodRole::TestBody))
            .finish_non_exhaustive()
    }
}
