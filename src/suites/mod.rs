//! Built-in suites available from the CLI.

mod lifecycle;
mod string_map;

pub use lifecycle::Lifecycle;
pub use string_map::{MapContract, StringMap};

use myunit_core::{Suite, SuiteError, SuiteExecutor, SuiteReport, TestReporter};

type RunFn = fn(&mut dyn TestReporter) -> Result<SuiteReport, SuiteError>;

/// A suite the CLI can run by name.
pub struct SuiteEntry {
    pub name: &'static str,
    pub description: &'static str,
    run: RunFn,
}

impl SuiteEntry {
    pub fn run(&self, reporter: &mut dyn TestReporter) -> Result<SuiteReport, SuiteError> {
        (self.run)(reporter)
    }
}

fn run_suite<T: Suite + Default>(reporter: &mut dyn TestReporter) -> Result<SuiteReport, SuiteError> {
    SuiteExecutor::<T>::for_suite()?.run_all_with(reporter)
}

/// Every built-in suite, in the order `run` executes them by default.
pub const BUILTIN_SUITES: &[SuiteEntry] = &[
    SuiteEntry {
        name: "map-contract",
        description: "put/get/remove/contains/clear/size contract of StringMap",
        run: run_suite::<MapContract>,
    },
    SuiteEntry {
        name: "lifecycle",
        description: "hook ordering, expected failures and ignored tests",
        run: run_suite::<Lifecycle>,
    },
];

/// Look up a built-in suite by name.
pub fn find(name: &str) -> Option<&'static SuiteEntry> {
    BUILTIN_SUITES.iter().find(|entry| entry.name == name)
}
