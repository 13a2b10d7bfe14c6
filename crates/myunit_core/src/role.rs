//! Method roles recognized by the catalog.

use std::fmt;

/// The role a registered method plays in a suite's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodRole {
    /// Runs once before any test.
    SuiteSetup,
    /// Runs once after every test has finished.
    SuiteTeardown,
    /// Runs before each non-ignored test.
    TestSetup,
    /// Runs after each non-ignored test.
    TestTeardown,
    /// A test body.
    TestBody,
}

impl MethodRole {
    /// All roles, in lifecycle order.
    pub const ALL: [MethodRole; 5] = [
        MethodRole::SuiteSetup,
        MethodRole::TestSetup,
        MethodRole::TestBody,
        MethodRole::TestTeardown,
        MethodRole::SuiteTeardown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MethodRole::SuiteSetup => "before_all",
            MethodRole::SuiteTeardown => "after_all",
            MethodRole::TestSetup => "before_each",
            MethodRole::TestTeardown => "after_each",
            MethodRole::TestBody => "test",
        }
    }

    /// Whether methods of this role run once per suite rather than once per test.
    pub fn is_suite_level(self) -> bool {
        matches!(self, MethodRole::SuiteSetup | MethodRole::SuiteTeardown)
    }
}

impl fmt::Display for MethodRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
