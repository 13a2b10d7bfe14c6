//! Method catalog: a suite's registered methods grouped by role.
//!
//! Registration happens once, through [`CatalogBuilder`]. The builder records methods in the order they are
//! declared, and that order is what the executors follow.

use std::collections::HashSet;

use crate::descriptor::{HookDescriptor, TestDescriptor};
use crate::failure::TestOutcome;
use crate::role::MethodRole;

/// A type whose methods can be run as a test suite.
///
/// ```
/// use myunit_core::{CatalogBuilder, MethodCatalog, MethodRole, Suite};
///
/// #[derive(Default)]
/// struct Counter {
///     value: u32,
/// }
///
/// impl Suite for Counter {
///     fn declare(methods: &mut CatalogBuilder<Self>) {
///         methods
///             .before_each("reset", |c| {
///                 c.value = 0;
///                 Ok(())
///             })
///             .test("increments", |c| {
///                 c.value += 1;
///                 assert_eq!(c.value, 1);
///                 Ok(())
///             });
///     }
/// }
///
/// let catalog = MethodCatalog::<Counter>::scan().unwrap();
/// assert_eq!(catalog.count(MethodRole::TestBody), 1);
/// assert_eq!(catalog.count(MethodRole::TestSetup), 1);
/// ```
pub trait Suite: Sized + 'static {
    /// Name used in reports and logs.
    fn suite_name() -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }

    /// Register this suite's hooks and tests.
    fn declare(methods: &mut CatalogBuilder<Self>);
}

/// Errors found while validating registered methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum CatalogError {
    #[error("suite `{suite}` registers a {role} method with an empty name")]
    #[diagnostic(code(myunit::catalog), help("give every registered method a non-blank name"))]
    EmptyName { suite: String, role: MethodRole },

    #[error("suite `{suite}` registers test `{name}` more than once")]
    #[diagnostic(code(myunit::catalog), help("test names identify results, so they must be unique"))]
    DuplicateTest { suite: String, name: String },
}

/// Collects a suite's methods in declaration order.
pub struct CatalogBuilder<T> {
    suite_name: String,
    suite_setup: Vec<HookDescriptor<T>>,
    suite_teardown: Vec<HookDescriptor<T>>,
    test_setup: Vec<HookDescriptor<T>>,
    test_teardown: Vec<HookDescriptor<T>>,
    tests: Vec<TestDescriptor<T>>,
}

impl<T> CatalogBuilder<T> {
    pub fn new(suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            suite_setup: Vec::new(),
            suite_teardown: Vec::new(),
            test_setup: Vec::new(),
            test_teardown: Vec::new(),
            tests: Vec::new(),
        }
    }

    /// Register a hook that runs once before any test.
    pub fn before_all(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&mut T) -> TestOutcome + Send + Sync + 'static,
    ) -> &mut Self {
        let hook = HookDescriptor::new(MethodRole::SuiteSetup, name.into(), Box::new(func));
        self.suite_setup.push(hook);
        self
    }

    /// Register a hook that runs once after all tests.
    pub fn after_all(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&mut T) -> TestOutcome + Send + Sync + 'static,
    ) -> &mut Self {
        let hook = HookDescriptor::new(MethodRole::SuiteTeardown, name.into(), Box::new(func));
        self.suite_teardown.push(hook);
        self
    }

    /// Register a hook that runs before each non-ignored test.
    pub fn before_each(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&mut T) -> TestOutcome + Send + Sync + 'static,
    ) -> &mut Self {
        let hook = HookDescriptor::new(MethodRole::TestSetup, name.into(), Box::new(func));
        self.test_setup.push(hook);
        self
    }

    /// Register a hook that runs after each non-ignored test.
    pub fn after_each(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&mut T) -> TestOutcome + Send + Sync + 'static,
    ) -> &mut Self {
        let hook = HookDescriptor::new(MethodRole::TestTeardown, name.into(), Box::new(func));
        self.test_teardown.push(hook);
        self
    }

    /// Register a plain test: not ignored, no expected failure.
    pub fn test(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&mut T) -> TestOutcome + Send + Sync + 'static,
    ) -> &mut Self {
        self.add_test(TestDescriptor::new(name, func))
    }

    /// Register a fully described test.
    pub fn add_test(&mut self, test: TestDescriptor<T>) -> &mut Self {
        self.tests.push(test);
        self
    }

    /// Validate the registrations and freeze them into a catalog.
    pub fn build(self) -> Result<MethodCatalog<T>, CatalogError> {
        let hooks = self
            .suite_setup
            .iter()
            .chain(&self.suite_teardown)
            .chain(&self.test_setup)
            .chain(&self.test_teardown);
        for hook in hooks {
            if hook.name().trim().is_empty() {
                return Err(CatalogError::EmptyName {
                    suite: self.suite_name.clone(),
                    role: hook.role(),
                });
            }
        }

        let mut seen = HashSet::new();
        for test in &self.tests {
            if test.name().trim().is_empty() {
                return Err(CatalogError::EmptyName {
                    suite: self.suite_name.clone(),
                    role: MethodRole::TestBody,
                });
            }
            if !seen.insert(test.name()) {
                return Err(CatalogError::DuplicateTest {
                    suite: self.suite_name.clone(),
                    name: test.name().to_string(),
                });
            }
        }

        tracing::debug!(
            suite = %self.suite_name,
            tests = self.tests.len(),
            "method catalog built"
        );

        Ok(MethodCatalog {
            suite_name: self.suite_name,
            suite_setup: self.suite_setup,
            suite_teardown: self.suite_teardown,
            test_setup: self.test_setup,
            test_teardown: self.test_teardown,
            tests: self.tests,
        })
    }
}

/// A suite's validated methods, one ordered list per [`MethodRole`].
pub struct MethodCatalog<T> {
    suite_name: String,
    suite_setup: Vec<HookDescriptor<T>>,
    suite_teardown: Vec<HookDescriptor<T>>,
    test_setup: Vec<HookDescriptor<T>>,
    test_teardown: Vec<HookDescriptor<T>>,
    tests: Vec<TestDescriptor<T>>,
}

impl<T> MethodCatalog<T> {
    pub fn builder(suite_name: impl Into<String>) -> CatalogBuilder<T> {
        CatalogBuilder::new(suite_name)
    }

    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    /// Hooks registered under `role`, in declaration order. Empty for [`MethodRole::TestBody`].
    pub fn hooks(&self, role: MethodRole) -> &[HookDescriptor<T>] {
        match role {
            MethodRole::SuiteSetup => &self.suite_setup,
            MethodRole::SuiteTeardown => &self.suite_teardown,
            MethodRole::TestSetup => &self.test_setup,
            MethodRole::TestTeardown => &self.test_teardown,
            MethodRole::TestBody => &[],
        }
    }

    /// Test bodies in declaration order.
    pub fn tests(&self) -> &[TestDescriptor<T>] {
        &self.tests
    }

    /// Number of methods registered under `role`.
    pub fn count(&self, role: MethodRole) -> usize {
        match role {
            MethodRole::TestBody => self.tests.len(),
            _ => self.hooks(role).len(),
        }
    }
}

impl<T: Suite> MethodCatalog<T> {
    /// Collect the methods `T` declares.
    pub fn scan() -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::new(T::suite_name());
        T::declare(&mut builder);
        builder.build()
    }
}
