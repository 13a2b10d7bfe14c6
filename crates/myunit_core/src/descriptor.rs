//! Immutable registration records: hooks, tests and failure expectations.

use std::error::Error;
use std::fmt;

use crate::failure::{Failure, TestOutcome};
use crate::role::MethodRole;

/// A registered callable. Receives the suite's single shared instance.
pub type MethodFn<T> = Box<dyn Fn(&mut T) -> TestOutcome + Send + Sync>;

type MatchFn = Box<dyn Fn(&Failure) -> bool + Send + Sync>;

// ============================================================================
// Expectation
// ============================================================================

/// A declared expected failure.
///
/// Rust exposes no runtime type hierarchy, so compatibility is an explicit predicate. For
/// [`Expectation::error`] the predicate is a downcast: every variant of an error enum is accepted, which is how
/// "same type or subtype" is expressed for categorized errors. [`Expectation::matching`] takes any other check.
pub struct Expectation {
    name: String,
    matcher: MatchFn,
}

impl Expectation {
    /// Expect a returned error of type `E`.
    pub fn error<E: Error + 'static>() -> Self {
        Self {
            name: short_type_name::<E>().to_string(),
            matcher: Box::new(|failure| failure.downcast_ref::<E>().is_some()),
        }
    }

    /// Expect any panic.
    pub fn panic() -> Self {
        Self {
            name: "panic".to_string(),
            matcher: Box::new(Failure::is_panic),
        }
    }

    /// Expect a panic whose message contains `needle`.
    pub fn panic_containing(needle: impl Into<String>) -> Self {
        let needle = needle.into();
        Self {
            name: format!("panic containing {needle:?}"),
            matcher: Box::new(move |failure| match failure {
                Failure::Panic(message) => message.contains(needle.as_str()),
                Failure::Error(_) => false,
            }),
        }
    }

    /// Expect a failure accepted by a caller-supplied compatibility check.
    pub fn matching(name: impl Into<String>, predicate: impl Fn(&Failure) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            matcher: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `failure` satisfies this expectation.
    pub fn matches(&self, failure: &Failure) -> bool {
        (self.matcher)(failure)
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation").field("name", &self.name).finish_non_exhaustive()
    }
}

fn short_type_name<E: ?Sized>() -> &'static str {
    let full = std::any::type_name::<E>();
    // Strip the module path but keep generic arguments intact.
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

// ============================================================================
// Hook descriptor
// ============================================================================

/// A registered setup or teardown method.
pub struct HookDescriptor<T> {
    role: MethodRole,
    name: String,
    func: MethodFn<T>,
}

impl<T> HookDescriptor<T> {
    pub(crate) fn new(role: MethodRole, name: String, func: MethodFn<T>) -> Self {
        Self { role, name, func }
    }

    pub fn role(&self) -> MethodRole {
        self.role
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the hook on `instance`, capturing errors and panics.
    pub fn invoke(&self, instance: &mut T) -> Result<(), Failure> {
        crate::failure::invoke(|| (self.func)(instance))
    }
}

impl<T> fmt::Debug for HookDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookDescriptor")
            .field("role", &self.role)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Test descriptor
// ============================================================================

/// A registered test body and its metadata.
///
/// Built at registration time and never changed afterwards:
///
/// ```
/// use myunit_core::{Expectation, TestDescriptor};
///
/// let test = TestDescriptor::<Vec<u32>>::new("pop_empty", |v| {
///     v.pop().ok_or("stack is empty")?;
///     Ok(())
/// })
/// .expect_failure(Expectation::matching("empty stack", |f| f.message() == "stack is empty"));
///
/// assert_eq!(test.name(), "pop_empty");
/// assert!(!test.is_ignored());
/// ```
pub struct TestDescriptor<T> {
    name: String,
    ignore_reason: Option<String>,
    expected_failure: Option<Expectation>,
    func: MethodFn<T>,
}

impl<T> TestDescriptor<T> {
    pub fn new(name: impl Into<String>, func: impl Fn(&mut T) -> TestOutcome + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            ignore_reason: None,
            expected_failure: None,
            func: Box::new(func),
        }
    }

    /// Mark the test as ignored. An empty reason leaves the test enabled.
    pub fn ignore(mut self, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        self.ignore_reason = if reason.is_empty() { None } else { Some(reason) };
        self
    }

    /// Declare the failure this test is expected to raise.
    pub fn expect_failure(mut self, expectation: Expectation) -> Self {
        self.expected_failure = Some(expectation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ignore_reason(&self) -> Option<&str> {
        self.ignore_reason.as_deref()
    }

    pub fn is_ignored(&self) -> bool {
        self.ignore_reason.is_some()
    }

    pub fn expected_failure(&self) -> Option<&Expectation> {
        self.expected_failure.as_ref()
    }

    /// Call the test body on `instance`, capturing errors and panics.
    pub fn invoke(&self, instance: &mut T) -> Result<(), Failure> {
        crate::failure::invoke(|| (self.func)(instance))
    }
}

impl<T> fmt::Debug for TestDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDescriptor")
            .field("name", &self.name)
            .field("ignore_reason", &self.ignore_reason)
            .field("expected_failure", &self.expected_failure)
            .finish_non_exhaustive()
    }
}
