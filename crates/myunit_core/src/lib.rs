#![forbid(unsafe_code)]
//! Core of the myunit test harness.
//!
//! A suite is an ordinary type. It registers its hooks and test bodies into a [`MethodCatalog`], and a
//! [`SuiteExecutor`] runs them against a single instance of the type:
//!
//! - suite setup hooks, once;
//! - for each test, in declaration order: per-test setup, the body, per-test teardown;
//! - suite teardown hooks, once.
//!
//! Each test ends in exactly one [`Verdict`]. A test fails when a hook or its body returns `Err` or panics, unless
//! the failure satisfies the test's declared [`Expectation`].
//!
//! ```
//! use myunit_core::{CatalogBuilder, Expectation, Suite, SuiteExecutor, TestDescriptor, Verdict};
//!
//! #[derive(Default)]
//! struct Stack {
//!     items: Vec<i32>,
//! }
//!
//! impl Suite for Stack {
//!     fn declare(methods: &mut CatalogBuilder<Self>) {
//!         methods
//!             .before_each("clear", |s| {
//!                 s.items.clear();
//!                 Ok(())
//!             })
//!             .test("push_then_pop", |s| {
//!                 s.items.push(1);
//!                 assert_eq!(s.items.pop(), Some(1));
//!                 Ok(())
//!             })
//!             .add_test(
//!                 TestDescriptor::new("pop_empty", |s: &mut Stack| {
//!                     s.items.pop().ok_or("empty stack")?;
//!                     Ok(())
//!                 })
//!                 .expect_failure(Expectation::matching("empty stack", |f| f.message() == "empty stack")),
//!             )
//!             .add_test(TestDescriptor::new("resize", |_: &mut Stack| Ok(())).ignore("not implemented"));
//!     }
//! }
//!
//! let report = SuiteExecutor::<Stack>::for_suite().unwrap().run_all().unwrap();
//! let verdicts: Vec<_> = report.iter().map(|r| r.verdict()).collect();
//! assert_eq!(verdicts, vec![Verdict::Ok, Verdict::Ok, Verdict::Ignored]);
//! ```
//!
//! ## Error tiers
//!
//! - Fatal ([`SuiteError`]): invalid catalog, instance construction failure, suite setup or suite teardown
//!   failure. Suite teardown errors still carry the finished report.
//! - Recoverable: any failure inside a test's lifecycle becomes a FAILED [`TestResult`].
//! - Skip: ignored tests become IGNORED without running anything.

pub mod case;
pub mod catalog;
pub mod descriptor;
pub mod failure;
pub mod reporter;
pub mod result;
pub mod role;
pub mod suite;

pub use case::{TestCaseExecutor, classify};
pub use catalog::{CatalogBuilder, CatalogError, MethodCatalog, Suite};
pub use descriptor::{Expectation, HookDescriptor, MethodFn, TestDescriptor};
pub use failure::{BoxError, Failure, TestOutcome};
pub use reporter::{CollectingReporter, NoopReporter, TestReporter};
pub use result::{EXPECTED_FAILURE_NOT_RAISED_MSG, Phase, SuiteReport, TestResult, TestSummary, Verdict};
pub use role::MethodRole;
pub use suite::{SuiteError, SuiteExecutor};
