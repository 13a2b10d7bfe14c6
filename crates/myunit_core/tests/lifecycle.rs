//! End-to-end lifecycle tests for `SuiteExecutor`.
//!
//! Hook and body invocations are counted through shared atomics captured by the registered closures, so the
//! tests can check how often each method ran without looking inside the executor.

use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use myunit_core::{
    CatalogBuilder, CollectingReporter, Expectation, MethodCatalog, Phase, Suite, SuiteError, SuiteExecutor,
    TestDescriptor, Verdict,
};

#[derive(Default, Clone)]
struct Counters {
    before_all: Arc<AtomicUsize>,
    after_all: Arc<AtomicUsize>,
    before_each: Arc<AtomicUsize>,
    after_each: Arc<AtomicUsize>,
    bodies: Arc<AtomicUsize>,
}

impl Counters {
    fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Register one counting hook for every hook role.
    fn register_hooks<T: 'static>(&self, builder: &mut CatalogBuilder<T>) {
        let c = self.clone();
        builder.before_all("count_before_all", move |_| {
            Self::bump(&c.before_all);
            Ok(())
        });
        let c = self.clone();
        builder.after_all("count_after_all", move |_| {
            Self::bump(&c.after_all);
            Ok(())
        });
        let c = self.clone();
        builder.before_each("count_before_each", move |_| {
            Self::bump(&c.before_each);
            Ok(())
        });
        let c = self.clone();
        builder.after_each("count_after_each", move |_| {
            Self::bump(&c.after_each);
            Ok(())
        });
    }
}

#[derive(Debug, thiserror::Error)]
enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct NullPointer(String);

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_mixed_suite_reports_in_declaration_order() {
    let counters = Counters::default();
    let mut builder = MethodCatalog::<()>::builder("mixed");
    counters.register_hooks(&mut builder);
    let bodies = counters.bodies.clone();
    builder
        .test("a", |_| Ok(()))
        .test("b", |_| Err("boom".into()))
        .add_test(
            TestDescriptor::new("c", move |_: &mut ()| {
                Counters::bump(&bodies);
                Ok(())
            })
            .ignore("skip"),
        );

    let report = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap();

    let summary: Vec<_> = report
        .iter()
        .map(|r| (r.name(), r.verdict(), r.message()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a", Verdict::Ok, ""),
            ("b", Verdict::Failed, "boom"),
            ("c", Verdict::Ignored, "skip"),
        ]
    );

    assert_eq!(report.results()[2].elapsed_millis(), 0);
    assert_eq!(Counters::get(&counters.bodies), 0);
    assert_eq!(Counters::get(&counters.before_all), 1);
    assert_eq!(Counters::get(&counters.after_all), 1);
    assert_eq!(Counters::get(&counters.before_each), 2);
    assert_eq!(Counters::get(&counters.after_each), 2);
}

#[test]
fn test_suite_setup_failure_aborts_without_report() {
    let counters = Counters::default();
    let mut builder = MethodCatalog::<()>::builder("setup_fails");
    let bodies = counters.bodies.clone();
    builder
        .before_all("connect", |_| Err("database unreachable".into()))
        .test("never_runs", move |_| {
            Counters::bump(&bodies);
            Ok(())
        });
    let c = counters.clone();
    builder.after_all("disconnect", move |_| {
        Counters::bump(&c.after_all);
        Ok(())
    });

    let err = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap_err();

    match &err {
        SuiteError::SuiteSetup { hook, failure } => {
            assert_eq!(hook, "connect");
            assert_eq!(failure.message(), "database unreachable");
        }
        other => panic!("expected suite setup error, got {other:?}"),
    }
    assert!(err.partial_report().is_none());
    assert_eq!(Counters::get(&counters.bodies), 0);
    assert_eq!(Counters::get(&counters.after_all), 0);
}

#[test]
fn test_expected_panic_from_division_by_zero_passes() {
    let mut builder = MethodCatalog::<()>::builder("arithmetic");
    builder.add_test(
        TestDescriptor::new("divide_by_zero", |_: &mut ()| {
            let divisor = black_box(0_i32);
            let _ = 1 / divisor;
            Ok(())
        })
        .expect_failure(Expectation::panic_containing("divide by zero")),
    );

    let report = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap();
    assert_eq!(report.results()[0].verdict(), Verdict::Ok);
    assert_eq!(report.results()[0].message(), "");
}

#[test]
fn test_expected_error_type_matches_by_downcast() {
    let mut builder = MethodCatalog::<()>::builder("arithmetic");
    builder
        .add_test(
            TestDescriptor::new("checked_division", |_: &mut ()| {
                let divisor = black_box(0_i32);
                1_i32.checked_div(divisor).ok_or(ArithmeticError::DivisionByZero)?;
                Ok(())
            })
            .expect_failure(Expectation::error::<ArithmeticError>()),
        )
        .add_test(
            TestDescriptor::new("wrong_failure", |_: &mut ()| Err(NullPointer("npe".into()).into()))
                .expect_failure(Expectation::error::<ArithmeticError>()),
        )
        .add_test(
            TestDescriptor::new("nothing_thrown", |_: &mut ()| Ok(()))
                .expect_failure(Expectation::error::<ArithmeticError>()),
        );

    let report = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap();
    let results = report.results();

    assert_eq!(results[0].verdict(), Verdict::Ok);
    assert_eq!(results[1].verdict(), Verdict::Failed);
    assert_eq!(results[1].message(), "npe");
    assert_eq!(results[2].verdict(), Verdict::Failed);
    assert_eq!(results[2].message(), "Expected exception was not thrown.");
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_suite_hooks_run_once_even_when_tests_fail() {
    let counters = Counters::default();
    let mut builder = MethodCatalog::<()>::builder("failing");
    counters.register_hooks(&mut builder);
    for i in 0..5 {
        builder.test(format!("fails_{i}"), move |_| Err(format!("failure {i}").into()));
    }

    let report = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap();

    assert_eq!(report.len(), 5);
    assert!(report.iter().all(|r| r.verdict() == Verdict::Failed));
    assert_eq!(Counters::get(&counters.before_all), 1);
    assert_eq!(Counters::get(&counters.after_all), 1);
    assert_eq!(Counters::get(&counters.before_each), 5);
    assert_eq!(Counters::get(&counters.after_each), 5);
}

#[test]
fn test_elapsed_time_covers_a_sleeping_body() {
    let mut builder = MethodCatalog::<()>::builder("slow");
    builder.test("sleeps", |_| {
        thread::sleep(Duration::from_millis(25));
        Ok(())
    });

    let report = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap();
    assert!(report.results()[0].elapsed_millis() >= 25);
    assert!(report.results()[0].elapsed() >= Duration::from_millis(25));
}

#[test]
fn test_elapsed_time_includes_hooks() {
    let mut builder = MethodCatalog::<()>::builder("slow_hooks");
    builder
        .before_each("slow_setup", |_| {
            thread::sleep(Duration::from_millis(10));
            Ok(())
        })
        .after_each("slow_teardown", |_| {
            thread::sleep(Duration::from_millis(10));
            Ok(())
        })
        .test("fast", |_| Ok(()));

    let report = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap();
    assert!(report.results()[0].elapsed_millis() >= 20);
}

#[test]
fn test_teardown_failure_is_tagged_with_its_phase() {
    let mut builder = MethodCatalog::<()>::builder("teardown_tag");
    builder
        .after_each("release", |_| Err("lock was not held".into()))
        .test("body_passes", |_| Ok(()))
        .test("body_fails", |_| Err("body failure".into()));

    let report = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap();
    for result in report.iter() {
        assert_eq!(result.verdict(), Verdict::Failed);
        assert_eq!(result.message(), "lock was not held");
        assert_eq!(result.failure_phase(), Some(Phase::Teardown));
    }
}

#[test]
fn test_teardown_failure_overrides_expected_failure() {
    let mut builder = MethodCatalog::<()>::builder("teardown_after_expected");
    builder
        .after_each("release", |_| Err("lock was not held".into()))
        .add_test(
            TestDescriptor::new("divides_by_zero", |_: &mut ()| Err(ArithmeticError::DivisionByZero.into()))
                .expect_failure(Expectation::error::<ArithmeticError>()),
        );

    let report = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap();
    let result = report.get("divides_by_zero").unwrap();
    assert_eq!(result.verdict(), Verdict::Failed);
    assert_eq!(result.message(), "lock was not held");
    assert_eq!(result.failure_phase(), Some(Phase::Teardown));
}

#[test]
fn test_each_run_gets_a_fresh_instance() {
    #[derive(Default)]
    struct Tally {
        runs: usize,
    }

    let mut builder = MethodCatalog::<Tally>::builder("fresh");
    builder.test("first_use", |t| {
        t.runs += 1;
        assert_eq!(t.runs, 1, "instance was reused across runs");
        Ok(())
    });
    let executor = SuiteExecutor::new(builder.build().unwrap());

    for _ in 0..3 {
        let report = executor.run_all().unwrap();
        assert_eq!(report.results()[0].verdict(), Verdict::Ok);
    }
}

#[test]
fn test_tests_in_one_run_share_the_instance() {
    #[derive(Default)]
    struct Journal {
        entries: Vec<&'static str>,
    }

    let mut builder = MethodCatalog::<Journal>::builder("shared");
    builder
        .before_all("open", |j| {
            j.entries.push("open");
            Ok(())
        })
        .test("writes", |j| {
            j.entries.push("writes");
            Ok(())
        })
        .test("sees_earlier_state", |j| {
            assert_eq!(j.entries, vec!["open", "writes"]);
            Ok(())
        });

    let report = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap();
    assert!(report.iter().all(|r| r.verdict() == Verdict::Ok));
}

#[test]
fn test_constructor_panic_is_fatal_and_runs_nothing() {
    let counters = Counters::default();
    let mut builder = MethodCatalog::<()>::builder("ctor_panics");
    counters.register_hooks(&mut builder);
    builder.test("never", |_| Ok(()));
    let executor = SuiteExecutor::with_factory(builder.build().unwrap(), || panic!("constructor exploded"));

    let err = executor.run_all().unwrap_err();
    assert!(matches!(err, SuiteError::Instantiate { ref failure, .. } if failure.message() == "constructor exploded"));
    assert_eq!(Counters::get(&counters.before_all), 0);
    assert_eq!(Counters::get(&counters.after_all), 0);
}

#[test]
fn test_every_suite_teardown_hook_is_attempted() {
    let counters = Counters::default();
    let mut builder = MethodCatalog::<()>::builder("teardowns");
    builder.after_all("first_close", |_| Err("first".into()));
    let c = counters.clone();
    builder.after_all("second_close", move |_| {
        Counters::bump(&c.after_all);
        Ok(())
    });
    builder.test("only", |_| Ok(()));

    let err = SuiteExecutor::new(builder.build().unwrap()).run_all().unwrap_err();
    assert!(matches!(err, SuiteError::SuiteTeardown { ref hook, .. } if hook == "first_close"));
    assert_eq!(Counters::get(&counters.after_all), 1);
    assert_eq!(err.partial_report().map(|r| r.len()), Some(1));
}

#[test]
fn test_reporter_sees_every_test_in_order() {
    let mut builder = MethodCatalog::<()>::builder("observed");
    builder
        .test("one", |_| Ok(()))
        .add_test(TestDescriptor::new("two", |_: &mut ()| Ok(())).ignore("later"))
        .test("three", |_| Err("x".into()));

    let mut reporter = CollectingReporter::default();
    let report = SuiteExecutor::new(builder.build().unwrap())
        .run_all_with(&mut reporter)
        .unwrap();

    assert_eq!(reporter.started, vec!["one", "two", "three"]);
    assert_eq!(reporter.completed, report.results());
    assert_eq!(reporter.suites_finished, 1);
}

#[test]
fn test_catalog_is_shared_across_threads() {
    #[derive(Default)]
    struct Worker {
        seen: usize,
    }

    impl Suite for Worker {
        fn declare(methods: &mut CatalogBuilder<Self>) {
            methods
                .before_each("bump", |w| {
                    w.seen += 1;
                    Ok(())
                })
                .test("first", |w| {
                    assert_eq!(w.seen, 1);
                    Ok(())
                })
                .test("second", |w| {
                    assert_eq!(w.seen, 2);
                    Ok(())
                });
        }
    }

    let executor = Arc::new(SuiteExecutor::<Worker>::for_suite().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let executor = Arc::clone(&executor);
            thread::spawn(move || executor.run_all().map(|r| r.summary().passed).unwrap_or(0))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
    assert_eq!(executor.suite_name(), "Worker");
}
