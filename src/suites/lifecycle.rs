//! Self-check suite: exercises hook ordering, expected failures and ignored tests through the harness itself.

use std::hint::black_box;
use std::num::ParseIntError;

use myunit_core::{CatalogBuilder, Expectation, Suite, TestDescriptor};

#[derive(Debug, Default)]
pub struct Lifecycle {
    suite_setups: usize,
    test_setups: usize,
    test_teardowns: usize,
    bodies: usize,
}

impl Suite for Lifecycle {
    fn suite_name() -> String {
        "lifecycle".to_string()
    }

    fn declare(methods: &mut CatalogBuilder<Self>) {
        methods
            .before_all("count_suite_setup", |s| {
                s.suite_setups += 1;
                Ok(())
            })
            .before_each("count_test_setup", |s| {
                s.test_setups += 1;
                Ok(())
            })
            .after_each("count_test_teardown", |s| {
                s.test_teardowns += 1;
                Ok(())
            })
            .test("setup_runs_before_body", |s| {
                s.bodies += 1;
                assert_eq!(s.suite_setups, 1);
                assert_eq!(s.test_setups, s.bodies);
                assert_eq!(s.test_teardowns, s.bodies - 1);
                Ok(())
            })
            .add_test(
                TestDescriptor::new("expected_error_is_ok", |s: &mut Lifecycle| {
                    s.bodies += 1;
                    "not a number".parse::<i32>()?;
                    Ok(())
                })
                .expect_failure(Expectation::error::<ParseIntError>()),
            )
            .add_test(
                TestDescriptor::new("expected_panic_is_ok", |s: &mut Lifecycle| {
                    s.bodies += 1;
                    let divisor = black_box(0_u32);
                    let _ = 10 / divisor;
                    Ok(())
                })
                .expect_failure(Expectation::panic_containing("divide by zero")),
            )
            .add_test(
                TestDescriptor::new("ignored_tests_never_run", |_: &mut Lifecycle| {
                    Err("ignored test body was executed".into())
                })
                .ignore("demonstrates IGNORED"),
            )
            .after_all("hooks_match_bodies", |s| {
                if s.test_setups != s.bodies || s.test_teardowns != s.bodies {
                    return Err(format!(
                        "{} bodies ran with {} setups and {} teardowns",
                        s.bodies, s.test_setups, s.test_teardowns
                    )
                    .into());
                }
                Ok(())
            });
    }
}
