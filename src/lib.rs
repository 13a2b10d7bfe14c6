#![forbid(unsafe_code)]
//! myunit: a small xUnit-style test harness
//!
//! Suites declare their lifecycle hooks and tests through [`myunit_core::Suite`]. Each run creates one instance of
//! the suite type, shared by all hooks and tests, so state that must not leak between tests is reset in a
//! `before_each` hook. Every test is wrapped in the per-test hooks and gets one verdict. The engine lives in
//! `myunit_core`; this crate adds the built-in suites and the `myunit` command line.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests, and panics raised by suite code are caught
//!   by the harness and reported as failures.

pub mod cli;
pub mod config;
pub mod suites;

pub use config::{OutputFormat, RunConfig};
pub use myunit_core;
