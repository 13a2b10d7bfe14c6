//! Failures raised by hooks and test bodies.
//!
//! A registered method signals failure in one of two ways: by returning `Err`, or by panicking (which is what
//! `assert!`/`assert_eq!` do). Both are captured into a [`Failure`] so the executors can classify them.

use std::any::Any;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

/// Boxed error returned by a failing hook or test body.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Return type of every registered hook and test body.
pub type TestOutcome = Result<(), BoxError>;

/// Message used when a panic payload is neither `&str` nor `String`.
pub const OPAQUE_PANIC_MSG: &str = "test panicked";

/// What escaped a registered method.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// The method returned `Err`.
    #[error("{0}")]
    Error(BoxError),
    /// The method panicked. Holds the rendered payload.
    #[error("{0}")]
    Panic(String),
}

impl Failure {
    /// Build a failure from any error value.
    pub fn error(err: impl Into<BoxError>) -> Self {
        Failure::Error(err.into())
    }

    /// Build a failure from a caught panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            OPAQUE_PANIC_MSG.to_string()
        };
        Failure::Panic(message)
    }

    /// The text reported for this failure.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, Failure::Panic(_))
    }

    /// Downcast the returned error to a concrete type. Always `None` for panics.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            Failure::Error(err) => err.downcast_ref::<E>(),
            Failure::Panic(_) => None,
        }
    }
}

/// Invoke a registered method, converting a returned error or a panic into a [`Failure`].
pub(crate) fn invoke<R>(call: impl FnOnce() -> Result<R, BoxError>) -> Result<R, Failure> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(Failure::Error(err)),
        Err(payload) => Err(Failure::from_panic(payload)),
    }
}
