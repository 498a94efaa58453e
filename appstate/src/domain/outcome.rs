//! Expected success/failure outcomes of use-case execution.
//!
//! An [`Outcome`] carries either a success value or a human-readable failure
//! message. Expected failures (validation, not found, business rules) travel
//! as values; programming defects and infrastructure failures use a separate
//! channel (`Err(Error)` or a panic) and never appear here.

use std::fmt;

/// Closed success/failure outcome.
///
/// Only [`Outcome::ok`] and [`Outcome::fail`] construct values.
///
/// # Examples
/// ```
/// use appstate::domain::Outcome;
///
/// let done = Outcome::ok(3);
/// assert!(done.is_success());
/// assert_eq!(*done.value(), 3);
///
/// let refused: Outcome<u8> = Outcome::fail("quota exhausted");
/// assert!(refused.is_failure());
/// assert_eq!(refused.error(), Some("quota exhausted"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an outcome may be a failure that must be checked"]
pub struct Outcome<T>(State<T>);

#[derive(Debug, Clone, PartialEq, Eq)]
enum State<T> {
    Success(T),
    Failure(String),
}

const FAILED_VALUE_ACCESS: &str = "cannot get the value of a failed outcome";

impl<T> Outcome<T> {
    /// Successful outcome wrapping `value`.
    pub const fn ok(value: T) -> Self {
        Self(State::Success(value))
    }

    /// Failed outcome carrying a description of what went wrong.
    pub fn fail(error: impl Into<String>) -> Self {
        Self(State::Failure(error.into()))
    }

    /// `true` for outcomes built with [`Outcome::ok`].
    pub fn is_success(&self) -> bool {
        matches!(self.0, State::Success(_))
    }

    /// `true` for outcomes built with [`Outcome::fail`].
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Borrow the success value.
    ///
    /// # Panics
    ///
    /// Panics when called on a failure. Callers must check
    /// [`Outcome::is_success`] first.
    #[track_caller]
    pub fn value(&self) -> &T {
        match &self.0 {
            State::Success(value) => value,
            State::Failure(error) => panic!("{FAILED_VALUE_ACCESS}: {error}"),
        }
    }

    /// Take the success value.
    ///
    /// # Panics
    ///
    /// Panics when called on a failure.
    #[track_caller]
    pub fn into_value(self) -> T {
        match self.0 {
            State::Success(value) => value,
            State::Failure(error) => panic!("{FAILED_VALUE_ACCESS}: {error}"),
        }
    }

    /// Failure message, or `None` for a success.
    pub fn error(&self) -> Option<&str> {
        match &self.0 {
            State::Success(_) => None,
            State::Failure(error) => Some(error.as_str()),
        }
    }

    /// Transform the success value, passing failures through untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self.0 {
            State::Success(value) => Outcome::ok(f(value)),
            State::Failure(error) => Outcome(State::Failure(error)),
        }
    }

    /// Convert into a standard `Result` for `?`-style handling.
    pub fn into_result(self) -> Result<T, String> {
        match self.0 {
            State::Success(value) => Ok(value),
            State::Failure(error) => Err(error),
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(error) => Self::fail(error.to_string()),
        }
    }
}
