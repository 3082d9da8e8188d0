//! Staged run outcome: either a value plus accumulated notes, or the first
//! failure. Every pipeline stage is chained with [`Outcome::bind`], so nothing
//! runs after a failure; logging and deletion attach through the tee methods
//! and never change the value they observe.

use crate::error::{RemnantError, Result};

#[derive(Debug)]
pub enum Outcome<T> {
    Success { value: T, notes: Vec<String> },
    Failure(RemnantError),
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success {
            value,
            notes: Vec::new(),
        }
    }

    pub fn failure(err: impl Into<RemnantError>) -> Self {
        Outcome::Failure(err.into())
    }

    /// Chain the next stage. Notes from both sides are kept, in order.
    pub fn bind<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Success { value, mut notes } => match f(value) {
                Outcome::Success {
                    value,
                    notes: later,
                } => {
                    notes.extend(later);
                    Outcome::Success { value, notes }
                }
                Outcome::Failure(err) => Outcome::Failure(err),
            },
            Outcome::Failure(err) => Outcome::Failure(err),
        }
    }

    /// Observe the success value without changing it.
    pub fn success_tee(self, f: impl FnOnce(&T)) -> Self {
        if let Outcome::Success { ref value, .. } = self {
            f(value);
        }
        self
    }

    /// Observe the failure without changing it.
    pub fn failure_tee(self, f: impl FnOnce(&RemnantError)) -> Self {
        if let Outcome::Failure(ref err) = self {
            f(err);
        }
        self
    }

    /// Observe the success value with a fallible side effect. An error from
    /// the observer becomes the run's failure; the value is dropped.
    pub fn try_tee(self, f: impl FnOnce(&T) -> Result<()>) -> Self {
        match self {
            Outcome::Success { value, notes } => match f(&value) {
                Ok(()) => Outcome::Success { value, notes },
                Err(err) => Outcome::Failure(err),
            },
            failure => failure,
        }
    }

    /// Append a non-fatal message on the success path.
    pub fn note(self, msg: impl Into<String>) -> Self {
        match self {
            Outcome::Success { value, mut notes } => {
                notes.push(msg.into());
                Outcome::Success { value, notes }
            }
            failure => failure,
        }
    }

    /// Rewrite the failure's representation without touching control flow.
    pub fn map_failure(self, f: impl FnOnce(RemnantError) -> RemnantError) -> Self {
        match self {
            Outcome::Failure(err) => Outcome::Failure(f(err)),
            success => success,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Boundary conversion for callers that want `?` semantics back.
    pub fn into_result(self) -> Result<(T, Vec<String>)> {
        match self {
            Outcome::Success { value, notes } => Ok((value, notes)),
            Outcome::Failure(err) => Err(err),
        }
    }
}
