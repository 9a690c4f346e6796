// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error;
use std::io;

use crate::TypedError;

/// Classification of a call outcome from the circuit breaker's point of view.
///
/// Only [`Timeout`][ErrorType::Timeout] and [`Failure`][ErrorType::Failure] count
/// towards opening a breaker. [`Ignorable`][ErrorType::Ignorable] outcomes are not
/// reported to the panel at all.
///
/// # Examples
///
/// ```rust
/// use cutout::ErrorType;
///
/// assert!(ErrorType::Timeout.is_breaker_error());
/// assert!(ErrorType::Failure.is_breaker_error());
/// assert!(!ErrorType::Success.is_breaker_error());
/// assert!(!ErrorType::Ignorable.is_breaker_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(feature = "serde", test), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(feature = "serde", test), serde(rename_all = "snake_case"))]
pub enum ErrorType {
    /// The outcome is ignored by the circuit breaker.
    Ignorable,
    /// The call timed out.
    Timeout,
    /// The call failed for a reason other than a timeout.
    Failure,
    /// The call succeeded.
    Success,
}

impl ErrorType {
    /// Returns `true` if this classification can cause a breaker to open.
    #[must_use]
    pub const fn is_breaker_error(self) -> bool {
        matches!(self, Self::Timeout | Self::Failure)
    }

    /// Returns the classification explicitly attached to `error` or one of its sources.
    ///
    /// The [`source`][Error::source] chain is walked from the outermost error inwards and the
    /// first [`TypedError`] found wins. Returns `None` when no error in the chain carries an
    /// explicit classification.
    ///
    /// Other [`CircuitBreakerAware`][crate::CircuitBreakerAware] types cannot be recognized
    /// behind `dyn Error`; classify them with
    /// [`GateLayer::aware_error_type`][crate::gate::GateLayer::aware_error_type] or wrap them
    /// in a [`TypedError`].
    #[must_use]
    pub fn explicit(error: &(dyn Error + 'static)) -> Option<Self> {
        chain(error).find_map(|err| err.downcast_ref::<TypedError>().map(TypedError::error_type))
    }

    /// Classifies an error by explicit override first, then by a built-in heuristic.
    ///
    /// The heuristic reports [`Timeout`][ErrorType::Timeout] when any error in the chain is an
    /// [`io::Error`] of kind [`TimedOut`][io::ErrorKind::TimedOut] and
    /// [`Failure`][ErrorType::Failure] otherwise.
    #[must_use]
    pub fn infer(error: &(dyn Error + 'static)) -> Self {
        Self::explicit(error).unwrap_or_else(|| Self::heuristic(error))
    }

    fn heuristic(error: &(dyn Error + 'static)) -> Self {
        let timed_out = chain(error).any(|err| {
            err.downcast_ref::<io::Error>()
                .is_some_and(|io_err| io_err.kind() == io::ErrorKind::TimedOut)
        });

        if timed_out { Self::Timeout } else { Self::Failure }
    }

    #[cfg(any(feature = "metrics", feature = "logs", test))]
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Ignorable => "ignorable",
            Self::Timeout => "timeout",
            Self::Failure => "failure",
            Self::Success => "success",
        }
    }
}

/// Walks the error chain from `error` inwards.
///
/// `io::Error` forwards `source()` to the source of its payload and skips the payload itself,
/// so custom `io::Error` payloads are visited explicitly.
fn chain<'a>(error: &'a (dyn Error + 'static)) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(error), |&err| match err.downcast_ref::<io::Error>().and_then(io::Error::get_ref) {
        Some(payload) => Some(payload as &(dyn Error + 'static)),
        None => err.source(),
    })
}
