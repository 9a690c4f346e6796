// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error;
use std::fmt;

use crate::ErrorType;

/// An error that declares its own circuit breaker classification.
///
/// Implement this for error types that know how they should be treated by the breaker and
/// classify with [`GateLayer::aware_error_type`][crate::gate::GateLayer::aware_error_type].
/// [`TypedError`] implements it for arbitrary wrapped errors and is the only implementation
/// that [`ErrorType::explicit`] can discover inside an opaque error chain.
pub trait CircuitBreakerAware: Error {
    /// Returns the classification the circuit breaker should use for this error.
    fn type_for_circuit_breaker(&self) -> ErrorType;
}

/// Wraps an error with an explicit [`ErrorType`].
///
/// This allows upstream middleware to override the automatic classification of an error,
/// for example to mark a business error as [`Ignorable`][ErrorType::Ignorable] so that it
/// never trips the breaker. The wrapper is transparent: it displays as the inner error and
/// exposes it through [`source`][Error::source], so generic error matching keeps working.
///
/// Classification helpers such as [`ErrorType::explicit`] find a `TypedError` anywhere in
/// the source chain.
///
/// # Examples
///
/// ```rust
/// use std::io;
///
/// use cutout::{ErrorType, TypedError};
///
/// let err = TypedError::new(io::Error::other("quota exceeded"), ErrorType::Ignorable);
/// assert_eq!(ErrorType::infer(&err), ErrorType::Ignorable);
/// assert_eq!(err.to_string(), "quota exceeded");
///
/// let original = err.into_inner().downcast::<io::Error>().unwrap();
/// assert_eq!(original.to_string(), "quota exceeded");
/// ```
#[derive(thiserror::Error)]
#[error("{inner}")]
pub struct TypedError {
    error_type: ErrorType,
    #[source]
    inner: Box<dyn Error + Send + Sync + 'static>,
}

impl TypedError {
    /// Wraps `error` and attaches the given classification.
    pub fn new(error: impl Into<Box<dyn Error + Send + Sync + 'static>>, error_type: ErrorType) -> Self {
        Self {
            error_type,
            inner: error.into(),
        }
    }

    /// Returns the attached classification.
    #[must_use]
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Returns a reference to the wrapped error.
    #[must_use]
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    /// Consumes the wrapper and returns the original error.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.inner
    }
}

impl CircuitBreakerAware for TypedError {
    fn type_for_circuit_breaker(&self) -> ErrorType {
        self.error_type
    }
}

impl fmt::Debug for TypedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedError")
            .field("error_type", &self.error_type)
            .field("inner", &self.inner)
            .finish()
    }
}
