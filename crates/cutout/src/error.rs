// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::GateKey;

/// The error produced when a gate short-circuits a call.
///
/// A gate never returns this error directly: it is always passed through the gate's
/// [`decorate_error`][crate::gate::GateLayer::decorate_error] callback first so that the
/// caller-specific error type can carry it. Because it never originates downstream, callers
/// can look for it (for example by downcasting) to tell a rejected call apart from a genuine
/// failure and skip retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("circuit breaker rejected the call for key '{key}'")]
pub struct CircuitBreakError {
    key: GateKey,
}

impl CircuitBreakError {
    pub(crate) fn new(key: GateKey) -> Self {
        Self { key }
    }

    /// Returns the key whose breaker rejected the call.
    #[must_use]
    pub fn key(&self) -> &GateKey {
        &self.key
    }
}
