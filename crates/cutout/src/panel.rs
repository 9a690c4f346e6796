// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use crate::GateKey;

/// State of a single breaker tracked by a [`Panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakerState {
    /// Calls flow normally and outcomes are sampled.
    Closed,
    /// Calls are rejected.
    Open,
    /// A limited number of calls are let through to test recovery.
    HalfOpen,
}

/// Point-in-time view of one breaker, as enumerated by [`Panel::dump_breakers`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct BreakerSnapshot {
    key: GateKey,
    state: BreakerState,
    failures: u64,
    timeouts: u64,
}

impl BreakerSnapshot {
    /// Creates a snapshot with zero failures and timeouts.
    #[must_use]
    pub fn new(key: impl Into<GateKey>, state: BreakerState) -> Self {
        Self {
            key: key.into(),
            state,
            failures: 0,
            timeouts: 0,
        }
    }

    /// Sets the failure count accumulated since the breaker's metrics were last reset.
    #[must_use]
    pub fn with_failures(mut self, failures: u64) -> Self {
        self.failures = failures;
        self
    }

    /// Sets the timeout count accumulated since the breaker's metrics were last reset.
    #[must_use]
    pub fn with_timeouts(mut self, timeouts: u64) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Returns the key of the breaker.
    #[must_use]
    pub fn key(&self) -> &GateKey {
        &self.key
    }

    /// Returns the state of the breaker.
    #[must_use]
    pub fn state(&self) -> BreakerState {
        self.state
    }

    /// Returns the failure count.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Returns the timeout count.
    #[must_use]
    pub fn timeouts(&self) -> u64 {
        self.timeouts
    }

    /// Returns `true` if the breaker is closed and has recorded neither failures nor timeouts.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.state == BreakerState::Closed && self.failures == 0 && self.timeouts == 0
    }
}

/// Keyed breaker statistics and the allow/deny decision derived from them.
///
/// The gate consults the panel only while it is in strict mode and reports call outcomes
/// through [`succeed`][Panel::succeed], [`fail`][Panel::fail] and [`timeout`][Panel::timeout].
/// How the panel turns those outcomes into open or closed breakers (sampling windows, error
/// rate thresholds, minimum sample sizes) is entirely up to the implementation.
///
/// Implementations must be thread-safe. All methods are called on the request path or from
/// the shared ticker and are expected to be cheap and non-blocking.
pub trait Panel: Send + Sync + 'static {
    /// Returns `true` if a call for `key` may proceed.
    fn is_allowed(&self, key: &GateKey) -> bool;

    /// Records a successful call for `key`.
    fn succeed(&self, key: &GateKey);

    /// Records a failed call for `key`.
    fn fail(&self, key: &GateKey);

    /// Records a timed out call for `key`.
    fn timeout(&self, key: &GateKey);

    /// Enumerates every breaker currently tracked by the panel.
    fn dump_breakers(&self) -> Vec<BreakerSnapshot>;
}

impl<P: Panel + ?Sized> Panel for Arc<P> {
    fn is_allowed(&self, key: &GateKey) -> bool {
        (**self).is_allowed(key)
    }

    fn succeed(&self, key: &GateKey) {
        (**self).succeed(key);
    }

    fn fail(&self, key: &GateKey) {
        (**self).fail(key);
    }

    fn timeout(&self, key: &GateKey) {
        (**self).timeout(key);
    }

    fn dump_breakers(&self) -> Vec<BreakerSnapshot> {
        (**self).dump_breakers()
    }
}
