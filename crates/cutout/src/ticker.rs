// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Process-wide periodic dispatcher shared by many gates.
//!
//! Every gate that enters strict mode needs a periodic health check. Instead of each gate
//! owning a timer, all of them register a lightweight [`Pollable`] with one
//! [`SharedTicker`], which drives every registered poller from a single background task.

use std::fmt::Debug;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyspawn::Spawner;
use futures_util::StreamExt;
use parking_lot::Mutex;
use tick::{Clock, PeriodicTimer};

/// Interval between two ticks of a [`SharedTicker`] unless configured otherwise.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A periodic callback driven by a [`SharedTicker`].
///
/// Polls run synchronously one after another on the ticker's background task, so they must
/// be cheap and must not block.
pub trait Pollable: Send + Sync + 'static {
    /// Runs one periodic check.
    ///
    /// Returning [`ControlFlow::Break`] deregisters the poller from the ticker.
    fn tick(&self) -> ControlFlow<()>;
}

/// A single timer fanning out to any number of registered [`Pollable`]s.
///
/// The ticker is constructed explicitly and injected into every component that needs it,
/// typically through a [`GateContext`][crate::GateContext]. Cloning is cheap and all clones
/// share the same registrations and background task.
///
/// The background task is spawned on the first [`add`][SharedTicker::add] and runs for the
/// rest of the process.
///
/// # Examples
///
/// ```rust
/// use std::ops::ControlFlow;
/// use std::sync::Arc;
///
/// use anyspawn::Spawner;
/// use cutout::ticker::{Pollable, SharedTicker};
/// use tick::Clock;
///
/// struct Once;
///
/// impl Pollable for Once {
///     fn tick(&self) -> ControlFlow<()> {
///         ControlFlow::Break(())
///     }
/// }
///
/// # fn example(clock: &Clock) {
/// let spawner = Spawner::new_custom(|task| {
///     std::thread::spawn(move || futures::executor::block_on(task));
/// });
/// let ticker = SharedTicker::new(clock, spawner);
///
/// ticker.add(Arc::new(Once));
/// assert_eq!(ticker.len(), 1);
///
/// // Normally driven by the background task.
/// ticker.tick();
/// assert!(ticker.is_empty());
/// # }
/// ```
#[derive(Clone)]
pub struct SharedTicker {
    inner: Arc<TickerInner>,
}

struct TickerInner {
    clock: Clock,
    interval: Duration,
    pollers: Mutex<Vec<Arc<dyn Pollable>>>,
    started: AtomicBool,
    spawner: Spawner,
}

impl SharedTicker {
    /// Creates a ticker that polls every [`DEFAULT_TICK_INTERVAL`].
    ///
    /// The `spawner` is used exactly once, on the first registration, to start the task that
    /// drives the timer. The task never completes.
    ///
    /// With the `tokio` feature enabled, pass `Spawner::new_tokio()` to run the task on the
    /// current Tokio runtime. The first [`add`][SharedTicker::add] then panics outside of a
    /// Tokio runtime.
    #[must_use]
    pub fn new(clock: &Clock, spawner: Spawner) -> Self {
        Self::with_interval(clock, DEFAULT_TICK_INTERVAL, spawner)
    }

    /// Creates a ticker with a custom polling interval.
    #[must_use]
    pub fn with_interval(clock: &Clock, interval: Duration, spawner: Spawner) -> Self {
        Self {
            inner: Arc::new(TickerInner {
                clock: clock.clone(),
                interval,
                pollers: Mutex::new(Vec::new()),
                started: AtomicBool::new(false),
                spawner,
            }),
        }
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Registers a poller. Registering the same poller twice has no effect.
    pub fn add(&self, poller: Arc<dyn Pollable>) {
        {
            let mut pollers = self.inner.pollers.lock();
            if pollers.iter().any(|p| Arc::ptr_eq(p, &poller)) {
                return;
            }
            pollers.push(poller);
        }

        self.ensure_started();
    }

    /// Deregisters a poller. Unknown pollers are ignored.
    pub fn delete(&self, poller: &Arc<dyn Pollable>) {
        self.inner.pollers.lock().retain(|p| !Arc::ptr_eq(p, poller));
    }

    /// Returns the number of registered pollers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.pollers.lock().len()
    }

    /// Returns `true` if no poller is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs every registered poller once, in registration order.
    ///
    /// Pollers that return [`ControlFlow::Break`] are deregistered. The registration lock is
    /// not held while pollers run, so pollers are free to add or delete registrations.
    pub fn tick(&self) {
        let pollers = self.inner.pollers.lock().clone();

        let finished: Vec<_> = pollers.into_iter().filter(|poller| poller.tick().is_break()).collect();

        if !finished.is_empty() {
            self.inner
                .pollers
                .lock()
                .retain(|p| !finished.iter().any(|done| Arc::ptr_eq(p, done)));
        }
    }

    fn ensure_started(&self) {
        if self.inner.started.swap(true, Ordering::AcqRel) {
            return;
        }

        // The handle is dropped, the task keeps running detached.
        let ticker = self.clone();
        drop(self.inner.spawner.spawn(async move { ticker.run().await }));
    }

    async fn run(self) {
        let mut timer = PeriodicTimer::new(&self.inner.clock, self.inner.interval);

        while timer.next().await.is_some() {
            self.tick();
        }
    }
}

impl Debug for SharedTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTicker")
            .field("interval", &self.inner.interval)
            .field("pollers", &self.len())
            .field("started", &self.inner.started.load(Ordering::Acquire))
            .field("spawner", &self.inner.spawner)
            .finish_non_exhaustive()
    }
}
