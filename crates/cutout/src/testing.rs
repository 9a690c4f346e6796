// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{HashMap, HashSet};

use anyspawn::Spawner;
use opentelemetry::KeyValue;
use opentelemetry_sdk::metrics::data::{AggregatedMetrics, Metric, MetricData, ResourceMetrics, ScopeMetrics};
use opentelemetry_sdk::metrics::{InMemoryMetricExporter, SdkMeterProvider};
use parking_lot::Mutex;
use tick::Clock;

use crate::ticker::SharedTicker;
use crate::{BreakerSnapshot, BreakerState, GateKey, Panel};

/// Ticker on a frozen clock whose background task is never run. Tests drive it with `tick()`.
pub(crate) fn frozen_ticker() -> SharedTicker {
    SharedTicker::new(&Clock::new_frozen(), Spawner::new_custom(|_task| {}))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Counts {
    pub(crate) checked: u32,
    pub(crate) succeeded: u32,
    pub(crate) failed: u32,
    pub(crate) timed_out: u32,
}

/// Panel that records every call and lets tests decide admission and reported health.
///
/// Unless [`set_breakers`][FakePanel::set_breakers] is used, `dump_breakers` reports one
/// breaker per key seen so far: open if the key is denied, closed otherwise, with the
/// recorded failure and timeout counts.
#[derive(Debug, Default)]
pub(crate) struct FakePanel {
    counts: Mutex<HashMap<GateKey, Counts>>,
    denied: Mutex<HashSet<GateKey>>,
    breakers: Mutex<Option<Vec<BreakerSnapshot>>>,
}

impl FakePanel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn deny(&self, key: impl Into<GateKey>) {
        self.denied.lock().insert(key.into());
    }

    pub(crate) fn set_breakers(&self, breakers: Vec<BreakerSnapshot>) {
        *self.breakers.lock() = Some(breakers);
    }

    pub(crate) fn counts(&self, key: impl Into<GateKey>) -> Counts {
        self.counts.lock().get(&key.into()).copied().unwrap_or_default()
    }

    pub(crate) fn total(&self) -> Counts {
        self.counts.lock().values().fold(Counts::default(), |acc, c| Counts {
            checked: acc.checked + c.checked,
            succeeded: acc.succeeded + c.succeeded,
            failed: acc.failed + c.failed,
            timed_out: acc.timed_out + c.timed_out,
        })
    }

    fn update(&self, key: &GateKey, f: impl FnOnce(&mut Counts)) {
        f(self.counts.lock().entry(key.clone()).or_default());
    }
}

impl Panel for FakePanel {
    fn is_allowed(&self, key: &GateKey) -> bool {
        self.update(key, |c| c.checked += 1);
        !self.denied.lock().contains(key)
    }

    fn succeed(&self, key: &GateKey) {
        self.update(key, |c| c.succeeded += 1);
    }

    fn fail(&self, key: &GateKey) {
        self.update(key, |c| c.failed += 1);
    }

    fn timeout(&self, key: &GateKey) {
        self.update(key, |c| c.timed_out += 1);
    }

    fn dump_breakers(&self) -> Vec<BreakerSnapshot> {
        if let Some(breakers) = self.breakers.lock().as_ref() {
            return breakers.clone();
        }

        let denied = self.denied.lock();
        self.counts
            .lock()
            .iter()
            .map(|(key, counts)| {
                let state = if denied.contains(key) {
                    BreakerState::Open
                } else {
                    BreakerState::Closed
                };
                BreakerSnapshot::new(key.clone(), state)
                    .with_failures(counts.failed.into())
                    .with_timeouts(counts.timed_out.into())
            })
            .collect()
    }
}

/// Collects the attributes of every exported counter data point.
#[derive(Debug)]
pub(crate) struct MetricTester {
    exporter: InMemoryMetricExporter,
    provider: SdkMeterProvider,
}

impl MetricTester {
    pub(crate) fn new() -> Self {
        let exporter = InMemoryMetricExporter::default();

        Self {
            exporter: exporter.clone(),
            provider: SdkMeterProvider::builder().with_periodic_exporter(exporter).build(),
        }
    }

    pub(crate) fn meter_provider(&self) -> &SdkMeterProvider {
        &self.provider
    }

    pub(crate) fn collect_attributes(&self) -> Vec<KeyValue> {
        self.provider.force_flush().unwrap();
        self.exporter
            .get_finished_metrics()
            .unwrap()
            .iter()
            .flat_map(ResourceMetrics::scope_metrics)
            .flat_map(ScopeMetrics::metrics)
            .flat_map(collect_attributes_for_metric)
            .collect()
    }

    pub(crate) fn assert_attributes_contain(&self, key_values: &[KeyValue]) {
        let attributes = self.collect_attributes();

        for attr in key_values {
            assert!(
                attributes.contains(attr),
                "attribute {attr:?} not found in collected attributes: {attributes:?}"
            );
        }
    }
}

fn collect_attributes_for_metric(metric: &Metric) -> Vec<KeyValue> {
    match metric.data() {
        AggregatedMetrics::U64(MetricData::Sum(data)) => data.data_points().flat_map(|v| v.attributes().cloned()).collect(),
        _ => Vec::new(),
    }
}
