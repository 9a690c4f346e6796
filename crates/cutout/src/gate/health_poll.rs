// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::ControlFlow;
use std::sync::Arc;

use super::mode::ModeFlag;
use super::telemetry;
use crate::ticker::Pollable;
use crate::utils::TelemetryHelper;
use crate::{BreakerSnapshot, Panel};

/// Ticker payload of a gate in strict mode.
///
/// On every tick, checks whether all breakers reported by the panel are healthy. If so, the
/// gate is restored to bypass mode and the poll deregisters itself; otherwise nothing changes.
pub(crate) struct HealthPoll {
    panel: Arc<dyn Panel>,
    mode: Arc<ModeFlag>,
    telemetry: TelemetryHelper,
}

impl HealthPoll {
    pub(crate) fn new(panel: Arc<dyn Panel>, mode: Arc<ModeFlag>, telemetry: TelemetryHelper) -> Self {
        Self { panel, mode, telemetry }
    }
}

impl Pollable for HealthPoll {
    fn tick(&self) -> ControlFlow<()> {
        if !self.panel.dump_breakers().iter().all(BreakerSnapshot::is_healthy) {
            return ControlFlow::Continue(());
        }

        self.mode.restore_bypass();
        telemetry::bypass_restored(&self.telemetry);
        ControlFlow::Break(())
    }
}

impl std::fmt::Debug for HealthPoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthPoll")
            .field("mode", &self.mode.load())
            .field("telemetry", &self.telemetry)
            .finish_non_exhaustive()
    }
}
