// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(any(feature = "metrics", test))]
use opentelemetry::KeyValue;

#[cfg(any(feature = "metrics", test))]
use super::constants::GATE_ERROR_TYPE;
#[cfg(any(feature = "metrics", feature = "logs", test))]
use super::constants::{BYPASS_RESTORED_EVENT_NAME, REJECTED_EVENT_NAME, STRICT_ENTERED_EVENT_NAME};
#[cfg(any(feature = "metrics", test))]
use crate::utils::GATE_KEY;
use crate::utils::TelemetryHelper;
use crate::{ErrorType, GateKey};

#[cfg_attr(
    not(any(feature = "metrics", feature = "logs", test)),
    expect(unused_variables, reason = "unused when neither logs nor metrics are enabled")
)]
pub(super) fn strict_entered(telemetry: &TelemetryHelper, key: &GateKey, error_type: ErrorType) {
    #[cfg(any(feature = "metrics", test))]
    if telemetry.metrics_enabled() {
        telemetry.report_event(
            STRICT_ENTERED_EVENT_NAME,
            &[
                KeyValue::new(GATE_KEY, key.to_string()),
                KeyValue::new(GATE_ERROR_TYPE, error_type.as_str()),
            ],
        );
    }

    #[cfg(any(feature = "logs", test))]
    if telemetry.logs_enabled {
        tracing::event!(
            name: "cutout.gate.strict_entered",
            tracing::Level::WARN,
            resilience.event.name = STRICT_ENTERED_EVENT_NAME,
            pipeline.name = %telemetry.pipeline_name,
            strategy.name = %telemetry.strategy_name,
            gate.key = %key,
            gate.error_type = error_type.as_str(),
        );
    }
}

#[cfg_attr(
    not(any(feature = "metrics", feature = "logs", test)),
    expect(unused_variables, reason = "unused when neither logs nor metrics are enabled")
)]
pub(super) fn bypass_restored(telemetry: &TelemetryHelper) {
    #[cfg(any(feature = "metrics", test))]
    telemetry.report_event(BYPASS_RESTORED_EVENT_NAME, &[]);

    #[cfg(any(feature = "logs", test))]
    if telemetry.logs_enabled {
        tracing::event!(
            name: "cutout.gate.bypass_restored",
            tracing::Level::INFO,
            resilience.event.name = BYPASS_RESTORED_EVENT_NAME,
            pipeline.name = %telemetry.pipeline_name,
            strategy.name = %telemetry.strategy_name,
        );
    }
}

#[cfg_attr(
    not(any(feature = "metrics", feature = "logs", test)),
    expect(unused_variables, reason = "unused when neither logs nor metrics are enabled")
)]
pub(super) fn rejected(telemetry: &TelemetryHelper, key: &GateKey) {
    #[cfg(any(feature = "metrics", test))]
    if telemetry.metrics_enabled() {
        telemetry.report_event(REJECTED_EVENT_NAME, &[KeyValue::new(GATE_KEY, key.to_string())]);
    }

    #[cfg(any(feature = "logs", test))]
    if telemetry.logs_enabled {
        tracing::event!(
            name: "cutout.gate.rejected",
            tracing::Level::WARN,
            resilience.event.name = REJECTED_EVENT_NAME,
            pipeline.name = %telemetry.pipeline_name,
            strategy.name = %telemetry.strategy_name,
            gate.key = %key,
        );
    }
}
