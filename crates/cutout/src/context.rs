// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

use crate::ticker::SharedTicker;

pub(crate) const DEFAULT_PIPELINE_NAME: &str = "default";

/// Shared dependencies and telemetry configuration for the gates of one pipeline.
///
/// Pass the same context to every [`Gate`][crate::gate::Gate] that should share a
/// [`SharedTicker`] and report telemetry under the same pipeline name. The ticker is the only
/// required dependency; everything else is optional.
///
/// # Examples
///
/// ```rust
/// use cutout::GateContext;
/// use cutout::ticker::SharedTicker;
///
/// # fn example(ticker: &SharedTicker) {
/// let context = GateContext::new(ticker).name("checkout");
/// # let _context = context;
/// # }
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GateContext {
    ticker: SharedTicker,
    name: Cow<'static, str>,
    #[cfg(any(feature = "metrics", test))]
    meter: Option<opentelemetry::metrics::Meter>,
    #[cfg(any(feature = "logs", test))]
    logs_enabled: bool,
}

impl GateContext {
    /// Creates a context around the shared ticker. Initializes with `name = "default"`.
    #[must_use]
    pub fn new(ticker: &SharedTicker) -> Self {
        Self {
            ticker: ticker.clone(),
            name: Cow::Borrowed(DEFAULT_PIPELINE_NAME),
            #[cfg(any(feature = "metrics", test))]
            meter: None,
            #[cfg(any(feature = "logs", test))]
            logs_enabled: false,
        }
    }

    /// Sets the pipeline name used for telemetry correlation. Prefer `snake_case`.
    #[must_use]
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables metrics reporting through the given OpenTelemetry meter provider.
    #[must_use]
    #[cfg(any(feature = "metrics", test))]
    pub fn use_metrics(self, provider: &dyn opentelemetry::metrics::MeterProvider) -> Self {
        Self {
            meter: Some(crate::metrics::create_meter(provider)),
            ..self
        }
    }

    /// Enables structured logging of gate transitions and rejections.
    #[must_use]
    #[cfg(any(feature = "logs", test))]
    pub fn use_logs(self) -> Self {
        Self {
            logs_enabled: true,
            ..self
        }
    }

    pub(crate) fn ticker(&self) -> &SharedTicker {
        &self.ticker
    }

    #[cfg_attr(
        not(any(feature = "metrics", feature = "logs", test)),
        expect(unused_variables, reason = "unused when neither logs nor metrics are enabled")
    )]
    pub(crate) fn create_telemetry(&self, strategy_name: Cow<'static, str>) -> crate::utils::TelemetryHelper {
        crate::utils::TelemetryHelper {
            #[cfg(any(feature = "metrics", feature = "logs", test))]
            pipeline_name: self.name.clone(),
            #[cfg(any(feature = "metrics", feature = "logs", test))]
            strategy_name,
            #[cfg(any(feature = "metrics", test))]
            event_reporter: self.meter.as_ref().map(crate::metrics::create_resilience_event_counter),
            #[cfg(any(feature = "logs", test))]
            logs_enabled: self.logs_enabled,
        }
    }
}
