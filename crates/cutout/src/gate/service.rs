// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt::Debug;
use std::ops::ControlFlow;
#[cfg(any(feature = "tower-service", test))]
use std::pin::Pin;
use std::sync::Arc;
#[cfg(any(feature = "tower-service", test))]
use std::task::{Context, Poll};

use layered::Service;

use super::health_poll::HealthPoll;
use super::mode::ModeFlag;
use super::{ClassifyOutput, DecorateError, DecorateErrorArgs, ErrorTypeArgs, GateLayer, GateMode, KeyProvider, telemetry};
use crate::ticker::SharedTicker;
use crate::utils::{EnableIf, TelemetryHelper};
use crate::{CircuitBreakError, ErrorType, GateContext, GateKey, NotSet, Panel};

/// Adaptive circuit-breaker gate.
///
/// `Gate` wraps an inner [`Service`] and forwards calls to it without any breaker bookkeeping
/// while the system is healthy. The first breaker-worthy error switches the gate into strict
/// mode: from then on every call consults the [`Panel`], denied calls are short-circuited and
/// every outcome is reported. A health poll registered with the shared
/// [`SharedTicker`] returns the gate to bypass mode once all breakers have recovered.
///
/// `Gate` is configured by calling [`Gate::layer`] and using the builder methods on the
/// returned [`GateLayer`] instance. Clones of a gate share its mode.
///
/// For comprehensive examples and usage patterns, see the [`gate` module][crate::gate] documentation.
#[derive(Debug)]
pub struct Gate<In, Res, Err, S> {
    pub(super) shared: Arc<GateShared<In, Res, Err>>,
    pub(super) inner: S,
}

/// Shared configuration and state for [`Gate`] middleware.
pub(crate) struct GateShared<In, Res, Err> {
    pub(crate) panel: Arc<dyn Panel>,
    pub(crate) ticker: SharedTicker,
    pub(crate) mode: Arc<ModeFlag>,
    pub(crate) key_provider: Option<KeyProvider<In>>,
    pub(crate) classify: ClassifyOutput<Res, Err>,
    pub(crate) decorate_error: DecorateError<In, Err>,
    pub(crate) enable_if: EnableIf<In>,
    pub(crate) telemetry: TelemetryHelper,
}

impl<In, Res, Err> Debug for GateShared<In, Res, Err> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateShared")
            .field("mode", &self.mode.load())
            .field("ticker", &self.ticker)
            .field("key_provider", &self.key_provider)
            .field("enable_if", &self.enable_if)
            .finish_non_exhaustive()
    }
}

impl<In, Res, Err, S: Clone> Clone for Gate<In, Res, Err, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            inner: self.inner.clone(),
        }
    }
}

impl<In, Res, Err> Gate<In, Res, Err, ()> {
    /// Creates a new gate layer with the specified name, context and breaker panel.
    ///
    /// Returns a [`GateLayer`] that must be configured with the classification and the error
    /// decoration before it can be used to build a gate service.
    pub fn layer(
        name: impl Into<Cow<'static, str>>,
        context: &GateContext,
        panel: impl Panel,
    ) -> GateLayer<In, Res, Err, NotSet, NotSet> {
        GateLayer::new(name.into(), context, Arc::new(panel))
    }
}

impl<In, Res, Err, S> Gate<In, Res, Err, S> {
    /// Returns the current mode of the gate.
    #[must_use]
    pub fn mode(&self) -> GateMode {
        self.shared.mode.load()
    }
}

// The `layered::Service` impl below and the `tower_service::Service` impl further down contain
// logic-equivalent orchestration code. Any change to one body must be mirrored in the other.
impl<In, Res, Err, S> Service<In> for Gate<In, Res, Err, S>
where
    In: Send,
    Res: Send,
    Err: Send,
    S: Service<In, Out = Result<Res, Err>>,
{
    type Out = Result<Res, Err>;

    async fn execute(&self, input: In) -> Self::Out {
        if !self.shared.enable_if.call(&input) {
            return self.inner.execute(input).await;
        }

        let key = self.shared.get_key(&input);

        match self.shared.mode.load() {
            GateMode::Bypass => {
                let output = self.inner.execute(input).await;
                self.shared.after_bypass(key.as_ref(), &output);
                output
            }
            GateMode::Strict => {
                let Some(key) = key else {
                    return self.inner.execute(input).await;
                };

                let input = match self.shared.before_strict(input, &key) {
                    ControlFlow::Continue(input) => input,
                    ControlFlow::Break(output) => return output,
                };

                let output = self.inner.execute(input).await;
                self.shared.after_strict(&key, &output);
                output
            }
        }
    }
}

/// Future returned by [`Gate`] when used as a tower [`Service`](tower_service::Service).
#[cfg(any(feature = "tower-service", test))]
pub struct GateFuture<Out> {
    inner: Pin<Box<dyn Future<Output = Out> + Send>>,
}

#[cfg(any(feature = "tower-service", test))]
impl<Out> Debug for GateFuture<Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateFuture").finish_non_exhaustive()
    }
}

#[cfg(any(feature = "tower-service", test))]
impl<Out> Future for GateFuture<Out> {
    type Output = Out;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

#[cfg(any(feature = "tower-service", test))]
impl<Req, Res, Err, S> tower_service::Service<Req> for Gate<Req, Res, Err, S>
where
    Err: Send + 'static,
    Req: Send + 'static,
    Res: Send + 'static,
    S: tower_service::Service<Req, Response = Res, Error = Err> + Send + Sync + 'static,
    S::Future: Send + 'static,
{
    type Response = Res;
    type Error = Err;
    type Future = GateFuture<Result<Res, Err>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        if !self.shared.enable_if.call(&req) {
            return GateFuture {
                inner: Box::pin(self.inner.call(req)),
            };
        }

        let key = self.shared.get_key(&req);
        let shared = Arc::clone(&self.shared);

        match shared.mode.load() {
            GateMode::Bypass => {
                let future = self.inner.call(req);
                GateFuture {
                    inner: Box::pin(async move {
                        let output = future.await;
                        shared.after_bypass(key.as_ref(), &output);
                        output
                    }),
                }
            }
            GateMode::Strict => {
                let Some(key) = key else {
                    return GateFuture {
                        inner: Box::pin(self.inner.call(req)),
                    };
                };

                let req = match shared.before_strict(req, &key) {
                    ControlFlow::Continue(req) => req,
                    ControlFlow::Break(output) => {
                        return GateFuture {
                            inner: Box::pin(async move { output }),
                        };
                    }
                };

                let future = self.inner.call(req);
                GateFuture {
                    inner: Box::pin(async move {
                        let output = future.await;
                        shared.after_strict(&key, &output);
                        output
                    }),
                }
            }
        }
    }
}

impl<In, Res, Err> GateShared<In, Res, Err> {
    fn get_key(&self, input: &In) -> Option<GateKey> {
        self.key_provider
            .as_ref()
            .map_or_else(|| Some(GateKey::default()), |provider| provider.call(input))
    }

    fn classify(&self, output: &Result<Res, Err>, key: Option<&GateKey>) -> ErrorType {
        self.classify.call(output, ErrorTypeArgs { key })
    }

    fn before_strict(&self, input: In, key: &GateKey) -> ControlFlow<Result<Res, Err>, In> {
        if self.panel.is_allowed(key) {
            return ControlFlow::Continue(input);
        }

        telemetry::rejected(&self.telemetry, key);

        let error = self
            .decorate_error
            .call(input, CircuitBreakError::new(key.clone()), DecorateErrorArgs { key });
        ControlFlow::Break(Err(error))
    }

    fn after_bypass(&self, key: Option<&GateKey>, output: &Result<Res, Err>) {
        let error_type = self.classify(output, key);
        let is_breaker_error = output.is_err() && error_type.is_breaker_error();

        // Another call may have switched to strict mode while this one was in flight.
        if !is_breaker_error && self.mode.load() == GateMode::Bypass {
            return;
        }

        let Some(key) = key else {
            return;
        };

        if is_breaker_error && self.mode.try_enter_strict() {
            self.start_health_poll(key, error_type);
        }

        self.record_stat(key, error_type);
    }

    fn after_strict(&self, key: &GateKey, output: &Result<Res, Err>) {
        let error_type = self.classify(output, Some(key));
        self.record_stat(key, error_type);
    }

    fn record_stat(&self, key: &GateKey, error_type: ErrorType) {
        match error_type {
            ErrorType::Timeout => self.panel.timeout(key),
            ErrorType::Failure => self.panel.fail(key),
            ErrorType::Success => self.panel.succeed(key),
            ErrorType::Ignorable => {}
        }
    }

    fn start_health_poll(&self, key: &GateKey, error_type: ErrorType) {
        telemetry::strict_entered(&self.telemetry, key, error_type);

        self.ticker.add(Arc::new(HealthPoll::new(
            Arc::clone(&self.panel),
            Arc::clone(&self.mode),
            self.telemetry.clone(),
        )));
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
#[cfg(not(miri))]
mod tests {
    use std::future::poll_fn;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};

    use layered::{Execute, Layer};
    use opentelemetry::KeyValue;

    use super::*;
    use crate::testing::{Counts, FakePanel, MetricTester, frozen_ticker};
    use crate::{Set, TypedError};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Outcome {
        Ok,
        Fail,
        Timeout,
        Ignorable,
    }

    #[derive(Debug, Clone, Copy)]
    struct Call {
        key: Option<&'static str>,
        outcome: Outcome,
    }

    const fn call(key: &'static str, outcome: Outcome) -> Call {
        Call { key: Some(key), outcome }
    }

    const fn exempt(outcome: Outcome) -> Call {
        Call { key: None, outcome }
    }

    fn respond(call: Call) -> Result<String, io::Error> {
        match call.outcome {
            Outcome::Ok => Ok("ok".to_string()),
            Outcome::Fail => Err(io::Error::other("boom")),
            Outcome::Timeout => Err(io::Error::new(io::ErrorKind::TimedOut, "slow")),
            Outcome::Ignorable => Err(io::Error::other(TypedError::new(
                io::Error::other("not found"),
                ErrorType::Ignorable,
            ))),
        }
    }

    type TestGate = Gate<Call, String, io::Error, Execute<fn(Call) -> std::future::Ready<Result<String, io::Error>>>>;

    struct Harness {
        ticker: SharedTicker,
        panel: Arc<FakePanel>,
        invoked: Arc<AtomicU32>,
        context: GateContext,
    }

    impl Harness {
        fn new() -> Self {
            let ticker = frozen_ticker();
            let context = GateContext::new(&ticker).name("test_pipeline");
            Self {
                ticker,
                panel: Arc::new(FakePanel::new()),
                invoked: Arc::new(AtomicU32::new(0)),
                context,
            }
        }

        fn layer(&self) -> GateLayer<Call, String, io::Error, Set, Set> {
            Gate::layer("test_gate", &self.context, Arc::clone(&self.panel))
                .key_with(|call: &Call| call.key.map(GateKey::from))
                .infer_error_type()
                .decorate_error(|_call, error, _args| io::Error::other(error))
        }

        fn gate(&self) -> Gate<Call, String, io::Error, impl Service<Call, Out = Result<String, io::Error>> + Clone> {
            let invoked = Arc::clone(&self.invoked);
            self.layer().layer(Execute::new(move |call: Call| {
                invoked.fetch_add(1, Ordering::SeqCst);
                async move { respond(call) }
            }))
        }

        fn invoked(&self) -> u32 {
            self.invoked.load(Ordering::SeqCst)
        }
    }

    fn is_rejection(error: &io::Error) -> bool {
        error
            .get_ref()
            .is_some_and(|inner| inner.downcast_ref::<CircuitBreakError>().is_some())
    }

    #[tokio::test]
    async fn bypass_success_never_touches_panel() {
        let harness = Harness::new();
        let gate = harness.gate();

        let output = gate.execute(call("orders", Outcome::Ok)).await;

        assert_eq!(output.unwrap(), "ok");
        assert_eq!(gate.mode(), GateMode::Bypass);
        assert_eq!(harness.panel.total(), Counts::default());
        assert!(harness.ticker.is_empty());
    }

    #[tokio::test]
    async fn bypass_failure_enters_strict_and_rejects_next_call() {
        let harness = Harness::new();
        let gate = harness.gate();

        let output = gate.execute(call("x", Outcome::Fail)).await;
        assert_eq!(output.unwrap_err().to_string(), "boom");
        assert_eq!(gate.mode(), GateMode::Strict);
        assert_eq!(harness.panel.counts("x").failed, 1);
        assert_eq!(harness.panel.counts("x").checked, 0);
        assert_eq!(harness.ticker.len(), 1);

        harness.panel.deny("x");
        let error = gate.execute(call("x", Outcome::Ok)).await.unwrap_err();

        assert!(is_rejection(&error));
        assert_eq!(harness.invoked(), 1);
        assert_eq!(
            harness.panel.counts("x"),
            Counts {
                checked: 1,
                failed: 1,
                ..Counts::default()
            }
        );
    }

    #[tokio::test]
    async fn recovery_restores_bypass() {
        let harness = Harness::new();
        let gate = harness.gate();

        let _ = gate.execute(call("x", Outcome::Fail)).await;
        assert_eq!(gate.mode(), GateMode::Strict);

        harness.ticker.tick();
        assert_eq!(gate.mode(), GateMode::Strict, "residual failures keep the gate strict");

        harness.panel.set_breakers(Vec::new());
        harness.ticker.tick();
        assert_eq!(gate.mode(), GateMode::Bypass);
        assert!(harness.ticker.is_empty());

        let before = harness.panel.total();
        gate.execute(call("x", Outcome::Ok)).await.unwrap();
        assert_eq!(harness.panel.total(), before);
        assert_eq!(gate.mode(), GateMode::Bypass);
        assert!(harness.ticker.is_empty());
    }

    #[tokio::test]
    async fn strict_exempt_call_skips_panel() {
        let harness = Harness::new();
        let gate = harness.gate();
        assert!(gate.shared.mode.try_enter_strict());

        let output = gate.execute(exempt(Outcome::Fail)).await;

        assert_eq!(output.unwrap_err().to_string(), "boom");
        assert_eq!(harness.invoked(), 1);
        assert_eq!(harness.panel.total(), Counts::default());
    }

    #[tokio::test]
    async fn bypass_exempt_failure_stays_bypass() {
        let harness = Harness::new();
        let gate = harness.gate();

        let _ = gate.execute(exempt(Outcome::Fail)).await;

        assert_eq!(gate.mode(), GateMode::Bypass);
        assert_eq!(harness.panel.total(), Counts::default());
        assert!(harness.ticker.is_empty());
    }

    #[tokio::test]
    async fn ignorable_error_keeps_bypass() {
        let harness = Harness::new();
        let gate = harness.gate();

        let output = gate.execute(call("x", Outcome::Ignorable)).await;

        assert!(output.is_err());
        assert_eq!(gate.mode(), GateMode::Bypass);
        assert_eq!(harness.panel.total(), Counts::default());
    }

    #[tokio::test]
    async fn timeout_enters_strict_and_reports_timeout() {
        let harness = Harness::new();
        let gate = harness.gate();

        let _ = gate.execute(call("x", Outcome::Timeout)).await;

        assert_eq!(gate.mode(), GateMode::Strict);
        assert_eq!(harness.panel.counts("x").timed_out, 1);
        assert_eq!(harness.panel.counts("x").failed, 0);
    }

    #[tokio::test]
    async fn strict_reports_every_outcome() {
        let harness = Harness::new();
        let gate = harness.gate();
        assert!(gate.shared.mode.try_enter_strict());

        for outcome in [Outcome::Ok, Outcome::Fail, Outcome::Timeout, Outcome::Ignorable] {
            let _ = gate.execute(call("x", outcome)).await;
        }

        assert_eq!(
            harness.panel.counts("x"),
            Counts {
                checked: 4,
                succeeded: 1,
                failed: 1,
                timed_out: 1,
            }
        );
    }

    #[tokio::test]
    async fn ok_output_classified_as_failure_does_not_enter_strict() {
        let harness = Harness::new();
        let gate = Gate::layer("gate", &harness.context, Arc::clone(&harness.panel))
            .error_type_with(|_output: &Result<String, io::Error>, _args| ErrorType::Failure)
            .decorate_error(|_: String, error, _| io::Error::other(error))
            .layer(Execute::new(|input: String| async move { Ok::<_, io::Error>(input) }));

        gate.execute("payload".to_string()).await.unwrap();

        assert_eq!(gate.mode(), GateMode::Bypass);
        assert_eq!(harness.panel.total(), Counts::default());
    }

    #[tokio::test]
    async fn default_key_is_used_without_provider() {
        let harness = Harness::new();
        let gate = Gate::layer("gate", &harness.context, Arc::clone(&harness.panel))
            .infer_error_type()
            .decorate_error(|_: String, error, _| io::Error::other(error))
            .layer(Execute::new(|_input: String| async move { Err::<String, _>(io::Error::other("boom")) }));

        let _ = gate.execute("payload".to_string()).await;

        assert_eq!(harness.panel.counts("default").failed, 1);
    }

    #[tokio::test]
    async fn disabled_gate_passes_through() {
        let harness = Harness::new();
        let gate = harness
            .layer()
            .key_with(|_| panic!("key must not be derived for disabled inputs"))
            .disable()
            .layer(Execute::new(|call: Call| async move { respond(call) }));
        assert!(gate.shared.mode.try_enter_strict());
        harness.panel.deny("x");

        let output = gate.execute(call("x", Outcome::Ok)).await;

        assert_eq!(output.unwrap(), "ok");
        assert_eq!(harness.panel.total(), Counts::default());
    }

    #[tokio::test]
    async fn enable_if_selects_inputs() {
        let harness = Harness::new();
        let gate = harness
            .layer()
            .enable_if(|call: &Call| call.outcome != Outcome::Timeout)
            .layer(Execute::new(|call: Call| async move { respond(call) }));

        let _ = gate.execute(call("x", Outcome::Timeout)).await;
        assert_eq!(gate.mode(), GateMode::Bypass);

        let _ = gate.execute(call("x", Outcome::Fail)).await;
        assert_eq!(gate.mode(), GateMode::Strict);
    }

    #[test]
    fn concurrent_flip_reports_success() {
        let harness = Harness::new();
        let gate = harness.gate();
        let key = GateKey::from("x");

        assert!(gate.shared.mode.try_enter_strict());
        gate.shared.after_bypass(Some(&key), &Ok("ok".to_string()));

        assert_eq!(harness.panel.counts("x").succeeded, 1);
        assert!(harness.ticker.is_empty());
    }

    #[test]
    fn concurrent_flip_with_exempt_key_skips_panel() {
        let harness = Harness::new();
        let gate = harness.gate();

        assert!(gate.shared.mode.try_enter_strict());
        gate.shared.after_bypass(None, &Ok("ok".to_string()));

        assert_eq!(harness.panel.total(), Counts::default());
    }

    #[test]
    fn only_cas_winner_registers_health_poll() {
        let harness = Harness::new();
        let gate = harness.gate();
        let key = GateKey::from("x");

        gate.shared.after_bypass(Some(&key), &Err(io::Error::other("first")));
        gate.shared.after_bypass(Some(&key), &Err(io::Error::other("second")));

        assert_eq!(harness.ticker.len(), 1);
        assert_eq!(harness.panel.counts("x").failed, 2);
    }

    #[test]
    fn clones_share_mode() {
        let harness = Harness::new();
        let gate = harness.gate();
        let clone = gate.clone();

        assert!(gate.shared.mode.try_enter_strict());
        assert_eq!(clone.mode(), GateMode::Strict);
    }

    #[test]
    fn before_strict_passes_key_to_decorate_error() {
        let harness = Harness::new();
        let gate = harness
            .layer()
            .decorate_error(|call: Call, error, args| {
                assert_eq!(call.key, Some("x"));
                assert_eq!(error.key(), args.key());
                io::Error::other(format!("rejected {}", args.key()))
            })
            .layer(());
        harness.panel.deny("x");

        let output = gate.shared.before_strict(call("x", Outcome::Ok), &GateKey::from("x"));

        let error = output.break_value().unwrap().unwrap_err();
        assert_eq!(error.to_string(), "rejected x");
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn emits_logs() {
        let harness = Harness::new();
        let context = harness.context.clone().use_logs();
        let gate = Gate::layer("log_gate", &context, Arc::clone(&harness.panel))
            .key_with(|call: &Call| call.key.map(GateKey::from))
            .infer_error_type()
            .decorate_error(|_call, error, _args| io::Error::other(error))
            .layer(Execute::new(|call: Call| async move { respond(call) }));

        let _ = gate.execute(call("x", Outcome::Fail)).await;
        assert!(logs_contain("gate_strict_entered"));
        assert!(logs_contain("log_gate"));
        assert!(logs_contain("test_pipeline"));

        harness.panel.deny("x");
        let _ = gate.execute(call("x", Outcome::Ok)).await;
        assert!(logs_contain("gate_rejected"));

        harness.panel.set_breakers(Vec::new());
        harness.ticker.tick();
        assert!(logs_contain("gate_bypass_restored"));
    }

    #[tokio::test]
    async fn emits_metrics() {
        let tester = MetricTester::new();
        let harness = Harness::new();
        let context = harness.context.clone().use_metrics(tester.meter_provider());
        let gate = Gate::layer("metric_gate", &context, Arc::clone(&harness.panel))
            .key_with(|call: &Call| call.key.map(GateKey::from))
            .infer_error_type()
            .decorate_error(|_call, error, _args| io::Error::other(error))
            .layer(Execute::new(|call: Call| async move { respond(call) }));

        let _ = gate.execute(call("x", Outcome::Fail)).await;
        harness.panel.deny("x");
        let _ = gate.execute(call("x", Outcome::Ok)).await;

        tester.assert_attributes_contain(&[
            KeyValue::new(crate::utils::STRATEGY_NAME, "metric_gate"),
            KeyValue::new(crate::utils::EVENT_NAME, "gate_strict_entered"),
            KeyValue::new(crate::utils::EVENT_NAME, "gate_rejected"),
            KeyValue::new(crate::utils::GATE_KEY, "x"),
        ]);
    }

    #[tokio::test]
    async fn tower_service_follows_same_protocol() {
        let harness = Harness::new();
        let mut gate = harness
            .layer()
            .layer(tower::service_fn(|call: Call| async move { respond(call) }));

        poll_fn(|cx| tower_service::Service::poll_ready(&mut gate, cx)).await.unwrap();
        let output = tower_service::Service::call(&mut gate, call("x", Outcome::Fail)).await;
        assert!(output.is_err());
        assert_eq!(gate.mode(), GateMode::Strict);
        assert_eq!(harness.panel.counts("x").failed, 1);

        harness.panel.deny("x");
        let error = tower_service::Service::call(&mut gate, call("x", Outcome::Ok)).await.unwrap_err();
        assert!(is_rejection(&error));

        let output = tower_service::Service::call(&mut gate, exempt(Outcome::Ok)).await;
        assert_eq!(output.unwrap(), "ok");
        assert_eq!(harness.panel.counts("x").checked, 1);
    }

    #[tokio::test]
    async fn tower_disabled_passes_through() {
        let harness = Harness::new();
        let mut gate = harness
            .layer()
            .disable()
            .layer(tower::service_fn(|call: Call| async move { respond(call) }));

        let _ = tower_service::Service::call(&mut gate, call("x", Outcome::Fail)).await;

        assert_eq!(gate.mode(), GateMode::Bypass);
        assert_eq!(harness.panel.total(), Counts::default());
    }

    #[test]
    fn gate_future_debug_contains_type_name() {
        let future = GateFuture::<String> {
            inner: Box::pin(async { "test".to_string() }),
        };

        assert!(format!("{future:?}").contains("GateFuture"));
    }

    #[test]
    fn debug_output() {
        let harness = Harness::new();
        let debug = format!("{:?}", harness.gate().shared);

        assert!(debug.contains("GateShared"));
        assert!(debug.contains("Bypass"));
    }

    #[test]
    fn static_assertions() {
        static_assertions::assert_impl_all!(TestGate: Send, Sync, Clone, Debug);
    }
}
