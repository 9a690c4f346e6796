// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error;
use std::marker::PhantomData;
use std::sync::Arc;

use layered::Layer;

use super::mode::ModeFlag;
use super::{ClassifyOutput, DecorateError, DecorateErrorArgs, ErrorTypeArgs, Gate, GateConfig, GateShared, KeyProvider};
use crate::ticker::SharedTicker;
use crate::utils::{EnableIf, TelemetryHelper};
use crate::{CircuitBreakError, CircuitBreakerAware, ErrorType, GateContext, GateKey, NotSet, Panel, Set};

/// Builder for configuring the gate middleware.
///
/// This type is created by calling [`Gate::layer`] and uses the type-state pattern to enforce
/// that required properties are configured before the gate can be built:
///
/// - [`error_type_with`][GateLayer::error_type_with]: Required to classify the outcome of a call
/// - [`decorate_error`][GateLayer::decorate_error]: Required to turn a rejection into the service's error type
///
/// For comprehensive documentation and examples, see the [`gate` module][crate::gate] documentation.
///
/// # Type State
///
/// - `S1`: Tracks whether the classification has been set
/// - `S2`: Tracks whether the error decoration has been set
#[derive(Debug)]
pub struct GateLayer<In, Res, Err, S1 = Set, S2 = Set> {
    ticker: SharedTicker,
    panel: PanelHandle,
    key_provider: Option<KeyProvider<In>>,
    classify: Option<ClassifyOutput<Res, Err>>,
    decorate_error: Option<DecorateError<In, Err>>,
    enable_if: EnableIf<In>,
    telemetry: TelemetryHelper,
    _state: PhantomData<fn(In, S1, S2) -> Result<Res, Err>>,
}

#[derive(Clone)]
struct PanelHandle(Arc<dyn Panel>);

impl std::fmt::Debug for PanelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel").finish_non_exhaustive()
    }
}

impl<In, Res, Err> GateLayer<In, Res, Err, NotSet, NotSet> {
    #[must_use]
    pub(crate) fn new(name: Cow<'static, str>, context: &GateContext, panel: Arc<dyn Panel>) -> Self {
        Self {
            ticker: context.ticker().clone(),
            panel: PanelHandle(panel),
            key_provider: None,
            classify: None,
            decorate_error: None,
            enable_if: EnableIf::always(),
            telemetry: context.create_telemetry(name),
            _state: PhantomData,
        }
    }
}

impl<In, Res, Err, S1, S2> GateLayer<In, Res, Err, S1, S2> {
    /// Sets the key provider function.
    ///
    /// Each distinct [`GateKey`] is tracked by an independent breaker in the panel. A typical key
    /// identifies the logical call site, such as `service/method`.
    ///
    /// Returning `None` exempts the call from breaker checks entirely: it is never rejected
    /// and its outcome never reaches the panel.
    ///
    /// The provider runs for every enabled call, including calls the gate forwards without
    /// consulting the panel. Keep it cheap.
    ///
    /// **Default**: A single global key, `"default"`, shared by all inputs
    ///
    /// # Example
    ///
    /// ```rust
    /// # use cutout::gate::GateLayer;
    /// # use cutout::GateKey;
    /// struct Request {
    ///     service: &'static str,
    ///     method: &'static str,
    ///     health_check: bool,
    /// }
    /// # fn example(layer: GateLayer<Request, String, std::io::Error>) {
    /// let layer = layer.key_with(|request: &Request| {
    ///     if request.health_check {
    ///         return None;
    ///     }
    ///     Some(GateKey::from(format!("{}/{}", request.service, request.method)))
    /// });
    /// # }
    /// ```
    ///
    /// # Telemetry
    ///
    /// Keys are included in logs and metrics. Do not derive keys from sensitive data.
    #[must_use]
    pub fn key_with(mut self, key_provider: impl Fn(&In) -> Option<GateKey> + Send + Sync + 'static) -> Self {
        self.key_provider = Some(KeyProvider::new(key_provider));
        self
    }

    /// Sets the classification function.
    ///
    /// The function receives the output of the next service and [`ErrorTypeArgs`] and returns
    /// the [`ErrorType`] reported to the panel. Only `Err` outputs classified as
    /// [`ErrorType::Timeout`] or [`ErrorType::Failure`] switch the gate into strict mode.
    ///
    /// # Arguments
    ///
    /// * `classify` - Function that takes a reference to the output and [`ErrorTypeArgs`]
    ///   and returns the classification of the outcome
    #[must_use]
    pub fn error_type_with(
        mut self,
        classify: impl Fn(&Result<Res, Err>, ErrorTypeArgs) -> ErrorType + Send + Sync + 'static,
    ) -> GateLayer<In, Res, Err, Set, S2> {
        self.classify = Some(ClassifyOutput::new(classify));
        self.into_state::<Set, S2>()
    }

    /// Classifies outcomes by inspecting the error.
    ///
    /// `Ok` outputs are [`ErrorType::Success`]. For errors, an explicit classification attached
    /// with [`TypedError`][crate::TypedError] anywhere in the source chain wins; otherwise
    /// [`ErrorType::infer`] applies its heuristic.
    #[must_use]
    pub fn infer_error_type(self) -> GateLayer<In, Res, Err, Set, S2>
    where
        Err: Error + 'static,
    {
        self.error_type_with(|output, _args| match output {
            Ok(_) => ErrorType::Success,
            Err(error) => ErrorType::infer(error),
        })
    }

    /// Classifies outcomes by inspecting the error, with a custom fallback.
    ///
    /// Like [`infer_error_type`][GateLayer::infer_error_type], but errors without an explicit
    /// [`TypedError`][crate::TypedError] classification are passed to `fallback` instead of the
    /// built-in heuristic.
    #[must_use]
    pub fn infer_error_type_with(
        self,
        fallback: impl Fn(&Err, ErrorTypeArgs) -> ErrorType + Send + Sync + 'static,
    ) -> GateLayer<In, Res, Err, Set, S2>
    where
        Err: Error + 'static,
    {
        self.error_type_with(move |output, args| match output {
            Ok(_) => ErrorType::Success,
            Err(error) => ErrorType::explicit(error).unwrap_or_else(|| fallback(error, args)),
        })
    }

    /// Classifies outcomes with the error's own [`CircuitBreakerAware`] implementation.
    ///
    /// `Ok` outputs are [`ErrorType::Success`]. Errors report whatever
    /// [`type_for_circuit_breaker`][CircuitBreakerAware::type_for_circuit_breaker] returns, so
    /// the service's error type decides on its own which failures count against the breaker.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use cutout::gate::GateLayer;
    /// use cutout::{CircuitBreakerAware, ErrorType};
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// enum OrderError {
    ///     #[error("order not found")]
    ///     NotFound,
    ///     #[error("inventory unavailable")]
    ///     Unavailable,
    /// }
    ///
    /// impl CircuitBreakerAware for OrderError {
    ///     fn type_for_circuit_breaker(&self) -> ErrorType {
    ///         match self {
    ///             Self::NotFound => ErrorType::Ignorable,
    ///             Self::Unavailable => ErrorType::Failure,
    ///         }
    ///     }
    /// }
    ///
    /// # fn example(layer: GateLayer<String, String, OrderError, cutout::NotSet, cutout::NotSet>) {
    /// let layer = layer.aware_error_type();
    /// # let _layer = layer;
    /// # }
    /// ```
    #[must_use]
    pub fn aware_error_type(self) -> GateLayer<In, Res, Err, Set, S2>
    where
        Err: CircuitBreakerAware,
    {
        self.error_type_with(|output, _args| match output {
            Ok(_) => ErrorType::Success,
            Err(error) => error.type_for_circuit_breaker(),
        })
    }

    /// Sets the function that produces the error returned for rejected calls.
    ///
    /// When the panel denies a call the next service is not invoked. Instead this function
    /// receives the original input, the [`CircuitBreakError`] sentinel and
    /// [`DecorateErrorArgs`], and the result is returned as `Err`. Keep the sentinel reachable
    /// from the produced error so that callers can tell rejections apart from downstream
    /// failures.
    #[must_use]
    pub fn decorate_error(
        mut self,
        decorate: impl Fn(In, CircuitBreakError, DecorateErrorArgs) -> Err + Send + Sync + 'static,
    ) -> GateLayer<In, Res, Err, S1, Set> {
        self.decorate_error = Some(DecorateError::new(decorate));
        self.into_state::<S1, Set>()
    }

    /// Converts the [`CircuitBreakError`] sentinel into the service's error type.
    #[must_use]
    pub fn decorate_error_into(self) -> GateLayer<In, Res, Err, S1, Set>
    where
        Err: From<CircuitBreakError>,
    {
        self.decorate_error(|_input, error, _args| Err::from(error))
    }

    /// Optionally enables the gate based on a condition.
    ///
    /// When disabled, inputs pass straight through in either mode: no key is derived, the panel
    /// is never consulted and the outcome is never reported. This call replaces any previous
    /// condition.
    ///
    /// **Default**: Always enabled
    #[must_use]
    pub fn enable_if(mut self, is_enabled: impl Fn(&In) -> bool + Send + Sync + 'static) -> Self {
        self.enable_if = EnableIf::new(is_enabled);
        self
    }

    /// Enables the gate unconditionally. This call replaces any previous condition.
    ///
    /// **Note**: This is the default behavior.
    #[must_use]
    pub fn enable_always(mut self) -> Self {
        self.enable_if = EnableIf::always();
        self
    }

    /// Disables the gate completely. This call replaces any previous condition.
    #[must_use]
    pub fn disable(mut self) -> Self {
        self.enable_if = EnableIf::never();
        self
    }

    /// Applies externally loaded settings.
    ///
    /// An enabled config resets the condition to [`enable_always`][GateLayer::enable_always],
    /// a disabled one to [`disable`][GateLayer::disable].
    #[must_use]
    pub fn config(self, config: &GateConfig) -> Self {
        if config.is_enabled() {
            self.enable_always()
        } else {
            self.disable()
        }
    }

    fn into_state<T1, T2>(self) -> GateLayer<In, Res, Err, T1, T2> {
        GateLayer {
            ticker: self.ticker,
            panel: self.panel,
            key_provider: self.key_provider,
            classify: self.classify,
            decorate_error: self.decorate_error,
            enable_if: self.enable_if,
            telemetry: self.telemetry,
            _state: PhantomData,
        }
    }
}

impl<In, Res, Err, S> Layer<S> for GateLayer<In, Res, Err, Set, Set> {
    type Service = Gate<In, Res, Err, S>;

    fn layer(&self, inner: S) -> Self::Service {
        Gate {
            shared: Arc::new(GateShared {
                panel: Arc::clone(&self.panel.0),
                ticker: self.ticker.clone(),
                mode: Arc::new(ModeFlag::default()),
                key_provider: self.key_provider.clone(),
                classify: self.classify.clone().expect("classification must be set in Set state"),
                decorate_error: self.decorate_error.clone().expect("decorate_error must be set in Set state"),
                enable_if: self.enable_if.clone(),
                telemetry: self.telemetry.clone(),
            }),
            inner,
        }
    }
}
