// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Adaptive circuit-breaker gate middleware.
//!
//! This module provides a gate that sits in a call path and decides, per [`GateKey`][crate::GateKey], whether
//! a call proceeds or is short-circuited with a synthetic error. The primary types are:
//!
//! - [`Gate`] is the middleware that wraps an inner service
//! - [`GateLayer`] is used to configure and construct the gate
//!
//! The statistical decision of whether a key is healthy is delegated to a [`Panel`][crate::Panel].
//! The gate's job is to avoid paying for that decision while the system is healthy.
//!
//! # Quick Start
//!
//! ```rust
//! # use std::io;
//! # use layered::{Execute, Layer, Service};
//! # use cutout::gate::Gate;
//! # use cutout::ticker::SharedTicker;
//! # use cutout::{BreakerSnapshot, GateContext, GateKey, Panel};
//! # struct MyPanel;
//! # impl Panel for MyPanel {
//! #     fn is_allowed(&self, _key: &GateKey) -> bool { true }
//! #     fn succeed(&self, _key: &GateKey) {}
//! #     fn fail(&self, _key: &GateKey) {}
//! #     fn timeout(&self, _key: &GateKey) {}
//! #     fn dump_breakers(&self) -> Vec<BreakerSnapshot> { Vec::new() }
//! # }
//! # async fn example(ticker: SharedTicker) -> Result<(), io::Error> {
//! let context = GateContext::new(&ticker).name("orders");
//!
//! let service = Gate::layer("orders_gate", &context, MyPanel)
//!     // Required: classify outcomes
//!     .infer_error_type()
//!     // Required: produce the error returned for rejected calls
//!     .decorate_error(|_input: String, error, _args| io::Error::other(error))
//!     .layer(Execute::new(place_order));
//!
//! let receipt = service.execute("order".to_string()).await?;
//! # let _receipt = receipt;
//! # Ok(())
//! # }
//! # async fn place_order(input: String) -> Result<String, io::Error> { Ok(input) }
//! ```
//!
//! # Configuration
//!
//! The [`GateLayer`] uses a type state pattern to enforce that all required properties are
//! configured before the layer can be built:
//!
//! - [`error_type_with`][GateLayer::error_type_with] (or [`infer_error_type`][GateLayer::infer_error_type],
//!   [`infer_error_type_with`][GateLayer::infer_error_type_with] and
//!   [`aware_error_type`][GateLayer::aware_error_type]): classifies outcomes as
//!   [`ErrorType`][crate::ErrorType] values.
//! - [`decorate_error`][GateLayer::decorate_error] (or [`decorate_error_into`][GateLayer::decorate_error_into]):
//!   turns the [`CircuitBreakError`][crate::CircuitBreakError] sentinel into the service's error.
//!
//! Each gate requires a name for telemetry purposes. Prefer `snake_case`.
//!
//! # Modes
//!
//! ```text
//! ┌────────┐   Err classified as Timeout or Failure   ┌────────┐
//! │ Bypass │ ────────────────────────────────────────▶│ Strict │
//! └────────┘                                          └────────┘
//!      ▲                                                   │
//!      └───────────────────────────────────────────────────┘
//!           every breaker closed with zero failures and timeouts
//! ```
//!
//! ## Bypass
//!
//! The initial mode. Calls are forwarded without consulting the panel. After each call the
//! outcome is classified; if it is a breaker error the first call to notice switches the gate
//! into strict mode, registers a health poll with the context's
//! [`SharedTicker`][crate::ticker::SharedTicker] and reports the outcome. Other outcomes are
//! not reported unless a concurrent call has switched the gate in the meantime.
//!
//! ## Strict
//!
//! Every call with a key asks [`Panel::is_allowed`][crate::Panel::is_allowed]. Denied calls
//! never reach the inner service and return the decorated error. Admitted calls are forwarded
//! and their outcome is always reported. Calls without a key pass straight through.
//!
//! On every tick the health poll enumerates all breakers of the panel. Once each of them is
//! closed and has no recorded failures or timeouts, the gate returns to bypass mode and the poll
//! deregisters. A gate has at most one health poll at any time.
//!
//! # Thread Safety
//!
//! The [`Gate`] type is thread-safe and implements both `Send` and `Sync`. The request path is
//! lock-free: the mode is a single atomic shared by the gate, its clones and its health poll.
//!
//! # Defaults
//!
//! | Parameter | Default Value | Description | Configured By |
//! |-----------|---------------|-------------|---------------|
//! | Key | `"default"` | All inputs share a single breaker | [`key_with`][GateLayer::key_with] |
//! | Enable condition | Always enabled | The gate applies to all inputs | [`enable_if`][GateLayer::enable_if], [`enable_always`][GateLayer::enable_always], [`disable`][GateLayer::disable], [`config`][GateLayer::config] |
//! | Health poll interval | `1` second | How often strict gates check for recovery | [`SharedTicker::with_interval`][crate::ticker::SharedTicker::with_interval] |
//!
//! # Telemetry
//!
//! ## Metrics
//!
//! - **Metric**: `resilience.event` (counter)
//! - **When**: Emitted on mode transitions and when inputs are rejected
//! - **Attributes**:
//!   - `resilience.pipeline.name`: Pipeline identifier from [`GateContext::name`][crate::GateContext::name]
//!   - `resilience.strategy.name`: Gate identifier from [`Gate::layer`]
//!   - `resilience.event.name`: One of:
//!     - `gate_strict_entered`: When the gate switches to strict mode
//!     - `gate_bypass_restored`: When the health poll restores bypass mode
//!     - `gate_rejected`: When the panel denies a call
//!   - `resilience.gate.key`: The key of the call, absent for `gate_bypass_restored`
//!   - `resilience.gate.error_type`: The classification that caused the switch, only for `gate_strict_entered`
//!
//! ## Logs
//!
//! With [`GateContext::use_logs`][crate::GateContext::use_logs] the same events are logged as
//! `cutout.gate.strict_entered` (warn), `cutout.gate.bypass_restored` (info) and
//! `cutout.gate.rejected` (warn).

mod args;
mod callbacks;
mod config;
mod constants;
mod health_poll;
mod layer;
mod mode;
mod service;
mod telemetry;

pub use args::{DecorateErrorArgs, ErrorTypeArgs};
pub(crate) use callbacks::*;
pub use config::GateConfig;
pub use layer::GateLayer;
pub use mode::GateMode;
#[cfg(any(feature = "tower-service", test))]
pub use service::GateFuture;
pub use service::Gate;
pub(crate) use service::GateShared;
