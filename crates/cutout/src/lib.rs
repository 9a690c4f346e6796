// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Adaptive circuit breaking for RPC call paths.
//!
//! This crate provides a [`gate`] middleware that decides, per logical call site, whether a
//! call proceeds or is short-circuited with a synthetic error. While the system is healthy the
//! gate skips breaker bookkeeping entirely; the first breaker-worthy error switches it into a
//! strict mode in which every call consults a breaker [`Panel`]. A shared background
//! [`ticker`] returns gates to the cheap mode once every breaker has recovered.
//!
//! # Core Types
//!
//! - [`ErrorType`]: Classifies the outcome of a call as success, failure, timeout or ignorable.
//! - [`TypedError`]: Attaches an explicit classification to any error, overriding inference.
//! - [`Panel`]: The breaker collaborator that owns the per-key statistics.
//! - [`GateContext`]: Shared ticker and telemetry configuration for the gates of a pipeline.
//! - [`CircuitBreakError`]: The sentinel passed to the gate's error decoration on rejection.
//!
//! # Quick Start
//!
//! ```rust
//! # use std::io;
//! # use layered::{Execute, Layer, Service};
//! # use tick::Clock;
//! use cutout::gate::Gate;
//! use cutout::ticker::SharedTicker;
//! use cutout::{GateContext, GateKey};
//! # use cutout::{BreakerSnapshot, Panel};
//! # struct MyPanel;
//! # impl Panel for MyPanel {
//! #     fn is_allowed(&self, _key: &GateKey) -> bool { true }
//! #     fn succeed(&self, _key: &GateKey) {}
//! #     fn fail(&self, _key: &GateKey) {}
//! #     fn timeout(&self, _key: &GateKey) {}
//! #     fn dump_breakers(&self) -> Vec<BreakerSnapshot> { Vec::new() }
//! # }
//! # struct Request { method: &'static str }
//!
//! # async fn example(clock: Clock, spawner: anyspawn::Spawner) {
//! // One ticker per process, shared by every gate.
//! let ticker = SharedTicker::new(&clock, spawner);
//! let context = GateContext::new(&ticker).name("billing");
//!
//! let service = Gate::layer("billing_gate", &context, MyPanel)
//!     .key_with(|request: &Request| Some(GateKey::from(request.method)))
//!     .infer_error_type()
//!     .decorate_error(|_request, error, _args| io::Error::other(error))
//!     .layer(Execute::new(send_request));
//!
//! let result = service.execute(Request { method: "Charge" }).await;
//! # let _result = result;
//! # }
//! # async fn send_request(_request: Request) -> Result<String, io::Error> { Ok(String::new()) }
//! ```
//!
//! # Features
//!
//! - `tokio`: Enables `anyspawn::Spawner::new_tokio`, which runs the ticker's background task
//!   on the current Tokio runtime.
//! - `serde`: Enables deserialization of [`GateConfig`][gate::GateConfig] and [`ErrorType`].
//! - `metrics`: Reports gate events through OpenTelemetry.
//! - `logs`: Logs gate events through `tracing`.
//! - `tower-service`: Implements `tower_service::Service` for [`Gate`][gate::Gate].

mod context;
mod error;
mod error_type;
mod gate_key;
mod panel;
mod type_state;
mod typed_error;

pub mod gate;
pub mod ticker;

pub(crate) mod utils;

#[cfg(any(feature = "metrics", test))]
mod metrics;

pub use context::GateContext;
pub use error::CircuitBreakError;
pub use error_type::ErrorType;
pub use gate_key::GateKey;
pub use panel::{BreakerSnapshot, BreakerState, Panel};
pub use type_state::{NotSet, Set};
pub use typed_error::{CircuitBreakerAware, TypedError};

#[doc(inline)]
pub use layered::{Layer, Service, Stack};

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
pub(crate) mod testing;
