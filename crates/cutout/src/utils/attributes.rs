// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Key used to annotate the name of a resilience pipeline.
pub(crate) const PIPELINE_NAME: &str = "resilience.pipeline.name";

/// Key used to annotate the name of a resilience strategy, i.e. the gate name.
pub(crate) const STRATEGY_NAME: &str = "resilience.strategy.name";

/// Key used to annotate the specific resilience event being emitted.
pub(crate) const EVENT_NAME: &str = "resilience.event.name";

/// Key used to annotate the gate key a rejection applies to.
pub(crate) const GATE_KEY: &str = "resilience.gate.key";
