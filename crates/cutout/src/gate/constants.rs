// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Gates are enabled for every input unless configured otherwise.
pub(super) const DEFAULT_ENABLED: bool = true;

/// Event reported when a gate flips from bypass to strict mode.
#[cfg(any(feature = "metrics", feature = "logs", test))]
pub(super) const STRICT_ENTERED_EVENT_NAME: &str = "gate_strict_entered";

/// Event reported when the health poll restores bypass mode.
#[cfg(any(feature = "metrics", feature = "logs", test))]
pub(super) const BYPASS_RESTORED_EVENT_NAME: &str = "gate_bypass_restored";

/// Event reported when the panel denies a call in strict mode.
#[cfg(any(feature = "metrics", feature = "logs", test))]
pub(super) const REJECTED_EVENT_NAME: &str = "gate_rejected";

/// Attribute key for the classification that caused a mode change.
#[cfg(any(feature = "metrics", test))]
pub(super) const GATE_ERROR_TYPE: &str = "resilience.gate.error_type";
