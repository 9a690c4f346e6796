// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::constants::DEFAULT_ENABLED;

/// Externally loadable gate settings, applied with [`GateLayer::config`][super::GateLayer::config].
///
/// With the `serde` feature enabled the struct can be deserialized from any configuration
/// source. Missing fields take their defaults.
///
/// ```rust
/// use cutout::gate::GateConfig;
///
/// let config = GateConfig::default();
/// assert!(config.is_enabled());
///
/// let config = config.enabled(false);
/// assert!(!config.is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "serde", test), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(feature = "serde", test), serde(default))]
pub struct GateConfig {
    enabled: bool,
}

impl GateConfig {
    /// Sets whether the gate applies to any input at all.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns `true` if the gate is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self { enabled: DEFAULT_ENABLED }
    }
}
