// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// Partition key under which a call is tracked by the breaker panel.
///
/// Every distinct key maps to an independent breaker in the [`Panel`][crate::Panel]. Keys
/// typically identify a logical call site such as `service/method` or a downstream endpoint.
///
/// Keys should be **low-cardinality**. Deriving a key from per-request data such as
/// request or user IDs grows the panel without bound and hides systemic failures.
///
/// Static strings and integers are the cheapest keys. A key is derived for every call that
/// passes through an enabled gate, even while the gate bypasses the panel.
///
/// # Examples
///
/// ```rust
/// use cutout::GateKey;
///
/// let key = GateKey::from("payments/Charge");
/// assert_eq!(key.to_string(), "payments/Charge");
///
/// let key = GateKey::from(format!("{}/{}", "payments", "Refund"));
/// assert_eq!(key.to_string(), "payments/Refund");
///
/// // Hashed keys display their label only.
/// let key = GateKey::hashed(&("payments", 8080_u16), "payments_endpoint");
/// assert_eq!(key.to_string(), "payments_endpoint");
/// ```
///
/// # Telemetry
///
/// Keys are included in logs and metrics. Do not build keys from sensitive data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GateKey(KeyValue);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyValue {
    Number(u64),
    Hashed(u64, &'static str),
    Text(Cow<'static, str>),
}

impl GateKey {
    /// The key used when no key provider is configured on the gate.
    pub(crate) const fn default() -> Self {
        Self(KeyValue::Text(Cow::Borrowed("default")))
    }

    /// Creates a key by hashing `value`. The `label` is used for display and telemetry.
    pub fn hashed<T: Hash + ?Sized>(value: &T, label: &'static str) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        Self(KeyValue::Hashed(hasher.finish(), label))
    }
}

impl Display for GateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            KeyValue::Number(n) => write!(f, "{n}"),
            KeyValue::Hashed(_, label) => f.write_str(label),
            KeyValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for GateKey {
    fn from(value: u64) -> Self {
        Self(KeyValue::Number(value))
    }
}

impl From<&'static str> for GateKey {
    fn from(value: &'static str) -> Self {
        Self(KeyValue::Text(Cow::Borrowed(value)))
    }
}

impl From<String> for GateKey {
    fn from(value: String) -> Self {
        Self(KeyValue::Text(Cow::Owned(value)))
    }
}

impl From<GateKey> for Cow<'static, str> {
    fn from(value: GateKey) -> Self {
        match value.0 {
            KeyValue::Number(n) => Cow::Owned(n.to_string()),
            KeyValue::Hashed(_, label) => Cow::Borrowed(label),
            KeyValue::Text(s) => s,
        }
    }
}
