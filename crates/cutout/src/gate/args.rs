// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::GateKey;

/// Arguments for the [`error_type_with`][super::GateLayer::error_type_with] callback.
#[derive(Debug)]
#[non_exhaustive]
pub struct ErrorTypeArgs<'a> {
    pub(crate) key: Option<&'a GateKey>,
}

impl ErrorTypeArgs<'_> {
    /// Returns the key of the classified call, or `None` if the call is exempt from
    /// breaker checks.
    #[must_use]
    pub fn key(&self) -> Option<&GateKey> {
        self.key
    }
}

/// Arguments for the [`decorate_error`][super::GateLayer::decorate_error] callback.
#[derive(Debug)]
#[non_exhaustive]
pub struct DecorateErrorArgs<'a> {
    pub(crate) key: &'a GateKey,
}

impl DecorateErrorArgs<'_> {
    /// Returns the key whose breaker rejected the call.
    #[must_use]
    pub fn key(&self) -> &GateKey {
        self.key
    }
}
