// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod define_fn_wrapper;
pub(crate) use define_fn_wrapper::define_fn_wrapper;

#[cfg(any(feature = "metrics", test))]
mod attributes;
#[cfg(any(feature = "metrics", test))]
pub(crate) use attributes::*;

mod telemetry_helper;
pub(crate) use telemetry_helper::TelemetryHelper;

define_fn_wrapper!(EnableIf<In>(Fn(&In) -> bool));

impl<In> EnableIf<In> {
    pub(crate) fn always() -> Self {
        Self::new(|_| true)
    }

    pub(crate) fn never() -> Self {
        Self::new(|_| false)
    }
}
