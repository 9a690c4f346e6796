// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{DecorateErrorArgs, ErrorTypeArgs};
use crate::{CircuitBreakError, ErrorType, GateKey};

crate::utils::define_fn_wrapper!(KeyProvider<In>(Fn(&In) -> Option<GateKey>));
crate::utils::define_fn_wrapper!(ClassifyOutput<Res, Err>(Fn(&Result<Res, Err>, ErrorTypeArgs) -> ErrorType));
crate::utils::define_fn_wrapper!(DecorateError<In, Err>(Fn(In, CircuitBreakError, DecorateErrorArgs) -> Err));
