// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::atomic::{AtomicU8, Ordering};

const BYPASS: u8 = 0;
const STRICT: u8 = 1;

/// Operating mode of a [`Gate`][super::Gate].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateMode {
    /// The system is considered healthy: calls are forwarded without consulting the panel.
    Bypass,
    /// A breaker-worthy error was observed: every enabled call consults the panel.
    Strict,
}

/// Atomic mode flag shared by a gate, its clones and its health poll.
///
/// `Bypass -> Strict` happens only through [`try_enter_strict`][ModeFlag::try_enter_strict];
/// `Strict -> Bypass` only through [`restore_bypass`][ModeFlag::restore_bypass], which is
/// called exclusively by the health poll.
#[derive(Debug, Default)]
pub(crate) struct ModeFlag(AtomicU8);

impl ModeFlag {
    pub(crate) fn load(&self) -> GateMode {
        match self.0.load(Ordering::Acquire) {
            BYPASS => GateMode::Bypass,
            _ => GateMode::Strict,
        }
    }

    /// Returns `true` for the single caller that flips the flag from bypass to strict.
    pub(crate) fn try_enter_strict(&self) -> bool {
        self.0
            .compare_exchange(BYPASS, STRICT, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn restore_bypass(&self) {
        self.0.store(BYPASS, Ordering::Release);
    }
}
