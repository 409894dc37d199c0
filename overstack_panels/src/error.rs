// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Advisory errors returned by coordinator operations.

use crate::types::StackId;

/// Why a coordinator operation left the state untouched.
///
/// Every variant describes a no-op: nothing was mutated and no listener ran.
/// Panels routinely try to close before they mount or after a reset, so most
/// callers can drop these with `let _ = ...`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    /// No panel is registered under the given name.
    #[error("panel is not registered")]
    Unregistered,
    /// The explicit stack id does not belong to the named panel.
    #[error("stack {0} does not belong to this panel")]
    UnknownStack(StackId),
    /// Close was refused because the panel is not the most recently opened name.
    #[error("panel is not the most recently opened")]
    NotOnTop,
    /// Close was refused because the instance is not open.
    #[error("stack {0} is not open")]
    NotOpen(StackId),
    /// Every stack id has been handed out; no new instance can be created.
    #[error("no stack ids left")]
    IdsExhausted,
}
