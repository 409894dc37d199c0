// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator policy flags.
//!
//! The empty policy reproduces the classic behavior: duplicate names are kept
//! in the name history, closing evicts every stack history entry that shares
//! the closed id *or* name, closes are LIFO by name, and positions are only
//! re-resolved when something opens. Each flag relaxes or tightens one of
//! those rules.

use bitflags::bitflags;

bitflags! {
    /// Behavior switches for [`StackCoordinator`](crate::coordinator::StackCoordinator).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StackPolicy: u8 {
        /// Drop earlier occurrences of a name before appending it to the name history.
        const DEDUP_NAME_HISTORY = 0b0000_0001;
        /// On close, evict only the closed id from the stack history (and only the
        /// last occurrence of the name from the name history).
        const EVICT_BY_ID_ONLY   = 0b0000_0010;
        /// Allow closing any open instance, not only the most recently opened name.
        const CLOSE_ANY          = 0b0000_0100;
        /// Re-resolve positions after a successful close as well as after opens.
        const REFLOW_ON_CLOSE    = 0b0000_1000;
    }
}

impl Default for StackPolicy {
    fn default() -> Self {
        Self::empty()
    }
}
