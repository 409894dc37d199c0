// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open history: which names, and which `(name, id)` instances, were opened in what order.
//!
//! ## Two lists
//!
//! - The *name history* drives close discipline: a close is accepted only when
//!   the target name is its last element (unless
//!   [`StackPolicy::CLOSE_ANY`] is set).
//! - The *stack history* drives [position resolution](crate::position).
//!
//! Both are most-recent-last and live in [`Subscribable`] cells so views can
//! follow them.
//!
//! ## Asymmetry
//!
//! Opening appends unconditionally, so the name history may hold the same
//! name several times. Closing removes every occurrence of the name, and every
//! stack history entry whose id *or* name matches. This mirrors long-standing
//! behavior; [`StackPolicy::DEDUP_NAME_HISTORY`] and
//! [`StackPolicy::EVICT_BY_ID_ONLY`] opt into the symmetric variants.

use alloc::vec::Vec;

use overstack_cell::Subscribable;

use crate::policy::StackPolicy;
use crate::types::{HistoryEntry, StackId};

/// Name history plus stack history.
#[derive(Debug)]
pub struct HistoryTracker<K> {
    names: Subscribable<Vec<K>>,
    stacks: Subscribable<Vec<HistoryEntry<K>>>,
}

impl<K> Default for HistoryTracker<K> {
    fn default() -> Self {
        Self {
            names: Subscribable::new(Vec::new()),
            stacks: Subscribable::new(Vec::new()),
        }
    }
}

impl<K: Clone + PartialEq> HistoryTracker<K> {
    /// Create empty histories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell holding the name history.
    pub fn names(&self) -> &Subscribable<Vec<K>> {
        &self.names
    }

    /// Cell holding the stack history.
    pub fn stacks(&self) -> &Subscribable<Vec<HistoryEntry<K>>> {
        &self.stacks
    }

    /// Append `name` to the name history.
    pub fn record_open(&self, name: K, policy: StackPolicy) {
        self.names.update(|names| {
            if policy.contains(StackPolicy::DEDUP_NAME_HISTORY) {
                names.retain(|n| *n != name);
            }
            names.push(name);
        });
    }

    /// Remove `name` from the name history.
    pub fn record_close(&self, name: &K, policy: StackPolicy) {
        self.names.update(|names| {
            if policy.contains(StackPolicy::EVICT_BY_ID_ONLY) {
                if let Some(i) = names.iter().rposition(|n| n == name) {
                    names.remove(i);
                }
            } else {
                names.retain(|n| n != name);
            }
        });
    }

    /// Append `(name, stack)` to the stack history.
    pub fn record_stack_open(&self, name: K, stack: StackId) {
        self.stacks
            .update(|stacks| stacks.push(HistoryEntry::new(name, stack)));
    }

    /// Remove stack history entries matching the closed instance.
    ///
    /// Without [`StackPolicy::EVICT_BY_ID_ONLY`] an entry is removed when its
    /// id *or* its name matches, so sibling instances of the same name are
    /// evicted too.
    pub fn record_stack_close(&self, name: &K, stack: StackId, policy: StackPolicy) {
        self.stacks.update(|stacks| {
            if policy.contains(StackPolicy::EVICT_BY_ID_ONLY) {
                stacks.retain(|e| e.stack != stack);
            } else {
                stacks.retain(|e| e.stack != stack && e.name != *name);
            }
        });
    }

    /// Most recently opened name.
    pub fn last_name(&self) -> Option<K> {
        self.names.read().last().cloned()
    }

    /// Most recently opened instance.
    pub fn front(&self) -> Option<HistoryEntry<K>> {
        self.stacks.read().last().cloned()
    }

    /// Instance opened just before the front one.
    pub fn back(&self) -> Option<HistoryEntry<K>> {
        self.stacks.read().iter().rev().nth(1).cloned()
    }

    /// Returns true if `stack` appears in the stack history.
    pub fn contains_stack(&self, stack: StackId) -> bool {
        self.stacks.read().iter().any(|e| e.stack == stack)
    }

    /// Empty both histories, notifying only the lists that were non-empty.
    pub fn clear(&self) {
        if !self.names.read().is_empty() {
            self.names.set(Vec::new());
        }
        if !self.stacks.read().is_empty() {
            self.stacks.set(Vec::new());
        }
    }
}
