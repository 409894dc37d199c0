// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack registry: panel name → entry holding one or more instance cells.
//!
//! ## Semantics
//!
//! - [`StackRegistry::register`] is idempotent: the first registration of a
//!   name wins and later calls return the existing default id.
//! - [`StackRegistry::register_copy`] clones the state of the *first*
//!   registered instance of a name into a new cell. Entry subscribers are
//!   notified so views can mount the new instance.
//! - Entries and instances are never removed; their lifetime is the
//!   registry's.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use overstack_cell::Subscribable;

use crate::types::{StackEntry, StackId, StackState};

/// Mapping from panel name to its [`StackEntry`] cell.
#[derive(Debug)]
pub struct StackRegistry<K, P> {
    entries: BTreeMap<K, Subscribable<StackEntry<K, P>>>,
    next_id: u64,
}

impl<K, P> Default for StackRegistry<K, P> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<K: Clone + Ord, P: Clone> StackRegistry<K, P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh instance id, or `None` once the id space is spent.
    pub fn allocate_id(&mut self) -> Option<StackId> {
        let next = self.next_id.checked_add(1)?;
        self.next_id = next;
        Some(StackId::new(next))
    }

    #[cfg(test)]
    pub(crate) fn set_last_id(&mut self, raw: u64) {
        self.next_id = raw;
    }

    /// Register `name` with a closed, hidden default instance carrying `params`.
    ///
    /// Returns the default instance id. If `name` is already registered this
    /// is a no-op and the existing default id is returned. Returns `None`
    /// only when a new name arrives after the id space is spent.
    pub fn register(&mut self, name: K, params: P) -> Option<StackId> {
        if let Some(entry) = self.entries.get(&name) {
            return Some(entry.read().default_stack);
        }
        let id = self.allocate_id()?;
        let entry = StackEntry::new(id, StackState::new(name.clone(), params));
        self.entries.insert(name, Subscribable::new(entry));
        Some(id)
    }

    /// Clone the first registered instance of `name` under `new_id`.
    ///
    /// Returns the new instance cell, or `None` if `name` is unregistered or
    /// already has an instance with `new_id`.
    pub fn register_copy(
        &mut self,
        name: &K,
        new_id: StackId,
    ) -> Option<Subscribable<StackState<K, P>>> {
        let entry = self.entries.get(name)?;
        let template = {
            let e = entry.read();
            if e.contains(new_id) {
                return None;
            }
            e.first()?.1.get()
        };
        let cell = Subscribable::new(template);
        entry.update(|e| e.stacks.push((new_id, cell.clone())));
        Some(cell)
    }

    /// Registry entry for `name`.
    pub fn get(&self, name: &K) -> Option<&Subscribable<StackEntry<K, P>>> {
        self.entries.get(name)
    }

    /// Cell of instance `id` under `name`.
    pub fn instance(&self, name: &K, id: StackId) -> Option<Subscribable<StackState<K, P>>> {
        self.entries.get(name)?.read().get(id).cloned()
    }

    /// Default instance id of `name`.
    pub fn default_stack(&self, name: &K) -> Option<StackId> {
        self.entries.get(name).map(|e| e.read().default_stack)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &K) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in key order.
    pub fn names(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Every instance of every name, as `(name, id, cell)`.
    ///
    /// Names are visited in key order, instances in registration order.
    pub fn instances(&self) -> Vec<(K, StackId, Subscribable<StackState<K, P>>)> {
        let mut out = Vec::new();
        for (name, entry) in &self.entries {
            for (id, cell) in entry.read().stacks() {
                out.push((name.clone(), id, cell.clone()));
            }
        }
        out
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
