// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: instance ids, positions, per-instance state, and registry entries.

use alloc::vec::Vec;

use overstack_cell::Subscribable;

/// Identifier of one concrete panel instance.
///
/// Minted by [`StackRegistry::allocate_id`](crate::registry::StackRegistry::allocate_id)
/// from a monotonically increasing counter, so it behaves like an arena index
/// that is never reused within one coordinator.
///
/// Several ids can live under one panel name at the same time: the default
/// instance created at registration, plus one copy per `open` of an instance
/// that was already open.
///
/// The counter is a `u64` and is never wrapped: once it is spent, minting
/// fails with [`StackError::IdsExhausted`](crate::StackError::IdsExhausted).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackId(u64);

impl StackId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw counter value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for StackId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Render position of a panel instance, derived from the open history.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Most recently opened instance.
    Front,
    /// Instance opened just before the front one.
    Back,
    /// Everything else, including closed instances.
    #[default]
    Hidden,
}

impl Position {
    /// Returns true for [`Front`](Self::Front) and [`Back`](Self::Back).
    #[inline]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// State of one panel instance.
///
/// Held in a [`Subscribable`] so views re-render when the coordinator
/// changes it. Callers read it; only the coordinator writes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackState<K, P> {
    /// Logical panel name this instance belongs to.
    pub name: K,
    /// Whether the instance is currently open.
    pub open: bool,
    /// Derived render position.
    pub position: Position,
    /// Panel-specific payload, replaced by `open` calls that carry one.
    pub params: P,
}

impl<K, P> StackState<K, P> {
    /// A closed, hidden instance.
    pub fn new(name: K, params: P) -> Self {
        Self {
            name,
            open: false,
            position: Position::Hidden,
            params,
        }
    }
}

/// One `(name, id)` record of the stack history.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry<K> {
    /// Panel name.
    pub name: K,
    /// Instance id.
    pub stack: StackId,
}

impl<K> HistoryEntry<K> {
    /// Pair a name with an instance id.
    pub const fn new(name: K, stack: StackId) -> Self {
        Self { name, stack }
    }
}

/// Registry entry for one panel name.
///
/// Instances are kept in registration order; the first one is the template
/// that copies are cloned from.
#[derive(Clone, Debug)]
pub struct StackEntry<K, P> {
    pub(crate) default_stack: StackId,
    pub(crate) stacks: Vec<(StackId, Subscribable<StackState<K, P>>)>,
}

impl<K, P> StackEntry<K, P> {
    pub(crate) fn new(default_stack: StackId, state: StackState<K, P>) -> Self {
        Self {
            default_stack,
            stacks: alloc::vec![(default_stack, Subscribable::new(state))],
        }
    }

    /// Instance targeted by operations that do not name one explicitly.
    #[inline]
    pub fn default_stack(&self) -> StackId {
        self.default_stack
    }

    /// Cell of the instance `id`, if it belongs to this entry.
    pub fn get(&self, id: StackId) -> Option<&Subscribable<StackState<K, P>>> {
        self.stacks
            .iter()
            .find_map(|(sid, cell)| (*sid == id).then_some(cell))
    }

    /// The first registered instance.
    pub fn first(&self) -> Option<(StackId, &Subscribable<StackState<K, P>>)> {
        self.stacks.first().map(|(id, cell)| (*id, cell))
    }

    /// Returns true if `id` belongs to this entry.
    pub fn contains(&self, id: StackId) -> bool {
        self.get(id).is_some()
    }

    /// Instance ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = StackId> + '_ {
        self.stacks.iter().map(|(id, _)| *id)
    }

    /// Instances in registration order.
    pub fn stacks(&self) -> impl Iterator<Item = (StackId, &Subscribable<StackState<K, P>>)> {
        self.stacks.iter().map(|(id, cell)| (*id, cell))
    }

    /// Number of instances, default included.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Always false for registered entries; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_id_display_and_order() {
        let a = StackId::new(1);
        let b = StackId::new(2);
        assert!(a < b);
        assert_eq!(alloc::format!("{b}"), "#2");
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn position_defaults_to_hidden() {
        assert_eq!(Position::default(), Position::Hidden);
        assert!(Position::Front.is_visible());
        assert!(Position::Back.is_visible());
        assert!(!Position::Hidden.is_visible());
    }

    #[test]
    fn entry_lookup_by_id() {
        let id = StackId::new(7);
        let entry = StackEntry::new(id, StackState::new("profile", 0_u32));
        assert_eq!(entry.default_stack(), id);
        assert!(entry.contains(id));
        assert!(!entry.contains(StackId::new(8)));
        assert_eq!(entry.first().map(|(sid, _)| sid), Some(id));
        assert_eq!(entry.len(), 1);
        let state = entry.get(id).map(|c| c.get());
        assert_eq!(state, Some(StackState::new("profile", 0_u32)));
    }
}
