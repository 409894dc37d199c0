// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position resolution: derive front/back/hidden from the stack history.
//!
//! ## Rule
//!
//! The last stack history entry is [`Front`](Position::Front), the one before
//! it is [`Back`](Position::Back), and every other entry is
//! [`Hidden`](Position::Hidden). Entries are compared by id only.
//!
//! [`resolve`] is a pure function over a history snapshot. [`Layers`] holds
//! the front and back ids of a snapshot and places any instance, including
//! ones the history no longer mentions: those are Hidden. The coordinator
//! visits every registered instance and writes its cell only when the
//! computed position differs from the stored one, reporting each write as a
//! [`PositionChange`].
//!
//! ## Minimal example
//!
//! ```
//! use overstack_panels::position::resolve;
//! use overstack_panels::types::Position;
//! # use overstack_panels::StackCoordinator;
//! # let mut c: StackCoordinator<&str, ()> = StackCoordinator::new();
//! # for name in ["a", "b", "c"] { c.register(name, ()).unwrap(); let _ = c.open(&name, None); }
//! let history = c.stack_history().get();
//! let positions: Vec<_> = resolve(&history).into_iter().map(|(_, p)| p).collect();
//! assert_eq!(positions, [Position::Hidden, Position::Back, Position::Front]);
//! ```

use alloc::vec::Vec;

use crate::types::{HistoryEntry, Position, StackId};

/// A position write applied by the coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionChange<K> {
    /// Panel name.
    pub name: K,
    /// Instance whose position changed.
    pub stack: StackId,
    /// Stored position before the write.
    pub from: Position,
    /// Stored position after the write.
    pub to: Position,
}

/// The two visible instances of a history snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Layers {
    /// Last entry.
    pub front: Option<StackId>,
    /// Second to last entry.
    pub back: Option<StackId>,
}

impl Layers {
    /// Read the front and back ids off `history`.
    pub fn of<K>(history: &[HistoryEntry<K>]) -> Self {
        let mut tail = history.iter().rev().map(|e| e.stack);
        let front = tail.next();
        let back = tail.next();
        Self { front, back }
    }

    /// Position of `stack`. Anything that is neither front nor back is Hidden.
    pub fn position(self, stack: StackId) -> Position {
        if Some(stack) == self.front {
            Position::Front
        } else if Some(stack) == self.back {
            Position::Back
        } else {
            Position::Hidden
        }
    }
}

/// Assign a position to every entry of `history`, in history order.
pub fn resolve<K: Clone>(history: &[HistoryEntry<K>]) -> Vec<(HistoryEntry<K>, Position)> {
    let layers = Layers::of(history);
    history
        .iter()
        .map(|e| (e.clone(), layers.position(e.stack)))
        .collect()
}

/// Position of `stack` given the current `history`.
///
/// Ids absent from the history are [`Hidden`](Position::Hidden).
pub fn position_of<K>(history: &[HistoryEntry<K>], stack: StackId) -> Position {
    Layers::of(history).position(stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn entry(name: &'static str, n: u64) -> HistoryEntry<&'static str> {
        HistoryEntry::new(name, StackId::new(n))
    }

    #[test]
    fn empty_history_resolves_to_nothing() {
        let h: Vec<HistoryEntry<&str>> = Vec::new();
        assert!(resolve(&h).is_empty());
        assert_eq!(position_of(&h, StackId::new(1)), Position::Hidden);
    }

    #[test]
    fn single_entry_is_front() {
        let h = vec![entry("a", 1)];
        assert_eq!(resolve(&h), vec![(entry("a", 1), Position::Front)]);
    }

    #[test]
    fn three_entries_front_back_hidden() {
        let h = vec![entry("a", 1), entry("b", 2), entry("c", 3)];
        let got: Vec<_> = resolve(&h).into_iter().map(|(e, p)| (e.name, p)).collect();
        assert_eq!(
            got,
            vec![
                ("a", Position::Hidden),
                ("b", Position::Back),
                ("c", Position::Front),
            ]
        );
    }

    #[test]
    fn copies_are_distinguished_by_id() {
        // Two instances of the same name: only the latest is front.
        let h = vec![entry("profile", 1), entry("profile", 4)];
        assert_eq!(position_of(&h, StackId::new(4)), Position::Front);
        assert_eq!(position_of(&h, StackId::new(1)), Position::Back);
        assert_eq!(position_of(&h, StackId::new(9)), Position::Hidden);
    }

    #[test]
    fn layers_hide_ids_missing_from_history() {
        let h = vec![entry("b", 2), entry("c", 3)];
        let layers = Layers::of(&h);
        assert_eq!(layers.front, Some(StackId::new(3)));
        assert_eq!(layers.back, Some(StackId::new(2)));
        assert_eq!(layers.position(StackId::new(4)), Position::Hidden);
        assert_eq!(Layers::of::<&str>(&[]), Layers::default());
    }
}
