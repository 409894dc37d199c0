// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-panel controller: open and close bound to one panel name.
//!
//! Trigger code (a button, a route handler) usually only ever toggles one
//! panel. [`StackCoordinator::controller`] hands out a [`StackController`]
//! that remembers the name, so callers do not repeat it:
//!
//! ```
//! use overstack_panels::{Position, StackCoordinator};
//!
//! let mut stacks: StackCoordinator<&str, u32> = StackCoordinator::new();
//! let id = stacks.register("drawer", 0)?;
//!
//! let mut drawer = stacks.controller("drawer");
//! drawer.open(Some(7))?;
//! assert!(drawer.is_open());
//! drawer.close()?;
//! assert_eq!(stacks.state(&"drawer", id).map(|s| s.position), Some(Position::Hidden));
//! # Ok::<(), overstack_panels::StackError>(())
//! ```
//!
//! The controller borrows the coordinator mutably and follows the same rules:
//! LIFO close discipline, copies on reopen, advisory errors.

use core::fmt::Debug;

use crate::coordinator::{Opened, StackCoordinator};
use crate::error::StackError;
use crate::types::{StackId, StackState};

/// Open/close handle bound to one panel name.
#[derive(Debug)]
pub struct StackController<'a, K, P> {
    stacks: &'a mut StackCoordinator<K, P>,
    name: K,
}

impl<'a, K: Clone + Ord + Debug, P: Clone> StackController<'a, K, P> {
    pub(crate) fn new(stacks: &'a mut StackCoordinator<K, P>, name: K) -> Self {
        Self { stacks, name }
    }

    /// Panel name this controller drives.
    pub fn name(&self) -> &K {
        &self.name
    }

    /// See [`StackCoordinator::open`].
    pub fn open(&mut self, params: Option<P>) -> Result<Opened, StackError> {
        self.stacks.open(&self.name, params)
    }

    /// See [`StackCoordinator::close`].
    pub fn close(&mut self) -> Result<StackId, StackError> {
        self.stacks.close(&self.name)
    }

    /// Open (`true`) or close (`false`) the default instance.
    ///
    /// Returns the instance that changed.
    pub fn toggle(&mut self, open: bool) -> Result<StackId, StackError> {
        if open {
            self.open(None).map(Opened::stack)
        } else {
            self.close()
        }
    }

    /// State of the default instance, if the panel is registered.
    pub fn state(&self) -> Option<StackState<K, P>> {
        let id = self.stacks.default_stack(&self.name)?;
        self.stacks.state(&self.name, id)
    }

    /// Returns true if any instance of this panel is open.
    pub fn is_open(&self) -> bool {
        self.stacks
            .get(&self.name)
            .is_some_and(|entry| entry.read().stacks().any(|(_, s)| s.with(|s| s.open)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Opened, Position, StackCoordinator, StackError};

    #[test]
    fn controller_drives_its_own_panel() {
        let mut c: StackCoordinator<&str, u32> = StackCoordinator::new();
        let a = c.register("a", 0).unwrap();
        let b = c.register("b", 0).unwrap();

        assert_eq!(c.controller("a").open(Some(1)), Ok(Opened::Activated(a)));
        assert_eq!(c.controller("b").toggle(true), Ok(b));

        let mut ctl = c.controller("a");
        assert_eq!(ctl.name(), &"a");
        assert_eq!(ctl.state().map(|s| s.position), Some(Position::Back));
        // LIFO still applies.
        assert_eq!(ctl.close(), Err(StackError::NotOnTop));
        assert!(ctl.is_open());

        assert_eq!(c.controller("b").toggle(false), Ok(b));
        assert_eq!(c.controller("a").close(), Ok(a));
        assert!(!c.controller("a").is_open());
    }

    #[test]
    fn controller_for_unregistered_name_is_inert() {
        let mut c: StackCoordinator<&str, u32> = StackCoordinator::new();
        let mut ghost = c.controller("ghost");
        assert_eq!(ghost.open(None), Err(StackError::Unregistered));
        assert_eq!(ghost.close(), Err(StackError::Unregistered));
        assert!(ghost.state().is_none());
        assert!(!ghost.is_open());
    }

    #[test]
    fn reopening_through_controller_stacks_a_copy() {
        let mut c: StackCoordinator<&str, u32> = StackCoordinator::new();
        let first = c.register("profile", 0).unwrap();
        let mut ctl = c.controller("profile");
        let _ = ctl.open(Some(1));
        let copy = ctl.open(Some(2)).unwrap();
        assert!(copy.is_copy());
        assert_ne!(copy.stack(), first);
        assert_eq!(ctl.state().map(|s| s.params), Some(1));
    }
}
