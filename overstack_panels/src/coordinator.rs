// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator facade: register, open, close, reset, and look up panels.
//!
//! ## Lifecycle of an instance
//!
//! - Hidden → Front when opened.
//! - Front → Back when a newer instance opens, Back → Hidden when yet another opens.
//! - Front/Back → Hidden when closed.
//!
//! Opening an instance that is already open never mutates it. A copy of the
//! first registered instance is stacked on top instead, under a fresh
//! [`StackId`]. A closed instance is reopened in place.
//!
//! ## Close discipline
//!
//! A close is accepted only when the instance is open and its name is the
//! last element of the name history. Set [`StackPolicy::CLOSE_ANY`] to drop the
//! second condition. [`StackCoordinator::close_all`] ignores both and resets
//! everything.
//!
//! ## Position refresh
//!
//! Positions are re-resolved after every successful open. After a close the
//! closed instance goes to Hidden, and the others keep their stored positions
//! until the next open, unless [`StackPolicy::REFLOW_ON_CLOSE`] is set.
//! [`StackCoordinator::refresh_positions`] resolves on demand.
//!
//! ## Failure
//!
//! Every rejected operation leaves state and listeners untouched and returns
//! a [`StackError`] describing why. Ignoring the error is always safe.

use alloc::vec::Vec;
use core::fmt::Debug;

use overstack_cell::Subscribable;

use crate::controller::StackController;
use crate::error::StackError;
use crate::history::HistoryTracker;
use crate::policy::StackPolicy;
use crate::position::{Layers, PositionChange};
use crate::registry::StackRegistry;
use crate::snapshot::{InstanceSnapshot, PanelSnapshot, StackSnapshot};
use crate::types::{HistoryEntry, Position, StackEntry, StackId, StackState};

/// Result of a successful [`StackCoordinator::open`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opened {
    /// The targeted instance was closed and is now open.
    Activated(StackId),
    /// The targeted instance was already open; a new copy was stacked.
    Copied(StackId),
}

impl Opened {
    /// Instance that ended up open.
    #[inline]
    pub const fn stack(self) -> StackId {
        match self {
            Self::Activated(id) | Self::Copied(id) => id,
        }
    }

    /// Returns true if a copy was created.
    #[inline]
    pub const fn is_copy(self) -> bool {
        matches!(self, Self::Copied(_))
    }
}

/// Overlay panel coordinator.
///
/// One coordinator is created per application (or per test) and handed to the
/// views that need it; there is no global instance.
///
/// ## Usage
///
/// - [`register`](Self::register) each panel type when its view mounts.
/// - [`open`](Self::open) / [`close`](Self::close) from triggers (buttons,
///   route changes), or [`open_stack`](Self::open_stack) /
///   [`close_stack`](Self::close_stack) to address a specific instance.
/// - Subscribe to [`get`](Self::get) entries, instance cells, or the histories
///   to re-render.
///
/// `K` is the panel name type and `P` the panel payload.
#[derive(Debug)]
pub struct StackCoordinator<K, P> {
    registry: StackRegistry<K, P>,
    history: HistoryTracker<K>,
    policy: StackPolicy,
}

impl<K, P> Default for StackCoordinator<K, P> {
    fn default() -> Self {
        Self {
            registry: StackRegistry::default(),
            history: HistoryTracker::default(),
            policy: StackPolicy::empty(),
        }
    }
}

impl<K: Clone + Ord + Debug, P: Clone> StackCoordinator<K, P> {
    /// Create a coordinator with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a coordinator with an explicit policy.
    pub fn with_policy(policy: StackPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Active policy.
    pub fn policy(&self) -> StackPolicy {
        self.policy
    }

    /// Replace the policy. Takes effect from the next operation.
    pub fn set_policy(&mut self, policy: StackPolicy) {
        self.policy = policy;
    }

    /// Register a panel type with the payload of its default instance.
    ///
    /// Idempotent: the first registration wins and later calls return the
    /// existing default id. Does not touch the histories. Fails only with
    /// [`StackError::IdsExhausted`], for a new name.
    pub fn register(&mut self, name: K, params: P) -> Result<StackId, StackError> {
        #[cfg(feature = "tracing")]
        let fresh = !self.registry.contains(&name);
        let Some(id) = self.registry.register(name.clone(), params) else {
            return Err(ignored("register", &name, StackError::IdsExhausted));
        };
        #[cfg(feature = "tracing")]
        if fresh {
            tracing::debug!(panel = ?name, stack = %id, "panel registered");
        }
        Ok(id)
    }

    /// Open the default instance of `name`, or stack a copy if it is already open.
    ///
    /// `params`, when present, replaces the payload of the instance that ends
    /// up open.
    pub fn open(&mut self, name: &K, params: Option<P>) -> Result<Opened, StackError> {
        self.open_target(name, None, params)
    }

    /// Open instance `stack` of `name`, or stack a copy if it is already open.
    pub fn open_stack(
        &mut self,
        name: &K,
        stack: StackId,
        params: Option<P>,
    ) -> Result<Opened, StackError> {
        self.open_target(name, Some(stack), params)
    }

    /// Close the default instance of `name`.
    pub fn close(&mut self, name: &K) -> Result<StackId, StackError> {
        self.close_target(name, None)
    }

    /// Close instance `stack` of `name`.
    pub fn close_stack(&mut self, name: &K, stack: StackId) -> Result<StackId, StackError> {
        self.close_target(name, Some(stack))
    }

    /// Open/close handle bound to `name`.
    ///
    /// The name need not be registered yet; operations on it fail with
    /// [`StackError::Unregistered`] until it is.
    pub fn controller(&mut self, name: K) -> StackController<'_, K, P> {
        StackController::new(self, name)
    }

    /// Force every instance closed and hidden and clear both histories.
    ///
    /// Ignores close discipline. Returns the number of instances whose state
    /// changed; untouched instances are not notified.
    pub fn close_all(&mut self) -> usize {
        let mut reset = 0;
        for (_, _, cell) in self.registry.instances() {
            let dirty = cell.with(|s| s.open || s.position != Position::Hidden);
            if dirty {
                cell.update(|s| {
                    s.open = false;
                    s.position = Position::Hidden;
                });
                reset += 1;
            }
        }
        self.history.clear();
        #[cfg(feature = "tracing")]
        tracing::debug!(reset, "closed all panels");
        reset
    }

    /// Registry entry for `name`.
    pub fn get(&self, name: &K) -> Option<&Subscribable<StackEntry<K, P>>> {
        self.registry.get(name)
    }

    /// Cell of instance `stack` under `name`.
    pub fn stack(&self, name: &K, stack: StackId) -> Option<Subscribable<StackState<K, P>>> {
        self.registry.instance(name, stack)
    }

    /// Copy of the state of instance `stack` under `name`.
    pub fn state(&self, name: &K, stack: StackId) -> Option<StackState<K, P>> {
        self.registry.instance(name, stack).map(|cell| cell.get())
    }

    /// Default instance id of `name`.
    pub fn default_stack(&self, name: &K) -> Option<StackId> {
        self.registry.default_stack(name)
    }

    /// Most recently opened instance still in the stack history.
    pub fn front(&self) -> Option<HistoryEntry<K>> {
        self.history.front()
    }

    /// Cell holding the name history.
    pub fn name_history(&self) -> &Subscribable<Vec<K>> {
        self.history.names()
    }

    /// Cell holding the stack history.
    pub fn stack_history(&self) -> &Subscribable<Vec<HistoryEntry<K>>> {
        self.history.stacks()
    }

    /// Both histories.
    pub fn history(&self) -> &HistoryTracker<K> {
        &self.history
    }

    /// The stack registry.
    pub fn registry(&self) -> &StackRegistry<K, P> {
        &self.registry
    }

    /// Re-resolve positions from the current stack history.
    ///
    /// Every registered instance is placed, so one that fell out of the
    /// history is hidden. Only instances whose stored position differs are
    /// written and notified.
    pub fn refresh_positions(&mut self) -> Vec<PositionChange<K>> {
        self.reflow()
    }

    /// Copy the whole coordinator state out of its cells.
    pub fn snapshot(&self) -> StackSnapshot<K, P> {
        let panels = self
            .registry
            .names()
            .filter_map(|name| {
                let entry = self.registry.get(name)?.read();
                let stacks = entry
                    .stacks()
                    .map(|(stack, cell)| {
                        let s = cell.read();
                        InstanceSnapshot {
                            stack,
                            open: s.open,
                            position: s.position,
                            params: s.params.clone(),
                        }
                    })
                    .collect();
                Some(PanelSnapshot {
                    name: name.clone(),
                    default_stack: entry.default_stack(),
                    stacks,
                })
            })
            .collect();
        StackSnapshot {
            policy: self.policy,
            panels,
            name_history: self.history.names().get(),
            stack_history: self.history.stacks().get(),
        }
    }

    fn target(
        &self,
        name: &K,
        explicit: Option<StackId>,
    ) -> Result<(StackId, Subscribable<StackState<K, P>>), StackError> {
        let entry = self.registry.get(name).ok_or(StackError::Unregistered)?;
        let entry = entry.read();
        let id = explicit.unwrap_or(entry.default_stack());
        let cell = entry.get(id).cloned().ok_or(StackError::UnknownStack(id))?;
        Ok((id, cell))
    }

    fn open_target(
        &mut self,
        name: &K,
        explicit: Option<StackId>,
        params: Option<P>,
    ) -> Result<Opened, StackError> {
        let (id, cell) = match self.target(name, explicit) {
            Ok(t) => t,
            Err(err) => return Err(ignored("open", name, err)),
        };

        let opened = if cell.with(|s| s.open) {
            let Some(copy_id) = self.registry.allocate_id() else {
                return Err(ignored("open", name, StackError::IdsExhausted));
            };
            let Some(copy) = self.registry.register_copy(name, copy_id) else {
                return Err(ignored("open", name, StackError::Unregistered));
            };
            copy.update(|s| activate(s, params));
            Opened::Copied(copy_id)
        } else {
            cell.update(|s| activate(s, params));
            Opened::Activated(id)
        };

        let stack = opened.stack();
        self.history.record_open(name.clone(), self.policy);
        self.history.record_stack_open(name.clone(), stack);
        #[cfg(feature = "tracing")]
        tracing::debug!(panel = ?name, %stack, copy = opened.is_copy(), "panel opened");
        self.reflow();
        Ok(opened)
    }

    fn close_target(&mut self, name: &K, explicit: Option<StackId>) -> Result<StackId, StackError> {
        let (id, cell) = match self.target(name, explicit) {
            Ok(t) => t,
            Err(err) => return Err(ignored("close", name, err)),
        };
        if !cell.with(|s| s.open) {
            return Err(ignored("close", name, StackError::NotOpen(id)));
        }
        if !self.policy.contains(StackPolicy::CLOSE_ANY)
            && self.history.last_name().as_ref() != Some(name)
        {
            return Err(ignored("close", name, StackError::NotOnTop));
        }

        cell.update(|s| {
            s.open = false;
            s.position = Position::Hidden;
        });
        self.history.record_stack_close(name, id, self.policy);
        self.history.record_close(name, self.policy);
        #[cfg(feature = "tracing")]
        tracing::debug!(panel = ?name, stack = %id, "panel closed");
        if self.policy.contains(StackPolicy::REFLOW_ON_CLOSE) {
            self.reflow();
        }
        Ok(id)
    }

    fn reflow(&self) -> Vec<PositionChange<K>> {
        let layers = Layers::of(&self.history.stacks().read());
        let mut changes = Vec::new();
        for (name, stack, cell) in self.registry.instances() {
            let to = layers.position(stack);
            let from = cell.with(|s| s.position);
            if from == to {
                continue;
            }
            cell.update(|s| s.position = to);
            #[cfg(feature = "tracing")]
            tracing::debug!(panel = ?name, %stack, ?from, ?to, "position changed");
            changes.push(PositionChange {
                name,
                stack,
                from,
                to,
            });
        }
        changes
    }
}

#[cfg_attr(
    not(feature = "tracing"),
    expect(unused_variables, reason = "only read by trace events")
)]
fn ignored<K: Debug>(op: &'static str, name: &K, err: StackError) -> StackError {
    #[cfg(feature = "tracing")]
    tracing::debug!(op, panel = ?name, reason = %err, "panel operation ignored");
    err
}

fn activate<K, P>(state: &mut StackState<K, P>, params: Option<P>) {
    state.open = true;
    state.position = Position::Front;
    if let Some(params) = params {
        state.params = params;
    }
}
