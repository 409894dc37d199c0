// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-data dumps of a coordinator, for debugging and test assertions.
//!
//! With the `serde` feature, [`StackSnapshot`] serializes to any serde format.

use alloc::vec::Vec;

use crate::policy::StackPolicy;
use crate::types::{HistoryEntry, Position, StackId};

/// Everything a coordinator knows, copied out of its cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StackSnapshot<K, P> {
    /// Active policy.
    pub policy: StackPolicy,
    /// Registered panels in key order.
    pub panels: Vec<PanelSnapshot<K, P>>,
    /// Name history, most recent last.
    pub name_history: Vec<K>,
    /// Stack history, most recent last.
    pub stack_history: Vec<HistoryEntry<K>>,
}

/// One registered panel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PanelSnapshot<K, P> {
    /// Panel name.
    pub name: K,
    /// Default instance id.
    pub default_stack: StackId,
    /// Instances in registration order.
    pub stacks: Vec<InstanceSnapshot<P>>,
}

/// One panel instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstanceSnapshot<P> {
    /// Instance id.
    pub stack: StackId,
    /// Open flag.
    pub open: bool,
    /// Stored position.
    pub position: Position,
    /// Panel payload.
    pub params: P,
}

impl<K, P> StackSnapshot<K, P> {
    /// Instances that are currently open, as `(name, snapshot)`.
    pub fn open_instances(&self) -> impl Iterator<Item = (&K, &InstanceSnapshot<P>)> {
        self.panels
            .iter()
            .flat_map(|p| p.stacks.iter().map(move |s| (&p.name, s)))
            .filter(|(_, s)| s.open)
    }
}
