// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstack Panels: a deterministic, `no_std` coordinator for stacked overlay panels.
//!
//! ## Overview
//!
//! Side panels, drawers, and sheets are registered under a logical name.
//! Opening one pushes an instance onto an ordered history; every instance
//! derives a render position from that history:
//!
//! - the most recently opened instance is [`Front`](types::Position::Front),
//! - the one before it is [`Back`](types::Position::Back),
//! - everything else is [`Hidden`](types::Position::Hidden).
//!
//! Views observe state through [`Subscribable`](overstack_cell::Subscribable)
//! cells and re-render when notified. The crate does no rendering.
//!
//! ## Pieces
//!
//! - [`registry`]: name → entry holding one or more instance cells. Reopening
//!   an open panel stacks a copy rather than clobbering it.
//! - [`history`]: the name history (close discipline) and the stack history
//!   (positions).
//! - [`position`]: pure front/back/hidden resolution with change suppression.
//! - [`coordinator`]: the [`StackCoordinator`] facade wiring them together.
//! - [`controller`]: [`StackController`], open/close bound to one panel name.
//! - [`policy`]: [`StackPolicy`] flags that tune history and close rules.
//! - [`snapshot`]: plain-data dumps for debugging and assertions.
//!
//! ## Failure
//!
//! Operations on unknown names, stale ids, or out-of-order closes do nothing
//! and return an advisory [`StackError`]. Panels may try to close before they
//! mount, so ignoring those errors is fine.
//!
//! ## Example
//!
//! ```
//! use overstack_panels::{StackCoordinator, StackError};
//! use overstack_panels::types::Position;
//!
//! let mut stacks: StackCoordinator<&str, u64> = StackCoordinator::new();
//!
//! let profile = stacks.register("profile", 0)?;
//! stacks.open(&"profile", Some(43_467_246))?;
//!
//! let payout = stacks.register("payout", 0)?;
//! stacks.open(&"payout", None)?;
//! assert_eq!(stacks.state(&"payout", payout).unwrap().position, Position::Front);
//! assert_eq!(stacks.state(&"profile", profile).unwrap().position, Position::Back);
//!
//! // Closes are LIFO by name.
//! assert_eq!(stacks.close(&"profile"), Err(StackError::NotOnTop));
//! assert_eq!(stacks.close(&"payout"), Ok(payout));
//!
//! // A hard reset ignores the order.
//! stacks.close_all();
//! assert!(!stacks.state(&"profile", profile).unwrap().open);
//! # Ok::<(), StackError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` debug events for every operation.
//! - `serde`: serialize ids, positions, policy, and [`snapshot::StackSnapshot`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod controller;
pub mod coordinator;
pub mod error;
pub mod history;
pub mod policy;
pub mod position;
pub mod registry;
pub mod snapshot;
pub mod types;

pub use controller::StackController;
pub use coordinator::{Opened, StackCoordinator};
pub use error::StackError;
pub use policy::StackPolicy;
pub use types::{HistoryEntry, Position, StackEntry, StackId, StackState};
