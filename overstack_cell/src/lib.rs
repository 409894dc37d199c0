// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstack Cell: a minimal, `no_std` observable value holder.
//!
//! ## Overview
//!
//! [`Subscribable`] holds one value behind a cheaply cloneable handle.
//! Every clone observes the same value. Writes store the new value and then
//! notify registered listeners synchronously, in subscription order, before
//! the write call returns.
//!
//! It is the reactive primitive underneath the Overstack panel coordinator, but
//! it has no knowledge of panels and can back any piece of UI state that views
//! need to re-render from.
//!
//! ## Semantics
//!
//! - Read-after-write is immediate: a [`Subscribable::read`] issued right after a
//!   write (or from inside a listener) sees the new value.
//! - Listeners are invoked with a shared borrow of the new value. The set of
//!   listeners is snapshotted when notification starts; a listener added or
//!   removed during notification takes effect from the next write.
//! - A listener stays attached while its [`Subscription`] guard is alive.
//!   Dropping the guard or calling [`Subscription::unsubscribe`] detaches it.
//!   Dropping a guard after the cell is gone is a no-op.
//! - Single-threaded only. A listener must not write the cell it observes; that
//!   re-enters the inner `RefCell` and panics.
//!
//! ## Example
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use overstack_cell::Subscribable;
//!
//! let count = Subscribable::new(1_u32);
//! let seen = Rc::new(Cell::new(0_u32));
//!
//! let sink = seen.clone();
//! let sub = count.subscribe(move |v| sink.set(*v));
//!
//! count.write(|v| v + 1);
//! assert_eq!(*count.read(), 2);
//! assert_eq!(seen.get(), 2);
//!
//! sub.unsubscribe();
//! count.set(10);
//! assert_eq!(seen.get(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cell;

pub use cell::{Subscribable, Subscription};
