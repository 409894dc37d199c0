// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Subscribable`] cell and its [`Subscription`] handle.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, Ref, RefCell};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Shared<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_listener: Cell<u64>,
}

/// Type-erased detach hook so [`Subscription`] does not carry the value type.
trait Detach {
    fn detach(&self, id: u64);
    fn is_attached(&self, id: u64) -> bool;
}

impl<T> Detach for Shared<T> {
    fn detach(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    fn is_attached(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(lid, _)| *lid == id)
    }
}

/// An observable value holder.
///
/// Cloning the handle is cheap and shares the underlying value and listener
/// list. See the [crate docs](crate) for the notification contract.
pub struct Subscribable<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for Subscribable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Subscribable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("Subscribable");
        match self.shared.value.try_borrow() {
            Ok(v) => s.field("value", &*v),
            Err(_) => s.field("value", &"<mutably borrowed>"),
        };
        s.field("listeners", &self.listener_count()).finish()
    }
}

impl<T: Default> Default for Subscribable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Subscribable<T> {
    /// Create a cell holding `value` with no listeners.
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Borrow the current value.
    ///
    /// Drop the returned guard before writing the same cell.
    pub fn read(&self) -> Ref<'_, T> {
        self.shared.value.borrow()
    }

    /// Run `f` against the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.borrow())
    }

    /// Compute the next value from the current one, store it, and notify.
    pub fn write(&self, updater: impl FnOnce(&T) -> T) {
        let next = updater(&self.shared.value.borrow());
        *self.shared.value.borrow_mut() = next;
        self.notify();
    }

    /// Mutate the value in place, then notify.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.shared.value.borrow_mut());
        self.notify();
    }

    /// Store `value` and notify.
    pub fn set(&self, value: T) {
        *self.shared.value.borrow_mut() = value;
        self.notify();
    }

    /// Store `value`, notify, and return the previous value.
    pub fn replace(&self, value: T) -> T {
        let prev = self.shared.value.replace(value);
        self.notify();
        prev
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }

    /// Returns true if both handles share the same underlying cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    fn notify(&self) {
        // Snapshot so listeners may subscribe or unsubscribe while we iterate.
        let listeners: Vec<Listener<T>> = self
            .shared
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        if listeners.is_empty() {
            return;
        }
        let value = self.shared.value.borrow();
        for listener in &listeners {
            listener(&*value);
        }
    }
}

impl<T: 'static> Subscribable<T> {
    /// Register `listener` to run after every write.
    ///
    /// Listeners run in subscription order. The listener stays attached while
    /// the returned [`Subscription`] is alive; dropping it (or calling
    /// [`Subscription::unsubscribe`]) detaches it.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.shared.next_listener.get();
        self.shared.next_listener.set(id + 1);
        self.shared
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        let shared: Rc<dyn Detach> = self.shared.clone();
        Subscription {
            id,
            source: Rc::downgrade(&shared),
        }
    }
}

impl<T: Clone> Subscribable<T> {
    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }
}

impl<T: PartialEq> Subscribable<T> {
    /// Store `value` only if it differs from the current one.
    ///
    /// Returns true if a write (and notification) happened.
    pub fn set_if_changed(&self, value: T) -> bool {
        if *self.shared.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }
}

/// Guard returned by [`Subscribable::subscribe`].
///
/// The listener is detached when the guard is dropped.
#[must_use = "dropping a Subscription detaches its listener"]
pub struct Subscription {
    id: u64,
    source: Weak<dyn Detach>,
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Detach the listener from its cell. Same as dropping the guard.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Returns true while the cell is alive and the listener attached.
    pub fn is_active(&self) -> bool {
        self.source
            .upgrade()
            .is_some_and(|source| source.is_attached(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(source) = self.source.upgrade() {
            source.detach(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn write_applies_updater_and_notifies() {
        let cell = Subscribable::new(3_i32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.write(|v| v * 2);
        cell.write(|v| v + 1);

        assert_eq!(*cell.read(), 7);
        assert_eq!(*seen.borrow(), vec![6, 7]);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let cell = Subscribable::new(0_u8);
        let order = Rc::new(RefCell::new(Vec::new()));
        let _subs: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|tag| {
                let sink = order.clone();
                cell.subscribe(move |_| sink.borrow_mut().push(tag))
            })
            .collect();

        cell.set(1);

        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn listener_sees_new_value_through_read() {
        let cell = Subscribable::new(1_u32);
        let observed = Rc::new(Cell::new(0_u32));
        let reader = cell.clone();
        let sink = observed.clone();
        let _sub = cell.subscribe(move |_| sink.set(*reader.read()));

        cell.set(42);

        assert_eq!(observed.get(), 42);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let cell = Subscribable::new(0_u32);
        let hits = Rc::new(Cell::new(0_u32));
        let sink = hits.clone();
        let sub = cell.subscribe(move |_| sink.set(sink.get() + 1));

        cell.set(1);
        assert!(sub.is_active());
        sub.unsubscribe();
        cell.set(2);

        assert_eq!(hits.get(), 1);
        assert_eq!(cell.listener_count(), 0);
    }

    #[test]
    fn unsubscribe_after_cell_dropped_is_noop() {
        let cell = Subscribable::new(0_u32);
        let sub = cell.subscribe(|_| {});
        drop(cell);
        assert!(!sub.is_active());
        sub.unsubscribe();
    }

    #[test]
    fn clones_share_value_and_listeners() {
        let a = Subscribable::new(String::from("x"));
        let b = a.clone();
        let hits = Rc::new(Cell::new(0_u32));
        let sink = hits.clone();
        let _sub = a.subscribe(move |_| sink.set(sink.get() + 1));

        b.update(|s| s.push('y'));

        assert!(a.ptr_eq(&b));
        assert_eq!(a.get(), "xy");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn set_if_changed_suppresses_equal_writes() {
        let cell = Subscribable::new(5_u32);
        let hits = Rc::new(Cell::new(0_u32));
        let sink = hits.clone();
        let _sub = cell.subscribe(move |_| sink.set(sink.get() + 1));

        assert!(!cell.set_if_changed(5));
        assert!(cell.set_if_changed(6));

        assert_eq!(hits.get(), 1);
        assert_eq!(cell.replace(9), 6);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn subscribing_during_notify_applies_to_next_write() {
        let cell = Subscribable::new(0_u32);
        let late_hits = Rc::new(Cell::new(0_u32));
        let late_sub: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let handle = cell.clone();
        let sink = late_hits.clone();
        let slot = late_sub.clone();
        let _sub = cell.subscribe(move |_| {
            if slot.borrow().is_none() {
                let sink = sink.clone();
                let sub = handle.subscribe(move |_| sink.set(sink.get() + 1));
                *slot.borrow_mut() = Some(sub);
            }
        });

        cell.set(1);
        assert_eq!(late_hits.get(), 0);
        cell.set(2);
        assert_eq!(late_hits.get(), 1);
        late_sub.borrow_mut().take();
        assert_eq!(cell.listener_count(), 1);
    }

    #[test]
    fn dropping_the_guard_detaches_the_listener() {
        let cell = Subscribable::new(0_u32);
        let hits = Rc::new(Cell::new(0_u32));
        let sink = hits.clone();
        let kept = cell.subscribe(|_| {});
        let sub = cell.subscribe(move |_| sink.set(sink.get() + 1));
        assert_eq!(cell.listener_count(), 2);

        cell.set(1);
        drop(sub);
        cell.set(2);

        assert_eq!(hits.get(), 1);
        assert_eq!(cell.listener_count(), 1);
        assert!(kept.is_active());
    }

    #[test]
    fn remounting_views_do_not_accumulate_listeners() {
        let cell = Subscribable::new(0_u32);
        for _ in 0..100 {
            let _view = cell.subscribe(|_| {});
            cell.set(1);
        }
        assert_eq!(cell.listener_count(), 0);
    }
}
