// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: event name → ordered callbacks.
//!
//! Callbacks are compared by identity (`Rc` pointer), so keep the `Rc` you
//! registered if you want to remove it later. Adding the same callback twice
//! registers it twice.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use emit_responder::listeners::{Listener, Listeners};
//!
//! let hits = Rc::new(Cell::new(0));
//! let counter = hits.clone();
//! let listener: Listener<u32> = Rc::new(move |n: &u32| counter.set(counter.get() + n));
//!
//! let mut listeners = Listeners::new();
//! listeners.on("save", listener.clone()).on("save", listener.clone());
//! assert_eq!(listeners.emit("save", &2), 2);
//! assert_eq!(hits.get(), 4);
//!
//! assert!(listeners.off("save", &listener));
//! assert_eq!(listeners.emit("save", &1), 1);
//! assert_eq!(hits.get(), 5);
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

/// A registered callback.
pub type Listener<A> = Rc<dyn Fn(&A)>;

/// Returns true if `a` and `b` are the same allocation.
pub(crate) fn same_callback<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    core::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Named callback lists.
pub struct Listeners<A> {
    map: HashMap<String, Vec<Listener<A>>>,
}

impl<A> core::fmt::Debug for Listeners<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (name, list) in &self.map {
            map.entry(name, &list.len());
        }
        map.finish()
    }
}

impl<A> Default for Listeners<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Listeners<A> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Append `callback` to the list for `event`.
    pub fn on(&mut self, event: &str, callback: Listener<A>) -> &mut Self {
        self.map.entry_ref(event).or_default().push(callback);
        self
    }

    /// Remove the first registration of `callback` for `event`.
    ///
    /// Returns `true` if one was removed.
    pub fn off(&mut self, event: &str, callback: &Listener<A>) -> bool {
        let Some(list) = self.map.get_mut(event) else {
            return false;
        };
        let Some(index) = list.iter().position(|l| same_callback(l, callback)) else {
            return false;
        };
        list.remove(index);
        if list.is_empty() {
            self.map.remove(event);
        }
        true
    }

    /// Call every callback registered for `event`, in registration order.
    ///
    /// Returns the number of callbacks called. A panicking callback aborts
    /// the remaining calls.
    pub fn emit(&self, event: &str, payload: &A) -> usize {
        let Some(list) = self.map.get(event) else {
            return 0;
        };
        for listener in list {
            listener(payload);
        }
        list.len()
    }

    /// Alias for [`on`](Self::on).
    pub fn add_listener(&mut self, event: &str, callback: Listener<A>) -> &mut Self {
        self.on(event, callback)
    }

    /// Alias for [`off`](Self::off).
    pub fn remove_listener(&mut self, event: &str, callback: &Listener<A>) -> bool {
        self.off(event, callback)
    }

    /// Alias for [`emit`](Self::emit).
    pub fn trigger(&self, event: &str, payload: &A) -> usize {
        self.emit(event, payload)
    }

    /// Number of callbacks registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.map.get(event).map_or(0, Vec::len)
    }

    /// Remove every callback for `event`, or for all events if `None`.
    pub fn clear(&mut self, event: Option<&str>) {
        match event {
            Some(event) => {
                self.map.remove(event);
            }
            None => self.map.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<(&'static str, u32)>>>;

    fn recorder(log: &Log, tag: &'static str) -> Listener<u32> {
        let log = log.clone();
        Rc::new(move |n: &u32| log.borrow_mut().push((tag, *n)))
    }

    #[test]
    fn emits_in_registration_order_with_payload() {
        let log = Log::default();
        let mut listeners = Listeners::new();
        listeners
            .on("go", recorder(&log, "first"))
            .on("go", recorder(&log, "second"))
            .on("other", recorder(&log, "other"));
        assert_eq!(listeners.emit("go", &7), 2);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
        assert_eq!(listeners.emit("missing", &1), 0);
    }

    #[test]
    fn off_removes_first_identity_match_only() {
        let log = Log::default();
        let a = recorder(&log, "a");
        let look_alike = recorder(&log, "a");
        let mut listeners = Listeners::new();
        listeners.on("go", a.clone()).on("go", a.clone());

        assert!(!listeners.off("go", &look_alike));
        assert!(!listeners.off("elsewhere", &a));
        assert!(listeners.off("go", &a));
        assert_eq!(listeners.listener_count("go"), 1);
        assert!(listeners.off("go", &a));
        assert!(!listeners.off("go", &a));
        assert_eq!(listeners.listener_count("go"), 0);
    }

    #[test]
    fn aliases_and_clear() {
        let log = Log::default();
        let a = recorder(&log, "a");
        let mut listeners = Listeners::new();
        listeners.add_listener("x", a.clone()).add_listener("y", a.clone());
        assert_eq!(listeners.trigger("x", &1), 1);
        assert!(listeners.remove_listener("x", &a));
        listeners.clear(Some("y"));
        assert_eq!(listeners.listener_count("y"), 0);
        listeners.on("z", a);
        listeners.clear(None);
        assert_eq!(listeners.listener_count("z"), 0);
        assert_eq!(*log.borrow(), vec![("a", 1)]);
    }
}
