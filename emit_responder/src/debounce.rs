// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element debouncing of emissions.
//!
//! Time is explicit: entries carry a due time in milliseconds and the host
//! drains them with [`Debouncer::take_due`] (usually through
//! [`Emitter::poll`](crate::Emitter::poll)) from whatever timer it has.
//! Scheduling for an element that already has a pending entry replaces it,
//! so a burst of events produces a single emission after the last one.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::event::EmitEvent;

/// A delayed emission.
#[derive(Clone, Debug, PartialEq)]
pub struct Pending<N> {
    /// Element that scheduled the emission.
    pub element: N,
    /// Emission names to fire, in order.
    pub emissions: SmallVec<[String; 2]>,
    /// The event as seen by the element.
    pub event: EmitEvent<N>,
    /// When to fire, in milliseconds.
    pub due: u64,
}

/// Pending emissions, at most one per element.
#[derive(Clone, Debug)]
pub struct Debouncer<N> {
    pending: Vec<Pending<N>>,
}

impl<N> Default for Debouncer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Debouncer<N> {
    /// Create an empty debouncer.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Entries with `due <= now`, removed and returned in scheduling order.
    pub fn take_due(&mut self, now: u64) -> Vec<Pending<N>> {
        let (due, waiting) = core::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due <= now);
        self.pending = waiting;
        due
    }

    /// Earliest due time, if anything is pending.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending entry.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<N: PartialEq> Debouncer<N> {
    /// Schedule `emissions` for `element`, replacing its pending entry.
    ///
    /// Returns `true` if an earlier entry was replaced.
    pub fn schedule(&mut self, pending: Pending<N>) -> bool {
        let replaced = self.cancel(&pending.element);
        if replaced {
            tracing::debug!(due = pending.due, "debounced emission rescheduled");
        }
        self.pending.push(pending);
        replaced
    }

    /// Drop the pending entry for `element`. Returns `true` if there was one.
    pub fn cancel(&mut self, element: &N) -> bool {
        match self.pending.iter().position(|p| p.element == *element) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if `element` has a pending entry.
    pub fn is_pending(&self, element: &N) -> bool {
        self.pending.iter().any(|p| p.element == *element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use alloc::string::ToString;
    use smallvec::smallvec;

    fn entry(element: u32, name: &str, due: u64) -> Pending<u32> {
        Pending {
            element,
            emissions: smallvec![name.to_string()],
            event: EmitEvent::new(EventKind::Input, Some(element)),
            due,
        }
    }

    #[test]
    fn reschedule_replaces_pending_entry() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.schedule(entry(1, "search", 250)));
        assert!(debouncer.schedule(entry(1, "search", 400)));
        assert_eq!(debouncer.len(), 1);
        assert_eq!(debouncer.next_due(), Some(400));

        assert!(debouncer.take_due(399).is_empty());
        let fired = debouncer.take_due(400);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].due, 400);
        assert!(debouncer.is_empty());
    }

    #[test]
    fn elements_debounce_independently() {
        let mut debouncer = Debouncer::new();
        debouncer.schedule(entry(2, "b", 300));
        debouncer.schedule(entry(1, "a", 250));
        debouncer.schedule(entry(3, "c", 900));
        assert_eq!(debouncer.next_due(), Some(250));

        let fired: Vec<u32> = debouncer.take_due(500).into_iter().map(|p| p.element).collect();
        // Scheduling order, not due order.
        assert_eq!(fired, [2, 1]);
        assert!(debouncer.is_pending(&3));
        assert!(debouncer.cancel(&3));
        assert!(!debouncer.cancel(&3));
        assert_eq!(debouncer.next_due(), None);
    }
}
