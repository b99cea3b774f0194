// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events: the platform-neutral record a host feeds to the emitter.

use kurbo::Point;

/// The DOM event types the emitter understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `click`
    Click,
    /// `input`
    Input,
    /// `submit`
    Submit,
    /// `touchstart`
    TouchStart,
    /// `touchmove`
    TouchMove,
    /// `touchend`
    TouchEnd,
}

impl EventKind {
    /// Every kind, in binding order.
    pub const ALL: [Self; 6] = [
        Self::Click,
        Self::Input,
        Self::Submit,
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
    ];

    /// DOM event type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Submit => "submit",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
        }
    }

    /// Look up a kind by DOM event type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// The single-bit set for this kind.
    pub const fn flag(self) -> EventKinds {
        match self {
            Self::Click => EventKinds::CLICK,
            Self::Input => EventKinds::INPUT,
            Self::Submit => EventKinds::SUBMIT,
            Self::TouchStart => EventKinds::TOUCH_START,
            Self::TouchMove => EventKinds::TOUCH_MOVE,
            Self::TouchEnd => EventKinds::TOUCH_END,
        }
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// A set of event kinds, e.g. the contents of `data-emit-ignore`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        /// `click`
        const CLICK       = 0b0000_0001;
        /// `input`
        const INPUT       = 0b0000_0010;
        /// `submit`
        const SUBMIT      = 0b0000_0100;
        /// `touchstart`
        const TOUCH_START = 0b0000_1000;
        /// `touchmove`
        const TOUCH_MOVE  = 0b0001_0000;
        /// `touchend`
        const TOUCH_END   = 0b0010_0000;
    }
}

impl EventKinds {
    /// Returns true if `kind` is in the set.
    pub fn has(self, kind: EventKind) -> bool {
        self.contains(kind.flag())
    }
}

impl FromIterator<EventKind> for EventKinds {
    fn from_iter<I: IntoIterator<Item = EventKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | kind.flag())
    }
}

/// An event on its way through the emitter.
///
/// Hosts build one per DOM event with [`EmitEvent::new`] and hand it to
/// [`Emitter::handle_event`](crate::Emitter::handle_event). The walk records
/// its decisions on the event; afterwards the host applies
/// [`default_prevented`](Self::default_prevented) and
/// [`propagation_stopped`](Self::propagation_stopped) to the real event.
/// Listeners receive the event as it was when their element was visited.
#[derive(Clone, Debug, PartialEq)]
pub struct EmitEvent<N> {
    /// What happened.
    pub kind: EventKind,
    /// Element the event was fired at.
    pub target: Option<N>,
    /// Page position: first touch for touch events, pointer for mouse events.
    pub position: Option<Point>,
    /// Milliseconds, on the same clock the host passes to [`Emitter::poll`](crate::Emitter::poll).
    pub timestamp: u64,
    default_prevented: bool,
    propagation_stopped: bool,
    propagation_stopped_at: Option<usize>,
    vetoed_at: Option<usize>,
    current: Option<N>,
    depth: usize,
}

impl<N> EmitEvent<N> {
    /// Create an event of `kind` fired at `target`.
    pub fn new(kind: EventKind, target: Option<N>) -> Self {
        Self {
            kind,
            target,
            position: None,
            timestamp: 0,
            default_prevented: false,
            propagation_stopped: false,
            propagation_stopped_at: None,
            vetoed_at: None,
            current: None,
            depth: 0,
        }
    }

    /// Set the page position.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the timestamp in milliseconds.
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Ask the host to skip the platform's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns true if the default action should be skipped.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Ask the host to stop the platform event from propagating.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Returns true if the platform event should stop propagating.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Stop propagation and end the walk after depth `depth`.
    pub fn stop_propagation_at(&mut self, depth: usize) {
        self.propagation_stopped = true;
        self.propagation_stopped_at = Some(depth);
    }

    /// Walk depth at which propagation was stopped.
    pub fn propagation_stopped_at(&self) -> Option<usize> {
        self.propagation_stopped_at
    }

    /// Walk depth at which a validator vetoed the event.
    pub fn vetoed_at(&self) -> Option<usize> {
        self.vetoed_at
    }

    /// Element currently (or last) visited by the walk.
    pub fn current(&self) -> Option<&N> {
        self.current.as_ref()
    }

    /// Walk depth of [`current`](Self::current); the target is depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn veto_at(&mut self, depth: usize) {
        self.prevent_default();
        self.stop_propagation_at(depth);
        self.vetoed_at = Some(depth);
    }

    pub(crate) fn visit(&mut self, element: N, depth: usize) {
        self.current = Some(element);
        self.depth = depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::from_name("keydown"), None);
        assert_eq!(EventKind::from_name("Click"), None);
    }

    #[test]
    fn kinds_collect_into_set() {
        let set: EventKinds = [EventKind::Click, EventKind::TouchEnd].into_iter().collect();
        assert!(set.has(EventKind::Click));
        assert!(set.has(EventKind::TouchEnd));
        assert!(!set.has(EventKind::Input));
    }

    #[test]
    fn veto_prevents_and_stops() {
        let mut event = EmitEvent::new(EventKind::Click, Some(1_u32));
        event.veto_at(2);
        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
        assert_eq!(event.propagation_stopped_at(), Some(2));
        assert_eq!(event.vetoed_at(), Some(2));
    }
}
