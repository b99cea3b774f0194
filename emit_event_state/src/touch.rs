// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch gesture tracking: tell taps from drags and swallow the synthetic click.
//!
//! Touch browsers fire `touchstart → touchend → click` for a single tap. When
//! both `touchend` and `click` are delegated, the same tap would be handled
//! twice. [`TouchState`] follows one gesture at a time and answers two
//! questions:
//!
//! - On `touchend`: was this a tap, or did the finger drag away?
//! - On `click`: is this the compatibility click the platform synthesizes
//!   right after a tap we already handled?
//!
//! ## Usage
//!
//! ```
//! use emit_event_state::touch::{ClickResult, TouchEnd, TouchState};
//! use kurbo::Point;
//!
//! let mut state = TouchState::new();
//!
//! state.on_start(Some(Point::new(10.0, 10.0)));
//! state.on_move(Some(Point::new(12.0, 11.0)));
//! assert_eq!(state.on_end(None, 1000), TouchEnd::Tap);
//!
//! // The synthetic click lands on the tap point and is eaten once.
//! assert_eq!(state.on_click(Some(Point::new(12.0, 11.0)), 1010), ClickResult::Suppressed);
//! // A later click goes through.
//! assert_eq!(state.on_click(Some(Point::new(12.0, 11.0)), 1500), ClickResult::Click);
//! ```
//!
//! Dragging past the threshold turns the release into a drag:
//!
//! ```
//! # use emit_event_state::touch::{ClickResult, TouchEnd, TouchState};
//! # use kurbo::Point;
//! let mut state = TouchState::new();
//!
//! state.on_start(Some(Point::new(0.0, 0.0)));
//! assert!(state.on_move(Some(Point::new(0.0, 40.0))));
//! assert_eq!(state.on_end(None, 1000), TouchEnd::Drag);
//! assert_eq!(state.on_click(Some(Point::new(0.0, 40.0)), 1010), ClickResult::Click);
//! ```
//!
//! ## Rules
//!
//! 1. `touchstart` opens a gesture and forgets any armed tap. Without a touch
//!    position no gesture is opened and the sequence is treated as non-touch.
//! 2. `touchmove` marks the gesture as dragged once the finger is at least
//!    [`TouchState::move_threshold`] away from the start point. Dragged is sticky.
//! 3. `touchend` closes the gesture. Untracked and dragged gestures report
//!    [`TouchEnd::Untracked`] / [`TouchEnd::Drag`]; everything else is a
//!    [`TouchEnd::Tap`] and arms click suppression at the last touch point.
//! 4. `click` consumes the armed tap. It is suppressed only if it carries a
//!    position closer than the threshold to the tap point and, when
//!    [`TouchState::tap_timeout`] is set, arrives within that many milliseconds.

use kurbo::Point;

/// Distance in pixels a touch may travel and still count as a tap.
pub const DEFAULT_MOVE_THRESHOLD: f64 = 10.0;

/// An open touch gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    /// Where the finger went down.
    pub start: Point,
    /// Most recent touch position.
    pub last: Point,
    /// True once the finger moved at least the threshold away from `start`.
    pub dragged: bool,
}

/// A completed tap waiting for its synthetic click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmedTap {
    /// Position the tap resolved at.
    pub position: Point,
    /// Timestamp of the `touchend` in milliseconds.
    pub timestamp: u64,
}

/// Classification of a `touchend`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEnd {
    /// No gesture was open; handle the event like any other.
    Untracked,
    /// The gesture stayed within the threshold.
    Tap,
    /// The gesture travelled too far to be a tap.
    Drag,
}

/// Classification of a `click`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickResult {
    /// A genuine click.
    Click,
    /// The compatibility click following a tap that was already handled.
    Suppressed,
}

/// Single-pointer tap/drag state machine.
#[derive(Clone, Debug)]
pub struct TouchState {
    /// Distance at which a touch turns into a drag.
    pub move_threshold: f64,
    /// Maximum delay in milliseconds between a tap and the click it suppresses, or `None` for no limit.
    pub tap_timeout: Option<u64>,
    gesture: Option<Gesture>,
    tap: Option<ArmedTap>,
}

impl Default for TouchState {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchState {
    /// Create a touch state with the default 10 pixel threshold and no tap timeout.
    pub fn new() -> Self {
        Self::with_thresholds(DEFAULT_MOVE_THRESHOLD, None)
    }

    /// Create a touch state with custom thresholds.
    ///
    /// # Arguments
    /// * `move_threshold` - Distance at which a touch stops being a tap
    /// * `tap_timeout` - Milliseconds after a tap during which a click is still considered synthetic
    pub fn with_thresholds(move_threshold: f64, tap_timeout: Option<u64>) -> Self {
        Self {
            move_threshold,
            tap_timeout,
            gesture: None,
            tap: None,
        }
    }

    /// Record a `touchstart` at the first touch position.
    pub fn on_start(&mut self, position: Option<Point>) {
        self.tap = None;
        self.gesture = position.map(|p| Gesture {
            start: p,
            last: p,
            dragged: false,
        });
    }

    /// Record a `touchmove`.
    ///
    /// Returns `true` if this move newly turned the gesture into a drag.
    pub fn on_move(&mut self, position: Option<Point>) -> bool {
        let (Some(gesture), Some(position)) = (self.gesture.as_mut(), position) else {
            return false;
        };
        gesture.last = position;
        if !gesture.dragged && gesture.start.distance(position) >= self.move_threshold {
            gesture.dragged = true;
            tracing::debug!(distance = gesture.start.distance(position), "touch became a drag");
            return true;
        }
        false
    }

    /// Close the gesture on `touchend`.
    ///
    /// `position` is the released touch, if the platform reports one; a
    /// release far from the start counts as a drag even without moves.
    pub fn on_end(&mut self, position: Option<Point>, timestamp: u64) -> TouchEnd {
        let Some(mut gesture) = self.gesture.take() else {
            return TouchEnd::Untracked;
        };
        if let Some(position) = position {
            gesture.last = position;
            if gesture.start.distance(position) >= self.move_threshold {
                gesture.dragged = true;
            }
        }
        if gesture.dragged {
            return TouchEnd::Drag;
        }
        self.tap = Some(ArmedTap {
            position: gesture.last,
            timestamp,
        });
        TouchEnd::Tap
    }

    /// Decide whether a `click` is the synthetic follow-up of the armed tap.
    ///
    /// Any click disarms the tap, so at most one click is suppressed per tap.
    pub fn on_click(&mut self, position: Option<Point>, timestamp: u64) -> ClickResult {
        let Some(tap) = self.tap.take() else {
            return ClickResult::Click;
        };
        let Some(position) = position else {
            return ClickResult::Click;
        };
        let near = tap.position.distance(position) < self.move_threshold;
        let in_time = self
            .tap_timeout
            .is_none_or(|timeout| timestamp.saturating_sub(tap.timestamp) <= timeout);
        if near && in_time {
            ClickResult::Suppressed
        } else {
            ClickResult::Click
        }
    }

    /// Drop the open gesture and any armed tap, e.g. on `touchcancel`.
    ///
    /// Returns `true` if anything was being tracked.
    pub fn cancel(&mut self) -> bool {
        let had_state = self.gesture.is_some() || self.tap.is_some();
        self.gesture = None;
        self.tap = None;
        had_state
    }

    /// Drop the armed tap without touching an open gesture.
    ///
    /// Hosts call this when no synthetic click will follow the tap, or when
    /// that click has to reach the document unfiltered.
    /// Returns `true` if a tap was armed.
    pub fn disarm(&mut self) -> bool {
        self.tap.take().is_some()
    }

    /// Check if a gesture is open.
    pub fn is_tracking(&self) -> bool {
        self.gesture.is_some()
    }

    /// The open gesture, if any.
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// The tap waiting for its synthetic click, if any.
    pub fn armed_tap(&self) -> Option<&ArmedTap> {
        self.tap.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap_at(state: &mut TouchState, p: Point, timestamp: u64) -> TouchEnd {
        state.on_start(Some(p));
        state.on_end(None, timestamp)
    }

    #[test]
    fn tap_suppresses_following_click_exactly_once() {
        let mut state = TouchState::new();
        assert_eq!(tap_at(&mut state, Point::new(5.0, 5.0), 100), TouchEnd::Tap);

        let click = Point::new(6.0, 7.0);
        assert_eq!(state.on_click(Some(click), 120), ClickResult::Suppressed);
        assert_eq!(state.on_click(Some(click), 140), ClickResult::Click);
        assert!(state.armed_tap().is_none());
    }

    #[test]
    fn disarmed_tap_lets_click_through() {
        let mut state = TouchState::new();
        tap_at(&mut state, Point::new(5.0, 5.0), 100);
        assert!(state.disarm());
        assert!(!state.disarm());
        assert_eq!(
            state.on_click(Some(Point::new(5.0, 5.0)), 110),
            ClickResult::Click
        );
    }

    #[test]
    fn small_moves_stay_a_tap() {
        let mut state = TouchState::new();
        state.on_start(Some(Point::new(0.0, 0.0)));
        assert!(!state.on_move(Some(Point::new(3.0, 4.0))));
        assert!(!state.on_move(Some(Point::new(6.0, 0.0))));
        assert_eq!(state.on_end(None, 10), TouchEnd::Tap);
        // Tap point is the last touch position.
        assert_eq!(state.armed_tap().map(|t| t.position), Some(Point::new(6.0, 0.0)));
    }

    #[test]
    fn threshold_distance_is_a_drag() {
        let mut state = TouchState::new();
        state.on_start(Some(Point::new(0.0, 0.0)));
        // 6-8-10 triangle: exactly at the threshold.
        assert!(state.on_move(Some(Point::new(6.0, 8.0))));
        // Newly exceeded is reported once.
        assert!(!state.on_move(Some(Point::new(7.0, 8.0))));
        assert_eq!(state.on_end(None, 10), TouchEnd::Drag);
    }

    #[test]
    fn drag_is_sticky_when_finger_returns() {
        let mut state = TouchState::new();
        state.on_start(Some(Point::new(0.0, 0.0)));
        state.on_move(Some(Point::new(50.0, 0.0)));
        state.on_move(Some(Point::new(1.0, 0.0)));
        assert_eq!(state.on_end(Some(Point::new(1.0, 0.0)), 10), TouchEnd::Drag);
    }

    #[test]
    fn drag_leaves_click_alone() {
        let mut state = TouchState::new();
        state.on_start(Some(Point::new(0.0, 0.0)));
        state.on_move(Some(Point::new(0.0, 30.0)));
        assert_eq!(state.on_end(None, 10), TouchEnd::Drag);
        assert_eq!(
            state.on_click(Some(Point::new(0.0, 30.0)), 20),
            ClickResult::Click
        );
    }

    #[test]
    fn release_far_from_start_without_moves_is_a_drag() {
        let mut state = TouchState::new();
        state.on_start(Some(Point::new(0.0, 0.0)));
        assert_eq!(state.on_end(Some(Point::new(20.0, 0.0)), 10), TouchEnd::Drag);
    }

    #[test]
    fn missing_touch_data_is_untracked() {
        let mut state = TouchState::new();
        state.on_start(None);
        assert!(!state.is_tracking());
        assert!(!state.on_move(Some(Point::new(100.0, 0.0))));
        assert_eq!(state.on_end(None, 10), TouchEnd::Untracked);
        assert_eq!(state.on_click(Some(Point::ZERO), 20), ClickResult::Click);
    }

    #[test]
    fn click_far_from_tap_goes_through() {
        let mut state = TouchState::new();
        tap_at(&mut state, Point::new(0.0, 0.0), 10);
        assert_eq!(
            state.on_click(Some(Point::new(0.0, 10.0)), 20),
            ClickResult::Click
        );
        // The tap is consumed even though the click went through.
        assert!(state.armed_tap().is_none());
    }

    #[test]
    fn click_without_position_is_not_touch() {
        let mut state = TouchState::new();
        tap_at(&mut state, Point::new(0.0, 0.0), 10);
        assert_eq!(state.on_click(None, 20), ClickResult::Click);
    }

    #[test]
    fn tap_timeout_limits_suppression() {
        let mut state = TouchState::with_thresholds(DEFAULT_MOVE_THRESHOLD, Some(300));
        tap_at(&mut state, Point::new(0.0, 0.0), 1000);
        assert_eq!(state.on_click(Some(Point::ZERO), 1400), ClickResult::Click);

        tap_at(&mut state, Point::new(0.0, 0.0), 2000);
        assert_eq!(
            state.on_click(Some(Point::ZERO), 2300),
            ClickResult::Suppressed
        );
    }

    #[test]
    fn new_touch_disarms_previous_tap() {
        let mut state = TouchState::new();
        tap_at(&mut state, Point::new(0.0, 0.0), 10);
        state.on_start(Some(Point::new(200.0, 200.0)));
        assert!(state.armed_tap().is_none());
        assert!(state.is_tracking());
    }

    #[test]
    fn cancel_clears_everything() {
        let mut state = TouchState::new();
        assert!(!state.cancel());
        state.on_start(Some(Point::new(1.0, 1.0)));
        assert!(state.cancel());
        assert!(!state.is_tracking());
        assert_eq!(state.on_end(None, 10), TouchEnd::Untracked);
    }
}
