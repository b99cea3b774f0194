// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The emitter: one delegated entry point per monitored root.
//!
//! An [`Emitter`] owns everything a delegation root needs: configuration,
//! the root boundary, the touch tracker, listeners, validators, and pending
//! debounced emissions. Hosts bind the events from
//! [`Emitter::monitored_events`] on the root and feed each one to
//! [`Emitter::handle_event`]. Several emitters can serve different roots
//! side by side; they share nothing.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use emit_dom::{ElementData, ElementTree};
//! use emit_responder::{EmitEvent, Emitter, EventKind, Outcome};
//! use kurbo::Point;
//!
//! let mut tree = ElementTree::new();
//! let check = tree.insert(None, ElementData::new("input")
//!     .with_attribute("type", "checkbox")
//!     .with_attribute("data-emit", "toggle"));
//!
//! let toggled = Rc::new(RefCell::new(Vec::new()));
//! let log = toggled.clone();
//! let mut emitter = Emitter::<ElementTree>::new();
//! emitter.on("toggle", Rc::new(move |e: &EmitEvent<_>| log.borrow_mut().push(e.kind)));
//!
//! // A tap emits on `touchend`. The checkbox keeps its default action, so the
//! // platform still sends a click: it skips the walk but keeps its default.
//! let at = Point::new(5.0, 5.0);
//! let mut start = EmitEvent::new(EventKind::TouchStart, Some(check)).with_position(at);
//! assert_eq!(emitter.handle_event(&tree, &mut start), Ok(Outcome::Tracked));
//! let mut end = EmitEvent::new(EventKind::TouchEnd, Some(check)).at(100);
//! assert_eq!(emitter.handle_event(&tree, &mut end), Ok(Outcome::Handled));
//! let mut click = EmitEvent::new(EventKind::Click, Some(check)).with_position(at).at(110);
//! assert_eq!(emitter.handle_event(&tree, &mut click), Ok(Outcome::Suppressed));
//! assert!(!click.default_prevented());
//!
//! assert_eq!(*toggled.borrow(), [EventKind::TouchEnd]);
//! ```

use emit_dom::Document;
use emit_event_state::touch::{ClickResult, TouchEnd, TouchState};

use crate::config::EmitConfig;
use crate::debounce::{Debouncer, Pending};
use crate::dispatcher::{self, WalkResult, WalkScope};
use crate::error::EmitError;
use crate::event::{EmitEvent, EventKind, EventKinds};
use crate::listeners::{Listener, Listeners};
use crate::options::EmitOptions;
use crate::validators::{Validator, Validators};

/// Emission fired when no element handled an event.
pub const UNHANDLED: &str = "unhandled";

/// What [`Emitter::handle_event`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// `touchstart` or `touchmove`: only the gesture tracker saw it.
    Tracked,
    /// The synthetic click after a handled tap that kept its default action.
    ///
    /// The walk is skipped so nothing emits twice; the click itself is left
    /// to the platform (a checkbox still toggles).
    Suppressed,
    /// A `touchend` ending a drag; left to the platform.
    Dragged,
    /// A link, button, or input without `data-emit` owns the event.
    Native,
    /// At least one element handled the event.
    Handled,
    /// Nothing handled the event; [`UNHANDLED`] was emitted.
    Unhandled,
}

/// Delegated event emitter over a document `D`.
pub struct Emitter<D: Document> {
    config: EmitConfig,
    root: Option<D::Node>,
    touch: TouchState,
    listeners: Listeners<EmitEvent<D::Node>>,
    validators: Validators<D>,
    debouncer: Debouncer<D::Node>,
}

impl<D: Document> core::fmt::Debug for Emitter<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Emitter")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("touch", &self.touch)
            .field("listeners", &self.listeners)
            .field("validators", &self.validators)
            .field("pending", &self.debouncer.len())
            .finish()
    }
}

impl<D: Document> Default for Emitter<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> Emitter<D> {
    /// Create an emitter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EmitConfig::default())
    }

    /// Create an emitter with `config`.
    pub fn with_config(config: EmitConfig) -> Self {
        let touch = TouchState::with_thresholds(config.touch_move_delta, config.tap_timeout);
        Self {
            config,
            root: None,
            touch,
            listeners: Listeners::new(),
            validators: Validators::new(),
            debouncer: Debouncer::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Use `root` as the delegation root; walks never climb past it.
    pub fn monitor(&mut self, root: D::Node) -> &mut Self {
        self.root = Some(root);
        self
    }

    /// The delegation root, if one was set.
    pub fn root(&self) -> Option<&D::Node> {
        self.root.as_ref()
    }

    /// Event kinds a host should bind on the root.
    pub fn monitored_events(&self) -> EventKinds {
        let all: EventKinds = EventKind::ALL.into_iter().collect();
        if self.config.track_touch_move {
            all
        } else {
            all - EventKinds::TOUCH_MOVE
        }
    }

    /// Register `callback` for emission `name`.
    pub fn on(&mut self, name: &str, callback: Listener<EmitEvent<D::Node>>) -> &mut Self {
        self.listeners.on(name, callback);
        self
    }

    /// Remove one registration of `callback` for `name`.
    pub fn off(&mut self, name: &str, callback: &Listener<EmitEvent<D::Node>>) -> bool {
        self.listeners.off(name, callback)
    }

    /// Fire emission `name` directly; returns the number of listeners called.
    pub fn emit(&self, name: &str, event: &EmitEvent<D::Node>) -> usize {
        self.listeners.emit(name, event)
    }

    /// Alias for [`on`](Self::on).
    pub fn add_listener(&mut self, name: &str, callback: Listener<EmitEvent<D::Node>>) -> &mut Self {
        self.on(name, callback)
    }

    /// Alias for [`off`](Self::off).
    pub fn remove_listener(&mut self, name: &str, callback: &Listener<EmitEvent<D::Node>>) -> bool {
        self.off(name, callback)
    }

    /// Alias for [`emit`](Self::emit).
    pub fn trigger(&self, name: &str, event: &EmitEvent<D::Node>) -> usize {
        self.emit(name, event)
    }

    /// Number of listeners registered for `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.listener_count(name)
    }

    /// Add a validator; returns false if it was already registered.
    pub fn add_validator(&mut self, validator: Validator<D>) -> bool {
        self.validators.add(validator)
    }

    /// Remove a validator; returns false if it was not registered.
    pub fn remove_validator(&mut self, validator: &Validator<D>) -> bool {
        self.validators.remove(validator)
    }

    /// The gesture tracker.
    pub fn touch_state(&self) -> &TouchState {
        &self.touch
    }

    /// Forget the open gesture and any armed tap, e.g. on `touchcancel`.
    pub fn cancel_gesture(&mut self) -> bool {
        self.touch.cancel()
    }

    /// Handle one event from the monitored root.
    ///
    /// Afterwards the host should apply [`EmitEvent::default_prevented`] and
    /// [`EmitEvent::propagation_stopped`] to the platform event.
    pub fn handle_event(
        &mut self,
        doc: &D,
        event: &mut EmitEvent<D::Node>,
    ) -> Result<Outcome, EmitError> {
        let mut tapped = false;
        match event.kind {
            EventKind::TouchStart => {
                self.touch.on_start(event.position);
                return Ok(Outcome::Tracked);
            }
            EventKind::TouchMove => {
                self.touch.on_move(event.position);
                return Ok(Outcome::Tracked);
            }
            EventKind::TouchEnd => match self.touch.on_end(event.position, event.timestamp) {
                TouchEnd::Drag => {
                    tracing::debug!("touchend after drag left to the platform");
                    return Ok(Outcome::Dragged);
                }
                TouchEnd::Tap => tapped = true,
                TouchEnd::Untracked => {}
            },
            EventKind::Click => {
                if self.touch.on_click(event.position, event.timestamp) == ClickResult::Suppressed {
                    // The tap already emitted; the click still carries the default action.
                    tracing::debug!("skipped click following a handled tap");
                    return Ok(Outcome::Suppressed);
                }
            }
            EventKind::Input | EventKind::Submit => {}
        }

        let outcome = self.walk(doc, event);
        // Only a handled tap that kept its default action gets a click to swallow.
        // A prevented touchend produces no click; an unhandled one needs it.
        if tapped && (outcome != Ok(Outcome::Handled) || event.default_prevented()) {
            self.touch.disarm();
        }
        outcome
    }

    fn walk(&mut self, doc: &D, event: &mut EmitEvent<D::Node>) -> Result<Outcome, EmitError> {
        let scope = WalkScope::new(&self.config.default_selector)
            .within(self.root.as_ref())
            .with_max_depth(self.config.max_depth);
        let debounce_ms = self.config.debounce_ms;
        let listeners = &self.listeners;
        let debouncer = &mut self.debouncer;
        let result = dispatcher::walk(doc, event, &scope, &self.validators, |element, config, e| {
            if config.is_catcher() {
                return;
            }
            if config.options.contains(EmitOptions::DEBOUNCE) {
                debouncer.schedule(Pending {
                    element: element.clone(),
                    emissions: config.emissions.clone(),
                    event: e.clone(),
                    due: e.timestamp.saturating_add(debounce_ms),
                });
            } else {
                for name in &config.emissions {
                    listeners.emit(name, e);
                }
            }
        })?;

        let outcome = match result {
            WalkResult::Native => Outcome::Native,
            WalkResult::Finished { handled: true } => Outcome::Handled,
            WalkResult::Finished { handled: false } => {
                self.listeners.emit(UNHANDLED, event);
                Outcome::Unhandled
            }
        };
        tracing::debug!(kind = %event.kind, ?outcome, "handled event");
        Ok(outcome)
    }

    /// Fire debounced emissions due at `now`; returns how many entries fired.
    pub fn poll(&mut self, now: u64) -> usize {
        let due = self.debouncer.take_due(now);
        for pending in &due {
            for name in &pending.emissions {
                self.listeners.emit(name, &pending.event);
            }
        }
        due.len()
    }

    /// Earliest due time among pending emissions.
    pub fn next_due(&self) -> Option<u64> {
        self.debouncer.next_due()
    }

    /// Number of elements with pending emissions.
    pub fn pending_count(&self) -> usize {
        self.debouncer.len()
    }

    /// Drop the pending emission of `element`, if any.
    pub fn cancel_pending(&mut self, element: &D::Node) -> bool {
        self.debouncer.cancel(element)
    }
}
