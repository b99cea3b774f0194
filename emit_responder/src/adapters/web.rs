// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser adapter: one delegated listener per event type on a root element.
//!
//! ## Feature
//!
//! Enable with `web_adapter`.
//!
//! ## Notes
//!
//! - [`WebMonitor::attach`] binds every kind in
//!   [`Emitter::monitored_events`] on the root and unbinds them on drop.
//! - Touch positions come from the first active touch, or the first changed
//!   touch on `touchend`. Mouse positions come from `pageX`/`pageY`.
//! - Timestamps are `Event.timeStamp` in whole milliseconds, which shares its
//!   clock with `performance.now()`; debounced emissions are flushed from a
//!   `setTimeout` against that clock.
//! - A depth-limit error is rethrown into JavaScript.
//! - Listeners run while the emitter is borrowed. They must not call
//!   [`WebMonitor::emitter`] themselves.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::ToString;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell, RefMut};

use emit_dom::adapters::web::WebDocument;
use kurbo::Point;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, MouseEvent, TouchEvent};

use crate::emitter::Emitter;
use crate::event::{EmitEvent, EventKind};

struct Shared {
    emitter: RefCell<Emitter<WebDocument>>,
    document: WebDocument,
    /// Due time of the outstanding flush timer, if one is set.
    timer_due: Cell<Option<u64>>,
}

/// An [`Emitter`] bound to a browser element.
pub struct WebMonitor {
    root: Element,
    shared: Rc<Shared>,
    handlers: Vec<(EventKind, Closure<dyn FnMut(Event)>)>,
}

impl core::fmt::Debug for WebMonitor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let bound: Vec<&str> = self.handlers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("WebMonitor")
            .field("root", &self.root)
            .field("bound", &bound)
            .field("timer_due", &self.shared.timer_due.get())
            .finish_non_exhaustive()
    }
}

impl WebMonitor {
    /// Monitor `root` with `emitter`, binding its event types.
    pub fn attach(
        root: Element,
        document: WebDocument,
        mut emitter: Emitter<WebDocument>,
    ) -> Result<Self, JsValue> {
        emitter.monitor(root.clone());
        let kinds = emitter.monitored_events();
        let shared = Rc::new(Shared {
            emitter: RefCell::new(emitter),
            document,
            timer_due: Cell::new(None),
        });

        let mut monitor = Self {
            root,
            shared,
            handlers: Vec::new(),
        };
        for kind in EventKind::ALL.into_iter().filter(|k| kinds.has(*k)) {
            let weak = Rc::downgrade(&monitor.shared);
            let handler = Closure::wrap(Box::new(move |e: Event| {
                if let Some(shared) = weak.upgrade() {
                    dispatch(&shared, &e);
                }
            }) as Box<dyn FnMut(_)>);
            monitor
                .root
                .add_event_listener_with_callback(kind.as_str(), handler.as_ref().unchecked_ref())?;
            monitor.handlers.push((kind, handler));
        }
        tracing::debug!(bound = monitor.handlers.len(), "attached emit monitor");
        Ok(monitor)
    }

    /// The monitored element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Borrow the emitter, e.g. to register listeners or validators.
    pub fn emitter(&self) -> RefMut<'_, Emitter<WebDocument>> {
        self.shared.emitter.borrow_mut()
    }
}

impl Drop for WebMonitor {
    fn drop(&mut self) {
        for (kind, handler) in &self.handlers {
            let _ = self
                .root
                .remove_event_listener_with_callback(kind.as_str(), handler.as_ref().unchecked_ref());
        }
    }
}

fn dispatch(shared: &Rc<Shared>, e: &Event) {
    let Some(mut event) = to_emit_event(e) else {
        return;
    };
    let result = shared
        .emitter
        .borrow_mut()
        .handle_event(&shared.document, &mut event);
    if event.default_prevented() {
        e.prevent_default();
    }
    if event.propagation_stopped() {
        e.stop_propagation();
    }
    match result {
        Ok(_) => schedule_flush(shared),
        Err(err) => wasm_bindgen::throw_str(&err.to_string()),
    }
}

fn to_emit_event(e: &Event) -> Option<EmitEvent<Element>> {
    let kind = EventKind::from_name(&e.type_())?;
    let target = e.target().and_then(|t| t.dyn_into::<Element>().ok());
    let position = match kind {
        EventKind::TouchStart | EventKind::TouchMove | EventKind::TouchEnd => e
            .dyn_ref::<TouchEvent>()
            .and_then(|t| t.touches().item(0).or_else(|| t.changed_touches().item(0)))
            .map(|t| Point::new(f64::from(t.page_x()), f64::from(t.page_y()))),
        EventKind::Click | EventKind::Input | EventKind::Submit => e
            .dyn_ref::<MouseEvent>()
            .map(|m| Point::new(f64::from(m.page_x()), f64::from(m.page_y()))),
    };
    let mut event = EmitEvent::new(kind, target).at(millis(e.time_stamp()));
    event.position = position;
    Some(event)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "DOM high-resolution times are non-negative milliseconds well inside u64"
)]
fn millis(time: f64) -> u64 {
    time.max(0.0) as u64
}

fn now() -> Option<u64> {
    let performance = web_sys::window()?.performance()?;
    Some(millis(performance.now()))
}

/// Make sure a timer is set for the earliest pending emission.
fn schedule_flush(shared: &Rc<Shared>) {
    let Some(due) = shared.emitter.borrow().next_due() else {
        return;
    };
    if shared.timer_due.get().is_some_and(|set| set <= due) {
        return;
    }
    let (Some(window), Some(current)) = (web_sys::window(), now()) else {
        return;
    };
    let delay = i32::try_from(due.saturating_sub(current)).unwrap_or(i32::MAX);
    let weak: Weak<Shared> = Rc::downgrade(shared);
    let flush = Closure::once_into_js(move || {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        // A newer timer may have replaced this one.
        if shared.timer_due.get() != Some(due) {
            return;
        }
        shared.timer_due.set(None);
        let at = now().unwrap_or(due).max(due);
        let fired = shared.emitter.borrow_mut().poll(at);
        tracing::trace!(fired, "flushed debounced emissions");
        schedule_flush(&shared);
    });
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(flush.unchecked_ref(), delay) {
        Ok(_) => shared.timer_due.set(Some(due)),
        Err(err) => tracing::warn!(?err, "could not schedule debounced emissions"),
    }
}
