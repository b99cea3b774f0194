// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=emit_responder --heading-base-level=0

//! Emit Responder: touch-aware, attribute-driven event delegation.
//!
//! ## Overview
//!
//! Instead of wiring handlers to individual elements, annotate markup with
//! `data-emit="name"` and bind one listener per event type on a root. The
//! [`Emitter`] turns each DOM event into zero or more named *emissions*,
//! delivered to listeners registered with [`Emitter::on`].
//!
//! ```html
//! <button data-emit="save" data-emit-options="allowpropagate">Save</button>
//! ```
//!
//! It is generic over [`emit_dom::Document`], so the same logic runs against
//! the browser (`web_adapter` feature) or the in-memory
//! [`emit_dom::ElementTree`].
//!
//! ## Walk
//!
//! From the event target the [`dispatcher`] walks to the closest ancestor
//! matching `a, button, input, [data-emit]`, up to the monitored root:
//!
//! - Elements with `data-emit` emit each listed name (or, with an empty list,
//!   just swallow the event). Unless `allowpropagate` is set, the first such
//!   element ends the walk.
//! - A link, button, or input without `data-emit` hands the event back to the
//!   platform.
//! - Validators ([`Emitter::add_validator`]) may veto any candidate.
//! - If nothing handled the event, `unhandled` is emitted.
//!
//! See [`options`] for the attribute contract and [`dispatcher`] for the
//! per-element rules.
//!
//! ## Touch
//!
//! Taps are handled on `touchend`. When that tap was handled but kept its
//! default action (checkboxes, `allowdefault`), the synthetic `click` the
//! browser fires afterwards skips the walk exactly once and keeps its own
//! default. Taps that end natively or unhandled leave the click alone. Drags
//! never emit. The gesture policy lives in [`emit_event_state::touch`].
//!
//! ## Time
//!
//! Events carry millisecond timestamps. Emissions from elements with the
//! `debounce` option are held for [`EmitConfig::debounce_ms`] and coalesced
//! per element; the host calls [`Emitter::poll`] when
//! [`Emitter::next_due`] passes.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use emit_dom::{ElementData, ElementTree};
//! use emit_responder::{EmitEvent, Emitter, EventKind, Outcome};
//!
//! let mut tree = ElementTree::new();
//! let list = tree.insert(None, ElementData::new("ul")
//!     .with_attribute("data-emit", "list-touched"));
//! let save = tree.insert(Some(list), ElementData::new("button")
//!     .with_attribute("data-emit", "save")
//!     .with_attribute("data-emit-options", "allowpropagate"));
//!
//! let hits = Rc::new(Cell::new(0));
//! let mut emitter = Emitter::<ElementTree>::new();
//! for name in ["save", "list-touched"] {
//!     let hits = hits.clone();
//!     emitter.on(name, Rc::new(move |_: &EmitEvent<_>| hits.set(hits.get() + 1)));
//! }
//!
//! let mut click = EmitEvent::new(EventKind::Click, Some(save));
//! assert_eq!(emitter.handle_event(&tree, &mut click), Ok(Outcome::Handled));
//! assert_eq!(hits.get(), 2);
//! assert!(click.default_prevented());
//! ```
//!
//! ## Adapters
//!
//! - **Web** (`web_adapter` feature): `adapters::web::WebMonitor` binds an
//!   emitter to a browser element.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod config;
pub mod debounce;
pub mod dispatcher;
pub mod emitter;
pub mod error;
pub mod event;
pub mod listeners;
pub mod options;
pub mod validators;

pub use config::EmitConfig;
pub use emitter::{Emitter, Outcome, UNHANDLED};
pub use error::EmitError;
pub use event::{EmitEvent, EventKind, EventKinds};
pub use options::{ElementConfig, EmitOptions};
