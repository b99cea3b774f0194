// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validator registry: gatekeepers consulted for every candidate element.
//!
//! A validator returning `false` vetoes the event at that element: the default
//! action is prevented, propagation stops, and the walk ends.

use alloc::rc::Rc;
use alloc::vec::Vec;

use emit_dom::Document;

use crate::event::EmitEvent;
use crate::listeners::same_callback;

/// A registered validator.
pub type Validator<D> =
    Rc<dyn Fn(&D, &<D as Document>::Node, &EmitEvent<<D as Document>::Node>) -> bool>;

/// Ordered, duplicate-free validator list.
pub struct Validators<D: Document> {
    list: Vec<Validator<D>>,
}

impl<D: Document> core::fmt::Debug for Validators<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Validators")
            .field("len", &self.list.len())
            .finish()
    }
}

impl<D: Document> Default for Validators<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> Validators<D> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// Add `validator` unless this very `Rc` is already registered.
    ///
    /// Returns `true` if it was added.
    pub fn add(&mut self, validator: Validator<D>) -> bool {
        if self.list.iter().any(|v| same_callback(v, &validator)) {
            return false;
        }
        self.list.push(validator);
        true
    }

    /// Remove `validator`. Returns `true` if it was registered.
    pub fn remove(&mut self, validator: &Validator<D>) -> bool {
        match self.list.iter().position(|v| same_callback(v, validator)) {
            Some(index) => {
                self.list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if every validator accepts `node`. Stops at the first veto.
    pub fn accept(&self, doc: &D, node: &D::Node, event: &EmitEvent<D::Node>) -> bool {
        self.list.iter().all(|v| v(doc, node, event))
    }

    /// Number of validators.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if no validators are registered.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Remove all validators.
    pub fn clear(&mut self) {
        self.list.clear();
    }
}
