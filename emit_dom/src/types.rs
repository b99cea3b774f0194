// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the in-memory element tree: element identifiers and element data.

use alloc::string::{String, ToString};
use hashbrown::HashMap;

/// Identifier for an element in an [`ElementTree`](crate::ElementTree) (generational).
///
/// A removed element's slot may be reused; the generation makes stale
/// identifiers compare unequal to the new occupant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Tag name and attributes of an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Upper-case tag name, as reported by HTML `tagName`.
    pub(crate) tag: String,
    pub(crate) attributes: HashMap<String, String>,
}

impl ElementData {
    /// Create element data for `tag` with no attributes.
    ///
    /// The tag is stored upper-cased.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            attributes: HashMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Upper-case tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set attribute `name` to `value`, replacing any previous value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Remove attribute `name`, returning its previous value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }
}
