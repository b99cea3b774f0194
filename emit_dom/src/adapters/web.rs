// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser DOM adapter.
//!
//! ## Feature
//!
//! Enable with `web_adapter`.
//!
//! ## Notes
//!
//! Nodes are `web_sys::Element`s. Ancestor walks use `parentElement`, which
//! ends above `<html>`, so the document node itself is never visited.
//! Selectors are handed to the platform by their source text.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::document::Document;
use crate::selector::SelectorList;

/// [`Document`] over a `web_sys::Document`.
#[derive(Clone, Debug)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    /// Wrap a DOM document.
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    /// The wrapped DOM document.
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for WebDocument {
    type Node = Element;

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn is_document_root(&self, _node: &Element) -> bool {
        false
    }

    fn tag_name(&self, node: &Element) -> Cow<'_, str> {
        Cow::Owned(node.tag_name())
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<Cow<'_, str>> {
        node.get_attribute(name).map(Cow::Owned)
    }

    fn has_attribute(&self, node: &Element, name: &str) -> bool {
        node.has_attribute(name)
    }

    fn is_element(&self, _node: &Element) -> bool {
        true
    }

    fn input_type(&self, node: &Element) -> Option<Cow<'_, str>> {
        match node.dyn_ref::<HtmlInputElement>() {
            Some(input) => Some(Cow::Owned(input.type_())),
            None => self.attribute(node, "type"),
        }
    }

    fn native_matches(&self, node: &Element, selector: &SelectorList) -> Option<bool> {
        Some(node.matches(selector.source()).unwrap_or(false))
    }

    fn query_selector_all(&self, selector: &SelectorList) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector.source()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}
