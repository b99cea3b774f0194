// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only element access.
//!
//! The dispatcher never owns the document. It asks a [`Document`] for parents,
//! tag names, and attributes, and to match selectors. Two implementations ship
//! with this crate: the in-memory [`ElementTree`](crate::ElementTree) and, with
//! the `web_adapter` feature, `WebDocument` over the browser DOM.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::selector::SelectorList;

/// Element access used by selector matching and the closest-ancestor walk.
pub trait Document {
    /// Handle to an element.
    type Node: Clone + PartialEq + core::fmt::Debug;

    /// Parent of `node`, or `None` at the top of the tree.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Returns true for the document node itself; ancestor walks stop there.
    fn is_document_root(&self, node: &Self::Node) -> bool;

    /// Tag name of `node`. HTML documents report upper case.
    fn tag_name(&self, node: &Self::Node) -> Cow<'_, str>;

    /// Value of attribute `name` on `node`.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<Cow<'_, str>>;

    /// Returns true if `node` carries attribute `name`.
    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Returns true if `node` is an element; non-elements never match selectors.
    fn is_element(&self, node: &Self::Node) -> bool {
        !self.is_document_root(node)
    }

    /// Input type of `node` (`text`, `checkbox`, ...), if it has one.
    fn input_type(&self, node: &Self::Node) -> Option<Cow<'_, str>> {
        self.attribute(node, "type")
    }

    /// Platform selector matching, if the platform has it.
    ///
    /// Return `None` to make [`matches`] fall back to scanning
    /// [`Document::query_selector_all`].
    fn native_matches(&self, node: &Self::Node, selector: &SelectorList) -> Option<bool> {
        let _ = (node, selector);
        None
    }

    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &SelectorList) -> Vec<Self::Node>;
}

/// Returns true if `node` matches `selector`.
///
/// Uses [`Document::native_matches`] when available and otherwise looks for
/// `node` among the results of [`Document::query_selector_all`].
pub fn matches<D: Document + ?Sized>(doc: &D, node: &D::Node, selector: &SelectorList) -> bool {
    if !doc.is_element(node) {
        return false;
    }
    if let Some(matched) = doc.native_matches(node, selector) {
        return matched;
    }
    doc.query_selector_all(selector).iter().any(|n| n == node)
}
