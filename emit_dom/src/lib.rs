// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emit DOM: element access for attribute-driven event delegation.
//!
//! ## Overview
//!
//! Delegation needs very little from a document: parents, tag names,
//! attributes, and selector matching. This crate captures that in the
//! [`Document`] trait and builds the pieces the dispatcher walks with on top:
//!
//! - [`SelectorList`]: a parsed subset of CSS selectors (type, `#id`, `.class`,
//!   `[attr]`, `[attr=value]`, comma lists).
//! - [`matches`]: selector matching that prefers the platform's native
//!   matching and falls back to scanning `query_selector_all`.
//! - [`closest`]: nearest matching ancestor (optionally self), bounded by a
//!   root element and the document node.
//! - [`ElementTree`]: a generational in-memory element tree implementing
//!   [`Document`], for headless hosts, demos, and tests.
//!
//! ## Example
//!
//! ```
//! use emit_dom::{Document, ElementData, ElementTree, SelectorList, closest};
//!
//! let mut tree = ElementTree::new();
//! let form = tree.insert(None, ElementData::new("form").with_attribute("data-emit", "send"));
//! let label = tree.insert(Some(form), ElementData::new("label"));
//!
//! let target = closest(&tree, &label, &SelectorList::emit_default(), true, None).unwrap();
//! assert_eq!(target, form);
//! assert_eq!(tree.attribute(&target, "data-emit").as_deref(), Some("send"));
//! ```
//!
//! ## Adapters
//!
//! - **Web** (`web_adapter` feature): `adapters::web::WebDocument` implements
//!   [`Document`] over `web_sys`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
mod closest;
mod document;
mod selector;
mod tree;
mod types;

pub use closest::closest;
pub use document::{Document, matches};
pub use selector::{DEFAULT_EMIT_SELECTOR, SelectorError, SelectorList};
pub use tree::{DOCUMENT_TAG, ElementTree};
pub use types::{ElementData, ElementId};
