// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closest-ancestor walk bounded by a root element.

use crate::document::{Document, matches};
use crate::selector::SelectorList;

/// Find the nearest ancestor of `start` matching `selector`.
///
/// - With `include_self`, `start` itself is tested first.
/// - The walk ends without a match at the document node.
/// - `root` bounds the walk: it may itself match, but nothing above it is
///   visited. With `None` the walk runs up to the document.
///
/// ```
/// use emit_dom::{ElementData, ElementTree, SelectorList, closest};
///
/// let mut tree = ElementTree::new();
/// let ids = tree.insert_chain(None, [
///     ElementData::new("section").with_attribute("data-emit", "outer"),
///     ElementData::new("div"),
///     ElementData::new("span"),
/// ]);
/// let selector = SelectorList::emit_default();
///
/// assert_eq!(closest(&tree, &ids[2], &selector, false, None), Some(ids[0]));
/// // The root boundary stops the walk before reaching the section.
/// assert_eq!(closest(&tree, &ids[2], &selector, false, Some(&ids[1])), None);
/// ```
pub fn closest<D: Document + ?Sized>(
    doc: &D,
    start: &D::Node,
    selector: &SelectorList,
    include_self: bool,
    root: Option<&D::Node>,
) -> Option<D::Node> {
    let mut current = if include_self {
        Some(start.clone())
    } else {
        doc.parent(start)
    };
    while let Some(node) = current {
        if doc.is_document_root(&node) {
            return None;
        }
        if matches(doc, &node, selector) {
            return Some(node);
        }
        if root.is_some_and(|r| *r == node) {
            return None;
        }
        current = doc.parent(&node);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementData, ElementId, ElementTree};
    use alloc::vec::Vec;

    fn chain() -> (ElementTree, Vec<ElementId>) {
        let mut tree = ElementTree::new();
        let ids = tree.insert_chain(
            None,
            [
                ElementData::new("main").with_attribute("data-emit", "root"),
                ElementData::new("nav"),
                ElementData::new("a").with_attribute("href", "#"),
                ElementData::new("span"),
            ],
        );
        (tree, ids)
    }

    #[test]
    fn include_self_tests_start() {
        let (tree, ids) = chain();
        let selector = SelectorList::emit_default();
        assert_eq!(closest(&tree, &ids[2], &selector, true, None), Some(ids[2]));
        assert_eq!(closest(&tree, &ids[2], &selector, false, None), Some(ids[0]));
    }

    #[test]
    fn root_may_match_but_bounds_the_walk() {
        let (tree, ids) = chain();
        let selector = SelectorList::emit_default();
        // Root matches: returned.
        assert_eq!(
            closest(&tree, &ids[1], &selector, false, Some(&ids[0])),
            Some(ids[0])
        );
        // Root does not match: walk stops there.
        let only_main = SelectorList::parse("main").unwrap();
        assert_eq!(
            closest(&tree, &ids[3], &only_main, false, Some(&ids[1])),
            None
        );
    }

    #[test]
    fn stops_at_document() {
        let (tree, ids) = chain();
        let nothing = SelectorList::parse("table").unwrap();
        assert_eq!(closest(&tree, &ids[3], &nothing, true, None), None);
        // A selector matching everything never returns the document node.
        let any = SelectorList::parse("*").unwrap();
        assert_eq!(closest(&tree, &ids[0], &any, false, None), None);
    }

    #[test]
    fn fallback_scan_matches_like_native() {
        let (mut tree, ids) = chain();
        let selector = SelectorList::emit_default();
        let native = closest(&tree, &ids[3], &selector, false, None);
        tree.set_native_matching(false);
        let scanned = closest(&tree, &ids[3], &selector, false, None);
        assert_eq!(native, Some(ids[2]));
        assert_eq!(native, scanned);
    }
}
