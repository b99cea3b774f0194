// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory element tree: structure, attribute updates, queries.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::document::Document;
use crate::selector::SelectorList;
use crate::types::{ElementData, ElementId};

/// Tag reported for the document node.
pub const DOCUMENT_TAG: &str = "#document";

/// A headless element tree implementing [`Document`].
///
/// Every tree owns a document node; elements inserted without a parent become
/// its children, mirroring `document.documentElement` and friends.
///
/// ## Example
///
/// ```rust
/// use emit_dom::{ElementData, ElementTree, closest, SelectorList};
///
/// let mut tree = ElementTree::new();
/// let list = tree.insert(None, ElementData::new("ul").with_attribute("data-emit", "pick"));
/// let item = tree.insert(Some(list), ElementData::new("li"));
///
/// let found = closest(&tree, &item, &SelectorList::emit_default(), false, None);
/// assert_eq!(found, Some(list));
/// ```
pub struct ElementTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    document: ElementId,
    native_matching: bool,
}

impl core::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("ElementTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("native_matching", &self.native_matching)
            .finish_non_exhaustive()
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    data: ElementData,
}

impl Node {
    fn new(generation: u32, data: ElementData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

impl ElementTree {
    /// Create a tree holding only the document node.
    pub fn new() -> Self {
        let document_data = ElementData {
            tag: String::from(DOCUMENT_TAG),
            ..ElementData::default()
        };
        Self {
            nodes: alloc::vec![Some(Node::new(1, document_data))],
            generations: alloc::vec![1],
            free_list: Vec::new(),
            document: ElementId::new(0, 1),
            native_matching: true,
        }
    }

    /// The document node.
    pub fn document(&self) -> ElementId {
        self.document
    }

    /// Choose whether [`Document::native_matches`] is offered.
    ///
    /// With native matching off, selector matching goes through the
    /// `query_selector_all` scan, like a platform without `Element.matches`.
    pub fn set_native_matching(&mut self, enabled: bool) {
        self.native_matching = enabled;
    }

    /// Insert a new element as the last child of `parent` (or of the document if `None`).
    ///
    /// A stale `parent` also attaches to the document.
    pub fn insert(&mut self, parent: Option<ElementId>, data: ElementData) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        let parent = parent
            .filter(|p| self.is_alive(*p))
            .unwrap_or(self.document);
        self.link_parent(id, parent);
        id
    }

    /// Insert a chain of elements, each a child of the previous one.
    ///
    /// Returns the ids from outermost to innermost.
    pub fn insert_chain(
        &mut self,
        parent: Option<ElementId>,
        chain: impl IntoIterator<Item = ElementData>,
    ) -> Vec<ElementId> {
        let mut ids = Vec::new();
        let mut parent = parent;
        for data in chain {
            let id = self.insert(parent, data);
            ids.push(id);
            parent = Some(id);
        }
        ids
    }

    /// Remove an element and its subtree. The document node cannot be removed.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) || id == self.document {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` under `new_parent` (or the document if `None`).
    ///
    /// Returns `false`, leaving the tree unchanged, if either id is stale, `id`
    /// is the document, or the move would make `id` its own ancestor.
    pub fn reparent(&mut self, id: ElementId, new_parent: Option<ElementId>) -> bool {
        let new_parent = new_parent.unwrap_or(self.document);
        if !self.is_alive(id) || !self.is_alive(new_parent) || id == self.document {
            return false;
        }
        let mut ancestor = Some(new_parent);
        while let Some(a) = ancestor {
            if a == id {
                return false;
            }
            ancestor = self.parent_of(a);
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.link_parent(id, new_parent);
        true
    }

    /// Set an attribute on a live element. Returns `false` for stale ids.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> bool {
        match self.node_opt_mut(id) {
            Some(node) => {
                node.data.set_attribute(name, value);
                true
            }
            None => false,
        }
    }

    /// Remove an attribute from a live element, returning its previous value.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Option<String> {
        self.node_opt_mut(id)?.data.remove_attribute(name)
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Element data of a live element.
    pub fn element(&self, id: ElementId) -> Option<&ElementData> {
        self.node_opt(id).map(|n| &n.data)
    }

    /// Returns the parent of an element, or `None` for the document or stale ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of an element, or an empty slice if it is stale.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// Number of live elements, excluding the document node.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count() - 1
    }

    /// Returns true if the tree holds only the document node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live elements in document (pre-)order, excluding the document node.
    pub fn descendants(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children_of(self.document).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children_of(id).iter().rev().copied());
        }
        out
    }

    // --- internals ---

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node(&self, id: ElementId) -> &Node {
        self.nodes[id.idx()]
            .as_ref()
            .expect("dangling ElementId: node was removed")
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes[id.idx()]
            .as_mut()
            .expect("dangling ElementId: node was removed")
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

impl Document for ElementTree {
    type Node = ElementId;

    fn parent(&self, node: &ElementId) -> Option<ElementId> {
        self.parent_of(*node)
    }

    fn is_document_root(&self, node: &ElementId) -> bool {
        *node == self.document
    }

    fn tag_name(&self, node: &ElementId) -> Cow<'_, str> {
        Cow::Borrowed(self.element(*node).map_or("", ElementData::tag))
    }

    fn attribute(&self, node: &ElementId, name: &str) -> Option<Cow<'_, str>> {
        self.element(*node)?.attribute(name).map(Cow::Borrowed)
    }

    fn native_matches(&self, node: &ElementId, selector: &SelectorList) -> Option<bool> {
        self.native_matching
            .then(|| selector.matches_in(self, node))
    }

    fn query_selector_all(&self, selector: &SelectorList) -> Vec<ElementId> {
        self.descendants()
            .into_iter()
            .filter(|id| selector.matches_in(self, id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn insert_attaches_to_document_by_default() {
        let mut tree = ElementTree::new();
        assert!(tree.is_empty());
        let a = tree.insert(None, ElementData::new("div"));
        assert_eq!(tree.parent_of(a), Some(tree.document()));
        assert_eq!(tree.children_of(tree.document()), &[a]);
        assert_eq!(tree.element(a).map(ElementData::tag), Some("DIV"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_subtree_and_reuse_slot() {
        let mut tree = ElementTree::new();
        let ids = tree.insert_chain(None, [ElementData::new("form"), ElementData::new("input")]);
        let (form, input) = (ids[0], ids[1]);
        tree.remove(form);
        assert!(!tree.is_alive(form));
        assert!(!tree.is_alive(input));
        assert!(tree.is_empty());

        let again = tree.insert(None, ElementData::new("p"));
        assert!(tree.is_alive(again));
        assert_ne!(again, form);
        assert_ne!(again, input);
        // Stale ids stay stale after slot reuse.
        assert!(tree.element(form).is_none());
        assert!(tree.element(input).is_none());
    }

    #[test]
    fn document_cannot_be_removed() {
        let mut tree = ElementTree::new();
        let doc = tree.document();
        tree.remove(doc);
        assert!(tree.is_alive(doc));
        assert!(!tree.reparent(doc, None));
    }

    #[test]
    fn reparent_refuses_cycles() {
        let mut tree = ElementTree::new();
        let ids = tree.insert_chain(
            None,
            [
                ElementData::new("section"),
                ElementData::new("div"),
                ElementData::new("span"),
            ],
        );
        assert!(!tree.reparent(ids[0], Some(ids[2])));
        assert!(!tree.reparent(ids[1], Some(ids[1])));
        assert!(tree.reparent(ids[2], Some(ids[0])));
        assert_eq!(tree.children_of(ids[0]), &[ids[1], ids[2]]);
        assert!(tree.children_of(ids[1]).is_empty());
    }

    #[test]
    fn attributes_round_trip_through_document_trait() {
        let mut tree = ElementTree::new();
        let b = tree.insert(None, ElementData::new("button"));
        assert!(!tree.has_attribute(&b, "data-emit"));
        assert!(tree.set_attribute(b, "data-emit", "save"));
        assert_eq!(tree.attribute(&b, "data-emit").as_deref(), Some("save"));
        assert_eq!(tree.remove_attribute(b, "data-emit").as_deref(), Some("save"));
        assert!(!tree.has_attribute(&b, "data-emit"));
    }

    #[test]
    fn query_selector_all_is_document_order() {
        let mut tree = ElementTree::new();
        let outer = tree.insert(None, ElementData::new("div").with_attribute("data-emit", ""));
        let first = tree.insert(Some(outer), ElementData::new("a"));
        let nested = tree.insert(Some(first), ElementData::new("button"));
        let last = tree.insert(None, ElementData::new("input"));
        tree.insert(None, ElementData::new("span"));

        let found = tree.query_selector_all(&SelectorList::emit_default());
        assert_eq!(found, vec![outer, first, nested, last]);
    }

    #[test]
    fn native_matching_can_be_disabled() {
        let mut tree = ElementTree::new();
        let a = tree.insert(None, ElementData::new("a"));
        let selector = SelectorList::emit_default();
        assert_eq!(tree.native_matches(&a, &selector), Some(true));
        tree.set_native_matching(false);
        assert_eq!(tree.native_matches(&a, &selector), None);
    }
}
