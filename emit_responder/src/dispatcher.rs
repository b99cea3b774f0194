// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: walk from the event target toward the root and decide, per
//! element, whether it handles the event.
//!
//! The walk simulates bubbling over elements carrying `data-emit`:
//!
//! 1. An element without `data-emit` is skipped, unless it is a link, button,
//!    or input: those end the walk immediately ([`WalkResult::Native`]) so the
//!    platform handles them.
//! 2. Validators run next. A veto prevents the default action, stops
//!    propagation, and ends the walk.
//! 3. Form controls only qualify for some event kinds: `FORM` on `submit`,
//!    `SELECT` on `input`, and `INPUT`/`TEXTAREA` on `input` unless their type
//!    is `submit`, `checkbox`, `radio`, or `file`.
//! 4. A qualifying element that does not ignore the event kind handles it:
//!    the default action is prevented (unless `allowdefault`, or for
//!    checkboxes and radios) and propagation stops (unless `allowpropagate`).
//!    The `emit` callback then receives the element's configuration.
//!
//! After each element the walk moves to the closest ancestor matching the
//! candidate selector, bounded by the monitored root. It never visits more
//! than [`WalkScope::max_depth`] elements; running into that bound is an
//! [`EmitError::DepthLimitExceeded`].
//!
//! ## Minimal example
//!
//! ```
//! use emit_dom::{ElementData, ElementTree, SelectorList};
//! use emit_responder::dispatcher::{self, WalkResult, WalkScope};
//! use emit_responder::{EmitEvent, EventKind, validators::Validators};
//!
//! let mut tree = ElementTree::new();
//! let ids = tree.insert_chain(None, [
//!     ElementData::new("li").with_attribute("data-emit", "row"),
//!     ElementData::new("button")
//!         .with_attribute("data-emit", "open")
//!         .with_attribute("data-emit-options", "allowpropagate"),
//! ]);
//!
//! let selector = SelectorList::emit_default();
//! let scope = WalkScope::new(&selector);
//! let mut seen = Vec::new();
//! let mut event = EmitEvent::new(EventKind::Click, Some(ids[1]));
//! let result = dispatcher::walk(&tree, &mut event, &scope, &Validators::new(), |_, config, e| {
//!     seen.push((config.emissions[0].clone(), e.depth()));
//! });
//!
//! assert_eq!(result, Ok(WalkResult::Finished { handled: true }));
//! assert_eq!(seen, [(String::from("open"), 0), (String::from("row"), 1)]);
//! assert!(event.default_prevented());
//! ```

use emit_dom::{Document, SelectorList, closest};

use crate::error::EmitError;
use crate::event::{EmitEvent, EventKind};
use crate::options::{EMIT_ATTR, ElementConfig, EmitOptions};
use crate::validators::Validators;

/// Default bound on the number of elements one walk may visit.
pub const MAX_WALK_DEPTH: usize = 100;

/// Where a walk may go.
#[derive(Clone, Debug)]
pub struct WalkScope<'a, N> {
    /// Selector for candidate ancestors.
    pub selector: &'a SelectorList,
    /// Boundary element; `None` walks up to the document.
    pub root: Option<&'a N>,
    /// Maximum number of elements to visit.
    pub max_depth: usize,
}

impl<'a, N> WalkScope<'a, N> {
    /// Unbounded by a root, limited to [`MAX_WALK_DEPTH`].
    pub fn new(selector: &'a SelectorList) -> Self {
        Self {
            selector,
            root: None,
            max_depth: MAX_WALK_DEPTH,
        }
    }

    /// Bound the walk by `root`.
    pub fn within(mut self, root: Option<&'a N>) -> Self {
        self.root = root;
        self
    }

    /// Change the depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// How a walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkResult {
    /// A link, button, or input without `data-emit` was hit; the platform owns the event.
    Native,
    /// The walk ran out of candidates, was stopped, or was vetoed.
    Finished {
        /// True if at least one element handled the event.
        handled: bool,
    },
}

/// What a single element did with the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Visit {
    Native,
    Vetoed,
    Skipped,
    Ignored,
    Handled,
}

/// Walk from the event target, calling `emit` for every element that handles the event.
///
/// `emit` receives the element, its resolved configuration, and the event
/// with [`EmitEvent::current`] and [`EmitEvent::depth`] pointing at the
/// element. It is called for catcher elements too (with no emissions).
pub fn walk<D, F>(
    doc: &D,
    event: &mut EmitEvent<D::Node>,
    scope: &WalkScope<'_, D::Node>,
    validators: &Validators<D>,
    mut emit: F,
) -> Result<WalkResult, EmitError>
where
    D: Document,
    F: FnMut(&D::Node, &ElementConfig, &EmitEvent<D::Node>),
{
    let mut current = event.target.clone();
    let mut depth = 0;
    let mut handled = false;
    while let Some(element) = current {
        if event.propagation_stopped_at().is_some() {
            break;
        }
        if depth >= scope.max_depth {
            tracing::warn!(limit = scope.max_depth, "emit walk hit the depth limit");
            return Err(EmitError::DepthLimitExceeded {
                limit: scope.max_depth,
            });
        }
        event.visit(element.clone(), depth);
        let visit = visit(doc, &element, event, depth, validators, &mut emit);
        tracing::trace!(?element, depth, ?visit, "visited");
        match visit {
            Visit::Native => return Ok(WalkResult::Native),
            Visit::Vetoed => break,
            Visit::Handled => handled = true,
            Visit::Skipped | Visit::Ignored => {}
        }
        current = closest(doc, &element, scope.selector, false, scope.root);
        depth += 1;
    }
    Ok(WalkResult::Finished { handled })
}

fn visit<D, F>(
    doc: &D,
    element: &D::Node,
    event: &mut EmitEvent<D::Node>,
    depth: usize,
    validators: &Validators<D>,
    emit: &mut F,
) -> Visit
where
    D: Document,
    F: FnMut(&D::Node, &ElementConfig, &EmitEvent<D::Node>),
{
    let tag = doc.tag_name(element);
    if !doc.has_attribute(element, EMIT_ATTR) {
        return if is_native_control(&tag) {
            Visit::Native
        } else {
            Visit::Skipped
        };
    }

    if !validators.accept(doc, element, event) {
        event.veto_at(depth);
        return Visit::Vetoed;
    }

    let input_type = doc.input_type(element);
    let input_type = input_type.as_deref().unwrap_or_default();
    if !qualifies(&tag, input_type, event.kind) {
        return Visit::Skipped;
    }

    let config = ElementConfig::read(doc, element);
    if config.ignores(event.kind) {
        return Visit::Ignored;
    }

    let force_allow_default = tag.eq_ignore_ascii_case("input")
        && (input_type.eq_ignore_ascii_case("checkbox") || input_type.eq_ignore_ascii_case("radio"));
    if !force_allow_default && !config.options.contains(EmitOptions::ALLOW_DEFAULT) {
        event.prevent_default();
    }
    if !config.options.contains(EmitOptions::ALLOW_PROPAGATE) {
        event.stop_propagation_at(depth);
    }
    emit(element, &config, event);
    Visit::Handled
}

/// Links, buttons, and inputs handle themselves when they carry no `data-emit`.
fn is_native_control(tag: &str) -> bool {
    ["a", "button", "input"]
        .iter()
        .any(|t| tag.eq_ignore_ascii_case(t))
}

/// Form controls only handle the event kinds they produce meaningfully.
fn qualifies(tag: &str, input_type: &str, kind: EventKind) -> bool {
    if tag.eq_ignore_ascii_case("form") {
        kind == EventKind::Submit
    } else if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
        ["submit", "checkbox", "radio", "file"]
            .iter()
            .any(|t| input_type.eq_ignore_ascii_case(t))
            || kind == EventKind::Input
    } else if tag.eq_ignore_ascii_case("select") {
        kind == EventKind::Input
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;
    use emit_dom::{ElementData, ElementId, ElementTree};

    fn emitting(tag: &str, name: &str) -> ElementData {
        ElementData::new(tag)
            .with_attribute(EMIT_ATTR, name)
            .with_attribute("data-emit-options", "allowpropagate")
    }

    fn run(
        tree: &ElementTree,
        event: &mut EmitEvent<ElementId>,
        validators: &Validators<ElementTree>,
    ) -> (Result<WalkResult, EmitError>, Vec<(String, usize)>) {
        let selector = SelectorList::emit_default();
        let scope = WalkScope::new(&selector);
        let mut seen = Vec::new();
        let result = walk(tree, event, &scope, validators, |_, config, e| {
            for name in &config.emissions {
                seen.push((name.clone(), e.depth()));
            }
        });
        (result, seen)
    }

    fn names(seen: &[(String, usize)]) -> Vec<&str> {
        seen.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[test]
    fn propagating_chain_emits_leaf_to_root() {
        let mut tree = ElementTree::new();
        let ids = tree.insert_chain(
            None,
            [
                emitting("section", "outer"),
                emitting("div", "middle"),
                emitting("span", "inner"),
            ],
        );
        let mut event = EmitEvent::new(EventKind::Click, Some(ids[2]));
        let (result, seen) = run(&tree, &mut event, &Validators::new());
        assert_eq!(result, Ok(WalkResult::Finished { handled: true }));
        assert_eq!(
            seen,
            [
                (String::from("inner"), 0),
                (String::from("middle"), 1),
                (String::from("outer"), 2)
            ]
        );
        assert!(!event.propagation_stopped());
        assert!(event.default_prevented());
    }

    #[test]
    fn without_allowpropagate_only_the_first_element_emits() {
        let mut tree = ElementTree::new();
        let outer = tree.insert(None, ElementData::new("div").with_attribute(EMIT_ATTR, "outer"));
        let inner = tree.insert(Some(outer), ElementData::new("div").with_attribute(EMIT_ATTR, "inner"));
        let mut event = EmitEvent::new(EventKind::Click, Some(inner));
        let (_, seen) = run(&tree, &mut event, &Validators::new());
        assert_eq!(names(&seen), ["inner"]);
        assert_eq!(event.propagation_stopped_at(), Some(0));
    }

    #[test]
    fn plain_elements_are_skipped_to_the_next_candidate() {
        let mut tree = ElementTree::new();
        let outer = tree.insert(None, emitting("div", "outer"));
        let ids = tree.insert_chain(
            Some(outer),
            [ElementData::new("p"), ElementData::new("em"), ElementData::new("b")],
        );
        let mut event = EmitEvent::new(EventKind::Click, Some(ids[2]));
        let (_, seen) = run(&tree, &mut event, &Validators::new());
        // The target itself is depth 0, the next candidate depth 1.
        assert_eq!(seen, [(String::from("outer"), 1)]);
    }

    #[test]
    fn bare_native_control_hands_event_to_platform() {
        let mut tree = ElementTree::new();
        let outer = tree.insert(None, emitting("div", "outer"));
        let link = tree.insert(Some(outer), ElementData::new("a").with_attribute("href", "/"));
        let icon = tree.insert(Some(link), ElementData::new("i"));
        let mut event = EmitEvent::new(EventKind::Click, Some(icon));
        let (result, seen) = run(&tree, &mut event, &Validators::new());
        assert_eq!(result, Ok(WalkResult::Native));
        assert!(seen.is_empty());
        assert!(!event.default_prevented());
    }

    #[test]
    fn validator_veto_at_depth_halts_walk() {
        let mut tree = ElementTree::new();
        let ids = tree.insert_chain(
            None,
            [
                emitting("section", "outer"),
                emitting("div", "guarded"),
                emitting("span", "inner"),
            ],
        );
        let guarded = ids[1];
        let mut validators = Validators::new();
        validators.add(Rc::new(move |_: &ElementTree, node: &ElementId, _: &EmitEvent<ElementId>| {
            *node != guarded
        }));
        let mut event = EmitEvent::new(EventKind::Click, Some(ids[2]));
        let (result, seen) = run(&tree, &mut event, &validators);
        assert_eq!(result, Ok(WalkResult::Finished { handled: true }));
        assert_eq!(names(&seen), ["inner"]);
        assert_eq!(event.vetoed_at(), Some(1));
        assert_eq!(event.propagation_stopped_at(), Some(1));
        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
    }

    #[test]
    fn form_controls_filter_event_kinds() {
        let mut tree = ElementTree::new();
        let form = tree.insert(None, ElementData::new("form").with_attribute(EMIT_ATTR, "submit-form"));
        let text = tree.insert(
            Some(form),
            ElementData::new("input")
                .with_attribute("type", "text")
                .with_attribute(EMIT_ATTR, "typed"),
        );
        let check = tree.insert(
            Some(form),
            ElementData::new("input")
                .with_attribute("type", "checkbox")
                .with_attribute(EMIT_ATTR, "toggled"),
        );
        let select = tree.insert(Some(form), ElementData::new("select").with_attribute(EMIT_ATTR, "picked"));
        let none = Validators::new();

        // Click on a text input skips it and the form; nothing handles it.
        let mut click = EmitEvent::new(EventKind::Click, Some(text));
        let (result, seen) = run(&tree, &mut click, &none);
        assert_eq!(result, Ok(WalkResult::Finished { handled: false }));
        assert!(seen.is_empty());

        let mut input = EmitEvent::new(EventKind::Input, Some(text));
        assert_eq!(names(&run(&tree, &mut input, &none).1), ["typed"]);

        // Checkboxes qualify on click and keep their default action.
        let mut toggle = EmitEvent::new(EventKind::Click, Some(check));
        assert_eq!(names(&run(&tree, &mut toggle, &none).1), ["toggled"]);
        assert!(!toggle.default_prevented());

        let mut select_click = EmitEvent::new(EventKind::Click, Some(select));
        assert!(run(&tree, &mut select_click, &none).1.is_empty());
        let mut select_input = EmitEvent::new(EventKind::Input, Some(select));
        assert_eq!(names(&run(&tree, &mut select_input, &none).1), ["picked"]);

        let mut submit = EmitEvent::new(EventKind::Submit, Some(form));
        assert_eq!(names(&run(&tree, &mut submit, &none).1), ["submit-form"]);
    }

    #[test]
    fn ignored_kind_is_not_handled() {
        let mut tree = ElementTree::new();
        let b = tree.insert(
            None,
            ElementData::new("button")
                .with_attribute(EMIT_ATTR, "save")
                .with_attribute("data-emit-ignore", "touchend"),
        );
        let mut event = EmitEvent::new(EventKind::TouchEnd, Some(b));
        let (result, seen) = run(&tree, &mut event, &Validators::new());
        assert_eq!(result, Ok(WalkResult::Finished { handled: false }));
        assert!(seen.is_empty());
        assert!(!event.default_prevented());
    }

    #[test]
    fn catcher_handles_without_emissions() {
        let mut tree = ElementTree::new();
        let catcher = tree.insert(None, ElementData::new("div").with_attribute(EMIT_ATTR, ""));
        let mut event = EmitEvent::new(EventKind::Click, Some(catcher));
        let (result, seen) = run(&tree, &mut event, &Validators::new());
        assert_eq!(result, Ok(WalkResult::Finished { handled: true }));
        assert!(seen.is_empty());
        assert!(event.propagation_stopped());
    }

    #[test]
    fn root_bounds_the_walk() {
        let mut tree = ElementTree::new();
        let outside = tree.insert(None, emitting("body", "outside"));
        let root = tree.insert(Some(outside), ElementData::new("main"));
        let inner = tree.insert(Some(root), emitting("div", "inner"));
        let selector = SelectorList::emit_default();
        let scope = WalkScope::new(&selector).within(Some(&root));
        let mut seen = Vec::new();
        let mut event = EmitEvent::new(EventKind::Click, Some(inner));
        walk(&tree, &mut event, &scope, &Validators::new(), |_, config, _| {
            seen.extend(config.emissions.iter().cloned());
        })
        .unwrap();
        assert_eq!(seen, ["inner"]);
    }

    #[test]
    fn depth_limit_is_an_error() {
        let mut tree = ElementTree::new();
        let chain = (0..MAX_WALK_DEPTH + 1).map(|_| emitting("div", "deep"));
        let ids = tree.insert_chain(None, chain);
        let mut event = EmitEvent::new(EventKind::Click, ids.last().copied());
        let (result, seen) = run(&tree, &mut event, &Validators::new());
        assert_eq!(
            result,
            Err(EmitError::DepthLimitExceeded {
                limit: MAX_WALK_DEPTH
            })
        );
        assert_eq!(seen.len(), MAX_WALK_DEPTH);
    }

    #[test]
    fn chain_just_under_the_limit_completes() {
        let mut tree = ElementTree::new();
        let ids = tree.insert_chain(None, (0..MAX_WALK_DEPTH).map(|_| emitting("div", "deep")));
        let mut event = EmitEvent::new(EventKind::Click, ids.last().copied());
        let (result, seen) = run(&tree, &mut event, &Validators::new());
        assert_eq!(result, Ok(WalkResult::Finished { handled: true }));
        assert_eq!(seen.len(), MAX_WALK_DEPTH);
    }
}
