// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validators: veto delegation for elements that should not react right now.
//!
//! A validator sees the document, the candidate element, and the event. Here
//! every element marked `aria-disabled="true"` is refused, which prevents the
//! default action and ends the walk.
//!
//! Run:
//! - `cargo run -p emit_demos --example emit_validators`

use std::rc::Rc;

use emit_dom::{Document, ElementData, ElementId, ElementTree};
use emit_responder::validators::Validator;
use emit_responder::{EmitEvent, Emitter, EventKind};

fn main() {
    let mut tree = ElementTree::new();
    let toolbar = tree.insert(None, ElementData::new("nav"));
    let delete = tree.insert(
        Some(toolbar),
        ElementData::new("button").with_attribute("data-emit", "delete"),
    );

    let mut emitter = Emitter::<ElementTree>::new();
    emitter.monitor(toolbar);
    emitter.on(
        "delete",
        Rc::new(|_: &EmitEvent<ElementId>| println!("  delete emitted")),
    );

    let disabled: Validator<ElementTree> = Rc::new(|doc, node, _event| {
        doc.attribute(node, "aria-disabled").as_deref() != Some("true")
    });
    emitter.add_validator(disabled.clone());

    for state in ["false", "true"] {
        tree.set_attribute(delete, "aria-disabled", state);
        let mut click = EmitEvent::new(EventKind::Click, Some(delete));
        let outcome = emitter.handle_event(&tree, &mut click);
        println!(
            "aria-disabled={state}: {outcome:?}, vetoed at {:?}, default prevented: {}",
            click.vetoed_at(),
            click.default_prevented()
        );
    }

    emitter.remove_validator(&disabled);
    let mut click = EmitEvent::new(EventKind::Click, Some(delete));
    println!("validator removed: {:?}", emitter.handle_event(&tree, &mut click));
}
