// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute-driven delegation over an in-memory document.
//!
//! This example shows:
//! - a tap handled on `touchend`,
//! - `allowpropagate` emitting from a button and its list,
//! - a debounced search field flushed with `poll`,
//! - `unhandled` for clicks nothing claims.
//!
//! Run:
//! - `cargo run -p emit_demos --example emit_basics`

use std::rc::Rc;

use emit_dom::{ElementData, ElementId, ElementTree};
use emit_responder::{EmitEvent, Emitter, EventKind, UNHANDLED};
use kurbo::Point;

fn main() {
    // <main>
    //   <ul data-emit="list-touched">
    //     <li><button data-emit="save" data-emit-options="allowpropagate">Save</button></li>
    //   </ul>
    //   <input type="search" data-emit="search" data-emit-options="debounce">
    //   <p>Some text</p>
    // </main>
    let mut tree = ElementTree::new();
    let main = tree.insert(None, ElementData::new("main"));
    let list = tree.insert(
        Some(main),
        ElementData::new("ul").with_attribute("data-emit", "list-touched"),
    );
    let item = tree.insert(Some(list), ElementData::new("li"));
    let save = tree.insert(
        Some(item),
        ElementData::new("button")
            .with_attribute("data-emit", "save")
            .with_attribute("data-emit-options", "allowpropagate"),
    );
    let search = tree.insert(
        Some(main),
        ElementData::new("input")
            .with_attribute("type", "search")
            .with_attribute("data-emit", "search")
            .with_attribute("data-emit-options", "debounce"),
    );
    let text = tree.insert(Some(main), ElementData::new("p"));

    let mut emitter = Emitter::<ElementTree>::new();
    emitter.monitor(main);
    for name in ["save", "list-touched", "search", UNHANDLED] {
        emitter.on(
            name,
            Rc::new(move |e: &EmitEvent<ElementId>| {
                println!(
                    "  {name:<13} <- {} at depth {} (t={}ms)",
                    e.kind,
                    e.depth(),
                    e.timestamp
                );
            }),
        );
    }

    println!("tap on Save:");
    let finger = Point::new(40.0, 12.0);
    let steps = [
        EmitEvent::new(EventKind::TouchStart, Some(save)).with_position(finger).at(0),
        EmitEvent::new(EventKind::TouchEnd, Some(save)).at(80),
    ];
    for mut event in steps {
        let outcome = emitter.handle_event(&tree, &mut event);
        println!(
            "  {} -> {outcome:?} (default prevented: {})",
            event.kind,
            event.default_prevented()
        );
    }
    // With `touchend` prevented the browser sends no compatibility click.
    println!("  armed tap: {:?}", emitter.touch_state().armed_tap());

    println!("typing into search:");
    for t in [1000, 1100, 1200, 1300] {
        let mut event = EmitEvent::new(EventKind::Input, Some(search)).at(t);
        let outcome = emitter.handle_event(&tree, &mut event);
        println!("  input at {t}ms -> {outcome:?}, pending: {}", emitter.pending_count());
    }
    while let Some(due) = emitter.next_due() {
        println!("  flushing at {due}ms");
        emitter.poll(due);
    }

    println!("click on plain text:");
    let mut event = EmitEvent::new(EventKind::Click, Some(text)).at(2000);
    let outcome = emitter.handle_event(&tree, &mut event);
    println!("  click -> {outcome:?}");
}
