// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The attribute contract, resolved into typed per-element configuration.
//!
//! | Attribute           | Meaning                                                         |
//! |---------------------|-----------------------------------------------------------------|
//! | `data-emit`         | Comma-separated emission names; present but empty = catcher     |
//! | `data-emit-options` | `allowdefault`, `allowpropagate`, `debounce`                    |
//! | `data-emit-ignore`  | Event types (`click`, `touchend`, ...) this element ignores     |
//!
//! Option and ignore lists may be separated by commas, pipes, or whitespace.
//! Unknown tokens are ignored.
//!
//! ```
//! use emit_responder::{ElementConfig, EmitOptions, EventKind};
//!
//! let config = ElementConfig::parse(
//!     Some("save, close"),
//!     Some("allowpropagate|debounce"),
//!     Some("touchend"),
//! );
//! assert_eq!(config.emissions.as_slice(), ["save", "close"]);
//! assert_eq!(config.options, EmitOptions::ALLOW_PROPAGATE | EmitOptions::DEBOUNCE);
//! assert!(config.ignores(EventKind::TouchEnd));
//! ```

use alloc::string::{String, ToString};

use emit_dom::Document;
use smallvec::SmallVec;

use crate::event::{EventKind, EventKinds};

/// Marker attribute listing emission names.
pub const EMIT_ATTR: &str = "data-emit";
/// Attribute holding [`EmitOptions`] tokens.
pub const OPTIONS_ATTR: &str = "data-emit-options";
/// Attribute holding event types to ignore.
pub const IGNORE_ATTR: &str = "data-emit-ignore";

bitflags::bitflags! {
    /// Flags from `data-emit-options`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EmitOptions: u8 {
        /// Do not prevent the platform's default action.
        const ALLOW_DEFAULT   = 0b0000_0001;
        /// Keep walking to ancestors after this element emits.
        const ALLOW_PROPAGATE = 0b0000_0010;
        /// Delay and coalesce this element's emissions.
        const DEBOUNCE        = 0b0000_0100;
    }
}

impl EmitOptions {
    /// Parse an option list.
    pub fn parse(list: &str) -> Self {
        tokens(list).fold(Self::empty(), |options, token| {
            options
                | match token {
                    "allowdefault" => Self::ALLOW_DEFAULT,
                    "allowpropagate" => Self::ALLOW_PROPAGATE,
                    "debounce" => Self::DEBOUNCE,
                    _ => Self::empty(),
                }
        })
    }
}

impl EventKinds {
    /// Parse an event type list; unknown names are skipped.
    pub fn parse(list: &str) -> Self {
        tokens(list).filter_map(EventKind::from_name).collect()
    }
}

fn tokens(list: &str) -> impl Iterator<Item = &str> {
    list.split(|c: char| c == ',' || c == '|' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

/// Emission names listed in `data-emit`, in order, empty names dropped.
pub fn parse_emissions(list: &str) -> SmallVec<[String; 2]> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Everything the attributes of one element say, resolved once per visit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementConfig {
    /// Emission names; empty for catcher elements.
    pub emissions: SmallVec<[String; 2]>,
    /// Behavior flags.
    pub options: EmitOptions,
    /// Event kinds this element does not react to.
    pub ignore: EventKinds,
}

impl ElementConfig {
    /// Build a configuration from raw attribute values.
    pub fn parse(emit: Option<&str>, options: Option<&str>, ignore: Option<&str>) -> Self {
        Self {
            emissions: emit.map(parse_emissions).unwrap_or_default(),
            options: options.map(EmitOptions::parse).unwrap_or_default(),
            ignore: ignore.map(EventKinds::parse).unwrap_or_default(),
        }
    }

    /// Read the configuration of `node`.
    pub fn read<D: Document + ?Sized>(doc: &D, node: &D::Node) -> Self {
        Self::parse(
            doc.attribute(node, EMIT_ATTR).as_deref(),
            doc.attribute(node, OPTIONS_ATTR).as_deref(),
            doc.attribute(node, IGNORE_ATTR).as_deref(),
        )
    }

    /// Returns true if events of `kind` pass through this element untouched.
    pub fn ignores(&self, kind: EventKind) -> bool {
        self.ignore.has(kind)
    }

    /// Returns true for elements that handle events without emitting anything.
    pub fn is_catcher(&self) -> bool {
        self.emissions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emit_dom::{ElementData, ElementTree};

    #[test]
    fn option_separators() {
        let expected = EmitOptions::ALLOW_DEFAULT | EmitOptions::DEBOUNCE;
        assert_eq!(EmitOptions::parse("allowdefault,debounce"), expected);
        assert_eq!(EmitOptions::parse("allowdefault | debounce"), expected);
        assert_eq!(EmitOptions::parse(" allowdefault\tdebounce "), expected);
        assert_eq!(EmitOptions::parse("bogus,,"), EmitOptions::empty());
        assert_eq!(EmitOptions::parse(""), EmitOptions::empty());
    }

    #[test]
    fn ignore_list_skips_unknown_names() {
        let set = EventKinds::parse("click keyup touchend");
        assert_eq!(set, EventKinds::CLICK | EventKinds::TOUCH_END);
    }

    #[test]
    fn emissions_keep_order_and_drop_empties() {
        assert_eq!(parse_emissions("a, b,c ,,d").as_slice(), ["a", "b", "c", "d"]);
        assert!(parse_emissions("").is_empty());
        assert!(parse_emissions(" , ").is_empty());
    }

    #[test]
    fn read_from_document() {
        let mut tree = ElementTree::new();
        let catcher = tree.insert(None, ElementData::new("div").with_attribute(EMIT_ATTR, ""));
        let plain = tree.insert(None, ElementData::new("div"));
        let button = tree.insert(
            None,
            ElementData::new("button")
                .with_attribute(EMIT_ATTR, "save")
                .with_attribute(OPTIONS_ATTR, "allowpropagate")
                .with_attribute(IGNORE_ATTR, "touchend"),
        );

        assert!(ElementConfig::read(&tree, &catcher).is_catcher());
        assert_eq!(ElementConfig::read(&tree, &plain), ElementConfig::default());

        let config = ElementConfig::read(&tree, &button);
        assert_eq!(config.emissions.as_slice(), ["save"]);
        assert_eq!(config.options, EmitOptions::ALLOW_PROPAGATE);
        assert!(config.ignores(EventKind::TouchEnd));
        assert!(!config.ignores(EventKind::Click));
    }
}
