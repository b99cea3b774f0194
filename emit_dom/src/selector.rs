// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small CSS selector subset for delegation targets.
//!
//! Supported: comma-separated lists of compound selectors. A compound is an
//! optional type selector (`button`, `*`) followed by any number of `#id`,
//! `.class`, `[attr]`, and `[attr=value]` / `[attr="value"]` parts.
//! Combinators and pseudo-classes are rejected.
//!
//! ```
//! use emit_dom::{ElementData, ElementTree, SelectorList};
//!
//! let selector: SelectorList = "a, button.primary, [data-emit]".parse().unwrap();
//! assert_eq!(selector.len(), 3);
//!
//! let mut tree = ElementTree::new();
//! let save = tree.insert(None, ElementData::new("button").with_attribute("class", "primary wide"));
//! assert!(selector.matches_in(&tree, &save));
//! ```

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use smallvec::{SmallVec, smallvec};

use crate::document::Document;

/// The selector the dispatcher walks with unless configured otherwise.
pub const DEFAULT_EMIT_SELECTOR: &str = "a,button,input,[data-emit]";

/// Errors produced while parsing a selector.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The selector contained nothing but whitespace.
    #[error("empty selector")]
    Empty,
    /// A list entry was empty, e.g. `a,,b`.
    #[error("empty compound selector at byte {0}")]
    EmptyCompound(usize),
    /// An attribute selector was not closed with `]`.
    #[error("unterminated attribute selector starting at byte {0}")]
    UnterminatedAttribute(usize),
    /// Descendant, child, or sibling combinators.
    #[error("unsupported combinator {found:?} at byte {at}")]
    UnsupportedCombinator {
        /// Byte offset of the combinator.
        at: usize,
        /// The combinator character; a space for descendant combinators.
        found: char,
    },
    /// Pseudo-classes and pseudo-elements.
    #[error("unsupported pseudo-class at byte {0}")]
    UnsupportedPseudo(usize),
    /// Anything else.
    #[error("unexpected character {found:?} at byte {at}")]
    UnexpectedChar {
        /// Byte offset of the character.
        at: usize,
        /// The offending character.
        found: char,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Compound {
    /// Lower-case type selector; `None` matches any element.
    tag: Option<String>,
    parts: SmallVec<[Part; 2]>,
}

impl Compound {
    fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            parts: SmallVec::new(),
        }
    }

    fn attribute(name: &str) -> Self {
        Self {
            tag: None,
            parts: smallvec![Part::Attribute {
                name: name.to_string(),
                value: None,
            }],
        }
    }

    fn matches_in<D: Document + ?Sized>(&self, doc: &D, node: &D::Node) -> bool {
        if let Some(tag) = &self.tag
            && !doc.tag_name(node).eq_ignore_ascii_case(tag)
        {
            return false;
        }
        self.parts.iter().all(|part| match part {
            Part::Id(id) => doc.attribute(node, "id").is_some_and(|v| v == id.as_str()),
            Part::Class(class) => doc
                .attribute(node, "class")
                .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class.as_str())),
            Part::Attribute { name, value: None } => doc.has_attribute(node, name),
            Part::Attribute {
                name,
                value: Some(expected),
            } => doc
                .attribute(node, name)
                .is_some_and(|v| v == expected.as_str()),
        })
    }
}

/// A parsed, comma-separated selector list.
///
/// The source text is kept so platforms with native matching can be handed
/// the original string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    source: String,
    compounds: SmallVec<[Compound; 4]>,
}

impl SelectorList {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut cursor = Cursor { src: source, pos: 0 };
        let mut compounds = SmallVec::new();
        loop {
            cursor.skip_whitespace();
            let start = cursor.pos;
            match parse_compound(&mut cursor)? {
                Some(compound) => compounds.push(compound),
                None if compounds.is_empty() && cursor.peek().is_none() => {
                    return Err(SelectorError::Empty);
                }
                None => match cursor.peek() {
                    None | Some(',') => return Err(SelectorError::EmptyCompound(start)),
                    Some(c) => return Err(unexpected(&cursor, c)),
                },
            }
            let had_whitespace = cursor.skip_whitespace();
            match cursor.peek() {
                None => break,
                Some(',') => cursor.bump(),
                Some(found @ ('>' | '+' | '~')) => {
                    return Err(SelectorError::UnsupportedCombinator {
                        at: cursor.pos,
                        found,
                    });
                }
                Some(_) if had_whitespace => {
                    return Err(SelectorError::UnsupportedCombinator {
                        at: cursor.pos - 1,
                        found: ' ',
                    });
                }
                Some(c) => return Err(unexpected(&cursor, c)),
            }
        }
        Ok(Self {
            source: source.trim().to_string(),
            compounds,
        })
    }

    /// The delegation selector `a,button,input,[data-emit]`.
    pub fn emit_default() -> Self {
        Self {
            source: DEFAULT_EMIT_SELECTOR.to_string(),
            compounds: smallvec![
                Compound::tag("a"),
                Compound::tag("button"),
                Compound::tag("input"),
                Compound::attribute("data-emit"),
            ],
        }
    }

    /// The (trimmed) source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of compound selectors in the list.
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    /// Always false for a parsed list; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    /// Evaluate the selector against `node` using only attribute and tag lookups.
    ///
    /// This is the matching a [`Document`] without platform support can use
    /// for [`Document::native_matches`] or [`Document::query_selector_all`].
    pub fn matches_in<D: Document + ?Sized>(&self, doc: &D, node: &D::Node) -> bool {
        doc.is_element(node) && self.compounds.iter().any(|c| c.matches_in(doc, node))
    }
}

impl Default for SelectorList {
    fn default() -> Self {
        Self::emit_default()
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        &self.src[start..self.pos]
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn unexpected(cursor: &Cursor<'_>, found: char) -> SelectorError {
    SelectorError::UnexpectedChar {
        at: cursor.pos,
        found,
    }
}

/// Parse one compound; `Ok(None)` if nothing was consumed.
fn parse_compound(cursor: &mut Cursor<'_>) -> Result<Option<Compound>, SelectorError> {
    let start = cursor.pos;
    let tag = match cursor.peek() {
        Some('*') => {
            cursor.bump();
            None
        }
        Some(c) if is_ident_char(c) => Some(cursor.ident().to_ascii_lowercase()),
        _ => None,
    };
    let mut parts = SmallVec::new();
    loop {
        match cursor.peek() {
            Some(marker @ ('#' | '.')) => {
                cursor.bump();
                let name = cursor.ident();
                if name.is_empty() {
                    return Err(match cursor.peek() {
                        Some(c) => unexpected(cursor, c),
                        None => SelectorError::UnexpectedChar {
                            at: cursor.pos - 1,
                            found: marker,
                        },
                    });
                }
                let name = name.to_string();
                parts.push(if marker == '#' {
                    Part::Id(name)
                } else {
                    Part::Class(name)
                });
            }
            Some('[') => parts.push(parse_attribute(cursor)?),
            Some(':') => return Err(SelectorError::UnsupportedPseudo(cursor.pos)),
            _ => break,
        }
    }
    if cursor.pos == start {
        return Ok(None);
    }
    Ok(Some(Compound { tag, parts }))
}

fn parse_attribute(cursor: &mut Cursor<'_>) -> Result<Part, SelectorError> {
    let open = cursor.pos;
    cursor.bump();
    cursor.skip_whitespace();
    let name = cursor.ident().to_string();
    if name.is_empty() {
        return Err(match cursor.peek() {
            Some(c) => unexpected(cursor, c),
            None => SelectorError::UnterminatedAttribute(open),
        });
    }
    cursor.skip_whitespace();
    let value = match cursor.peek() {
        Some('=') => {
            cursor.bump();
            cursor.skip_whitespace();
            let value = match cursor.peek() {
                Some(quote @ ('"' | '\'')) => {
                    cursor.bump();
                    let start = cursor.pos;
                    while cursor.peek().is_some_and(|c| c != quote) {
                        cursor.bump();
                    }
                    if cursor.peek().is_none() {
                        return Err(SelectorError::UnterminatedAttribute(open));
                    }
                    let value = cursor.src[start..cursor.pos].to_string();
                    cursor.bump();
                    value
                }
                _ => cursor.ident().to_string(),
            };
            cursor.skip_whitespace();
            Some(value)
        }
        _ => None,
    };
    match cursor.peek() {
        Some(']') => {
            cursor.bump();
            Ok(Part::Attribute { name, value })
        }
        Some(c) => Err(unexpected(cursor, c)),
        None => Err(SelectorError::UnterminatedAttribute(open)),
    }
}
