// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emitter configuration.

use emit_dom::{SelectorError, SelectorList};
use emit_event_state::touch::DEFAULT_MOVE_THRESHOLD;

use crate::dispatcher::MAX_WALK_DEPTH;

/// Delay applied to `debounce` emissions, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// How long a tap waits for its synthetic click, in milliseconds.
pub const DEFAULT_TAP_TIMEOUT_MS: u64 = 750;

/// Tunables for an [`Emitter`](crate::Emitter).
///
/// ```
/// use emit_responder::EmitConfig;
///
/// let config = EmitConfig {
///     debounce_ms: 100,
///     ..EmitConfig::default()
/// }
/// .with_selector("button, [data-emit]")
/// .unwrap();
/// assert_eq!(config.default_selector.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct EmitConfig {
    /// Distance in pixels at which a touch becomes a drag.
    pub touch_move_delta: f64,
    /// Maximum milliseconds between a tap and the synthetic click it suppresses; `None` for no limit.
    pub tap_timeout: Option<u64>,
    /// Delay for `debounce` emissions, in milliseconds.
    pub debounce_ms: u64,
    /// Maximum number of elements one walk may visit.
    pub max_depth: usize,
    /// Selector used to find the next candidate ancestor.
    pub default_selector: SelectorList,
    /// Whether `touchmove` is bound; without it drags are detected from the release position.
    pub track_touch_move: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            touch_move_delta: DEFAULT_MOVE_THRESHOLD,
            tap_timeout: Some(DEFAULT_TAP_TIMEOUT_MS),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_depth: MAX_WALK_DEPTH,
            default_selector: SelectorList::emit_default(),
            track_touch_move: true,
        }
    }
}

impl EmitConfig {
    /// Replace the candidate selector with a parsed `selector`.
    pub fn with_selector(mut self, selector: &str) -> Result<Self, SelectorError> {
        self.default_selector = SelectorList::parse(selector)?;
        Ok(self)
    }
}
