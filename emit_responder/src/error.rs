// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch errors.

/// Errors returned by [`Emitter::handle_event`](crate::Emitter::handle_event).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    /// The ancestor walk visited `limit` elements and still had more to go.
    ///
    /// This points at a malformed (cyclic) or pathologically deep document;
    /// it is not something to recover from at the call site.
    #[error("exceeded the emit walk depth limit of {limit} elements")]
    DepthLimitExceeded {
        /// The configured maximum walk depth.
        limit: usize,
    },
}
