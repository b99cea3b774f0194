// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host adapters.
//!
//! Each adapter is gated behind a feature flag so the core emitter stays
//! `no_std` and platform-free by default.
//!
//! ## Available Adapters
//!
//! - `web` (`web_adapter` feature): binds an [`Emitter`](crate::Emitter) to a
//!   browser element through `web_sys`, applies its decisions to the real
//!   events, and drives debounced emissions from `setTimeout`.

#[cfg(feature = "web_adapter")]
pub mod web;
