// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emit Event State: gesture state for attribute-driven event delegation.
//!
//! A delegating listener on touch devices sees every tap twice: once as
//! `touchend` and once as the compatibility `click` the platform synthesizes
//! afterwards. It also sees drags that end with a `touchend` on some element
//! the user never meant to activate. The [`touch`] module tracks one gesture at
//! a time and classifies both cases from raw positions.
//!
//! The state machine knows nothing about elements or dispatch. Feed it
//! positions (page coordinates) and timestamps (milliseconds) and act on its
//! verdicts; `emit_responder` does exactly that before it starts walking the
//! document.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` + `alloc` builds that use `libm` for the distance math.
//!
//! This crate is `no_std`.

#![no_std]

pub mod touch;
