// Copyright 2025 the Emit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to platform documents.
//!
//! Each adapter is gated behind a feature flag to keep the core `no_std` and dependency-light.
//!
//! ## Available Adapters
//!
//! - [`web`] (`web_adapter` feature): implements [`Document`](crate::Document) for the browser DOM
//!   through `web-sys`, using `Element.matches` and `querySelectorAll`.

#[cfg(feature = "web_adapter")]
pub mod web;
