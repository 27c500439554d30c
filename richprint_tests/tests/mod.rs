// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `richprint`.
//!
//! - The `util` module contains shared utility functions that are needed by different
//!   test modules.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that shared utilities are compiled once.
//! - Every test lays text out with the fixed-metric `TestRenderer` from `richprint_dev`:
//!   glyphs advance 10 pixels on 20 pixel lines with the baseline at 16, so expected
//!   positions can be worked out by hand.
//! - For test naming, put the "topic" of the test at the start of the name, e.g.
//!   `wrap_emergency_break` rather than `emergency_break_wrap`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod basic;
mod objects;
mod styles;
mod tables;
mod util;
