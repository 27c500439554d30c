// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod recorder;

pub(crate) use recorder::{RecordedRule, Recorder};

use richprint::{MarkupBuilder, Point, Printer};
use richprint_dev::{test_printer, TestRenderer};

/// Lays out `markup` with the test printer.
pub(crate) fn layout(markup: impl AsRef<[u8]>, wrap_width: i32) -> Recorder {
    layout_with(&test_printer(), markup, wrap_width)
}

/// Lays out `markup` with the given printer.
pub(crate) fn layout_with(
    printer: &Printer<TestRenderer>,
    markup: impl AsRef<[u8]>,
    wrap_width: i32,
) -> Recorder {
    let mut recorder = Recorder::default();
    let regions = printer
        .layout(markup, Point::ZERO, wrap_width, &mut recorder)
        .unwrap();
    recorder.regions = regions;
    recorder
}

/// Starts a builder with some text.
pub(crate) fn markup(text: &str) -> MarkupBuilder {
    MarkupBuilder::from(text)
}
