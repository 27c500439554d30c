// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich-text markup interpretation and line layout.
//!
//! Richprint lays out text interleaved with formatting instructions: font,
//! color and decoration changes, selections, images, tables and more. The
//! markup is a compact byte stream produced with [`MarkupBuilder`].
//!
//! Glyph metrics and drawing are provided by the host through
//! [`GlyphRenderer`]. A [`Printer`] holds the fonts, colors and images the
//! markup refers to and answers four queries over the same layout:
//!
//! - [`Printer::draw`] renders onto a [`Surface`].
//! - [`Printer::measure`] computes the size of the laid out text.
//! - [`Printer::hit_test`] finds the code point under a point.
//! - [`Printer::locate`] finds the bounds of a code point.
//!
//! [`Printer::layout`] runs the same pass with a custom [`LayoutSink`].
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the standard library.
//! - `libm`: Use floating point implementations from `libm` in `no_std`
//!   builds.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("richprint requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod error;
mod font;
mod geometry;
mod layout;
mod markup;
mod printer;
mod sinks;
mod surface;
mod util;

pub use peniko::Color;

pub use error::{Error, ErrorKind};
pub use font::{GlyphRenderer, StyleDefaults, StyledFont};
pub use geometry::{Margin, Point, Rect, Size};
pub use layout::{LayoutSink, PositionedGlyph, Region};
pub use markup::{
    CodePoint, ColorSource, HeaderLevel, ImageAlign, ImageSpec, LineSettings, MarkupBuilder,
    NamedColor, NamedFont, SelectionStyle, TableColumn, TextAlign, VerticalAlign, CELL_SEPARATOR,
    COMPLEX_INSTRUCTION, LINE_BREAK, NONCHARACTER, PLACEHOLDER, REPLACEMENT, ROW_SEPARATOR,
    SELECTION_END, SELECTION_START, SIMPLE_INSTRUCTION, TERMINATOR,
};
pub use printer::{ColorPair, Printer};
pub use surface::{Image, ImageFit, Surface};
