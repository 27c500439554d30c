// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The generic layout traversal.
//!
//! Every query of the [`Printer`](crate::Printer) is one layout pass with a
//! different [`LayoutSink`]. The pass decodes the markup, accumulates glyphs
//! for the current line and, whenever a line is committed, reports its
//! selection boxes, glyphs and decoration rules to the sink.

mod justify;
mod pass;
mod spans;
mod state;
mod table;

pub(crate) use pass::LayoutPass;

use core::ops::ControlFlow;

use peniko::Color;

use crate::geometry::{Point, Rect};
use crate::markup::{CodePoint, TextAlign};
use crate::surface::{Image, ImageFit};

/// A glyph placed by the layout engine.
#[derive(Debug)]
pub struct PositionedGlyph<'a, R> {
    /// Renderer of the font the glyph was laid out with.
    pub renderer: &'a R,
    /// Resolved id of that font.
    pub font: u8,
    /// The code point, or `None` for glyphs that occupy space without being
    /// drawn: tabs, missing spaces, line ends, placeholders and the end of
    /// text marker.
    pub glyph: Option<CodePoint>,
    /// Top-left corner of the glyph's line box.
    pub location: Point,
    /// Resolved color.
    pub color: Color,
    /// Position of the glyph in the markup, counted in code points.
    ///
    /// The end of text marker carries the total number of code points.
    pub index: usize,
    /// Horizontal advance of the glyph.
    pub advance: i32,
    /// Top of the line containing the glyph.
    pub line_top: i32,
    /// Bottom of the line containing the glyph.
    pub line_bottom: i32,
    /// Whether this is the newline or end of text marker closing its line.
    pub line_end: bool,
    /// Whether the glyph is part of the spaces left past the point where its
    /// line wrapped. Such glyphs are never drawn and do not add to the width
    /// of the line.
    pub wrapped: bool,
}

impl<R> Clone for PositionedGlyph<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for PositionedGlyph<'_, R> {}

/// Offset that aligns content `used` pixels wide within `available`.
fn align_offset(align: TextAlign, available: i32, used: i32) -> i32 {
    let free = (available - used).max(0);
    match align {
        TextAlign::Left => 0,
        TextAlign::Center => free / 2,
        TextAlign::Right => free,
    }
}

/// A line box of a region started with
/// [`MarkupBuilder::start_region`](crate::MarkupBuilder::start_region).
///
/// A region spanning several lines yields one boundary per line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// The id given to the region.
    pub id: u8,
    /// The part of the region on one line.
    pub bounds: Rect,
}

/// Receives the output of a layout pass.
///
/// Only glyphs are mandatory; passes that do not draw can ignore the rest.
pub trait LayoutSink<R> {
    /// A glyph of a committed line. Returning [`ControlFlow::Break`] ends the
    /// pass.
    fn glyph(&mut self, glyph: &PositionedGlyph<'_, R>) -> ControlFlow<()>;

    /// A filled and optionally bordered box: selections, backgrounds, table
    /// cells.
    fn fill_box(&mut self, bounds: Rect, background: Color, border: i32, border_color: Color) {
        let _ = (bounds, background, border, border_color);
    }

    /// A horizontal underline or strikethrough.
    fn rule(&mut self, start: i32, end: i32, y: i32, thickness: i32, color: Color) {
        let _ = (start, end, y, thickness, color);
    }

    /// An image stretched or tiled into `bounds`.
    fn image(&mut self, index: u8, image: Image, bounds: Rect, tint: Color, fit: ImageFit) {
        let _ = (index, image, bounds, tint, fit);
    }
}

impl<R, S: LayoutSink<R> + ?Sized> LayoutSink<R> for &mut S {
    fn glyph(&mut self, glyph: &PositionedGlyph<'_, R>) -> ControlFlow<()> {
        (**self).glyph(glyph)
    }

    fn fill_box(&mut self, bounds: Rect, background: Color, border: i32, border_color: Color) {
        (**self).fill_box(bounds, background, border, border_color);
    }

    fn rule(&mut self, start: i32, end: i32, y: i32, thickness: i32, color: Color) {
        (**self).rule(start, end, y, thickness, color);
    }

    fn image(&mut self, index: u8, image: Image, bounds: Rect, tint: Color, fit: ImageFit) {
        (**self).image(index, image, bounds, tint, fit);
    }
}
