// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Richprint Dev
//!
//! This crate provides utilities for developing Richprint: a glyph renderer
//! with fixed, easily predicted metrics, a surface that records what is drawn
//! onto it and a few text samples.

use richprint::{
    CodePoint, Color, GlyphRenderer, Image, ImageFit, NamedFont, Point, Printer, Rect, Size,
    StyledFont, Surface,
};

/// A glyph renderer where every glyph is a box of the same advance.
///
/// Glyphs are drawn as filled rectangles covering their ink. Descending
/// letters (`g`, `j`, `p`, `q`, `y`) reach below the baseline. Spaces other
/// than U+0020 and U+00A0 are reported as missing so that the layout engine
/// falls back to its own widths.
#[derive(Clone, Debug, PartialEq)]
pub struct TestRenderer {
    /// Advance of every glyph.
    pub advance: i32,
    /// Height of the line box.
    pub height: i32,
    /// Distance from the top of the line box to the baseline.
    pub baseline: i32,
    /// Size of the em square.
    pub em: i32,
    /// Advance of digits, used for justification.
    pub digit_width: i32,
    /// Distance from the top of the line box to the underline.
    pub underline_offset: i32,
    /// Thickness of decoration lines.
    pub line_thickness: f32,
    /// Kerning between pairs of letters.
    pub kerning: Vec<(char, char, i32)>,
}

impl TestRenderer {
    /// A renderer with 10 pixel advances on 20 pixel lines.
    pub fn new() -> Self {
        Self {
            advance: 10,
            height: 20,
            baseline: 16,
            em: 16,
            digit_width: 8,
            underline_offset: 18,
            line_thickness: 1.,
            kerning: Vec::new(),
        }
    }

    /// A renderer with a different advance, scaling the vertical metrics
    /// along with it.
    pub fn with_advance(advance: i32) -> Self {
        Self {
            advance,
            height: advance * 2,
            baseline: advance * 8 / 5,
            em: advance * 8 / 5,
            digit_width: advance * 4 / 5,
            underline_offset: advance * 9 / 5,
            ..Self::new()
        }
    }

    /// Adds a kerning pair.
    #[must_use]
    pub fn with_kerning(mut self, left: char, right: char, adjust: i32) -> Self {
        self.kerning.push((left, right, adjust));
        self
    }

    fn descends(glyph: CodePoint) -> bool {
        char::from_u32(glyph).is_some_and(|c| matches!(c, 'g' | 'j' | 'p' | 'q' | 'y'))
    }

    fn ascent(&self) -> i32 {
        self.baseline * 3 / 4
    }
}

impl Default for TestRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRenderer for TestRenderer {
    fn exists(&self, glyph: CodePoint) -> bool {
        !matches!(glyph, 0x1680 | 0x2000..=0x200B | 0x202F | 0x205F | 0x3000)
    }

    fn advance(&self, _: CodePoint) -> i32 {
        self.advance
    }

    fn size(&self, glyph: CodePoint) -> Size {
        let descent = if Self::descends(glyph) {
            self.height - self.baseline
        } else {
            0
        };
        Size::new(self.advance, self.ascent() + descent)
    }

    fn offset(&self, _: CodePoint) -> Point {
        Point::new(0, -self.ascent())
    }

    fn kerning(&self, left: CodePoint, right: CodePoint) -> i32 {
        self.kerning
            .iter()
            .find(|(l, r, _)| CodePoint::from(*l) == left && CodePoint::from(*r) == right)
            .map_or(0, |(_, _, adjust)| *adjust)
    }

    fn line_gap(&self) -> i32 {
        self.height
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn baseline(&self) -> i32 {
        self.baseline
    }

    fn underline_offset(&self) -> i32 {
        self.underline_offset
    }

    fn line_thickness(&self) -> f32 {
        self.line_thickness
    }

    fn em_size(&self) -> i32 {
        self.em
    }

    fn max_width(&self) -> i32 {
        self.advance
    }

    fn digit_width(&self) -> i32 {
        self.digit_width
    }

    fn render(&self, glyph: CodePoint, target: &mut dyn Surface, location: Point, color: Color) {
        let ink = location + Point::new(0, self.baseline) + self.offset(glyph);
        target.fill_rect(Rect::from_origin_size(ink, self.size(glyph)), color);
    }
}

/// A printer with [`TestRenderer`] fonts: the default font with 10 pixel
/// advances and a bold font with 12 pixel advances.
pub fn test_printer() -> Printer<TestRenderer> {
    let mut printer = Printer::new();
    printer.set_font(NamedFont::Normal, StyledFont::new(TestRenderer::new()));
    printer.set_font(
        NamedFont::Bold,
        StyledFont::new(TestRenderer::with_advance(12)),
    );
    printer
}

/// One drawing operation recorded by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// A filled rectangle.
    Fill {
        /// The rectangle.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// A rectangle outline.
    Border {
        /// The outer edge of the border.
        bounds: Rect,
        /// Border thickness.
        thickness: i32,
        /// Border color.
        color: Color,
    },
    /// An underline or strikethrough.
    Bar {
        /// Left end of the bar, at its top edge.
        origin: Point,
        /// Length of the bar.
        width: i32,
        /// Thickness of the bar.
        thickness: i32,
        /// Bar color.
        color: Color,
    },
    /// An image.
    Image {
        /// The image.
        image: Image,
        /// Where it was drawn.
        bounds: Rect,
        /// The tint applied.
        tint: Color,
        /// How it fills its bounds.
        fit: ImageFit,
    },
}

/// A surface that records every operation.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    /// Recorded operations, in drawing order.
    pub ops: Vec<SurfaceOp>,
    /// Reported as the visible bottom.
    pub visible_bottom: Option<i32>,
}

impl RecordingSurface {
    /// Creates an empty surface without a visible bottom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded bars.
    pub fn bars(&self) -> impl Iterator<Item = &SurfaceOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Bar { .. }))
    }

    /// Recorded images.
    pub fn images(&self) -> impl Iterator<Item = &SurfaceOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Image { .. }))
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.ops.push(SurfaceOp::Fill { bounds, color });
    }

    fn draw_border(&mut self, bounds: Rect, thickness: i32, color: Color) {
        self.ops.push(SurfaceOp::Border {
            bounds,
            thickness,
            color,
        });
    }

    fn draw_bar(&mut self, origin: Point, width: i32, thickness: i32, color: Color) {
        self.ops.push(SurfaceOp::Bar {
            origin,
            width,
            thickness,
            color,
        });
    }

    fn draw_image(&mut self, image: Image, bounds: Rect, tint: Color, fit: ImageFit) {
        self.ops.push(SurfaceOp::Image {
            image,
            bounds,
            tint,
            fit,
        });
    }

    fn visible_bottom(&self) -> Option<i32> {
        self.visible_bottom
    }
}

/// A sample to be used for development.
#[derive(Debug)]
pub struct Sample {
    /// The name of the sample.
    pub name: &'static str,
    /// The text of the sample.
    pub text: &'static str,
}

/// A collection of text samples.
#[derive(Debug)]
pub struct TextSamples {
    /// Short English prose.
    pub latin: Sample,
    /// Words separated by hyphens rather than spaces.
    pub hyphenated: Sample,
    /// Several paragraphs separated by newlines.
    pub paragraphs: Sample,
}

impl TextSamples {
    /// Creates a new collection of text samples.
    pub const fn new() -> Self {
        Self {
            latin: Sample {
                name: "latin",
                text: "The quick brown fox jumps over the lazy dog and keeps running far away.",
            },
            hyphenated: Sample {
                name: "hyphenated",
                text: "state-of-the-art well-known up-to-date",
            },
            paragraphs: Sample {
                name: "paragraphs",
                text: "First paragraph here.\nSecond one follows.\nAnd a third.",
            },
        }
    }
}

impl Default for TextSamples {
    fn default() -> Self {
        Self::new()
    }
}
