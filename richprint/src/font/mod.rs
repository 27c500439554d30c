// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph providers and their style defaults.

mod cascade;

pub(crate) use cascade::{resolve, script_variant};

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;

use peniko::Color;

use crate::geometry::{Point, Size};
use crate::markup::{CodePoint, TextAlign};
use crate::surface::Surface;

/// Metrics and drawing for the glyphs of one font.
///
/// Vertical metrics are measured from the top of the line box. A glyph is
/// placed by the top-left corner of its line box; its ink starts at
/// `location + offset(glyph) + (0, baseline())`.
pub trait GlyphRenderer {
    /// Whether the font has a glyph for the code point.
    fn exists(&self, glyph: CodePoint) -> bool;

    /// Horizontal pen advance of the glyph.
    fn advance(&self, glyph: CodePoint) -> i32;

    /// Size of the glyph's ink.
    fn size(&self, glyph: CodePoint) -> Size;

    /// Offset of the glyph's ink from the pen position on the baseline.
    fn offset(&self, glyph: CodePoint) -> Point;

    /// Kerning adjustment between two consecutive glyphs.
    fn kerning(&self, left: CodePoint, right: CodePoint) -> i32 {
        let _ = (left, right);
        0
    }

    /// Distance between the tops of two consecutive lines.
    fn line_gap(&self) -> i32;

    /// Height of the line box.
    fn height(&self) -> i32;

    /// Distance from the top of the line box to the baseline.
    fn baseline(&self) -> i32;

    /// Distance from the top of the line box to the underline.
    fn underline_offset(&self) -> i32;

    /// Thickness of underline and strikethrough.
    fn line_thickness(&self) -> f32;

    /// Size of the em square.
    fn em_size(&self) -> i32;

    /// Widest advance of any glyph.
    fn max_width(&self) -> i32;

    /// Advance of the widest digit.
    fn digit_width(&self) -> i32;

    /// Draws the glyph with its line box at `location`.
    fn render(&self, glyph: CodePoint, target: &mut dyn Surface, location: Point, color: Color);
}

macro_rules! forward_renderer {
    ($($ptr:ty),*) => {$(
        impl<T: GlyphRenderer + ?Sized> GlyphRenderer for $ptr {
            fn exists(&self, glyph: CodePoint) -> bool {
                (**self).exists(glyph)
            }
            fn advance(&self, glyph: CodePoint) -> i32 {
                (**self).advance(glyph)
            }
            fn size(&self, glyph: CodePoint) -> Size {
                (**self).size(glyph)
            }
            fn offset(&self, glyph: CodePoint) -> Point {
                (**self).offset(glyph)
            }
            fn kerning(&self, left: CodePoint, right: CodePoint) -> i32 {
                (**self).kerning(left, right)
            }
            fn line_gap(&self) -> i32 {
                (**self).line_gap()
            }
            fn height(&self) -> i32 {
                (**self).height()
            }
            fn baseline(&self) -> i32 {
                (**self).baseline()
            }
            fn underline_offset(&self) -> i32 {
                (**self).underline_offset()
            }
            fn line_thickness(&self) -> f32 {
                (**self).line_thickness()
            }
            fn em_size(&self) -> i32 {
                (**self).em_size()
            }
            fn max_width(&self) -> i32 {
                (**self).max_width()
            }
            fn digit_width(&self) -> i32 {
                (**self).digit_width()
            }
            fn render(
                &self,
                glyph: CodePoint,
                target: &mut dyn Surface,
                location: Point,
                color: Color,
            ) {
                (**self).render(glyph, target, location, color);
            }
        }
    )*};
}

forward_renderer!(&T, Box<T>, Rc<T>, Arc<T>);

/// Style a font applies unless the markup overrides it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleDefaults {
    /// Text color.
    pub color: Color,
    /// Whether text is underlined.
    pub underline: bool,
    /// Whether text is struck through.
    pub strike: bool,
    /// Whether wrapped lines are justified.
    pub justify: bool,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Distance between tab positions.
    pub tab_width: i32,
    /// Extra space after every letter.
    pub letter_spacing: i32,
    /// Multiplier applied to the line height to get the line spacing.
    pub line_spacing: f32,
    /// Extra space after each paragraph.
    pub paragraph_spacing: i32,
    /// Distance from the top of the line box to the strikethrough.
    pub strike_position: i32,
}

impl StyleDefaults {
    /// Defaults derived from the renderer's metrics.
    pub fn for_renderer<R: GlyphRenderer + ?Sized>(renderer: &R) -> Self {
        let baseline = renderer.baseline();
        Self {
            color: Color::BLACK,
            underline: false,
            strike: false,
            justify: false,
            align: TextAlign::Left,
            tab_width: 8 * renderer.digit_width().max(1),
            letter_spacing: 0,
            line_spacing: 1.0,
            paragraph_spacing: 0,
            strike_position: baseline - baseline / 3,
        }
    }
}

/// A glyph renderer together with its style defaults.
#[derive(Clone, Debug)]
pub struct StyledFont<R> {
    renderer: R,
    style: StyleDefaults,
}

impl<R: GlyphRenderer> StyledFont<R> {
    /// Wraps a renderer with defaults derived from its metrics.
    pub fn new(renderer: R) -> Self {
        let style = StyleDefaults::for_renderer(&renderer);
        Self { renderer, style }
    }

    /// Wraps a renderer with explicit defaults.
    pub fn with_style(renderer: R, style: StyleDefaults) -> Self {
        Self { renderer, style }
    }

    /// The glyph renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The style defaults.
    pub fn style(&self) -> &StyleDefaults {
        &self.style
    }

    /// Mutable access to the style defaults.
    pub fn style_mut(&mut self) -> &mut StyleDefaults {
        &mut self.style
    }

    /// Sets the default text color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Sets the default alignment.
    #[must_use]
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.style.align = align;
        self
    }

    /// Enables justification by default.
    #[must_use]
    pub fn with_justify(mut self, justify: bool) -> Self {
        self.style.justify = justify;
        self
    }

    /// Sets the default underline.
    #[must_use]
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.style.underline = underline;
        self
    }

    /// Sets the default line spacing multiplier.
    #[must_use]
    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.style.line_spacing = line_spacing;
        self
    }

    /// Sets the default paragraph spacing.
    #[must_use]
    pub fn with_paragraph_spacing(mut self, paragraph_spacing: i32) -> Self {
        self.style.paragraph_spacing = paragraph_spacing;
        self
    }

    /// Sets the default tab width.
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: i32) -> Self {
        self.style.tab_width = tab_width;
        self
    }

    pub(crate) fn line_thickness(&self) -> i32 {
        crate::markup::round(self.renderer.line_thickness()).max(1)
    }
}
