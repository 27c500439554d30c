// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout sinks behind the [`Printer`](crate::Printer) queries.

use core::ops::ControlFlow;

use peniko::Color;

use crate::font::GlyphRenderer;
use crate::geometry::{Point, Rect, Size};
use crate::layout::{LayoutSink, PositionedGlyph};
use crate::surface::{Image, ImageFit, Surface};

/// Renders everything onto a surface.
#[derive(Debug)]
pub(crate) struct DrawSink<'s, S> {
    surface: &'s mut S,
    bottom: Option<i32>,
}

impl<'s, S: Surface> DrawSink<'s, S> {
    pub(crate) fn new(surface: &'s mut S) -> Self {
        let bottom = surface.visible_bottom();
        Self { surface, bottom }
    }
}

impl<R: GlyphRenderer, S: Surface> LayoutSink<R> for DrawSink<'_, S> {
    fn glyph(&mut self, glyph: &PositionedGlyph<'_, R>) -> ControlFlow<()> {
        if self.bottom.is_some_and(|bottom| glyph.line_top > bottom) {
            return ControlFlow::Break(());
        }
        if let Some(code) = glyph.glyph {
            glyph
                .renderer
                .render(code, &mut *self.surface, glyph.location, glyph.color);
        }
        ControlFlow::Continue(())
    }

    fn fill_box(&mut self, bounds: Rect, background: Color, border: i32, border_color: Color) {
        if background.components[3] > 0. {
            self.surface.fill_rect(bounds, background);
        }
        if border > 0 {
            self.surface.draw_border(bounds, border, border_color);
        }
    }

    fn rule(&mut self, start: i32, end: i32, y: i32, thickness: i32, color: Color) {
        self.surface
            .draw_bar(Point::new(start, y), end - start, thickness, color);
    }

    fn image(&mut self, _: u8, image: Image, bounds: Rect, tint: Color, fit: ImageFit) {
        self.surface.draw_image(image, bounds, tint, fit);
    }
}

/// Collects the extent of the laid out text.
#[derive(Debug, Default)]
pub(crate) struct MeasureSink {
    right: i32,
    bottom: i32,
}

impl MeasureSink {
    pub(crate) fn size(&self) -> Size {
        Size::new(self.right, self.bottom)
    }
}

impl<R> LayoutSink<R> for MeasureSink {
    fn glyph(&mut self, glyph: &PositionedGlyph<'_, R>) -> ControlFlow<()> {
        if !glyph.wrapped {
            self.right = self.right.max(glyph.location.x + glyph.advance);
        }
        self.bottom = self.bottom.max(glyph.line_bottom);
        ControlFlow::Continue(())
    }

    fn image(&mut self, _: u8, _: Image, bounds: Rect, _: Color, _: ImageFit) {
        self.right = self.right.max(bounds.right);
    }
}

/// Finds the code point index under a point.
#[derive(Debug)]
pub(crate) struct HitTestSink {
    point: Point,
    index: usize,
    line_top: Option<i32>,
}

impl HitTestSink {
    pub(crate) fn new(point: Point) -> Self {
        Self {
            point,
            index: 0,
            line_top: None,
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }
}

impl<R> LayoutSink<R> for HitTestSink {
    fn glyph(&mut self, glyph: &PositionedGlyph<'_, R>) -> ControlFlow<()> {
        if self.point.y >= glyph.line_bottom {
            // Below this line: anything further down wins.
            self.index = glyph.index + usize::from(!glyph.line_end);
            return ControlFlow::Continue(());
        }
        match self.line_top {
            Some(top) if top != glyph.line_top => return ControlFlow::Break(()),
            _ => self.line_top = Some(glyph.line_top),
        }
        let before_middle = self.point.x < glyph.location.x + glyph.advance / 2;
        if glyph.line_end || glyph.wrapped || before_middle {
            self.index = glyph.index;
            return ControlFlow::Break(());
        }
        self.index = glyph.index + 1;
        ControlFlow::Continue(())
    }
}

/// Finds the bounds of the glyph at a code point index.
#[derive(Debug)]
pub(crate) struct LocateSink {
    target: usize,
    bounds: Option<Rect>,
}

impl LocateSink {
    pub(crate) fn new(target: usize) -> Self {
        Self {
            target,
            bounds: None,
        }
    }

    pub(crate) fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

impl<R> LayoutSink<R> for LocateSink {
    fn glyph(&mut self, glyph: &PositionedGlyph<'_, R>) -> ControlFlow<()> {
        if glyph.index < self.target {
            return ControlFlow::Continue(());
        }
        self.bounds = Some(Rect::new(
            glyph.location.x,
            glyph.line_top,
            glyph.location.x + glyph.advance,
            glyph.line_bottom,
        ));
        ControlFlow::Break(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::CodePoint;

    struct Unit;

    fn glyph(
        index: usize,
        x: i32,
        line_top: i32,
        line_end: bool,
    ) -> PositionedGlyph<'static, Unit> {
        PositionedGlyph {
            renderer: &Unit,
            font: 0,
            glyph: (!line_end).then_some('a' as CodePoint),
            location: Point::new(x, line_top),
            color: Color::BLACK,
            index,
            advance: if line_end { 0 } else { 10 },
            line_top,
            line_bottom: line_top + 20,
            line_end,
            wrapped: false,
        }
    }

    fn hit(point: Point, glyphs: &[PositionedGlyph<'_, Unit>]) -> usize {
        let mut sink = HitTestSink::new(point);
        for g in glyphs {
            if LayoutSink::<Unit>::glyph(&mut sink, g).is_break() {
                break;
            }
        }
        sink.index()
    }

    #[test]
    fn hit_test_picks_nearest_edge() {
        let line = [
            glyph(0, 0, 0, false),
            glyph(1, 10, 0, false),
            glyph(2, 20, 0, true),
        ];
        assert_eq!(hit(Point::new(3, 5), &line), 0);
        assert_eq!(hit(Point::new(7, 5), &line), 1);
        assert_eq!(hit(Point::new(500, 5), &line), 2);
    }

    #[test]
    fn hit_test_below_text_gives_end() {
        let line = [glyph(0, 0, 0, false), glyph(1, 10, 0, true)];
        assert_eq!(hit(Point::new(0, 100), &line), 1);
    }

    #[test]
    fn hit_test_past_wrapped_line_stops_at_trailing_space() {
        let mut space = glyph(2, 20, 0, false);
        space.wrapped = true;
        let lines = [
            glyph(0, 0, 0, false),
            glyph(1, 10, 0, false),
            space,
            glyph(3, 0, 20, false),
        ];
        assert_eq!(hit(Point::new(500, 5), &lines), 2);
    }

    #[test]
    fn measure_ignores_trailing_run() {
        let mut sink = MeasureSink::default();
        let mut space = glyph(1, 10, 0, false);
        space.wrapped = true;
        for g in [glyph(0, 0, 0, false), space] {
            let _ = LayoutSink::<Unit>::glyph(&mut sink, &g);
        }
        assert_eq!(sink.size(), Size::new(10, 20));
    }

    #[test]
    fn locate_skips_earlier_glyphs() {
        let mut sink = LocateSink::new(1);
        let line = [glyph(0, 0, 0, false), glyph(1, 10, 0, false)];
        for g in &line {
            if LayoutSink::<Unit>::glyph(&mut sink, g).is_break() {
                break;
            }
        }
        assert_eq!(sink.bounds(), Some(Rect::new(10, 0, 20, 20)));
    }
}
