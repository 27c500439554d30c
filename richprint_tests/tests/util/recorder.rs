// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A layout sink that keeps everything it is given.

use core::ops::ControlFlow;

use richprint::{Color, Image, ImageFit, LayoutSink, PositionedGlyph, Rect, Region};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RecordedGlyph {
    pub(crate) glyph: Option<char>,
    pub(crate) font: u8,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) advance: i32,
    pub(crate) color: Color,
    pub(crate) index: usize,
    pub(crate) line_top: i32,
    pub(crate) line_bottom: i32,
    pub(crate) line_end: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RecordedRule {
    pub(crate) start: i32,
    pub(crate) end: i32,
    pub(crate) y: i32,
    pub(crate) thickness: i32,
    pub(crate) color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RecordedBox {
    pub(crate) bounds: Rect,
    pub(crate) background: Color,
    pub(crate) border: i32,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) glyphs: Vec<RecordedGlyph>,
    pub(crate) boxes: Vec<RecordedBox>,
    pub(crate) rules: Vec<RecordedRule>,
    pub(crate) images: Vec<(u8, Image, Rect, Color, ImageFit)>,
    pub(crate) regions: Vec<Region>,
}

impl Recorder {
    /// Glyphs grouped by line, in order.
    pub(crate) fn lines(&self) -> Vec<Vec<&RecordedGlyph>> {
        let mut lines: Vec<Vec<&RecordedGlyph>> = Vec::new();
        for glyph in &self.glyphs {
            match lines.last_mut() {
                Some(line) if line[0].line_top == glyph.line_top => line.push(glyph),
                _ => lines.push(vec![glyph]),
            }
        }
        lines
    }

    /// The drawn characters of every line.
    pub(crate) fn text_lines(&self) -> Vec<String> {
        self.lines()
            .iter()
            .map(|line| line.iter().filter_map(|g| g.glyph).collect())
            .collect()
    }

    /// Right edge of the drawn glyphs of every line.
    pub(crate) fn line_widths(&self) -> Vec<i32> {
        self.lines()
            .iter()
            .map(|line| {
                line.iter()
                    .filter(|g| g.glyph.is_some())
                    .map(|g| g.x + g.advance)
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// The first glyph drawn for `c`.
    pub(crate) fn find(&self, c: char) -> &RecordedGlyph {
        self.glyphs
            .iter()
            .find(|g| g.glyph == Some(c))
            .unwrap_or_else(|| panic!("no glyph for {c:?}"))
    }

    /// Every glyph drawn for `c`.
    pub(crate) fn find_all(&self, c: char) -> Vec<&RecordedGlyph> {
        self.glyphs.iter().filter(|g| g.glyph == Some(c)).collect()
    }
}

impl<R> LayoutSink<R> for Recorder {
    fn glyph(&mut self, glyph: &PositionedGlyph<'_, R>) -> ControlFlow<()> {
        self.glyphs.push(RecordedGlyph {
            glyph: glyph.glyph.and_then(char::from_u32),
            font: glyph.font,
            x: glyph.location.x,
            y: glyph.location.y,
            advance: glyph.advance,
            color: glyph.color,
            index: glyph.index,
            line_top: glyph.line_top,
            line_bottom: glyph.line_bottom,
            line_end: glyph.line_end,
        });
        ControlFlow::Continue(())
    }

    fn fill_box(&mut self, bounds: Rect, background: Color, border: i32, _: Color) {
        self.boxes.push(RecordedBox {
            bounds,
            background,
            border,
        });
    }

    fn rule(&mut self, start: i32, end: i32, y: i32, thickness: i32, color: Color) {
        self.rules.push(RecordedRule {
            start,
            end,
            y,
            thickness,
            color,
        });
    }

    fn image(&mut self, index: u8, image: Image, bounds: Rect, tint: Color, fit: ImageFit) {
        self.images.push((index, image, bounds, tint, fit));
    }
}
