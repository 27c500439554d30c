// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One layout pass over a markup buffer.
//!
//! Glyphs are accumulated for the current line as [`GlyphMark`]s. A line is
//! committed when it overflows the wrap width, at a newline, at the end of a
//! table row and at the end of the text. Committing justifies and aligns the
//! line, reports it to the sink and carries whatever follows the break over
//! to the next line.

mod decode;

use alloc::vec::Vec;

use peniko::Color;
use smallvec::SmallVec;

use super::justify::{self, Justifiable};
use super::spans::{Decorations, OpenSpan, Rule, Selection, SpanStart};
use super::state::{resolve_margin, DecorationState, FormatState};
use super::table::Table;
use super::{align_offset, LayoutSink, PositionedGlyph, Region};
use crate::error::Error;
use crate::font::{GlyphRenderer, StyledFont};
use crate::geometry::{Point, Rect, Size};
use crate::markup::{
    resolve_or, round, CodePoint, Length, MarkupReader, NamedColor, CELL_SEPARATOR,
    COMPLEX_INSTRUCTION, NONCHARACTER, PLACEHOLDER, ROW_SEPARATOR, SIMPLE_INSTRUCTION,
};
use crate::printer::Printer;
use crate::surface::{Image, ImageFit};
use crate::util::{
    default_space_width, is_breaking, is_newline, is_space, is_spaced, starts_paragraph,
    CARRIAGE_RETURN, LINE_FEED, TAB,
};

/// Baseline shift of subscripts as a fraction of the baseline.
const SUBSCRIPT_SHIFT: f32 = -0.3;
/// Baseline shift of superscripts as a fraction of the baseline.
const SUPERSCRIPT_SHIFT: f32 = 0.4;

/// An image placed in the line.
#[derive(Copy, Clone, Debug)]
struct ImageMark {
    index: u8,
    image: Image,
    /// Relative to the top-left corner of the mark's box.
    bounds: Rect,
    advance: i32,
    height: i32,
    baseline: i32,
    tint: Color,
}

#[derive(Copy, Clone, Debug)]
enum MarkKind {
    Glyph { visible: bool },
    Image(ImageMark),
    Placeholder,
    LineEnd,
    TextEnd,
}

struct GlyphMark<'a, R> {
    font: &'a StyledFont<R>,
    font_id: u8,
    code: CodePoint,
    kind: MarkKind,
    /// Pen position.
    x: i32,
    /// Letter offset, applied when the glyph is reported.
    offset: Point,
    advance: i32,
    /// Distance from the top of the glyph's box to its baseline.
    baseline: i32,
    height: i32,
    color: Color,
    index: usize,
}

impl<R> Justifiable for GlyphMark<'_, R> {
    fn code(&self) -> CodePoint {
        self.code
    }

    fn shift(&mut self, dx: i32) {
        self.x += dx;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LineEnd {
    Wrap,
    Newline { paragraph: bool },
    Row,
    Text,
}

/// Where the last line of a wrap ended when nothing was carried past it.
#[derive(Copy, Clone, Debug)]
struct WrappedLine {
    right: i32,
    top: i32,
    bottom: i32,
}

/// Layout state for one query.
pub(crate) struct LayoutPass<'a, R, S> {
    printer: &'a Printer<R>,
    sink: S,
    reader: MarkupReader<'a>,
    state: FormatState,
    font: &'a StyledFont<R>,
    font_id: u8,

    origin: Point,
    base_width: i32,
    wrap_override: Option<Length>,
    wrap_width: i32,
    word_wrap: bool,
    breaking: SmallVec<[CodePoint; 8]>,

    marks: Vec<GlyphMark<'a, R>>,
    line_started: bool,
    /// Whether the current line starts a paragraph.
    paragraph: bool,
    line_left: i32,
    pen_x: i32,
    top: i32,
    wrapped: Option<WrappedLine>,
    last_break: Option<usize>,
    prev: Option<CodePoint>,
    last_advance: i32,
    vertical_space: i32,
    placeholder: Size,

    underline: Decorations,
    strike: Decorations,
    selections: Vec<OpenSpan<Selection>>,
    regions: Vec<OpenSpan<u8>>,
    table: Option<Table>,

    output: Vec<Region>,
    stopped: bool,
}

impl<'a, R: GlyphRenderer, S: LayoutSink<R>> LayoutPass<'a, R, S> {
    pub(crate) fn new(
        printer: &'a Printer<R>,
        markup: &'a [u8],
        origin: Point,
        wrap_width: i32,
        sink: S,
    ) -> Result<Self, Error> {
        let font_id = printer.default_font();
        let font = printer
            .font(font_id)
            .ok_or_else(|| Error::missing_default_font(font_id))?;
        Ok(Self {
            printer,
            sink,
            reader: MarkupReader::new(markup),
            state: FormatState::new(font_id),
            font,
            font_id,
            origin,
            base_width: wrap_width.max(0),
            wrap_override: None,
            wrap_width: wrap_width.max(0),
            word_wrap: true,
            breaking: printer
                .breaking_letters()
                .iter()
                .map(|&c| CodePoint::from(c))
                .collect(),
            marks: Vec::new(),
            line_started: false,
            paragraph: true,
            line_left: origin.x,
            pen_x: origin.x,
            top: origin.y,
            wrapped: None,
            last_break: None,
            prev: None,
            last_advance: 0,
            vertical_space: 0,
            placeholder: Size::ZERO,
            underline: Decorations::default(),
            strike: Decorations::default(),
            selections: Vec::new(),
            regions: Vec::new(),
            table: None,
            output: Vec::new(),
            stopped: false,
        })
    }

    /// Lays out the whole markup, returning the region boundaries.
    pub(crate) fn run(mut self) -> Vec<Region> {
        while let Some(c) = self.reader.next() {
            let index = self.reader.index() - 1;
            self.step(c, index);
            if self.stopped {
                log::trace!("layout stopped at code point {index}");
                return self.output;
            }
        }
        let total = self.reader.index();
        if let Some(line) = self.wrapped.filter(|_| self.marks.is_empty() && !self.line_started) {
            // The text ended exactly at a wrap: close the wrapped line.
            self.end_wrapped_line(line, total);
            return self.output;
        }
        self.push_mark(0, MarkKind::TextEnd, 0, total);
        let end = self.marks.len();
        self.commit(end, LineEnd::Text);
        self.output
    }

    fn end_wrapped_line(&mut self, line: WrappedLine, total: usize) {
        let font = self.font;
        let marker = PositionedGlyph {
            renderer: font.renderer(),
            font: self.font_id,
            glyph: None,
            location: Point::new(line.right, line.top),
            color: self.state.color.unwrap_or(font.style().color),
            index: total,
            advance: 0,
            line_top: line.top,
            line_bottom: line.bottom,
            line_end: true,
            wrapped: true,
        };
        // Nothing follows the marker.
        let _ = self.sink.glyph(&marker);
    }

    fn step(&mut self, c: CodePoint, index: usize) {
        match c {
            NONCHARACTER => {}
            COMPLEX_INSTRUCTION => self.complex(index),
            SIMPLE_INSTRUCTION => self.simple(),
            CARRIAGE_RETURN if self.reader.peek() == Some(LINE_FEED) => {}
            ROW_SEPARATOR => self.end_row(),
            CELL_SEPARATOR => self.next_cell(),
            PLACEHOLDER => {
                let width = self.placeholder.width;
                self.push_mark(c, MarkKind::Placeholder, width, index);
                self.check_wrap();
            }
            _ if self.legacy(c) => {}
            _ if is_newline(c) => {
                self.push_mark(c, MarkKind::LineEnd, 0, index);
                let reason = if self.table.is_some() {
                    LineEnd::Row
                } else {
                    LineEnd::Newline {
                        paragraph: starts_paragraph(c),
                    }
                };
                let end = self.marks.len();
                self.commit(end, reason);
            }
            _ => self.place(c, index),
        }
    }

    /// Places the pen at the start of a line the first time something is
    /// added to it.
    fn begin_line(&mut self) {
        if self.line_started {
            return;
        }
        self.line_started = true;
        self.line_left = match &self.table {
            Some(table) => table.cell_left(),
            None => {
                let hanging = if self.paragraph {
                    self.state.hanging_indent
                } else {
                    0
                };
                self.origin.x + self.state.indent + hanging
            }
        };
        self.pen_x = self.line_left;
    }

    /// Resolves the font for the current state.
    fn switch_font(&mut self) {
        let requested = self.state.font;
        let id = if self.state.is_script() {
            self.printer.resolve_script_font(requested)
        } else {
            self.printer.resolve_font(requested)
        };
        if let Some(font) = self.printer.font(id) {
            if !core::ptr::eq(font, self.font) {
                if font.renderer().baseline() != self.font.renderer().baseline() {
                    // No kerning across sizes.
                    self.prev = None;
                }
                let at = self.marks.len();
                self.underline.close(at);
                self.strike.close(at);
            }
            self.font = font;
            self.font_id = id;
        }
        self.update_wrap_width();
    }

    fn update_wrap_width(&mut self) {
        let em = self.font.renderer().em_size();
        self.wrap_width = self
            .wrap_override
            .map_or(self.base_width, |width| width.resolve(em).max(0));
    }

    fn letter_spacing(&self) -> i32 {
        let font = self.font;
        resolve_or(
            self.state.letter_spacing,
            font.renderer().em_size(),
            font.style().letter_spacing,
        )
    }

    /// Distance from the pen to the next tab stop, or to the next multiple
    /// of the tab width when no stop is to the right.
    fn tab_advance(&self) -> i32 {
        let font = self.font;
        let em = font.renderer().em_size();
        let offset = self.pen_x - self.origin.x;
        let stop = self
            .state
            .tab_stops
            .iter()
            .map(|(_, position)| position.resolve_with(em, self.wrap_width))
            .filter(|&position| position > offset)
            .min();
        let target = stop.unwrap_or_else(|| {
            let width = self.state.tab_width.unwrap_or(font.style().tab_width).max(1);
            (offset.div_euclid(width) + 1) * width
        });
        target - offset
    }

    fn place(&mut self, c: CodePoint, index: usize) {
        self.begin_line();
        if is_breaking(c) {
            self.last_break = Some(self.marks.len());
        }
        let renderer = self.font.renderer();
        let (advance, visible) = if c == TAB {
            (self.tab_advance(), false)
        } else if is_space(c) && !renderer.exists(c) {
            let width = default_space_width(c, renderer.em_size(), renderer.digit_width());
            (width, false)
        } else {
            (renderer.advance(c), true)
        };
        if c != TAB {
            if let Some(prev) = self.prev {
                let mut space = renderer.kerning(prev, c);
                if is_spaced(c) {
                    space += self.letter_spacing();
                } else {
                    // Combining marks are drawn over the previous glyph.
                    space -= self.last_advance;
                }
                self.pen_x += space;
            }
        }
        self.push_mark(c, MarkKind::Glyph { visible }, advance, index);
        self.check_wrap();
        if self.breaking.contains(&c) {
            self.last_break = Some(self.marks.len());
        }
    }

    fn place_space(&mut self, width: i32, index: usize) {
        self.push_mark(0, MarkKind::Glyph { visible: false }, width, index);
        self.check_wrap();
    }

    fn place_image(&mut self, image: ImageMark, index: usize) {
        self.push_mark(PLACEHOLDER, MarkKind::Image(image), image.advance, index);
        self.check_wrap();
    }

    fn push_mark(&mut self, code: CodePoint, kind: MarkKind, advance: i32, index: usize) {
        self.begin_line();
        let font = self.font;
        let renderer = font.renderer();
        let em = renderer.em_size();
        let (mut baseline, height) = match kind {
            MarkKind::Image(image) => (image.baseline, image.height),
            MarkKind::Placeholder => (self.placeholder.height, self.placeholder.height),
            _ => (renderer.baseline(), renderer.height()),
        };
        if self.state.is_script() {
            baseline = round(baseline as f32 * (1. + self.state.baseline_offset));
        }
        let offset = Point::new(
            resolve_or(self.state.letter_offset[0], em, 0),
            resolve_or(self.state.letter_offset[1], em, 0),
        );
        let mut color = self.state.color.unwrap_or(font.style().color);
        if let Some(text) = self
            .selections
            .iter()
            .rev()
            .find(|s| s.is_open())
            .and_then(|s| s.data.text)
        {
            color = text;
        }
        let at = self.marks.len();
        self.decorate(at, code, kind, baseline, offset.y, color);
        self.marks.push(GlyphMark {
            font,
            font_id: self.font_id,
            code,
            kind,
            x: self.pen_x,
            offset,
            advance,
            baseline,
            height,
            color,
            index,
        });
        self.pen_x += advance;
        self.prev = Some(code);
        self.last_advance = advance;
    }

    /// Opens, continues or closes underline and strikethrough for the glyph
    /// about to be added at `at`.
    fn decorate(
        &mut self,
        at: usize,
        code: CodePoint,
        kind: MarkKind,
        baseline: i32,
        shift: i32,
        color: Color,
    ) {
        let font = self.font;
        let renderer = font.renderer();
        let style = font.style();
        let thickness = font.line_thickness();
        let height = renderer.height();
        let descends = matches!(kind, MarkKind::Glyph { visible: true })
            && renderer.offset(code).y + renderer.size(code).height > 0;

        let underline = &self.state.underline;
        if covers(underline, style.underline, code, kind, descends) {
            let offset = resolve_or(underline.offset, height, renderer.underline_offset()) + shift;
            let rule = decoration_rule(underline, thickness, offset, color);
            self.underline.cover(at, rule, offset - baseline);
        } else {
            self.underline.close(at);
        }

        let strike = &self.state.strike;
        if covers(strike, style.strike, code, kind, false) {
            let offset = resolve_or(strike.offset, height, style.strike_position) + shift;
            let rule = decoration_rule(strike, thickness, offset, color);
            self.strike.cover(at, rule, offset - baseline);
        } else {
            self.strike.close(at);
        }
    }

    fn start_selection(&mut self) {
        let font = self.font;
        let style = &self.state.selection;
        let text = self.state.color.unwrap_or(font.style().color);
        let (background, image) = match style.background {
            Some(background) => (background, None),
            None => match self.printer.color(NamedColor::Selection.index()) {
                Some(pair) => (pair.background, style.image),
                None => (text.multiply_alpha(0.2), style.image),
            },
        };
        let selection = Selection {
            text: style.text,
            background,
            no_background: style.no_background,
            image,
            padding: resolve_margin(&style.padding, font.renderer().em_size()),
        };
        self.selections
            .push(OpenSpan::new(self.marks.len(), selection));
    }

    fn end_selection(&mut self) {
        let at = self.marks.len();
        if let Some(selection) = self.selections.iter_mut().rev().find(|s| s.is_open()) {
            selection.end = Some(at);
        }
    }

    fn check_wrap(&mut self) {
        if !self.word_wrap || self.wrap_width <= 0 || self.table.is_some() {
            return;
        }
        if self.pen_x <= self.origin.x + self.wrap_width {
            return;
        }
        let mut end = match self.last_break {
            Some(at) if at > 0 => at,
            _ => {
                log::trace!("no break opportunity, breaking at glyph {}", self.marks.len());
                // Keep at least one glyph on the line.
                if self.marks.len() <= 1 {
                    self.marks.len()
                } else {
                    self.marks.len() - 1
                }
            }
        };
        while end > 0 && is_space(self.marks[end - 1].code) {
            end -= 1;
        }
        self.commit(end, LineEnd::Wrap);
    }

    /// Ends the line whatever it holds, without starting a paragraph.
    fn finish_line(&mut self, reason: LineEnd) {
        if self.line_started || !self.marks.is_empty() {
            let end = self.marks.len();
            self.commit(end, reason);
        }
    }

    fn end_row(&mut self) {
        if self.table.is_some() {
            self.begin_line();
            let end = self.marks.len();
            self.commit(end, LineEnd::Row);
        }
    }

    fn next_cell(&mut self) {
        let first = self.marks.len();
        let Some(table) = &mut self.table else {
            return;
        };
        table.next_cell(first);
        let left = table.cell_left();
        self.begin_line();
        self.pen_x = self.pen_x.max(left);
        self.prev = None;
        self.last_break = None;
    }

    fn begin_table(&mut self, table: Table) {
        self.finish_line(LineEnd::Newline { paragraph: false });
        self.table = Some(table);
    }

    fn end_table(&mut self) {
        if self.table.is_some() {
            self.finish_line(LineEnd::Row);
            self.table = None;
            self.line_started = false;
        }
    }

    /// Reports the glyphs before `content_end` as one line and moves on to
    /// the next.
    fn commit(&mut self, content_end: usize, reason: LineEnd) {
        let font = self.font;
        let style = font.style();
        let renderer = font.renderer();

        // Spaces after the break belong to the line without being drawn.
        let mut cut = content_end;
        if reason == LineEnd::Wrap {
            while cut < self.marks.len() && {
                let c = self.marks[cut].code;
                is_space(c) || c == TAB
            } {
                cut += 1;
            }
        } else {
            cut = self.marks.len();
        }

        let line = &self.marks[..cut];
        let (baseline, content_height) = if line.is_empty() {
            (renderer.baseline(), renderer.height())
        } else {
            let baseline = line.iter().map(|m| m.baseline).max().unwrap_or(0);
            let height = line
                .iter()
                .map(|m| baseline - m.baseline + m.height)
                .max()
                .unwrap_or(0);
            (baseline, height)
        };
        let spacing = match self.state.line_spacing {
            Some(spacing) => spacing.resolve(content_height),
            None => {
                let leading = (renderer.line_gap() - renderer.height()).max(0);
                round(style.line_spacing * (content_height + leading) as f32)
            }
        };
        let top = self.top;
        let bottom = top + spacing;

        let content_right = |marks: &[GlyphMark<'a, R>], fallback: i32| {
            marks[..content_end]
                .last()
                .map_or(fallback, |m| m.x + m.advance)
        };

        let justify = self.state.justify.unwrap_or(style.justify);
        if reason == LineEnd::Wrap && justify && self.wrap_width > 0 && self.table.is_none() {
            let target = self.origin.x + self.wrap_width - content_right(&self.marks, self.line_left);
            let (spaces, gaps) = justify::count(&self.marks[..content_end]);
            if let Some(plan) =
                justify::plan(spaces, gaps, target, renderer.digit_width(), renderer.height())
            {
                plan.apply(&mut self.marks[..content_end]);
            }
        }

        let mut xoff = 0;
        if let Some(table) = &self.table {
            align_cells(table, &mut self.marks[..cut]);
        } else if self.wrap_width > 0 {
            let align = self.state.align.unwrap_or(style.align);
            let used = content_right(&self.marks, self.line_left) - self.origin.x;
            xoff = align_offset(align, self.wrap_width, used);
        }
        for mark in &mut self.marks[..cut] {
            mark.x += xoff;
        }
        let line_left = self.line_left + xoff;
        let line_right = content_right(&self.marks, line_left);

        // Boxes
        let line_thickness = font.line_thickness();
        let border_color = self.state.border_color.unwrap_or(style.color);
        if self.state.show_background || self.state.show_border {
            let padding = resolve_margin(&self.state.padding, renderer.em_size());
            let bounds = Rect::new(line_left, top, line_right, bottom).inflate(padding);
            let background = match self.state.background {
                Some(color) if self.state.show_background => color,
                _ => Color::TRANSPARENT,
            };
            let border = if self.state.show_border {
                resolve_or(self.state.border_thickness, line_thickness, line_thickness)
            } else {
                0
            };
            self.sink.fill_box(bounds, background, border, border_color);
        }
        if let Some(table) = self.table.as_ref().filter(|t| t.outer_border) {
            for cell in table.cells() {
                let (left, width) = table.extent(cell);
                let bounds = Rect::new(left, top, left + width, bottom);
                self.sink
                    .fill_box(bounds, Color::TRANSPARENT, line_thickness, border_color);
            }
        }

        // Selections
        let first_x = if content_end > 0 {
            self.marks[0].x
        } else {
            line_left
        };
        for selection in &self.selections {
            let left = match selection.start {
                SpanStart::Glyph(i) if i < content_end => self.marks[i].x,
                SpanStart::Glyph(_) => continue,
                SpanStart::Continued => first_x,
            };
            let right = selection
                .end_glyph(content_end)
                .map_or(line_right, |end| self.marks[end].x);
            let data = selection.data;
            if right < left || data.no_background {
                continue;
            }
            let bounds = Rect::new(left, top, right, bottom).inflate(data.padding);
            match data.image {
                Some(index) => match self.printer.image(index) {
                    Some(image) => {
                        self.sink
                            .image(index, image, bounds, Color::WHITE, ImageFit::Tile);
                    }
                    None => log::debug!("selection image {index} is not registered"),
                },
                None => self
                    .sink
                    .fill_box(bounds, data.background, 0, Color::TRANSPARENT),
            }
        }

        // Glyphs, then the trailing run past a wrap, undrawn.
        for (i, mark) in self.marks[..cut].iter().enumerate() {
            let location = Point::new(
                mark.x + mark.offset.x,
                top + baseline - mark.baseline + mark.offset.y,
            );
            let wrapped = i >= content_end;
            let (glyph, line_end) = match mark.kind {
                MarkKind::Glyph { visible } => ((visible && !wrapped).then_some(mark.code), false),
                MarkKind::Image(image) => {
                    let bounds = Rect::from_origin_size(
                        location + image.bounds.origin(),
                        image.bounds.size(),
                    );
                    self.sink.image(
                        image.index,
                        image.image,
                        bounds,
                        image.tint,
                        ImageFit::Stretch,
                    );
                    (None, false)
                }
                MarkKind::Placeholder => (None, false),
                MarkKind::LineEnd | MarkKind::TextEnd => (None, true),
            };
            let positioned = PositionedGlyph {
                renderer: mark.font.renderer(),
                font: mark.font_id,
                glyph,
                location,
                color: mark.color,
                index: mark.index,
                advance: mark.advance,
                line_top: top,
                line_bottom: bottom,
                line_end,
                wrapped,
            };
            if self.sink.glyph(&positioned).is_break() {
                self.stopped = true;
                return;
            }
        }

        // Regions
        for region in &self.regions {
            let left = match region.start {
                SpanStart::Glyph(i) if i >= cut => continue,
                SpanStart::Glyph(i) if i < content_end => self.marks[i].x,
                SpanStart::Glyph(_) => line_right,
                SpanStart::Continued => line_left,
            };
            let right = region
                .end_glyph(content_end)
                .map_or(line_right, |end| self.marks[end].x);
            self.output.push(Region {
                id: region.data,
                bounds: Rect::new(left, top, right.max(left), bottom),
            });
        }

        // Rules
        for decorations in [&self.underline, &self.strike] {
            for span in &decorations.spans {
                let Some(first) = span.first_glyph(cut).filter(|&i| i < content_end) else {
                    continue;
                };
                let mark = &self.marks[first];
                let left = mark.x;
                let right = match span.end_glyph(content_end) {
                    Some(end) if span.data.gaps => self.marks[end].x,
                    Some(end) => {
                        let last = &self.marks[end.max(1) - 1];
                        last.x + last.advance
                    }
                    None => line_right,
                };
                let y = top + baseline - mark.baseline + span.data.offset;
                if right > left {
                    self.sink
                        .rule(left, right, y, span.data.thickness, span.data.color);
                }
            }
        }

        let run_right = self.marks[..cut]
            .last()
            .map_or(line_right, |m| m.x + m.advance);
        let carried_nothing = reason == LineEnd::Wrap && cut == self.marks.len();
        self.wrapped = carried_nothing.then_some(WrappedLine {
            right: run_right.max(line_right),
            top,
            bottom,
        });

        // Carry what is left over to the next line.
        self.selections.retain_mut(|s| s.carry(cut));
        self.regions.retain_mut(|r| r.carry(cut));
        self.underline.spans.retain_mut(|s| s.carry(cut));
        self.strike.spans.retain_mut(|s| s.carry(cut));
        self.marks.drain(..cut);

        let paragraph = matches!(reason, LineEnd::Newline { paragraph: true });
        self.top = bottom + core::mem::take(&mut self.vertical_space);
        if paragraph {
            self.top += resolve_or(
                self.state.paragraph_spacing,
                content_height,
                style.paragraph_spacing,
            );
        }
        self.paragraph = paragraph;
        self.last_break = None;
        self.line_started = false;
        if reason == LineEnd::Row {
            if let Some(table) = &mut self.table {
                table.start_row();
            }
        }

        if self.marks.is_empty() {
            self.prev = None;
        } else {
            self.begin_line();
            let dx = self.line_left - self.marks[0].x;
            for mark in &mut self.marks {
                mark.x += dx;
            }
            if let Some(last) = self.marks.last() {
                self.pen_x = last.x + last.advance;
            }
        }
    }
}

fn covers(
    decoration: &DecorationState,
    default: bool,
    code: CodePoint,
    kind: MarkKind,
    descends: bool,
) -> bool {
    if !decoration.enabled.unwrap_or(default) {
        return false;
    }
    let settings = decoration.settings;
    match kind {
        MarkKind::Glyph { .. } if code == TAB => settings.tabs,
        MarkKind::Glyph { .. } if is_space(code) => settings.spaces,
        MarkKind::Glyph { .. } => settings.descenders || !descends,
        MarkKind::Image(_) | MarkKind::Placeholder => settings.placeholders,
        MarkKind::LineEnd | MarkKind::TextEnd => false,
    }
}

fn decoration_rule(
    decoration: &DecorationState,
    line_thickness: i32,
    offset: i32,
    color: Color,
) -> Rule {
    Rule {
        thickness: resolve_or(decoration.thickness, line_thickness, line_thickness).max(1),
        offset,
        color: decoration.color.unwrap_or(color),
        gaps: decoration.settings.gaps,
    }
}

/// Aligns the content of every cell of a table row within its columns.
fn align_cells<R>(table: &Table, marks: &mut [GlyphMark<'_, R>]) {
    let cells = table.cells();
    for (i, cell) in cells.iter().enumerate() {
        let end = cells
            .get(i + 1)
            .map_or(marks.len(), |next| next.first)
            .min(marks.len());
        let start = cell.first.min(end);
        let run = &mut marks[start..end];
        let Some(last) = run.last() else {
            continue;
        };
        let (left, width) = table.extent(cell);
        let offset = align_offset(cell.align, width, last.x + last.advance - left);
        for mark in run {
            mark.x += offset;
        }
    }
}
