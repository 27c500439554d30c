// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instruction decoding.
//!
//! Instructions mutate the formatting state directly. Anything that needs
//! the rest of the pass (placing marks, switching fonts, committing lines)
//! is deferred until the parameters have been read.

use peniko::Color;
use smallvec::SmallVec;

use super::{ImageMark, LayoutPass, SUBSCRIPT_SHIFT, SUPERSCRIPT_SHIFT};
use crate::font::{GlyphRenderer, StyledFont};
use crate::geometry::{Margin, Point, Rect, Size};
use crate::layout::spans::OpenSpan;
use crate::layout::state::{DecorationState, FormatState};
use crate::layout::table::{ColumnSpec, Table};
use crate::layout::LayoutSink;
use crate::markup::{
    align_from_index, complex, legacy, selection_bits, simple, CodePoint, HeaderLevel,
    LineSettings, NamedFont, Params, TextAlign, VerticalAlign, ROW_SEPARATOR, SELECTION_END,
    SELECTION_START,
};
use crate::printer::Printer;

/// Scale of relative words given in percent.
const PERCENT: f32 = 0.01;

/// Work left for after the parameters have been consumed.
enum Followup {
    None,
    Font,
    WrapWidth,
    Image(ImageMark),
    Space(i32),
    VerticalSpace(i32),
    Table(Table),
}

/// Looks up a color table entry, replacing its alpha when given.
fn table_color<R: GlyphRenderer>(
    printer: &Printer<R>,
    index: Option<u8>,
    alpha: Option<u8>,
    background: bool,
) -> Option<Color> {
    let index = index?;
    let Some(pair) = printer.color(index) else {
        log::debug!("color {index} is not registered");
        return None;
    };
    let color = if background {
        pair.background
    } else {
        pair.foreground
    };
    Some(match alpha {
        Some(alpha) => color.with_alpha(f32::from(alpha) / 255.),
        None => color,
    })
}

fn indexed_color<R: GlyphRenderer>(
    printer: &Printer<R>,
    params: &mut Params<'_, '_>,
    background: bool,
) -> Option<Color> {
    let index = params.index();
    let alpha = params.alpha();
    table_color(printer, index, alpha, background)
}

fn read_settings(params: &mut Params<'_, '_>, decoration: &mut DecorationState) {
    let mode = params.index().unwrap_or(0);
    if mode == 0 {
        decoration.settings = LineSettings::default();
        decoration.thickness = None;
        return;
    }
    if mode & 0b1 != 0 {
        decoration.settings = LineSettings::from_bits(params.index().unwrap_or(0));
    }
    if mode & 0b10 != 0 {
        decoration.thickness = params.length(PERCENT);
    }
}

/// `value * num / den`, rounded towards zero.
fn scale(value: i32, num: i32, den: i32) -> i32 {
    if den == 0 {
        return value;
    }
    let scaled = i64::from(value) * i64::from(num) / i64::from(den);
    i32::try_from(scaled).unwrap_or(i32::MAX)
}

impl<'a, R: GlyphRenderer, S: LayoutSink<R>> LayoutPass<'a, R, S> {
    /// Handles the command following a simple instruction introducer.
    pub(super) fn simple(&mut self) {
        let Some(command) = self.reader.next() else {
            return;
        };
        let state = &mut self.state;
        match command {
            simple::SHOW_BACKGROUND => state.show_background = true,
            simple::REMOVE_BACKGROUND => state.show_background = false,
            simple::SHOW_BORDER => state.show_border = true,
            simple::REMOVE_BORDER => state.show_border = false,
            simple::RESET_FORMATTING => {
                state.reset(self.printer.default_font());
                self.switch_font();
            }
            simple::SUBSCRIPT | simple::SUPERSCRIPT | simple::SCRIPT_OFF => {
                state.baseline_offset = match command {
                    simple::SUBSCRIPT => SUBSCRIPT_SHIFT,
                    simple::SUPERSCRIPT => SUPERSCRIPT_SHIFT,
                    _ => 0.,
                };
                self.switch_font();
            }
            simple::UNDERLINE => state.underline.enabled = Some(true),
            simple::UNDERLINE_OFF => state.underline.enabled = Some(false),
            simple::DEFAULT_UNDERLINE => state.underline.enabled = None,
            simple::STRIKE => state.strike.enabled = Some(true),
            simple::STRIKE_OFF => state.strike.enabled = Some(false),
            simple::DEFAULT_STRIKE => state.strike.enabled = None,
            simple::JUSTIFY => state.justify = Some(true),
            simple::JUSTIFY_OFF => state.justify = Some(false),
            simple::ALIGN_LEFT => state.align = Some(TextAlign::Left),
            simple::ALIGN_RIGHT => state.align = Some(TextAlign::Right),
            simple::ALIGN_CENTER => state.align = Some(TextAlign::Center),
            simple::ALIGN_TOP => state.vertical_align = VerticalAlign::Top,
            simple::ALIGN_MIDDLE => state.vertical_align = VerticalAlign::Middle,
            simple::ALIGN_BOTTOM => state.vertical_align = VerticalAlign::Bottom,
            simple::ALIGN_BASELINE => state.vertical_align = VerticalAlign::Baseline,
            simple::DEFAULT_ALIGN => {
                state.align = None;
                state.justify = None;
            }
            simple::WRAP => self.word_wrap = true,
            simple::WRAP_OFF => self.word_wrap = false,
            simple::END_TABLE => self.end_table(),
            _ => log::trace!("ignoring unknown simple instruction {command:#x}"),
        }
    }

    /// Handles a complex instruction. `index` is the position of its
    /// introducer.
    pub(super) fn complex(&mut self, index: usize) {
        let Some(command) = self.reader.next() else {
            return;
        };
        let printer = self.printer;
        let font = self.font;
        let renderer = font.renderer();
        let em = renderer.em_size();
        let height = renderer.height();
        let wrap_width = self.wrap_width;
        let at = self.marks.len();

        let mut params = Params::new(&mut self.reader);
        let state = &mut self.state;
        let mut followup = Followup::None;
        match command {
            complex::COLOR_INDEX => state.color = indexed_color(printer, &mut params, false),
            complex::COLOR => state.color = Some(params.color()),
            complex::BACKGROUND_INDEX => {
                state.background = indexed_color(printer, &mut params, true);
            }
            complex::BACKGROUND => state.background = Some(params.color()),
            complex::BORDER_INDEX => {
                state.border_color = indexed_color(printer, &mut params, false);
            }
            complex::BORDER => state.border_color = Some(params.color()),
            complex::TINT_INDEX => state.tint = indexed_color(printer, &mut params, false),
            complex::TINT => state.tint = Some(params.color()),
            complex::UNDERLINE_COLOR_INDEX => {
                state.underline.color = indexed_color(printer, &mut params, false);
            }
            complex::UNDERLINE_COLOR => state.underline.color = Some(params.color()),
            complex::STRIKE_COLOR_INDEX => {
                state.strike.color = indexed_color(printer, &mut params, false);
            }
            complex::STRIKE_COLOR => state.strike.color = Some(params.color()),
            complex::BORDER_THICKNESS => state.border_thickness = params.length(PERCENT),
            complex::PADDING => state.padding = params.margin(PERCENT),
            complex::PARAGRAPH_SPACING => state.paragraph_spacing = params.length(PERCENT),
            complex::LINE_SPACING => state.line_spacing = params.length(PERCENT),
            complex::INDENT => {
                state.indent = params.length(PERCENT).map_or(0, |len| len.resolve(em));
            }
            complex::HANGING_INDENT => {
                state.hanging_indent = params.length(PERCENT).map_or(0, |len| len.resolve(em));
            }
            complex::LETTER_SPACING => state.letter_spacing = params.length(PERCENT),
            complex::WRAP_WIDTH => {
                self.wrap_override = params.length(1.);
                followup = Followup::WrapWidth;
            }
            complex::IMAGE => {
                if let Some(image) = read_image(&mut params, printer, font, state, wrap_width) {
                    followup = Followup::Image(image);
                }
            }
            complex::SELECTION => read_selection(&mut params, printer, state),
            complex::UNDERLINE_OFFSET => state.underline.offset = params.length(PERCENT),
            complex::STRIKE_OFFSET => state.strike.offset = params.length(PERCENT),
            complex::LETTER_OFFSET => {
                state.letter_offset = [params.length(PERCENT), params.length(PERCENT)];
            }
            complex::FONT => {
                state.font = params.index().unwrap_or_else(|| printer.default_font());
                followup = Followup::Font;
            }
            complex::SELECTION_PADDING => state.selection.padding = params.margin(PERCENT),
            complex::TAB_WIDTH => {
                state.tab_width = params
                    .length(PERCENT)
                    .map(|len| len.resolve_with(em, wrap_width));
            }
            complex::UNDERLINE_SETTINGS => read_settings(&mut params, &mut state.underline),
            complex::STRIKE_SETTINGS => read_settings(&mut params, &mut state.strike),
            complex::BEGIN_TABLE => {
                let outer_border = params.index().unwrap_or(0) != 0;
                let width = params
                    .length(PERCENT)
                    .map_or(0, |len| len.resolve(wrap_width));
                let mut specs = SmallVec::<[ColumnSpec; 8]>::new();
                while params.peek() == Some(ROW_SEPARATOR) {
                    params.advance();
                    let align = align_from_index(params.index());
                    let width = params.length(PERCENT);
                    specs.push(ColumnSpec { align, width });
                }
                let width = if width > 0 {
                    width
                } else if wrap_width > 0 {
                    wrap_width
                } else {
                    specs
                        .iter()
                        .map(|spec| spec.width.map_or(0, |len| len.pixels.max(0)))
                        .sum()
                };
                let left = self.origin.x + state.indent;
                followup = Followup::Table(Table::new(&specs, left, width, outer_border));
            }
            complex::COLUMN_SPAN => {
                let columns = params.index().unwrap_or(1);
                let align = align_from_index(params.index());
                if let Some(table) = &mut self.table {
                    table.span(columns, align);
                }
            }
            complex::ROW_SPAN => {
                let rows = params.index();
                log::trace!("row span {rows:?} is not supported");
            }
            complex::ADD_BREAKING | complex::REMOVE_BREAKING => {
                while !params.is_terminated() {
                    if let Some(c) = params.peek() {
                        if command == complex::ADD_BREAKING {
                            if !self.breaking.contains(&c) {
                                self.breaking.push(c);
                            }
                        } else {
                            self.breaking.retain(|b| *b != c);
                        }
                    }
                    params.advance();
                }
            }
            complex::ADD_TAB_STOP => {
                let id = params.index().unwrap_or(0);
                match params.length(PERCENT) {
                    Some(position) => state.set_tab_stop(id, position),
                    None => state.remove_tab_stop(id),
                }
            }
            complex::REMOVE_TAB_STOP => {
                let id = params.index().unwrap_or(0);
                state.remove_tab_stop(id);
            }
            complex::START_REGION => {
                let id = params.index().unwrap_or(0);
                self.regions.push(OpenSpan::new(at, id));
            }
            complex::END_REGION => {
                let id = params.index().unwrap_or(0);
                if let Some(region) = self
                    .regions
                    .iter_mut()
                    .rev()
                    .find(|r| r.is_open() && r.data == id)
                {
                    region.end = Some(at);
                }
            }
            complex::HORIZONTAL_SPACE => {
                if let Some(len) = params.length(PERCENT) {
                    followup = Followup::Space(len.resolve_with(em, wrap_width));
                }
            }
            complex::VERTICAL_SPACE => {
                if let Some(len) = params.length(PERCENT) {
                    followup = Followup::VerticalSpace(len.resolve(height));
                }
            }
            complex::PLACEHOLDER => {
                let width = params.length(PERCENT).map_or(0, |len| len.resolve(wrap_width));
                let box_height = params.length(PERCENT).map_or(0, |len| len.resolve(height));
                self.placeholder = Size::new(width.max(0), box_height.max(0));
            }
            _ => log::trace!("ignoring unknown complex instruction {command:#x}"),
        }
        params.finish();

        match followup {
            Followup::None => {}
            Followup::Font => self.switch_font(),
            Followup::WrapWidth => self.update_wrap_width(),
            Followup::Image(image) => self.place_image(image, index),
            Followup::Space(width) => self.place_space(width, index),
            Followup::VerticalSpace(space) => {
                if self.line_started || !self.marks.is_empty() {
                    self.vertical_space += space;
                } else {
                    self.top += space;
                }
            }
            Followup::Table(table) => self.begin_table(table),
        }
    }

    /// Handles single code point toggles. Returns `false` for anything else.
    pub(super) fn legacy(&mut self, c: CodePoint) -> bool {
        let font = match c {
            legacy::BOLD => NamedFont::Bold,
            legacy::REGULAR => NamedFont::Normal,
            legacy::ITALIC => NamedFont::Italic,
            legacy::SMALL => NamedFont::Small,
            SELECTION_START => {
                self.start_selection();
                return true;
            }
            SELECTION_END => {
                self.end_selection();
                return true;
            }
            _ => match c.checked_sub(legacy::HEADER_BASE) {
                Some(1) => HeaderLevel::H1.font(),
                Some(2) => HeaderLevel::H2.font(),
                Some(3) => HeaderLevel::H3.font(),
                Some(4) => HeaderLevel::H4.font(),
                _ => return false,
            },
        };
        self.state.font = font.id();
        self.switch_font();
        true
    }
}

fn read_selection<R: GlyphRenderer>(
    params: &mut Params<'_, '_>,
    printer: &Printer<R>,
    state: &mut FormatState,
) {
    let bits = params.index().unwrap_or(0);
    let selection = &mut state.selection;
    selection.image = if bits & selection_bits::IMAGE != 0 {
        params.index()
    } else {
        None
    };
    selection.text = if bits & selection_bits::TEXT_INDEX != 0 {
        indexed_color(printer, params, false)
    } else if bits & selection_bits::TEXT_COLOR != 0 {
        Some(params.color())
    } else {
        None
    };
    selection.background = if bits & selection_bits::BACKGROUND_INDEX != 0 {
        indexed_color(printer, params, true)
    } else if bits & selection_bits::BACKGROUND_COLOR != 0 {
        Some(params.color())
    } else {
        None
    };
    selection.no_background = bits & selection_bits::NO_BACKGROUND != 0;
}

fn read_image<R: GlyphRenderer>(
    params: &mut Params<'_, '_>,
    printer: &Printer<R>,
    font: &StyledFont<R>,
    state: &FormatState,
    wrap_width: i32,
) -> Option<ImageMark> {
    let index = params.index()?;
    let info = params.index().unwrap_or(0);
    let offset = if info & 0b100 != 0 {
        params.point()
    } else {
        Point::ZERO
    };
    let renderer = font.renderer();
    let requested = (info & 0b1000 != 0).then(|| {
        let width = params.length(PERCENT).map_or(0, |len| len.resolve(wrap_width));
        let height = params
            .length(PERCENT)
            .map_or(0, |len| len.resolve(renderer.height()));
        Size::new(width, height)
    });
    let margin = if info & 0b1_0000 != 0 {
        Margin::all(i32::from(params.word()))
    } else if info & 0b10_0000 != 0 {
        let mut sides = [0; 4];
        for side in &mut sides {
            *side = i32::from(params.word());
        }
        Margin::new(sides[0], sides[1], sides[2], sides[3])
    } else {
        Margin::ZERO
    };
    let Some(image) = printer.image(index) else {
        log::debug!("image {index} is not registered");
        return None;
    };

    let natural = image.size;
    let mut size = match requested {
        Some(Size {
            width: 0,
            height: 0,
        })
        | None => natural,
        Some(Size { width: 0, height }) => {
            Size::new(scale(natural.width, height, natural.height), height)
        }
        Some(Size { width, height: 0 }) => {
            Size::new(width, scale(natural.height, width, natural.width))
        }
        Some(size) => size,
    };
    if wrap_width > 0 && size.width > wrap_width {
        size = Size::new(wrap_width, scale(size.height, wrap_width, size.width));
    }

    let height = margin.vertical() + size.height;
    let baseline = match state.vertical_align {
        VerticalAlign::Baseline => height,
        VerticalAlign::Top => renderer.baseline(),
        VerticalAlign::Middle => (renderer.baseline() + height) / 2,
        VerticalAlign::Bottom => height - (renderer.height() - renderer.baseline()),
    };
    Some(ImageMark {
        index,
        image,
        bounds: Rect::from_origin_size(Point::new(margin.left, margin.top) + offset, size),
        advance: margin.horizontal() + size.width,
        height,
        baseline,
        tint: state.tint.unwrap_or(Color::WHITE),
    })
}
