// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fluent encoder for rich-text markup.

use alloc::vec::Vec;

use peniko::Color;

use super::codec::push_code_point;
use super::value::{MODE_PERCENT, MODE_REL, MODE_UNSET, MODE_VALUE};
use super::{
    align_to_index, complex, legacy, selection_bits, simple, CodePoint, HeaderLevel, ImageAlign,
    LineSettings, NamedColor, NamedFont, TableColumn, TextAlign, VerticalAlign, CELL_SEPARATOR,
    COMPLEX_INSTRUCTION, LINE_BREAK, PLACEHOLDER, ROW_SEPARATOR, SELECTION_END, SELECTION_START,
    SIMPLE_INSTRUCTION, TERMINATOR,
};
use crate::geometry::{Margin, Point, Size};
use crate::util::ZERO_WIDTH_SPACE;

/// A color given either through the printer's color table or directly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColorSource {
    /// A color table entry, with an optional alpha override.
    Index {
        /// The color table index, 0 to 127.
        index: u8,
        /// Alpha replacing the table color's alpha. Only the top 7 bits are
        /// kept.
        alpha: Option<u8>,
    },
    /// An explicit color.
    Color(Color),
}

impl From<Color> for ColorSource {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<NamedColor> for ColorSource {
    fn from(color: NamedColor) -> Self {
        Self::Index {
            index: color.index(),
            alpha: None,
        }
    }
}

/// How selected text is displayed.
///
/// Every field left at its default returns that aspect to the printer's
/// default.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SelectionStyle {
    /// Image index drawn behind the selection instead of a filled box.
    pub image: Option<u8>,
    /// Color of selected text. A table color without an alpha override is
    /// drawn opaque.
    pub text: Option<ColorSource>,
    /// Color of the selection box.
    pub background: Option<ColorSource>,
    /// Do not draw any selection box.
    pub no_background: bool,
}

/// An image placed in the text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageSpec {
    /// Image table index.
    pub index: u8,
    /// Placement of the image.
    pub align: ImageAlign,
    /// Additional offset in pixels.
    pub offset: Option<Point>,
    /// Explicit size: pixels plus percentages of the wrap width and line
    /// height.
    pub size: Option<(Size, Size)>,
    /// Space kept around the image.
    pub margin: Option<Margin>,
}

impl ImageSpec {
    /// An inline image drawn at its own size.
    pub const fn inline(index: u8) -> Self {
        Self {
            index,
            align: ImageAlign::Inline,
            offset: None,
            size: None,
            margin: None,
        }
    }
}

/// Builds rich-text markup.
///
/// Every method appends either plain text or one complete instruction and
/// returns the builder for chaining. Table indices (fonts, colors, images)
/// are not checked; the printer ignores unknown ones.
///
/// ```
/// use richprint::MarkupBuilder;
///
/// let mut markup = MarkupBuilder::new();
/// markup.push_str("Hello ").bold().push_str("world").regular();
/// assert!(!markup.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MarkupBuilder {
    buf: Vec<u8>,
}

impl MarkupBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The encoded markup.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the builder, returning the encoded markup.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Length of the encoded markup in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Removes everything appended so far.
    pub fn clear(&mut self) -> &mut Self {
        self.buf.clear();
        self
    }

    /// Appends plain text.
    pub fn push_str(&mut self, text: &str) -> &mut Self {
        self.buf.extend_from_slice(text.as_bytes());
        self
    }

    /// Appends one character.
    pub fn push(&mut self, c: char) -> &mut Self {
        self.code_point(CodePoint::from(c));
        self
    }

    /// Ends the line without starting a new paragraph.
    pub fn line_break(&mut self) -> &mut Self {
        self.code_point(LINE_BREAK);
        self
    }

    /// Inserts an invisible break opportunity.
    pub fn zero_width_space(&mut self) -> &mut Self {
        self.code_point(ZERO_WIDTH_SPACE);
        self
    }

    /// Returns every formatting setting to its default and switches to the
    /// default font.
    pub fn reset_formatting(&mut self) -> &mut Self {
        self.simple(simple::RESET_FORMATTING)
    }

    // Fonts

    /// Switches to the default font.
    pub fn regular(&mut self) -> &mut Self {
        self.code_point(legacy::REGULAR);
        self
    }

    /// Switches to the bold font.
    pub fn bold(&mut self) -> &mut Self {
        self.code_point(legacy::BOLD);
        self
    }

    /// Switches to the italic font.
    pub fn italic(&mut self) -> &mut Self {
        self.code_point(legacy::ITALIC);
        self
    }

    /// Switches to the small font.
    pub fn small(&mut self) -> &mut Self {
        self.code_point(legacy::SMALL);
        self
    }

    /// Switches to a heading font.
    pub fn header(&mut self, level: HeaderLevel) -> &mut Self {
        self.code_point(legacy::HEADER_BASE + level as CodePoint);
        self
    }

    /// Switches to the given font id.
    pub fn font(&mut self, id: u8) -> &mut Self {
        self.complex(complex::FONT).index(id).end()
    }

    /// Switches to a well-known font.
    pub fn named_font(&mut self, font: NamedFont) -> &mut Self {
        self.font(font.id())
    }

    /// Raises the following text as a superscript.
    pub fn superscript(&mut self) -> &mut Self {
        self.simple(simple::SUPERSCRIPT)
    }

    /// Lowers the following text as a subscript.
    pub fn subscript(&mut self) -> &mut Self {
        self.simple(simple::SUBSCRIPT)
    }

    /// Ends sub or superscript.
    pub fn script_off(&mut self) -> &mut Self {
        self.simple(simple::SCRIPT_OFF)
    }

    // Colors

    /// Sets the text color.
    pub fn color(&mut self, color: impl Into<ColorSource>) -> &mut Self {
        self.color_pair(complex::COLOR_INDEX, complex::COLOR, color.into())
    }

    /// Returns to the font's text color.
    pub fn default_color(&mut self) -> &mut Self {
        self.complex(complex::COLOR_INDEX).end()
    }

    /// Sets the background color used by [`show_background`](Self::show_background).
    pub fn background(&mut self, color: impl Into<ColorSource>) -> &mut Self {
        self.color_pair(complex::BACKGROUND_INDEX, complex::BACKGROUND, color.into())
    }

    /// Returns to the default background color.
    pub fn default_background(&mut self) -> &mut Self {
        self.complex(complex::BACKGROUND_INDEX).end()
    }

    /// Sets the border color used by [`show_border`](Self::show_border).
    pub fn border_color(&mut self, color: impl Into<ColorSource>) -> &mut Self {
        self.color_pair(complex::BORDER_INDEX, complex::BORDER, color.into())
    }

    /// Returns to the default border color.
    pub fn default_border_color(&mut self) -> &mut Self {
        self.complex(complex::BORDER_INDEX).end()
    }

    /// Sets the tint applied to images.
    pub fn tint(&mut self, color: impl Into<ColorSource>) -> &mut Self {
        self.color_pair(complex::TINT_INDEX, complex::TINT, color.into())
    }

    /// Draws images untinted.
    pub fn default_tint(&mut self) -> &mut Self {
        self.complex(complex::TINT_INDEX).end()
    }

    /// Sets the underline color.
    pub fn underline_color(&mut self, color: impl Into<ColorSource>) -> &mut Self {
        self.color_pair(
            complex::UNDERLINE_COLOR_INDEX,
            complex::UNDERLINE_COLOR,
            color.into(),
        )
    }

    /// Draws underlines in the text color.
    pub fn default_underline_color(&mut self) -> &mut Self {
        self.complex(complex::UNDERLINE_COLOR_INDEX).end()
    }

    /// Sets the strikethrough color.
    pub fn strike_color(&mut self, color: impl Into<ColorSource>) -> &mut Self {
        self.color_pair(
            complex::STRIKE_COLOR_INDEX,
            complex::STRIKE_COLOR,
            color.into(),
        )
    }

    /// Draws strikethrough in the text color.
    pub fn default_strike_color(&mut self) -> &mut Self {
        self.complex(complex::STRIKE_COLOR_INDEX).end()
    }

    // Selection

    /// Starts a selection. Selections may nest.
    pub fn start_selection(&mut self) -> &mut Self {
        self.code_point(SELECTION_START);
        self
    }

    /// Ends the most recently started selection.
    pub fn end_selection(&mut self) -> &mut Self {
        self.code_point(SELECTION_END);
        self
    }

    /// Changes how subsequent selections are displayed.
    pub fn selection_style(&mut self, style: SelectionStyle) -> &mut Self {
        let mut bits = 0;
        if style.image.is_some() {
            bits |= selection_bits::IMAGE;
        }
        bits |= match style.text {
            Some(ColorSource::Index { .. }) => selection_bits::TEXT_INDEX,
            Some(ColorSource::Color(_)) => selection_bits::TEXT_COLOR,
            None => 0,
        };
        bits |= match style.background {
            Some(ColorSource::Index { .. }) => selection_bits::BACKGROUND_INDEX,
            Some(ColorSource::Color(_)) => selection_bits::BACKGROUND_COLOR,
            None => 0,
        };
        if style.no_background {
            bits |= selection_bits::NO_BACKGROUND;
        }
        self.complex(complex::SELECTION).index(bits);
        if let Some(image) = style.image {
            self.index(image);
        }
        // Both colors may follow each other, so indices always carry an alpha.
        for source in [style.text, style.background].into_iter().flatten() {
            match source {
                ColorSource::Index { index, alpha } => {
                    self.index(index).alpha(alpha.unwrap_or(u8::MAX));
                }
                ColorSource::Color(color) => {
                    self.rgba(color);
                }
            }
        }
        self.end()
    }

    /// Pads selection boxes. Relative values are percentages of the em size.
    pub fn selection_padding(&mut self, pixels: Margin, percent: Margin) -> &mut Self {
        self.complex(complex::SELECTION_PADDING)
            .margin(pixels, percent)
            .end()
    }

    // Alignment

    /// Aligns lines to the left.
    pub fn align_left(&mut self) -> &mut Self {
        self.simple(simple::ALIGN_LEFT)
    }

    /// Centers lines within the wrap width.
    pub fn align_center(&mut self) -> &mut Self {
        self.simple(simple::ALIGN_CENTER)
    }

    /// Aligns lines to the right of the wrap width.
    pub fn align_right(&mut self) -> &mut Self {
        self.simple(simple::ALIGN_RIGHT)
    }

    /// Sets the horizontal alignment.
    pub fn align(&mut self, align: TextAlign) -> &mut Self {
        match align {
            TextAlign::Left => self.align_left(),
            TextAlign::Center => self.align_center(),
            TextAlign::Right => self.align_right(),
        }
    }

    /// Returns to the font's horizontal alignment.
    pub fn default_align(&mut self) -> &mut Self {
        self.simple(simple::DEFAULT_ALIGN)
    }

    /// Sets the vertical alignment of images and cells.
    pub fn vertical_align(&mut self, align: VerticalAlign) -> &mut Self {
        self.simple(match align {
            VerticalAlign::Top => simple::ALIGN_TOP,
            VerticalAlign::Middle => simple::ALIGN_MIDDLE,
            VerticalAlign::Bottom => simple::ALIGN_BOTTOM,
            VerticalAlign::Baseline => simple::ALIGN_BASELINE,
        })
    }

    /// Enables or disables justification of wrapped lines.
    pub fn justify(&mut self, enable: bool) -> &mut Self {
        self.simple(if enable {
            simple::JUSTIFY
        } else {
            simple::JUSTIFY_OFF
        })
    }

    // Decorations

    /// Enables or disables underline.
    pub fn underline(&mut self, enable: bool) -> &mut Self {
        self.simple(if enable {
            simple::UNDERLINE
        } else {
            simple::UNDERLINE_OFF
        })
    }

    /// Returns underline to the font's default.
    pub fn default_underline(&mut self) -> &mut Self {
        self.simple(simple::DEFAULT_UNDERLINE)
    }

    /// Enables or disables strikethrough.
    pub fn strike(&mut self, enable: bool) -> &mut Self {
        self.simple(if enable {
            simple::STRIKE
        } else {
            simple::STRIKE_OFF
        })
    }

    /// Returns strikethrough to the font's default.
    pub fn default_strike(&mut self) -> &mut Self {
        self.simple(simple::DEFAULT_STRIKE)
    }

    /// Changes what the underline covers and, optionally, its thickness as
    /// pixels plus a percentage of the font's line thickness.
    pub fn underline_settings(
        &mut self,
        settings: LineSettings,
        thickness: Option<(i16, i16)>,
    ) -> &mut Self {
        self.line_settings(complex::UNDERLINE_SETTINGS, settings, thickness)
    }

    /// Returns underline settings to their defaults.
    pub fn default_underline_settings(&mut self) -> &mut Self {
        self.complex(complex::UNDERLINE_SETTINGS).index(0).end()
    }

    /// Changes what strikethrough covers and, optionally, its thickness.
    pub fn strike_settings(
        &mut self,
        settings: LineSettings,
        thickness: Option<(i16, i16)>,
    ) -> &mut Self {
        self.line_settings(complex::STRIKE_SETTINGS, settings, thickness)
    }

    /// Returns strikethrough settings to their defaults.
    pub fn default_strike_settings(&mut self) -> &mut Self {
        self.complex(complex::STRIKE_SETTINGS).index(0).end()
    }

    /// Moves the underline: pixels plus a percentage of the line height,
    /// measured from the top of the line.
    pub fn underline_offset(&mut self, pixels: i16, percent: i16) -> &mut Self {
        self.complex(complex::UNDERLINE_OFFSET)
            .length(pixels, percent, 0)
            .end()
    }

    /// Returns the underline to the font's underline position.
    pub fn default_underline_offset(&mut self) -> &mut Self {
        self.complex(complex::UNDERLINE_OFFSET).unset().end()
    }

    /// Moves the strikethrough: pixels plus a percentage of the line height.
    pub fn strike_offset(&mut self, pixels: i16, percent: i16) -> &mut Self {
        self.complex(complex::STRIKE_OFFSET)
            .length(pixels, percent, 0)
            .end()
    }

    /// Returns the strikethrough to the font's strike position.
    pub fn default_strike_offset(&mut self) -> &mut Self {
        self.complex(complex::STRIKE_OFFSET).unset().end()
    }

    // Wrapping and spacing

    /// Enables or disables word wrap.
    pub fn word_wrap(&mut self, enable: bool) -> &mut Self {
        self.simple(if enable { simple::WRAP } else { simple::WRAP_OFF })
    }

    /// Overrides the wrap width: pixels plus a multiple of the em size.
    pub fn wrap_width(&mut self, pixels: i16, ems: i16) -> &mut Self {
        self.complex(complex::WRAP_WIDTH)
            .length(pixels, ems, 0)
            .end()
    }

    /// Returns to the width given to the query.
    pub fn default_wrap_width(&mut self) -> &mut Self {
        self.complex(complex::WRAP_WIDTH).unset().end()
    }

    /// Offsets every following glyph. Relative parts are percentages of the
    /// em size.
    pub fn letter_offset(&mut self, pixels: Point, percent: Point) -> &mut Self {
        self.complex(complex::LETTER_OFFSET)
            .length(clamp_i16(pixels.x), clamp_i16(percent.x), 0)
            .length(clamp_i16(pixels.y), clamp_i16(percent.y), 0)
            .end()
    }

    /// Removes the letter offset.
    pub fn default_letter_offset(&mut self) -> &mut Self {
        self.complex(complex::LETTER_OFFSET).unset().unset().end()
    }

    /// Space between paragraphs: pixels plus a percentage of the line height.
    pub fn paragraph_spacing(&mut self, pixels: i16, percent: i16) -> &mut Self {
        self.complex(complex::PARAGRAPH_SPACING)
            .length(pixels, percent, 0)
            .end()
    }

    /// Returns to the font's paragraph spacing.
    pub fn default_paragraph_spacing(&mut self) -> &mut Self {
        self.complex(complex::PARAGRAPH_SPACING).unset().end()
    }

    /// Distance between line tops: pixels plus a percentage of the line
    /// height.
    pub fn line_spacing(&mut self, pixels: i16, percent: i16) -> &mut Self {
        self.complex(complex::LINE_SPACING)
            .length(pixels, percent, 0)
            .end()
    }

    /// Returns to the font's line spacing.
    pub fn default_line_spacing(&mut self) -> &mut Self {
        self.complex(complex::LINE_SPACING).unset().end()
    }

    /// Extra space after every letter: pixels plus a percentage of the em
    /// size.
    pub fn letter_spacing(&mut self, pixels: i16, percent: i16) -> &mut Self {
        self.complex(complex::LETTER_SPACING)
            .length(pixels, percent, 0)
            .end()
    }

    /// Returns to the font's letter spacing.
    pub fn default_letter_spacing(&mut self) -> &mut Self {
        self.complex(complex::LETTER_SPACING).unset().end()
    }

    /// Indents every line: pixels plus a percentage of the em size.
    pub fn indent(&mut self, pixels: i16, percent: i16) -> &mut Self {
        self.complex(complex::INDENT).length(pixels, percent, 0).end()
    }

    /// Removes the indent.
    pub fn remove_indent(&mut self) -> &mut Self {
        self.complex(complex::INDENT).unset().end()
    }

    /// Indents the first line of each paragraph: pixels plus a percentage
    /// of the em size.
    pub fn hanging_indent(&mut self, pixels: i16, percent: i16) -> &mut Self {
        self.complex(complex::HANGING_INDENT)
            .length(pixels, percent, 0)
            .end()
    }

    /// Removes the hanging indent.
    pub fn remove_hanging_indent(&mut self) -> &mut Self {
        self.complex(complex::HANGING_INDENT).unset().end()
    }

    /// Inserts horizontal space: pixels, a percentage of the em size and
    /// basis points of the wrap width.
    pub fn horizontal_space(&mut self, pixels: i16, percent: i16, basis_points: i16) -> &mut Self {
        self.complex(complex::HORIZONTAL_SPACE)
            .length(pixels, percent, basis_points)
            .end()
    }

    /// Inserts vertical space: pixels plus a percentage of the line height.
    pub fn vertical_space(&mut self, pixels: i16, percent: i16) -> &mut Self {
        self.complex(complex::VERTICAL_SPACE)
            .length(pixels, percent, 0)
            .end()
    }

    /// Sets the tab width: pixels, a percentage of the em size and basis
    /// points of the wrap width.
    pub fn tab_width(&mut self, pixels: i16, percent: i16, basis_points: i16) -> &mut Self {
        self.complex(complex::TAB_WIDTH)
            .length(pixels, percent, basis_points)
            .end()
    }

    /// Returns to the font's tab width.
    pub fn default_tab_width(&mut self) -> &mut Self {
        self.complex(complex::TAB_WIDTH).unset().end()
    }

    /// Adds or replaces a tab stop at pixels, a percentage of the em size and
    /// basis points of the wrap width from the left edge.
    pub fn add_tab_stop(
        &mut self,
        index: u8,
        pixels: i16,
        percent: i16,
        basis_points: i16,
    ) -> &mut Self {
        self.complex(complex::ADD_TAB_STOP)
            .index(index)
            .length(pixels, percent, basis_points)
            .end()
    }

    /// Removes a tab stop.
    pub fn remove_tab_stop(&mut self, index: u8) -> &mut Self {
        self.complex(complex::REMOVE_TAB_STOP).index(index).end()
    }

    /// Allows line breaks after the given characters.
    pub fn add_breaking_letters(&mut self, letters: &[char]) -> &mut Self {
        self.complex(complex::ADD_BREAKING);
        for &c in letters {
            self.code_point(CodePoint::from(c));
        }
        self.end()
    }

    /// Stops allowing line breaks after the given characters.
    pub fn remove_breaking_letters(&mut self, letters: &[char]) -> &mut Self {
        self.complex(complex::REMOVE_BREAKING);
        for &c in letters {
            self.code_point(CodePoint::from(c));
        }
        self.end()
    }

    // Boxes

    /// Draws a background box behind each line.
    pub fn show_background(&mut self) -> &mut Self {
        self.simple(simple::SHOW_BACKGROUND)
    }

    /// Stops drawing background boxes.
    pub fn remove_background(&mut self) -> &mut Self {
        self.simple(simple::REMOVE_BACKGROUND)
    }

    /// Draws a border around each line.
    pub fn show_border(&mut self) -> &mut Self {
        self.simple(simple::SHOW_BORDER)
    }

    /// Stops drawing borders.
    pub fn remove_border(&mut self) -> &mut Self {
        self.simple(simple::REMOVE_BORDER)
    }

    /// Border thickness: pixels plus a percentage of the line thickness.
    pub fn border_thickness(&mut self, pixels: i16, percent: i16) -> &mut Self {
        self.complex(complex::BORDER_THICKNESS)
            .length(pixels, percent, 0)
            .end()
    }

    /// Returns to a border as thick as the font's lines.
    pub fn default_border_thickness(&mut self) -> &mut Self {
        self.complex(complex::BORDER_THICKNESS).unset().end()
    }

    /// Pads background and border boxes. Relative values are percentages of
    /// the em size.
    pub fn padding(&mut self, pixels: Margin, percent: Margin) -> &mut Self {
        self.complex(complex::PADDING).margin(pixels, percent).end()
    }

    // Images and placeholders

    /// Places an image.
    pub fn image(&mut self, image: ImageSpec) -> &mut Self {
        let mut info = match image.align {
            ImageAlign::Inline => 0,
            ImageAlign::Left => 1,
            ImageAlign::Right => 2,
        };
        if image.offset.is_some() {
            info |= 0b100;
        }
        if image.size.is_some() {
            info |= 0b1000;
        }
        let uniform = image
            .margin
            .filter(|m| m.left == m.top && m.top == m.right && m.right == m.bottom);
        info |= match (image.margin, uniform) {
            (None, _) => 0,
            (Some(_), Some(_)) => 0b1_0000,
            (Some(_), None) => 0b10_0000,
        };
        self.complex(complex::IMAGE).index(image.index).index(info);
        if let Some(offset) = image.offset {
            self.word(clamp_i16(offset.x)).word(clamp_i16(offset.y));
        }
        if let Some((pixels, percent)) = image.size {
            self.length(clamp_i16(pixels.width), clamp_i16(percent.width), 0)
                .length(clamp_i16(pixels.height), clamp_i16(percent.height), 0);
        }
        match (image.margin, uniform) {
            (Some(m), Some(_)) => {
                self.word(clamp_i16(m.left));
            }
            (Some(m), None) => {
                for side in [m.left, m.top, m.right, m.bottom] {
                    self.word(clamp_i16(side));
                }
            }
            (None, _) => {}
        }
        self.end()
    }

    /// Places an image inline at its own size.
    pub fn inline_image(&mut self, index: u8) -> &mut Self {
        self.image(ImageSpec::inline(index))
    }

    /// Inserts an invisible box: pixels plus percentages of the wrap width
    /// and line height.
    pub fn placeholder(&mut self, pixels: Size, percent: Size) -> &mut Self {
        self.complex(complex::PLACEHOLDER)
            .length(clamp_i16(pixels.width), clamp_i16(percent.width), 0)
            .length(clamp_i16(pixels.height), clamp_i16(percent.height), 0)
            .end();
        self.code_point(PLACEHOLDER);
        self
    }

    /// Inserts another placeholder of the last placeholder's size.
    pub fn repeat_placeholder(&mut self) -> &mut Self {
        self.code_point(PLACEHOLDER);
        self
    }

    // Tables

    /// Starts a table. The width is pixels plus a percentage of the wrap
    /// width; zero means the full wrap width.
    pub fn begin_table(
        &mut self,
        columns: &[TableColumn],
        width: i16,
        percent: i16,
        outer_border: bool,
    ) -> &mut Self {
        self.complex(complex::BEGIN_TABLE)
            .index(u8::from(outer_border))
            .length(width, percent, 0);
        for column in columns {
            self.code_point(ROW_SEPARATOR);
            self.index(align_to_index(column.align))
                .length(column.width, column.percent, 0);
        }
        self.end()
    }

    /// Moves to the next cell of the current row.
    pub fn next_cell(&mut self) -> &mut Self {
        self.code_point(CELL_SEPARATOR);
        self
    }

    /// Makes the current cell span several columns with its own alignment.
    pub fn column_span(&mut self, columns: u8, align: TextAlign) -> &mut Self {
        self.complex(complex::COLUMN_SPAN)
            .index(columns)
            .index(align_to_index(align))
            .end()
    }

    /// Makes the current cell span several rows.
    pub fn row_span(&mut self, rows: u8) -> &mut Self {
        self.complex(complex::ROW_SPAN).index(rows).end()
    }

    /// Starts the next row.
    pub fn next_row(&mut self) -> &mut Self {
        self.code_point(ROW_SEPARATOR);
        self
    }

    /// Ends the table.
    pub fn end_table(&mut self) -> &mut Self {
        self.simple(simple::END_TABLE)
    }

    // Regions

    /// Starts a region reported back by [`Printer::draw`](crate::Printer::draw).
    pub fn start_region(&mut self, id: u8) -> &mut Self {
        self.complex(complex::START_REGION).index(id).end()
    }

    /// Ends a region.
    pub fn end_region(&mut self, id: u8) -> &mut Self {
        self.complex(complex::END_REGION).index(id).end()
    }

    // Encoding primitives

    fn code_point(&mut self, c: CodePoint) -> &mut Self {
        push_code_point(&mut self.buf, c);
        self
    }

    fn simple(&mut self, command: CodePoint) -> &mut Self {
        self.code_point(SIMPLE_INSTRUCTION).code_point(command)
    }

    fn complex(&mut self, command: CodePoint) -> &mut Self {
        self.code_point(COMPLEX_INSTRUCTION).code_point(command)
    }

    fn end(&mut self) -> &mut Self {
        self.code_point(TERMINATOR)
    }

    fn index(&mut self, value: u8) -> &mut Self {
        self.code_point(CodePoint::from(value & 0x7F))
    }

    fn alpha(&mut self, alpha: u8) -> &mut Self {
        self.code_point(CodePoint::from(alpha >> 1))
    }

    fn word(&mut self, value: i16) -> &mut Self {
        self.code_point(CodePoint::from(value as u16))
    }

    fn unset(&mut self) -> &mut Self {
        self.index(MODE_UNSET)
    }

    fn length(&mut self, pixels: i16, rel: i16, percent: i16) -> &mut Self {
        let mut mode = 0;
        if pixels != 0 {
            mode |= MODE_VALUE;
        }
        if rel != 0 {
            mode |= MODE_REL;
        }
        if percent != 0 {
            mode |= MODE_PERCENT;
        }
        self.index(mode);
        for value in [pixels, rel, percent] {
            if value != 0 {
                self.word(value);
            }
        }
        self
    }

    fn margin(&mut self, pixels: Margin, percent: Margin) -> &mut Self {
        let pairs = [
            (pixels.left, percent.left),
            (pixels.top, percent.top),
            (pixels.right, percent.right),
            (pixels.bottom, percent.bottom),
        ];
        for (px, rel) in pairs {
            self.length(clamp_i16(px), clamp_i16(rel), 0);
        }
        self
    }

    fn rgba(&mut self, color: Color) -> &mut Self {
        let rgba = color.to_rgba8();
        let low = u16::from(rgba.r) | u16::from(rgba.g) << 8;
        let high = u16::from(rgba.b) | u16::from(rgba.a) << 8;
        self.code_point(CodePoint::from(low))
            .code_point(CodePoint::from(high))
    }

    fn color_params(&mut self, source: ColorSource) -> &mut Self {
        match source {
            ColorSource::Index { index, alpha } => {
                self.index(index);
                if let Some(alpha) = alpha {
                    self.alpha(alpha);
                }
                self
            }
            ColorSource::Color(color) => self.rgba(color),
        }
    }

    fn color_pair(
        &mut self,
        index_command: CodePoint,
        color_command: CodePoint,
        source: ColorSource,
    ) -> &mut Self {
        match source {
            ColorSource::Index { .. } => self.complex(index_command),
            ColorSource::Color(_) => self.complex(color_command),
        };
        self.color_params(source).end()
    }

    fn line_settings(
        &mut self,
        command: CodePoint,
        settings: LineSettings,
        thickness: Option<(i16, i16)>,
    ) -> &mut Self {
        let mode = 0b1 | if thickness.is_some() { 0b10 } else { 0 };
        self.complex(command).index(mode).index(settings.to_bits());
        if let Some((pixels, percent)) = thickness {
            self.length(pixels, percent, 0);
        }
        self.end()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the i16 range"
)]
fn clamp_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

impl AsRef<[u8]> for MarkupBuilder {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl From<&str> for MarkupBuilder {
    fn from(text: &str) -> Self {
        let mut builder = Self::new();
        builder.push_str(text);
        builder
    }
}

impl From<MarkupBuilder> for Vec<u8> {
    fn from(builder: MarkupBuilder) -> Self {
        builder.buf
    }
}

impl core::fmt::Write for MarkupBuilder {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{MarkupReader, Params};
    use alloc::vec;

    fn decode(builder: &MarkupBuilder) -> Vec<CodePoint> {
        MarkupReader::new(builder.as_bytes()).collect()
    }

    #[test]
    fn plain_text_is_utf8() {
        let mut builder = MarkupBuilder::new();
        builder.push_str("héllo").push('!');
        assert_eq!(builder.as_bytes(), "héllo!".as_bytes());
    }

    #[test]
    fn simple_instruction_layout() {
        let mut builder = MarkupBuilder::new();
        builder.underline(true);
        assert_eq!(decode(&builder), vec![SIMPLE_INSTRUCTION, simple::UNDERLINE]);
    }

    #[test]
    fn header_uses_legacy_toggle() {
        let mut builder = MarkupBuilder::new();
        builder.header(HeaderLevel::H3);
        assert_eq!(decode(&builder), vec![0x13]);
    }

    #[test]
    fn length_writes_only_nonzero_parts() {
        let mut builder = MarkupBuilder::new();
        builder.letter_spacing(0, 50);
        assert_eq!(
            decode(&builder),
            vec![
                COMPLEX_INSTRUCTION,
                complex::LETTER_SPACING,
                CodePoint::from(MODE_REL),
                50,
                TERMINATOR
            ]
        );
    }

    #[test]
    fn negative_words_survive() {
        let mut builder = MarkupBuilder::new();
        builder.indent(-3, 0);
        let mut reader = MarkupReader::new(builder.as_bytes());
        assert_eq!(reader.next(), Some(COMPLEX_INSTRUCTION));
        assert_eq!(reader.next(), Some(complex::INDENT));
        let mut params = Params::new(&mut reader);
        let len = params.length(1.).unwrap();
        assert_eq!(len.pixels, -3);
        assert!(params.is_terminated());
    }

    #[test]
    fn color_words_decode_to_same_color() {
        let color = Color::from_rgba8(0x12, 0x34, 0x56, 0x78);
        let mut builder = MarkupBuilder::new();
        builder.color(color);
        let mut reader = MarkupReader::new(builder.as_bytes());
        reader.next();
        assert_eq!(reader.next(), Some(complex::COLOR));
        let mut params = Params::new(&mut reader);
        assert_eq!(params.color().to_rgba8(), color.to_rgba8());
        assert!(params.is_terminated());
    }

    #[test]
    fn placeholder_is_followed_by_replacement_object() {
        let mut builder = MarkupBuilder::new();
        builder.placeholder(Size::new(10, 0), Size::ZERO);
        assert_eq!(decode(&builder).last(), Some(&PLACEHOLDER));
    }

    #[test]
    fn table_columns_are_row_separated() {
        let mut builder = MarkupBuilder::new();
        builder.begin_table(&[TableColumn::fixed(40), TableColumn::AUTO], 0, 0, false);
        let decoded = decode(&builder);
        assert_eq!(
            decoded.iter().filter(|&&c| c == ROW_SEPARATOR).count(),
            2,
            "one separator per column"
        );
        assert_eq!(decoded.last(), Some(&TERMINATOR));
    }
}
