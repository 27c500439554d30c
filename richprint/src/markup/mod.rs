// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rich-text markup format.
//!
//! Markup is plain text interleaved with instructions. Every code point,
//! including instruction parameters, is stored as a generalized UTF-8
//! sequence that also admits surrogate values, so markup is a byte buffer
//! rather than a `str`. [`MarkupBuilder`] is the supported way to produce it.
//!
//! There are three kinds of instructions:
//!
//! - Simple instructions: [`SIMPLE_INSTRUCTION`] followed by one command code.
//! - Complex instructions: [`COMPLEX_INSTRUCTION`], a command code, encoded
//!   parameters and the [`TERMINATOR`].
//! - Legacy toggles: single control code points that switch fonts or mark
//!   selections.

mod builder;
mod codec;
mod value;

pub use builder::{ColorSource, ImageSpec, MarkupBuilder, SelectionStyle};
pub(crate) use codec::{MarkupReader, Params};
pub(crate) use value::{resolve_or, round, Length};

/// A decoded code point.
///
/// This is wider than `char` since parameters may carry surrogate values.
pub type CodePoint = u32;

/// Introduces a simple instruction.
pub const SIMPLE_INSTRUCTION: CodePoint = 0x9A;
/// Introduces a complex instruction.
pub const COMPLEX_INSTRUCTION: CodePoint = 0x9B;
/// Terminates a complex instruction.
pub const TERMINATOR: CodePoint = 0x9C;
/// Starts a new table row.
pub const ROW_SEPARATOR: CodePoint = 0x8E;
/// Starts a new table cell.
pub const CELL_SEPARATOR: CodePoint = 0x8F;
/// Ends the line without starting a new paragraph.
pub const LINE_BREAK: CodePoint = 0x85;
/// Starts a selection.
pub const SELECTION_START: CodePoint = 0x86;
/// Ends the last started selection.
pub const SELECTION_END: CodePoint = 0x87;
/// Object replacement character that follows a placeholder instruction.
pub const PLACEHOLDER: CodePoint = 0xFFFC;
/// Decoded in place of malformed sequences.
pub const REPLACEMENT: CodePoint = 0xFFFD;
/// Skipped by the layout engine.
pub const NONCHARACTER: CodePoint = 0xFFFF;

pub(crate) mod legacy {
    use super::CodePoint;

    pub(crate) const BOLD: CodePoint = 0x0E;
    pub(crate) const REGULAR: CodePoint = 0x0F;
    pub(crate) const HEADER_BASE: CodePoint = 0x10;
    pub(crate) const ITALIC: CodePoint = 0x91;
    pub(crate) const SMALL: CodePoint = 0x92;
}

/// Command codes following [`SIMPLE_INSTRUCTION`].
pub(crate) mod simple {
    use super::CodePoint;

    pub(crate) const SHOW_BACKGROUND: CodePoint = 0x00;
    pub(crate) const REMOVE_BACKGROUND: CodePoint = 0x01;
    pub(crate) const SHOW_BORDER: CodePoint = 0x02;
    pub(crate) const REMOVE_BORDER: CodePoint = 0x03;
    pub(crate) const RESET_FORMATTING: CodePoint = 0x04;
    pub(crate) const SUBSCRIPT: CodePoint = 0x05;
    pub(crate) const SUPERSCRIPT: CodePoint = 0x06;
    pub(crate) const SCRIPT_OFF: CodePoint = 0x07;
    pub(crate) const UNDERLINE: CodePoint = 0x10;
    pub(crate) const UNDERLINE_OFF: CodePoint = 0x11;
    pub(crate) const STRIKE: CodePoint = 0x12;
    pub(crate) const STRIKE_OFF: CodePoint = 0x13;
    pub(crate) const DEFAULT_UNDERLINE: CodePoint = 0x16;
    pub(crate) const DEFAULT_STRIKE: CodePoint = 0x17;
    pub(crate) const JUSTIFY: CodePoint = 0x20;
    pub(crate) const JUSTIFY_OFF: CodePoint = 0x21;
    pub(crate) const ALIGN_LEFT: CodePoint = 0x22;
    pub(crate) const ALIGN_RIGHT: CodePoint = 0x23;
    pub(crate) const ALIGN_CENTER: CodePoint = 0x24;
    pub(crate) const ALIGN_TOP: CodePoint = 0x25;
    pub(crate) const ALIGN_MIDDLE: CodePoint = 0x26;
    pub(crate) const ALIGN_BOTTOM: CodePoint = 0x27;
    pub(crate) const ALIGN_BASELINE: CodePoint = 0x28;
    pub(crate) const DEFAULT_ALIGN: CodePoint = 0x29;
    pub(crate) const WRAP: CodePoint = 0x30;
    pub(crate) const WRAP_OFF: CodePoint = 0x31;
    pub(crate) const END_TABLE: CodePoint = 0x33;
}

/// Command codes following [`COMPLEX_INSTRUCTION`].
pub(crate) mod complex {
    use super::CodePoint;

    pub(crate) const COLOR_INDEX: CodePoint = 0x01;
    pub(crate) const COLOR: CodePoint = 0x02;
    pub(crate) const BACKGROUND_INDEX: CodePoint = 0x03;
    pub(crate) const BACKGROUND: CodePoint = 0x04;
    pub(crate) const BORDER_THICKNESS: CodePoint = 0x05;
    pub(crate) const BORDER_INDEX: CodePoint = 0x06;
    pub(crate) const BORDER: CodePoint = 0x07;
    pub(crate) const PADDING: CodePoint = 0x08;
    pub(crate) const PARAGRAPH_SPACING: CodePoint = 0x09;
    pub(crate) const INDENT: CodePoint = 0x0A;
    pub(crate) const HANGING_INDENT: CodePoint = 0x0B;
    pub(crate) const LETTER_SPACING: CodePoint = 0x0C;
    pub(crate) const LINE_SPACING: CodePoint = 0x0D;
    pub(crate) const WRAP_WIDTH: CodePoint = 0x0E;
    pub(crate) const IMAGE: CodePoint = 0x10;
    pub(crate) const SELECTION: CodePoint = 0x11;
    pub(crate) const UNDERLINE_OFFSET: CodePoint = 0x12;
    pub(crate) const STRIKE_OFFSET: CodePoint = 0x13;
    pub(crate) const LETTER_OFFSET: CodePoint = 0x14;
    pub(crate) const FONT: CodePoint = 0x15;
    pub(crate) const SELECTION_PADDING: CodePoint = 0x16;
    pub(crate) const TAB_WIDTH: CodePoint = 0x17;
    pub(crate) const TINT_INDEX: CodePoint = 0x18;
    pub(crate) const TINT: CodePoint = 0x19;
    pub(crate) const UNDERLINE_SETTINGS: CodePoint = 0x1A;
    pub(crate) const STRIKE_SETTINGS: CodePoint = 0x1B;
    pub(crate) const UNDERLINE_COLOR_INDEX: CodePoint = 0x1C;
    pub(crate) const UNDERLINE_COLOR: CodePoint = 0x1D;
    pub(crate) const STRIKE_COLOR_INDEX: CodePoint = 0x1E;
    pub(crate) const STRIKE_COLOR: CodePoint = 0x1F;
    pub(crate) const BEGIN_TABLE: CodePoint = 0x20;
    pub(crate) const COLUMN_SPAN: CodePoint = 0x21;
    pub(crate) const ROW_SPAN: CodePoint = 0x22;
    pub(crate) const ADD_BREAKING: CodePoint = 0x23;
    pub(crate) const REMOVE_BREAKING: CodePoint = 0x24;
    pub(crate) const ADD_TAB_STOP: CodePoint = 0x25;
    pub(crate) const REMOVE_TAB_STOP: CodePoint = 0x26;
    pub(crate) const START_REGION: CodePoint = 0x30;
    pub(crate) const END_REGION: CodePoint = 0x31;
    pub(crate) const HORIZONTAL_SPACE: CodePoint = 0x40;
    pub(crate) const VERTICAL_SPACE: CodePoint = 0x41;
    pub(crate) const PLACEHOLDER: CodePoint = 0x42;
}

/// Bits of the selection display instruction.
pub(crate) mod selection_bits {
    pub(crate) const IMAGE: u8 = 0b1;
    pub(crate) const TEXT_INDEX: u8 = 0b10;
    pub(crate) const TEXT_COLOR: u8 = 0b100;
    pub(crate) const BACKGROUND_INDEX: u8 = 0b1000;
    pub(crate) const BACKGROUND_COLOR: u8 = 0b1_0000;
    pub(crate) const NO_BACKGROUND: u8 = 0b10_0000;
}

/// Well-known font ids.
///
/// Any `u8` can be used as a font id; these are the ids the markup switches
/// to with dedicated instructions and the roles the fallback cascade knows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NamedFont {
    /// The default font. Must always be registered.
    Normal = 0,
    /// Bold weight.
    Bold = 1,
    /// First level heading.
    H1 = 2,
    /// Second level heading.
    H2 = 3,
    /// Third level heading.
    H3 = 4,
    /// Fourth level heading.
    H4 = 5,
    /// Italic style.
    Italic = 6,
    /// Smaller text.
    Small = 7,
    /// Bold and italic.
    BoldItalic = 8,
    /// Informational text, usually small.
    Info = 9,
    /// Larger text.
    Larger = 10,
    /// Text used for sub and superscripts.
    Script = 11,
    /// Bold script text.
    BoldScript = 12,
    /// Small script text.
    SmallScript = 13,
    /// Monospaced text.
    FixedWidth = 14,
    /// Bold monospaced text.
    FixedWidthBold = 15,
    /// Italic monospaced text.
    FixedWidthItalic = 16,
}

impl NamedFont {
    /// Every named font, ordered by id.
    pub const ALL: [Self; 17] = [
        Self::Normal,
        Self::Bold,
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::Italic,
        Self::Small,
        Self::BoldItalic,
        Self::Info,
        Self::Larger,
        Self::Script,
        Self::BoldScript,
        Self::SmallScript,
        Self::FixedWidth,
        Self::FixedWidthBold,
        Self::FixedWidthItalic,
    ];

    /// The font id.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Maps a font id back to its role, if it has one.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }
}

impl From<NamedFont> for u8 {
    fn from(font: NamedFont) -> Self {
        font.id()
    }
}

/// Heading levels with a dedicated legacy toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HeaderLevel {
    /// First level.
    H1 = 1,
    /// Second level.
    H2 = 2,
    /// Third level.
    H3 = 3,
    /// Fourth level.
    H4 = 4,
}

impl HeaderLevel {
    /// The font used for this heading.
    pub const fn font(self) -> NamedFont {
        match self {
            Self::H1 => NamedFont::H1,
            Self::H2 => NamedFont::H2,
            Self::H3 => NamedFont::H3,
            Self::H4 => NamedFont::H4,
        }
    }
}

/// Well-known indices into the color table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NamedColor {
    /// Regular text.
    Regular = 0,
    /// Titles.
    Title = 1,
    /// Emphasized text.
    Emphasis = 2,
    /// Informational text.
    Info = 3,
    /// Text on an inverted background.
    Inverted = 4,
    /// Code.
    Code = 5,
    /// Keywords in code.
    Keyword = 6,
    /// Comments in code.
    Comment = 7,
    /// Selected text; its background color is used for selection boxes.
    Selection = 8,
}

impl NamedColor {
    /// The color table index.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl From<NamedColor> for u8 {
    fn from(color: NamedColor) -> Self {
        color.index()
    }
}

/// Horizontal alignment of a line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Lines start at the left edge.
    #[default]
    Left,
    /// Lines are centered within the wrap width.
    Center,
    /// Lines end at the right edge of the wrap width.
    Right,
}

/// Vertical alignment of inline images and table cells within a line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    /// Top of the line.
    Top,
    /// Middle of the line.
    Middle,
    /// Bottom of the line.
    Bottom,
    /// Sits on the baseline.
    #[default]
    Baseline,
}

/// Placement of an image.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageAlign {
    /// Inside the text flow like a glyph.
    #[default]
    Inline,
    /// Against the left edge.
    Left,
    /// Against the right edge.
    Right,
}

/// Which parts of the text a decoration line covers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineSettings {
    /// Draw under glyphs that descend below the line.
    pub descenders: bool,
    /// Draw under spaces.
    pub spaces: bool,
    /// Draw under tabs.
    pub tabs: bool,
    /// Draw across the gaps of letter offsets.
    pub gaps: bool,
    /// Draw under placeholders.
    pub placeholders: bool,
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            descenders: false,
            spaces: true,
            tabs: false,
            gaps: false,
            placeholders: false,
        }
    }
}

impl LineSettings {
    pub(crate) fn to_bits(self) -> u8 {
        u8::from(self.descenders)
            | u8::from(self.spaces) << 1
            | u8::from(self.tabs) << 2
            | u8::from(self.gaps) << 3
            | u8::from(self.placeholders) << 4
    }

    pub(crate) fn from_bits(bits: u8) -> Self {
        Self {
            descenders: bits & 1 != 0,
            spaces: bits & 0b10 != 0,
            tabs: bits & 0b100 != 0,
            gaps: bits & 0b1000 != 0,
            placeholders: bits & 0b1_0000 != 0,
        }
    }
}

/// A table column as given to [`MarkupBuilder::begin_table`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TableColumn {
    /// Fixed width in pixels.
    pub width: i16,
    /// Width in percent of the table width.
    pub percent: i16,
    /// Alignment of the cells in this column.
    pub align: TextAlign,
}

impl TableColumn {
    /// A column sharing the remaining width with other automatic columns.
    pub const AUTO: Self = Self {
        width: 0,
        percent: 0,
        align: TextAlign::Left,
    };

    /// A column with a fixed pixel width.
    pub const fn fixed(width: i16) -> Self {
        Self {
            width,
            percent: 0,
            align: TextAlign::Left,
        }
    }

    /// A column with a width relative to the table.
    pub const fn percent(percent: i16) -> Self {
        Self {
            width: 0,
            percent,
            align: TextAlign::Left,
        }
    }

    /// Sets the cell alignment.
    #[must_use]
    pub const fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

pub(crate) fn align_to_index(align: TextAlign) -> u8 {
    match align {
        TextAlign::Left => 0,
        TextAlign::Center => 1,
        TextAlign::Right => 2,
    }
}

pub(crate) fn align_from_index(index: Option<u8>) -> TextAlign {
    match index {
        Some(1) => TextAlign::Center,
        Some(2) => TextAlign::Right,
        _ => TextAlign::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_font_ids_round_trip() {
        for font in NamedFont::ALL {
            assert_eq!(NamedFont::from_id(font.id()), Some(font));
        }
        assert_eq!(NamedFont::from_id(17), None);
    }

    #[test]
    fn line_settings_bits() {
        let settings = LineSettings {
            descenders: true,
            spaces: false,
            tabs: true,
            gaps: false,
            placeholders: true,
        };
        assert_eq!(settings.to_bits(), 0b1_0101);
        assert_eq!(LineSettings::from_bits(settings.to_bits()), settings);
    }
}
