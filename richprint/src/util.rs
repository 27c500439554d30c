// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character classification used by the layout engine.

use crate::markup::{CodePoint, LINE_BREAK};

pub(crate) const TAB: CodePoint = '\t' as CodePoint;
pub(crate) const LINE_FEED: CodePoint = '\n' as CodePoint;
pub(crate) const CARRIAGE_RETURN: CodePoint = '\r' as CodePoint;
pub(crate) const ZERO_WIDTH_SPACE: CodePoint = 0x200B;
const LINE_SEPARATOR: CodePoint = 0x2028;
const PARAGRAPH_SEPARATOR: CodePoint = 0x2029;

/// Code points that end the current line.
pub(crate) fn is_newline(c: CodePoint) -> bool {
    matches!(
        c,
        LINE_FEED | CARRIAGE_RETURN | LINE_BREAK | LINE_SEPARATOR | PARAGRAPH_SEPARATOR
    )
}

/// Newlines that also start a new paragraph.
pub(crate) fn starts_paragraph(c: CodePoint) -> bool {
    is_newline(c) && c != LINE_BREAK && c != LINE_SEPARATOR
}

pub(crate) fn is_space(c: CodePoint) -> bool {
    matches!(
        c,
        0x20 | 0xA0 | 0x1680 | 0x2000..=0x200B | 0x202F | 0x205F | 0x3000
    )
}

/// Spaces that justification may widen.
pub(crate) fn is_adjustable_space(c: CodePoint) -> bool {
    matches!(c, 0x20 | 0xA0 | 0x3000)
}

/// Spaces that offer a line break opportunity before them.
pub(crate) fn is_breaking(c: CodePoint) -> bool {
    is_space(c) && !matches!(c, 0xA0 | 0x2007 | 0x202F)
}

/// Whether the glyph occupies its own horizontal space, i.e. it is not a
/// combining mark.
pub(crate) fn is_spaced(c: CodePoint) -> bool {
    !matches!(
        c,
        0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F
    )
}

/// Width of a space character the renderer has no glyph for.
pub(crate) fn default_space_width(c: CodePoint, em: i32, digit: i32) -> i32 {
    match c {
        0x2000 | 0x2002 => em / 2,
        0x2001 | 0x2003 | 0x3000 => em,
        0x2004 => em / 3,
        0x2005 => em / 4,
        0x2006 => em / 6,
        0x2007 => digit,
        0x2008 | 0x2009 | 0x202F => em / 5,
        0x200A => em / 10,
        0x205F => em * 2 / 9,
        ZERO_WIDTH_SPACE => 0,
        _ => em / 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_break_does_not_start_paragraph() {
        assert!(is_newline(LINE_BREAK));
        assert!(!starts_paragraph(LINE_BREAK));
        assert!(starts_paragraph(LINE_FEED));
        assert!(starts_paragraph(PARAGRAPH_SEPARATOR));
    }

    #[test]
    fn no_break_space_is_not_breaking() {
        assert!(is_space(0xA0));
        assert!(!is_breaking(0xA0));
        assert!(is_breaking(' ' as CodePoint));
        assert!(is_breaking(ZERO_WIDTH_SPACE));
    }

    #[test]
    fn combining_marks_are_not_spaced() {
        assert!(!is_spaced(0x0301));
        assert!(is_spaced('a' as CodePoint));
    }
}
