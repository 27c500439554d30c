// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spans over the glyphs of the line being built.
//!
//! Underlines, strikethroughs, selections and regions are opened and closed
//! at positions in the uncommitted glyph sequence. When a line is committed
//! each span either finishes on that line or is split: the committed part is
//! emitted and the rest continues at the start of the next line.

use alloc::vec::Vec;

use peniko::Color;

use crate::geometry::Margin;

/// Where a span starts relative to the uncommitted glyphs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SpanStart {
    /// At the glyph with this index.
    Glyph(usize),
    /// On a previous line; the span covers the current line from its start.
    Continued,
}

#[derive(Clone, Debug)]
pub(crate) struct OpenSpan<T> {
    pub(crate) start: SpanStart,
    /// Index of the first glyph not covered, once known.
    pub(crate) end: Option<usize>,
    pub(crate) data: T,
}

impl<T> OpenSpan<T> {
    pub(crate) fn new(start: usize, data: T) -> Self {
        Self {
            start: SpanStart::Glyph(start),
            end: None,
            data,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// The span's first glyph on the line ending at `cut`. A continued span
    /// starts at the first glyph of the line, if there is one.
    pub(crate) fn first_glyph(&self, cut: usize) -> Option<usize> {
        match self.start {
            SpanStart::Glyph(i) if i < cut => Some(i),
            SpanStart::Continued if cut > 0 => Some(0),
            _ => None,
        }
    }

    /// The glyph the span ends before, if it is on the line ending at `cut`.
    pub(crate) fn end_glyph(&self, cut: usize) -> Option<usize> {
        self.end.filter(|&end| end < cut)
    }

    /// Whether the span is finished by the line ending at `cut`.
    pub(crate) fn ends_by(&self, cut: usize) -> bool {
        self.end.is_some_and(|end| end <= cut)
    }

    /// Rebases the span after the glyphs before `cut` have been committed.
    ///
    /// Returns `false` when nothing of the span is left.
    pub(crate) fn carry(&mut self, cut: usize) -> bool {
        if let SpanStart::Glyph(start) = self.start {
            if start >= cut {
                self.start = SpanStart::Glyph(start - cut);
                self.end = self.end.map(|end| end - cut);
                return true;
            }
        }
        if self.ends_by(cut) {
            return false;
        }
        self.start = SpanStart::Continued;
        self.end = self.end.map(|end| end - cut);
        true
    }
}

/// Closes the most recent open span, if any, at `at`.
pub(crate) fn close_last<T>(spans: &mut [OpenSpan<T>], at: usize) {
    if let Some(span) = spans.last_mut().filter(|s| s.is_open()) {
        span.end = Some(at);
    }
}

/// An underline or strikethrough.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Rule {
    pub(crate) thickness: i32,
    /// From the top of the first covered glyph's box.
    pub(crate) offset: i32,
    pub(crate) color: Color,
    /// Whether the rule runs on across the space after the last covered
    /// glyph.
    pub(crate) gaps: bool,
}

/// Decoration spans of one kind.
#[derive(Clone, Debug, Default)]
pub(crate) struct Decorations {
    pub(crate) spans: Vec<OpenSpan<Rule>>,
    /// Position of the open rule relative to the baseline, used to detect
    /// offset changes.
    open_at: Option<i32>,
}

impl Decorations {
    /// Closes the open rule before glyph `at`.
    pub(crate) fn close(&mut self, at: usize) {
        if self.open_at.take().is_some() {
            close_last(&mut self.spans, at);
        }
    }

    /// Makes sure glyph `at` is covered by `rule`, drawn `baseline_offset`
    /// from the baseline. A new rule starts whenever the position or color
    /// differs from the open one.
    pub(crate) fn cover(&mut self, at: usize, rule: Rule, baseline_offset: i32) {
        let same = self.open_at == Some(baseline_offset)
            && self.spans.last().is_some_and(|s| {
                s.data.color.to_rgba8() == rule.color.to_rgba8()
                    && s.data.thickness == rule.thickness
            });
        if same {
            return;
        }
        self.close(at);
        self.spans.push(OpenSpan::new(at, rule));
        self.open_at = Some(baseline_offset);
    }
}

/// A selection with its display settings captured when it started.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Selection {
    pub(crate) text: Option<Color>,
    pub(crate) background: Color,
    pub(crate) no_background: bool,
    pub(crate) image: Option<u8>,
    pub(crate) padding: Margin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_starting_after_cut_is_rebased() {
        let mut span = OpenSpan::new(7, ());
        span.end = Some(9);
        assert_eq!(span.first_glyph(5), None);
        assert!(span.carry(5));
        assert_eq!(span.start, SpanStart::Glyph(2));
        assert_eq!(span.end, Some(4));
    }

    #[test]
    fn span_crossing_cut_continues() {
        let mut span = OpenSpan::new(2, ());
        assert_eq!(span.first_glyph(5), Some(2));
        assert!(span.carry(5));
        assert_eq!(span.start, SpanStart::Continued);
        assert_eq!(span.first_glyph(3), Some(0));
        assert_eq!(span.first_glyph(0), None);
    }

    #[test]
    fn span_ending_at_cut_is_finished() {
        let mut span = OpenSpan::new(1, ());
        span.end = Some(5);
        assert_eq!(span.end_glyph(5), None);
        assert!(span.ends_by(5));
        assert!(!span.carry(5));
    }

    #[test]
    fn decoration_splits_on_color_change() {
        let rule = |color| Rule {
            thickness: 1,
            offset: 10,
            color,
            gaps: false,
        };
        let mut lines = Decorations::default();
        lines.cover(0, rule(Color::BLACK), 10);
        lines.cover(1, rule(Color::BLACK), 10);
        assert_eq!(lines.spans.len(), 1);
        lines.cover(2, rule(Color::WHITE), 10);
        assert_eq!(lines.spans.len(), 2);
        assert_eq!(lines.spans[0].end, Some(2));
        lines.close(3);
        assert_eq!(lines.spans[1].end, Some(3));
        lines.cover(4, rule(Color::WHITE), 10);
        assert_eq!(lines.spans.len(), 3, "closed rules are never extended");
    }
}
