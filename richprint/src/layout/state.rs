// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Formatting state mutated by instructions.
//!
//! `None` means "use the font's default". Lengths are kept unresolved when
//! their reference (em size, line height) is only known when they are used.

use smallvec::SmallVec;

use peniko::Color;

use crate::geometry::Margin;
use crate::markup::{Length, LineSettings, TextAlign, VerticalAlign};

/// Underline or strikethrough settings.
#[derive(Clone, Debug, Default)]
pub(crate) struct DecorationState {
    pub(crate) enabled: Option<bool>,
    pub(crate) color: Option<Color>,
    /// From the top of the line, relative to the line height.
    pub(crate) offset: Option<Length>,
    /// Relative to the font's line thickness.
    pub(crate) thickness: Option<Length>,
    pub(crate) settings: LineSettings,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct SelectionState {
    pub(crate) text: Option<Color>,
    pub(crate) background: Option<Color>,
    pub(crate) image: Option<u8>,
    pub(crate) no_background: bool,
    /// Relative to the em size.
    pub(crate) padding: [Option<Length>; 4],
}

#[derive(Clone, Debug, Default)]
pub(crate) struct FormatState {
    /// Requested font id, before fallback.
    pub(crate) font: u8,

    pub(crate) color: Option<Color>,
    pub(crate) tint: Option<Color>,
    pub(crate) background: Option<Color>,
    pub(crate) border_color: Option<Color>,
    /// Relative to the line thickness.
    pub(crate) border_thickness: Option<Length>,
    pub(crate) show_background: bool,
    pub(crate) show_border: bool,
    /// Relative to the em size.
    pub(crate) padding: [Option<Length>; 4],

    /// Relative to the em size.
    pub(crate) letter_spacing: Option<Length>,
    /// Relative to the line height.
    pub(crate) line_spacing: Option<Length>,
    /// Relative to the line height.
    pub(crate) paragraph_spacing: Option<Length>,
    pub(crate) indent: i32,
    pub(crate) hanging_indent: i32,
    pub(crate) tab_width: Option<i32>,
    /// Tab stops by id, relative to the em size and the wrap width.
    pub(crate) tab_stops: SmallVec<[(u8, Length); 4]>,
    /// Relative to the em size.
    pub(crate) letter_offset: [Option<Length>; 2],

    pub(crate) align: Option<TextAlign>,
    pub(crate) justify: Option<bool>,
    pub(crate) vertical_align: VerticalAlign,

    pub(crate) underline: DecorationState,
    pub(crate) strike: DecorationState,
    pub(crate) selection: SelectionState,

    /// Vertical bias of sub and superscripts as a fraction of the baseline.
    pub(crate) baseline_offset: f32,
}

impl FormatState {
    pub(crate) fn new(font: u8) -> Self {
        Self {
            font,
            ..Self::default()
        }
    }

    /// Returns everything reset formatting covers to its default.
    pub(crate) fn reset(&mut self, font: u8) {
        self.letter_spacing = None;
        self.hanging_indent = 0;
        self.indent = 0;
        self.paragraph_spacing = None;
        self.line_spacing = None;
        self.justify = None;
        self.align = None;
        self.color = None;
        self.tab_width = None;
        self.letter_offset = [None, None];
        self.font = font;
        self.baseline_offset = 0.;
    }

    pub(crate) fn is_script(&self) -> bool {
        self.baseline_offset != 0.
    }

    pub(crate) fn set_tab_stop(&mut self, id: u8, position: Length) {
        match self.tab_stops.iter_mut().find(|(stop, _)| *stop == id) {
            Some(entry) => entry.1 = position,
            None => self.tab_stops.push((id, position)),
        }
    }

    pub(crate) fn remove_tab_stop(&mut self, id: u8) {
        self.tab_stops.retain(|(stop, _)| *stop != id);
    }
}

/// Resolves four optional lengths against `reference`.
pub(crate) fn resolve_margin(sides: &[Option<Length>; 4], reference: i32) -> Margin {
    let side = |i: usize| sides[i].map_or(0, |len| len.resolve(reference));
    Margin::new(side(0), side(1), side(2), side(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(pixels: i32) -> Length {
        Length {
            pixels,
            ..Length::ZERO
        }
    }

    #[test]
    fn reset_keeps_decorations_and_stops() {
        let mut state = FormatState::new(0);
        state.indent = 4;
        state.color = Some(Color::WHITE);
        state.underline.enabled = Some(true);
        state.set_tab_stop(1, px(40));
        state.baseline_offset = 0.4;
        state.reset(0);
        assert_eq!(state.indent, 0);
        assert!(state.color.is_none());
        assert!(!state.is_script());
        assert_eq!(state.underline.enabled, Some(true));
        assert_eq!(state.tab_stops.len(), 1);
    }

    #[test]
    fn tab_stops_replace_by_id() {
        let mut state = FormatState::new(0);
        state.set_tab_stop(2, px(10));
        state.set_tab_stop(2, px(20));
        assert_eq!(state.tab_stops.len(), 1);
        assert_eq!(state.tab_stops[0].1.pixels, 20);
        state.remove_tab_stop(2);
        assert!(state.tab_stops.is_empty());
    }

    #[test]
    fn margin_resolution() {
        let sides = [Some(px(1)), None, Some(px(3)), None];
        assert_eq!(resolve_margin(&sides, 10), Margin::new(1, 0, 3, 0));
    }
}
