// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Justification of wrapped lines.
//!
//! The leftover width is distributed in two passes. Spaces first grow by up
//! to one digit width. If that is not enough, the gaps between letters grow
//! by up to a third of the font height, and whatever is still left goes back
//! to the spaces, now allowed to grow up to twice the font height. The
//! remainder of the space share is handed out one pixel at a time to the
//! earliest spaces. A line whose leftover cannot be consumed exactly is left
//! as is.

use crate::markup::CodePoint;
use crate::util::{is_adjustable_space, is_spaced, TAB};

/// A glyph that justification can move.
pub(crate) trait Justifiable {
    fn code(&self) -> CodePoint;
    fn shift(&mut self, dx: i32);
}

/// Extra space given to each stretchable position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Justification {
    /// Added after every adjustable space.
    pub(crate) space: i32,
    /// Number of leading spaces receiving one extra pixel.
    pub(crate) extra_spaces: i32,
    /// Added between consecutive letters.
    pub(crate) gap: i32,
}

/// Glyphs followed by a letter gap. Tabs never stretch.
fn stretches(c: CodePoint) -> bool {
    c != TAB && is_spaced(c)
}

/// Counts adjustable spaces and letter gaps.
///
/// A gap sits before every glyph that follows a stretching glyph. A tab ends
/// the run, so neither side of it counts.
pub(crate) fn count<J: Justifiable>(glyphs: &[J]) -> (i32, i32) {
    let spaces = glyphs.iter().filter(|g| is_adjustable_space(g.code())).count();
    let mut gaps = 0_usize;
    let mut prev = None;
    for glyph in glyphs {
        let code = glyph.code();
        if code == TAB {
            prev = None;
            continue;
        }
        if prev.is_some_and(|p| p != 0 && stretches(p)) {
            gaps += 1;
        }
        prev = Some(code);
    }
    (saturate(spaces), saturate(gaps))
}

fn saturate(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Plans how `target` pixels are distributed, or `None` if they cannot be
/// distributed exactly.
pub(crate) fn plan(
    spaces: i32,
    gaps: i32,
    mut target: i32,
    digit_width: i32,
    height: i32,
) -> Option<Justification> {
    if target <= 0 {
        return None;
    }
    let mut plan = Justification::default();
    if spaces > 0 {
        plan.space = target / spaces;
        if plan.space > digit_width {
            plan.space = digit_width;
            target -= plan.space * spaces;
        } else {
            target -= plan.space * spaces;
            plan.extra_spaces = target;
            target = 0;
        }
    }
    if gaps > 0 && target / gaps >= 1 {
        plan.gap = target / gaps;
        // One pixel per gap is always acceptable.
        if plan.gap > 1 && plan.gap > height / 3 {
            plan.gap = height / 3;
        }
        target -= plan.gap * gaps;
    }
    if spaces > 0 && target > 0 {
        target += plan.space * spaces;
        plan.space = target / spaces;
        if plan.space > height * 2 {
            plan.space = height * 2;
            target -= plan.space * spaces;
        } else {
            target -= plan.space * spaces;
            plan.extra_spaces = target;
            target = 0;
        }
    }
    (target == 0).then_some(plan)
}

impl Justification {
    /// Moves every glyph right by the space added before it.
    pub(crate) fn apply<J: Justifiable>(&self, glyphs: &mut [J]) {
        let mut offset = 0;
        let mut extra = self.extra_spaces;
        for glyph in glyphs {
            let code = glyph.code();
            glyph.shift(offset);
            if is_adjustable_space(code) {
                offset += self.space;
                if extra > 0 {
                    offset += 1;
                    extra -= 1;
                }
            }
            if stretches(code) {
                offset += self.gap;
            }
        }
    }
}
