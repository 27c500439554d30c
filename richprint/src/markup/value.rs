// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lengths carried by instruction parameters.

#[cfg(feature = "libm")]
#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Mode bit marking a pixel value.
pub(crate) const MODE_VALUE: u8 = 0b1;
/// Mode bit marking a relative value.
pub(crate) const MODE_REL: u8 = 0b10;
/// Mode bit marking a percentage in basis points.
pub(crate) const MODE_PERCENT: u8 = 0b100;
/// Mode written when a setting returns to its default.
pub(crate) const MODE_UNSET: u8 = 0x7F;

/// A length made of a pixel amount, a multiple of a reference length and a
/// fraction of a second reference length.
///
/// What the references are depends on the instruction: em size, line height,
/// wrap width.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Length {
    pub(crate) pixels: i32,
    pub(crate) rel: f32,
    pub(crate) percent: f32,
}

impl Length {
    pub(crate) const ZERO: Self = Self {
        pixels: 0,
        rel: 0.,
        percent: 0.,
    };

    /// Resolves against the reference length only.
    pub(crate) fn resolve(self, reference: i32) -> i32 {
        self.resolve_with(reference, 0)
    }

    /// Resolves against both references.
    pub(crate) fn resolve_with(self, reference: i32, percent_of: i32) -> i32 {
        self.pixels
            + round(self.rel * reference as f32)
            + round(self.percent * percent_of as f32)
    }
}

/// Resolves an optional setting, falling back to `default` when unset.
pub(crate) fn resolve_or(setting: Option<Length>, reference: i32, default: i32) -> i32 {
    setting.map_or(default, |len| len.resolve(reference))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "layout values are small pixel amounts"
)]
pub(crate) fn round(value: f32) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_adds_every_component() {
        let len = Length {
            pixels: 3,
            rel: 0.5,
            percent: 0.25,
        };
        assert_eq!(len.resolve_with(10, 100), 3 + 5 + 25);
        assert_eq!(len.resolve(10), 8);
    }

    #[test]
    fn unset_uses_default() {
        assert_eq!(resolve_or(None, 10, 7), 7);
        assert_eq!(resolve_or(Some(Length::ZERO), 10, 7), 0);
    }
}
