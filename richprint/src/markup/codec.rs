// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Code point encoding and parameter reading.

use alloc::vec::Vec;

use peniko::Color;

use super::value::{Length, MODE_PERCENT, MODE_REL, MODE_UNSET, MODE_VALUE};
use super::{CodePoint, REPLACEMENT, TERMINATOR};
use crate::geometry::Point;

/// Appends a code point as generalized UTF-8.
///
/// Surrogate values are encoded like any other three byte sequence.
#[expect(
    clippy::cast_possible_truncation,
    reason = "each byte is masked before the cast"
)]
pub(crate) fn push_code_point(buf: &mut Vec<u8>, c: CodePoint) {
    match c {
        0..=0x7F => buf.push(c as u8),
        0x80..=0x7FF => {
            buf.push(0xC0 | (c >> 6) as u8);
            buf.push(0x80 | (c & 0x3F) as u8);
        }
        0x800..=0xFFFF => {
            buf.push(0xE0 | (c >> 12) as u8);
            buf.push(0x80 | ((c >> 6) & 0x3F) as u8);
            buf.push(0x80 | (c & 0x3F) as u8);
        }
        _ => {
            buf.push(0xF0 | ((c >> 18) & 0x07) as u8);
            buf.push(0x80 | ((c >> 12) & 0x3F) as u8);
            buf.push(0x80 | ((c >> 6) & 0x3F) as u8);
            buf.push(0x80 | (c & 0x3F) as u8);
        }
    }
}

/// Decodes the code point starting at `pos`, returning it with its length in
/// bytes.
///
/// Malformed or truncated sequences decode as [`REPLACEMENT`]. An invalid lead
/// byte consumes one byte, a sequence cut short consumes the bytes read so far.
pub(crate) fn decode_at(bytes: &[u8], pos: usize) -> (CodePoint, usize) {
    let lead = bytes[pos];
    let (len, init) = match lead {
        0x00..=0x7F => return (CodePoint::from(lead), 1),
        0xC0..=0xDF => (2, CodePoint::from(lead & 0x1F)),
        0xE0..=0xEF => (3, CodePoint::from(lead & 0x0F)),
        0xF0..=0xF7 => (4, CodePoint::from(lead & 0x07)),
        _ => return (REPLACEMENT, 1),
    };
    let mut c = init;
    for i in 1..len {
        match bytes.get(pos + i) {
            Some(&b) if b & 0xC0 == 0x80 => c = (c << 6) | CodePoint::from(b & 0x3F),
            _ => return (REPLACEMENT, i),
        }
    }
    (c, len)
}

/// Sequential reader over a markup buffer.
///
/// Counts every decoded code point, instructions and their parameters
/// included, so that glyphs can report their position in the source.
#[derive(Clone, Debug)]
pub(crate) struct MarkupReader<'t> {
    bytes: &'t [u8],
    pos: usize,
    index: usize,
}

impl<'t> MarkupReader<'t> {
    pub(crate) fn new(bytes: &'t [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            index: 0,
        }
    }

    /// Number of code points consumed so far.
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn peek(&self) -> Option<CodePoint> {
        (self.pos < self.bytes.len()).then(|| decode_at(self.bytes, self.pos).0)
    }
}

impl Iterator for MarkupReader<'_> {
    type Item = CodePoint;

    fn next(&mut self) -> Option<CodePoint> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let (c, len) = decode_at(self.bytes, self.pos);
        self.pos += len;
        self.index += 1;
        Some(c)
    }
}

/// Parameter cursor for one complex instruction.
///
/// Holds the next unconsumed parameter. Reads past the end of the input
/// return defaults.
#[derive(Debug)]
pub(crate) struct Params<'r, 't> {
    reader: &'r mut MarkupReader<'t>,
    current: Option<CodePoint>,
}

impl<'r, 't> Params<'r, 't> {
    pub(crate) fn new(reader: &'r mut MarkupReader<'t>) -> Self {
        let current = reader.next();
        Self { reader, current }
    }

    pub(crate) fn peek(&self) -> Option<CodePoint> {
        self.current
    }

    pub(crate) fn is_terminated(&self) -> bool {
        matches!(self.current, None | Some(TERMINATOR))
    }

    pub(crate) fn advance(&mut self) {
        if self.current.is_some() {
            self.current = self.reader.next();
        }
    }

    /// Reads a 7-bit index. Anything larger is "absent" and left unconsumed.
    #[expect(clippy::cast_possible_truncation, reason = "value checked above")]
    pub(crate) fn index(&mut self) -> Option<u8> {
        match self.current {
            Some(c) if c <= 0x7F => {
                self.advance();
                Some(c as u8)
            }
            _ => None,
        }
    }

    /// Reads a 7-bit alpha and expands it to 8 bits.
    pub(crate) fn alpha(&mut self) -> Option<u8> {
        self.index().map(|a| (a << 1) | (a >> 6 & 1))
    }

    /// Reads a 16-bit word. The word is positional: it is consumed whatever
    /// its value, since any 16-bit value is legal.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "words are written from 16-bit values"
    )]
    pub(crate) fn word(&mut self) -> i16 {
        match self.current {
            Some(c) => {
                self.advance();
                c as u16 as i16
            }
            None => 0,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "each channel is masked before the cast"
    )]
    pub(crate) fn color(&mut self) -> Color {
        let low = self.word() as u16;
        let high = self.word() as u16;
        Color::from_rgba8(
            (low & 0xFF) as u8,
            (low >> 8) as u8,
            (high & 0xFF) as u8,
            (high >> 8) as u8,
        )
    }

    /// Reads a length. `rel_scale` converts the relative word into a factor of
    /// the reference length (`0.01` for percentages, `1.0` for multiples).
    ///
    /// Returns `None` when the setting returns to its default.
    pub(crate) fn length(&mut self, rel_scale: f32) -> Option<Length> {
        let mode = self.index()?;
        if mode == MODE_UNSET {
            return None;
        }
        let mut len = Length::ZERO;
        if mode & MODE_VALUE != 0 {
            len.pixels = i32::from(self.word());
        }
        if mode & MODE_REL != 0 {
            len.rel = f32::from(self.word()) * rel_scale;
        }
        if mode & MODE_PERCENT != 0 {
            len.percent = f32::from(self.word()) / 10_000.;
        }
        Some(len)
    }

    /// Reads four lengths in left, top, right, bottom order.
    pub(crate) fn margin(&mut self, rel_scale: f32) -> [Option<Length>; 4] {
        [
            self.length(rel_scale),
            self.length(rel_scale),
            self.length(rel_scale),
            self.length(rel_scale),
        ]
    }

    pub(crate) fn point(&mut self) -> Point {
        let x = self.word();
        let y = self.word();
        Point::new(i32::from(x), i32::from(y))
    }

    /// Skips everything up to and including the terminator.
    pub(crate) fn finish(mut self) {
        while !self.is_terminated() {
            self.advance();
        }
    }
}
