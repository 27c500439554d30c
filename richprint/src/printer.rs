// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The printer: font, color and image tables plus the layout queries.

use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;
use smallvec::SmallVec;

use crate::error::Error;
use crate::font::{self, GlyphRenderer, StyledFont};
use crate::geometry::{Point, Rect, Size};
use crate::layout::{LayoutPass, LayoutSink, Region};
use crate::markup::NamedFont;
use crate::sinks::{DrawSink, HitTestSink, LocateSink, MeasureSink};
use crate::surface::{Image, Surface};

/// A color table entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorPair {
    /// Used for text, borders, tints and decorations.
    pub foreground: Color,
    /// Used for background and selection boxes.
    pub background: Color,
}

impl ColorPair {
    /// Creates a color table entry.
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

/// Lays out rich-text markup.
///
/// A printer owns the tables the markup refers to by index: fonts, colors and
/// images. Registration takes `&mut self` while every query takes `&self`, so
/// tables never change during a layout pass.
///
/// The default font must be registered before any query; every other table
/// entry is optional.
#[derive(Clone, Debug)]
pub struct Printer<R> {
    fonts: HashMap<u8, StyledFont<R>>,
    colors: HashMap<u8, ColorPair>,
    images: HashMap<u8, Image>,
    default_font: u8,
    breaking_letters: SmallVec<[char; 8]>,
}

impl<R> Default for Printer<R> {
    fn default() -> Self {
        Self {
            fonts: HashMap::new(),
            colors: HashMap::new(),
            images: HashMap::new(),
            default_font: NamedFont::Normal.id(),
            breaking_letters: SmallVec::from_slice(&['-']),
        }
    }
}

impl<R: GlyphRenderer> Printer<R> {
    /// Creates a printer with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a font, returning the one it replaces.
    pub fn set_font(&mut self, id: impl Into<u8>, font: StyledFont<R>) -> Option<StyledFont<R>> {
        self.fonts.insert(id.into(), font)
    }

    /// Removes a font.
    pub fn remove_font(&mut self, id: impl Into<u8>) -> Option<StyledFont<R>> {
        self.fonts.remove(&id.into())
    }

    /// The font registered under `id`, without fallback.
    pub fn font(&self, id: impl Into<u8>) -> Option<&StyledFont<R>> {
        self.fonts.get(&id.into())
    }

    /// Registers a color table entry.
    pub fn set_color(&mut self, index: impl Into<u8>, color: ColorPair) -> Option<ColorPair> {
        self.colors.insert(index.into(), color)
    }

    /// Removes a color table entry.
    pub fn remove_color(&mut self, index: impl Into<u8>) -> Option<ColorPair> {
        self.colors.remove(&index.into())
    }

    /// The color table entry at `index`.
    pub fn color(&self, index: impl Into<u8>) -> Option<ColorPair> {
        self.colors.get(&index.into()).copied()
    }

    /// Registers an image.
    pub fn set_image(&mut self, index: u8, image: Image) -> Option<Image> {
        self.images.insert(index, image)
    }

    /// Removes an image.
    pub fn remove_image(&mut self, index: u8) -> Option<Image> {
        self.images.remove(&index)
    }

    /// The image at `index`.
    pub fn image(&self, index: u8) -> Option<Image> {
        self.images.get(&index).copied()
    }

    /// Changes the font every fallback chain ends at. Defaults to
    /// [`NamedFont::Normal`].
    pub fn set_default_font(&mut self, id: impl Into<u8>) {
        self.default_font = id.into();
    }

    /// The font every fallback chain ends at.
    pub fn default_font(&self) -> u8 {
        self.default_font
    }

    /// Replaces the letters lines may break after. Defaults to `-`.
    ///
    /// Markup can add and remove letters for the rest of a pass.
    pub fn set_breaking_letters(&mut self, letters: &[char]) {
        self.breaking_letters = SmallVec::from_slice(letters);
    }

    /// The letters lines may break after.
    pub fn breaking_letters(&self) -> &[char] {
        &self.breaking_letters
    }

    fn is_registered(&self, id: u8) -> bool {
        self.fonts.contains_key(&id)
    }

    /// Resolves a font id through the fallback cascade.
    pub fn resolve_font(&self, id: impl Into<u8>) -> u8 {
        let id = id.into();
        let resolved = font::resolve(id, self.default_font, |f| self.is_registered(f));
        if resolved != id {
            log::debug!("font {id} resolved to {resolved}");
        }
        resolved
    }

    /// Resolves the font used for `id` in sub and superscripts. Falls back to
    /// the regular resolution of `id`.
    pub(crate) fn resolve_script_font(&self, id: u8) -> u8 {
        let regular = self.resolve_font(id);
        font::resolve(font::script_variant(id), regular, |f| self.is_registered(f))
    }

    /// Lays out `markup` at `origin`, reporting the result to `sink`.
    ///
    /// A `wrap_width` of zero disables wrapping. Returns the boundaries of the
    /// regions in the markup.
    pub fn layout<S: LayoutSink<R>>(
        &self,
        markup: impl AsRef<[u8]>,
        origin: Point,
        wrap_width: i32,
        sink: S,
    ) -> Result<Vec<Region>, Error> {
        let pass = LayoutPass::new(self, markup.as_ref(), origin, wrap_width, sink)?;
        Ok(pass.run())
    }

    /// Draws `markup` onto `surface` with its first line at `origin`.
    ///
    /// Returns the boundaries of the regions in the markup.
    pub fn draw<S: Surface>(
        &self,
        markup: impl AsRef<[u8]>,
        origin: Point,
        wrap_width: i32,
        surface: &mut S,
    ) -> Result<Vec<Region>, Error> {
        self.layout(markup, origin, wrap_width, DrawSink::new(surface))
    }

    /// Size of the unwrapped markup.
    pub fn measure(&self, markup: impl AsRef<[u8]>) -> Result<Size, Error> {
        self.measure_wrapped(markup, 0)
    }

    /// Size of the markup wrapped at `wrap_width`.
    pub fn measure_wrapped(
        &self,
        markup: impl AsRef<[u8]>,
        wrap_width: i32,
    ) -> Result<Size, Error> {
        let mut sink = MeasureSink::default();
        self.layout(markup, Point::ZERO, wrap_width, &mut sink)?;
        Ok(sink.size())
    }

    /// Index of the code point closest to `point` in the unwrapped markup.
    pub fn hit_test(&self, markup: impl AsRef<[u8]>, point: Point) -> Result<usize, Error> {
        self.hit_test_wrapped(markup, 0, point)
    }

    /// Index of the code point closest to `point` in the markup wrapped at
    /// `wrap_width`.
    ///
    /// Points right of a line give the index of its line end; points below
    /// the text give the total number of code points.
    pub fn hit_test_wrapped(
        &self,
        markup: impl AsRef<[u8]>,
        wrap_width: i32,
        point: Point,
    ) -> Result<usize, Error> {
        let mut sink = HitTestSink::new(point);
        self.layout(markup, Point::ZERO, wrap_width, &mut sink)?;
        Ok(sink.index())
    }

    /// Bounds of the glyph at code point `index` in the unwrapped markup.
    pub fn locate(&self, markup: impl AsRef<[u8]>, index: usize) -> Result<Option<Rect>, Error> {
        self.locate_wrapped(markup, 0, index)
    }

    /// Bounds of the glyph at code point `index` in the markup wrapped at
    /// `wrap_width`.
    ///
    /// Indices of instructions locate the next placed glyph. Returns `None`
    /// past the end of the markup.
    pub fn locate_wrapped(
        &self,
        markup: impl AsRef<[u8]>,
        wrap_width: i32,
        index: usize,
    ) -> Result<Option<Rect>, Error> {
        let mut sink = LocateSink::new(index);
        self.layout(markup, Point::ZERO, wrap_width, &mut sink)?;
        Ok(sink.bounds())
    }
}
