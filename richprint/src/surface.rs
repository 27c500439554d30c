// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing target of [`Printer::draw`](crate::Printer::draw).

use peniko::Color;

use crate::geometry::{Point, Rect, Size};

/// A host-owned image known by an opaque id.
///
/// Images are registered with the printer and passed back to the surface when
/// they need to be drawn. Glyph renderers may use the same type for their own
/// glyph images.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Image {
    /// Host-defined identifier.
    pub id: u64,
    /// Natural size of the image.
    pub size: Size,
}

impl Image {
    /// Creates an image reference.
    pub const fn new(id: u64, size: Size) -> Self {
        Self { id, size }
    }
}

/// How an image fills its bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageFit {
    /// Scaled to cover the bounds exactly.
    #[default]
    Stretch,
    /// Repeated at natural size to cover the bounds.
    Tile,
}

/// Drawing primitives used to render laid out text.
pub trait Surface {
    /// Fills a rectangle.
    fn fill_rect(&mut self, bounds: Rect, color: Color);

    /// Strokes the inside of a rectangle.
    fn draw_border(&mut self, bounds: Rect, thickness: i32, color: Color) {
        if thickness <= 0 {
            return;
        }
        let Rect {
            left,
            top,
            right,
            bottom,
        } = bounds;
        self.fill_rect(Rect::new(left, top, right, top + thickness), color);
        self.fill_rect(Rect::new(left, bottom - thickness, right, bottom), color);
        self.fill_rect(
            Rect::new(left, top + thickness, left + thickness, bottom - thickness),
            color,
        );
        self.fill_rect(
            Rect::new(right - thickness, top + thickness, right, bottom - thickness),
            color,
        );
    }

    /// Draws a horizontal bar starting at `origin`.
    fn draw_bar(&mut self, origin: Point, width: i32, thickness: i32, color: Color) {
        self.fill_rect(
            Rect::from_origin_size(origin, Size::new(width, thickness)),
            color,
        );
    }

    /// Draws an image into `bounds`, multiplied by `tint`.
    fn draw_image(&mut self, image: Image, bounds: Rect, tint: Color, fit: ImageFit);

    /// Drawing stops once a line starts below this coordinate.
    fn visible_bottom(&self) -> Option<i32> {
        None
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        (**self).fill_rect(bounds, color);
    }

    fn draw_border(&mut self, bounds: Rect, thickness: i32, color: Color) {
        (**self).draw_border(bounds, thickness, color);
    }

    fn draw_bar(&mut self, origin: Point, width: i32, thickness: i32, color: Color) {
        (**self).draw_bar(origin, width, thickness, color);
    }

    fn draw_image(&mut self, image: Image, bounds: Rect, tint: Color, fit: ImageFit) {
        (**self).draw_image(image, bounds, tint, fit);
    }

    fn visible_bottom(&self) -> Option<i32> {
        (**self).visible_bottom()
    }
}
