// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer geometry used by the layout engine.
//!
//! Layout works on whole pixels so that justification can distribute the
//! leftover width exactly.

use core::ops::{Add, AddAssign, Sub};

/// A position in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate, growing downwards.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width and height in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Creates a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero or negative.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// An axis aligned rectangle given by its edges.
///
/// `right` and `bottom` are exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl Rect {
    /// Creates a rectangle from its edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// The top-left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Width of the rectangle.
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Size of the rectangle.
    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns `true` if the point lies inside the rectangle.
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Grows the rectangle outwards by the given margin.
    #[must_use]
    pub const fn inflate(self, margin: Margin) -> Self {
        Self::new(
            self.left - margin.left,
            self.top - margin.top,
            self.right + margin.right,
            self.bottom + margin.bottom,
        )
    }
}

/// Distances from each side of a rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Margin {
    /// Distance from the left side.
    pub left: i32,
    /// Distance from the top side.
    pub top: i32,
    /// Distance from the right side.
    pub right: i32,
    /// Distance from the bottom side.
    pub bottom: i32,
}

impl Margin {
    /// No margin on any side.
    pub const ZERO: Self = Self::all(0);

    /// Creates a margin from each side.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same margin on every side.
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Total horizontal margin.
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical margin.
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_inflate_grows_outwards() {
        let rect = Rect::new(10, 10, 20, 30).inflate(Margin::new(1, 2, 3, 4));
        assert_eq!(rect, Rect::new(9, 8, 23, 34));
        assert_eq!(rect.size(), Size::new(14, 26));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::from_origin_size(Point::new(0, 0), Size::new(4, 4));
        assert!(rect.contains(Point::new(0, 0)));
        assert!(rect.contains(Point::new(3, 3)));
        assert!(!rect.contains(Point::new(4, 3)));
    }
}
