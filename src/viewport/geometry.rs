//! Points and rectangles in content pixel space.

use crate::transform::Pixel;

/// A point in content pixel space.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Point {
    /// The horizontal coordinate.
    pub x: Pixel,

    /// The vertical coordinate.
    pub y: Pixel,
}

impl Point {
    /// Creates a new [`Point`].
    pub fn new(x: Pixel, y: Pixel) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in content pixel space.
///
/// The rectangle covers the pixels `x..x + width` and `y..y + height`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Rect {
    /// The left edge.
    pub x: Pixel,

    /// The top edge.
    pub y: Pixel,

    /// The width.
    pub width: Pixel,

    /// The height.
    pub height: Pixel,
}

impl Rect {
    /// Creates a new [`Rect`].
    pub fn new(x: Pixel, y: Pixel, width: Pixel, height: Pixel) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the smallest [`Rect`] containing two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::viewport::Point;
    /// use featuremap::viewport::Rect;
    ///
    /// let rect = Rect::spanning(Point::new(55, 30), Point::new(25, 10));
    /// assert_eq!(rect, Rect::new(25, 10, 31, 21));
    /// ```
    pub fn spanning(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);

        Self {
            x,
            y,
            width: a.x.max(b.x).saturating_sub(x).saturating_add(1),
            height: a.y.max(b.y).saturating_sub(y).saturating_add(1),
        }
    }

    /// Gets the rightmost pixel column of the rectangle.
    pub fn right(&self) -> Pixel {
        self.x.saturating_add(self.width - 1)
    }

    /// Gets the bottom pixel row of the rectangle.
    pub fn bottom(&self) -> Pixel {
        self.y.saturating_add(self.height - 1)
    }

    /// Returns whether `point` lies within the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        self.x <= point.x && point.x <= self.right() && self.y <= point.y && point.y <= self.bottom()
    }

    /// Returns whether the rectangle shares at least one pixel column with the
    /// columns `from..=to`.
    pub fn overlaps_columns(&self, from: Pixel, to: Pixel) -> bool {
        self.x <= to && from <= self.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let rect = Rect::new(10, 20, 5, 2);

        assert!(rect.contains(Point::new(10, 20)));
        assert!(rect.contains(Point::new(14, 21)));
        assert!(!rect.contains(Point::new(15, 21)));
        assert!(!rect.contains(Point::new(14, 22)));
        assert!(!rect.contains(Point::new(9, 20)));
    }

    #[test]
    fn test_overlaps_columns() {
        let rect = Rect::new(10, 0, 5, 1);

        assert!(rect.overlaps_columns(0, 10));
        assert!(rect.overlaps_columns(14, 100));
        assert!(!rect.overlaps_columns(15, 100));
        assert!(!rect.overlaps_columns(0, 9));
    }
}
