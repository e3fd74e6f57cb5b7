//! Pointer interaction state.
//!
//! A pointer gesture moves between two states:
//!
//! ```text
//! Idle --press--> Dragging --release--> Idle
//!                  |    ^
//!                  +----+ drag
//! ```
//!
//! What a release does depends on the [`Mode`] chosen by the host
//! application. A release within the click tolerance of the press is a click;
//! anything farther is a drag.

use crate::transform::Pixel;
use crate::viewport::Point;
use crate::viewport::Rect;

/// What a completed pointer gesture does.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// Clicks select the feature under the pointer and drags select a range
    /// of positions over a feature.
    #[default]
    Select,

    /// Clicks zoom in around the pointer and drags zoom to the dragged span.
    ZoomIn,

    /// Clicks and drags zoom out around the release point.
    ZoomOut,
}

/// A pointer gesture in progress.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Drag {
    /// Where the pointer was pressed.
    origin: Point,

    /// Where the pointer is now.
    current: Point,
}

impl Drag {
    /// Starts a gesture at `origin`.
    pub(crate) fn start(origin: Point) -> Self {
        Self {
            origin,
            current: origin,
        }
    }

    /// Moves the pointer to `point`.
    pub(crate) fn update(&mut self, point: Point) {
        self.current = point;
    }

    /// Gets where the pointer was pressed.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Gets where the pointer is now.
    pub fn current(&self) -> Point {
        self.current
    }

    /// Gets the rectangle swept by the gesture so far.
    pub fn rect(&self) -> Rect {
        Rect::spanning(self.origin, self.current)
    }

    /// Returns whether the gesture stayed within `tolerance` pixels of where
    /// it started along both axes.
    pub fn is_click(&self, tolerance: Pixel) -> bool {
        let tolerance = tolerance.max(0).unsigned_abs();

        self.current.x.abs_diff(self.origin.x) <= tolerance
            && self.current.y.abs_diff(self.origin.y) <= tolerance
    }
}
