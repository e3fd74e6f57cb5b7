//! Display options for a [`Viewport`](crate::viewport::Viewport).

use crate::transform::Pixel;

/// The default height of a lane.
pub const DEFAULT_LANE_HEIGHT: Pixel = 12;

/// The default vertical gap between lanes.
pub const DEFAULT_LANE_GAP: Pixel = 4;

/// The default horizontal margin on either side of the drawing.
pub const DEFAULT_MARGIN: Pixel = 10;

/// The default distance a pointer may travel and still count as a click.
pub const DEFAULT_CLICK_TOLERANCE: Pixel = 3;

/// The default multiplier applied by a single zoom step.
pub const DEFAULT_ZOOM_STEP: f64 = 2.0;

/// The default cap on how far the drawing can be stretched.
pub const DEFAULT_MAX_PIXELS_PER_POSITION: f64 = 16.0;

/// Display options for a [`Viewport`](crate::viewport::Viewport).
///
/// # Examples
///
/// ```
/// use featuremap::viewport::Options;
///
/// let options = Options {
///     lane_height: 20,
///     left_margin: 0,
///     right_margin: 0,
///     ..Default::default()
/// };
///
/// assert_eq!(options.lane_pitch(), 24);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// The height of a lane.
    pub lane_height: Pixel,

    /// The vertical gap between lanes.
    pub lane_gap: Pixel,

    /// The space above the first lane.
    pub top_margin: Pixel,

    /// The space left of the first sequence position.
    pub left_margin: Pixel,

    /// The space right of the last sequence position.
    pub right_margin: Pixel,

    /// The farthest a pointer may travel between press and release and still
    /// be treated as a click.
    pub click_tolerance: Pixel,

    /// The multiplier applied to the content width by a single zoom step.
    pub zoom_step: f64,

    /// The largest number of pixels a single sequence position may be
    /// stretched across.
    pub max_pixels_per_position: f64,
}

impl Options {
    /// Gets the vertical distance from the top of one lane to the next.
    pub fn lane_pitch(&self) -> Pixel {
        self.lane_height + self.lane_gap
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            lane_height: DEFAULT_LANE_HEIGHT,
            lane_gap: DEFAULT_LANE_GAP,
            top_margin: 0,
            left_margin: DEFAULT_MARGIN,
            right_margin: DEFAULT_MARGIN,
            click_tolerance: DEFAULT_CLICK_TOLERANCE,
            zoom_step: DEFAULT_ZOOM_STEP,
            max_pixels_per_position: DEFAULT_MAX_PIXELS_PER_POSITION,
        }
    }
}
