//! Conversion between sequence positions and pixels.
//!
//! A [`Transform`] maps positions on a linear sequence of a known length onto
//! the horizontal pixels of a drawing surface, leaving a margin on either
//! side. The number of pixels per position (the _scale factor_) is
//!
//! ```text
//! scale = (display_width - left_margin - right_margin) / sequence_length * zoom
//! ```
//!
//! where `zoom >= 1` stretches the drawing beyond the visible width. For a
//! sequence of 1,000 positions drawn across 500 pixels without margins, the
//! scale factor is 0.5:
//!
//! ```
//! use featuremap::transform::Transform;
//!
//! let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;
//! assert_eq!(transform.scale(), 0.5);
//! assert_eq!(transform.to_pixel(150), 75);
//! assert_eq!(transform.position_at(75), 150);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Construction is the only fallible step: once a [`Transform`] exists, every
//! conversion is total and out-of-range pixels are clamped onto the sequence.

use crate::feature::Feature;
use crate::feature::Position;
use crate::feature::Span;

/// A horizontal pixel coordinate.
pub type Pixel = i64;

/// An error related to a [`Transform`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The sequence has no positions, so no scale factor exists.
    EmptySequence,

    /// The margins leave no room to draw anything.
    NoDrawableWidth {
        /// The requested display width.
        display_width: Pixel,

        /// The sum of the left and right margins.
        margins: Pixel,
    },

    /// A margin was negative.
    NegativeMargin(Pixel),

    /// The zoom multiplier was below one or not a finite number.
    InvalidZoom(f64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptySequence => write!(f, "the sequence length must be greater than zero"),
            Error::NoDrawableWidth {
                display_width,
                margins,
            } => write!(
                f,
                "display width ({display_width}) must be greater than the combined margins \
                 ({margins})"
            ),
            Error::NegativeMargin(margin) => write!(f, "margins cannot be negative: {margin}"),
            Error::InvalidZoom(zoom) => {
                write!(f, "zoom must be a finite number no less than one: {zoom}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A reversible mapping between sequence positions and pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// The number of positions in the sequence.
    sequence_length: u64,

    /// The unzoomed width of the drawing surface, margins included.
    display_width: Pixel,

    /// The left margin.
    left_margin: Pixel,

    /// The right margin.
    right_margin: Pixel,

    /// The zoom multiplier.
    zoom: f64,

    /// The number of pixels per position.
    scale: f64,
}

impl Transform {
    /// Attempts to create a new [`Transform`].
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::transform::Error;
    /// use featuremap::transform::Transform;
    ///
    /// let transform = Transform::try_new(1000, 520, 10, 10, 2.0)?;
    /// assert_eq!(transform.scale(), 1.0);
    ///
    /// assert_eq!(
    ///     Transform::try_new(0, 500, 0, 0, 1.0),
    ///     Err(Error::EmptySequence)
    /// );
    /// assert!(Transform::try_new(1000, 20, 10, 10, 1.0).is_err());
    /// assert!(Transform::try_new(1000, 500, 0, 0, 0.5).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        sequence_length: u64,
        display_width: Pixel,
        left_margin: Pixel,
        right_margin: Pixel,
        zoom: f64,
    ) -> Result<Self> {
        if sequence_length == 0 {
            return Err(Error::EmptySequence);
        }

        for margin in [left_margin, right_margin] {
            if margin < 0 {
                return Err(Error::NegativeMargin(margin));
            }
        }

        let margins = left_margin + right_margin;
        if display_width <= margins {
            return Err(Error::NoDrawableWidth {
                display_width,
                margins,
            });
        }

        if !zoom.is_finite() || zoom < 1.0 {
            return Err(Error::InvalidZoom(zoom));
        }

        let scale = (display_width - margins) as f64 / sequence_length as f64 * zoom;

        Ok(Self {
            sequence_length,
            display_width,
            left_margin,
            right_margin,
            zoom,
            scale,
        })
    }

    /// Attempts to create a copy of this [`Transform`] with a different zoom
    /// multiplier.
    pub fn with_zoom(&self, zoom: f64) -> Result<Self> {
        Self::try_new(
            self.sequence_length,
            self.display_width,
            self.left_margin,
            self.right_margin,
            zoom,
        )
    }

    /// Creates a copy of this [`Transform`] with a different zoom multiplier,
    /// raising multipliers below one to one.
    pub(crate) fn rezoomed(&self, zoom: f64) -> Self {
        let zoom = zoom.max(1.0);
        let margins = self.left_margin + self.right_margin;

        Self {
            zoom,
            scale: (self.display_width - margins) as f64 / self.sequence_length as f64 * zoom,
            ..*self
        }
    }

    /// Gets the number of positions in the sequence.
    pub fn sequence_length(&self) -> u64 {
        self.sequence_length
    }

    /// Gets the unzoomed display width.
    pub fn display_width(&self) -> Pixel {
        self.display_width
    }

    /// Gets the left margin.
    pub fn left_margin(&self) -> Pixel {
        self.left_margin
    }

    /// Gets the right margin.
    pub fn right_margin(&self) -> Pixel {
        self.right_margin
    }

    /// Gets the zoom multiplier.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Gets the number of pixels per sequence position.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Gets the width of the zoomed drawing, margins included.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::transform::Transform;
    ///
    /// let transform = Transform::try_new(1000, 520, 10, 10, 3.0)?;
    /// assert_eq!(transform.content_width(), 1520);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn content_width(&self) -> Pixel {
        let margins = self.left_margin + self.right_margin;
        margins + ((self.display_width - margins) as f64 * self.zoom).round() as Pixel
    }

    /// Converts a sequence position to the pixel at which it is drawn.
    pub fn to_pixel(&self, position: Position) -> Pixel {
        self.left_margin + (self.scale * position as f64).round() as Pixel
    }

    /// Gets the first sequence position drawn at `pixel`.
    ///
    /// Pixels left of the drawing map onto the first position and pixels
    /// right of the drawing map onto the last position.
    pub fn position_at(&self, pixel: Pixel) -> Position {
        self.clamp(((pixel as f64 - self.left_margin as f64) / self.scale).floor())
    }

    /// Gets the last sequence position drawn at `pixel`.
    ///
    /// When there is less than one pixel per position, a single pixel covers
    /// several positions and this is the rightmost of them. Otherwise, it is
    /// the same as [`Transform::position_at()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::transform::Transform;
    ///
    /// let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;
    /// assert_eq!(transform.position_at(55), 110);
    /// assert_eq!(transform.last_position_at(55), 111);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn last_position_at(&self, pixel: Pixel) -> Position {
        let last =
            self.clamp(((pixel as f64 + 1.0 - self.left_margin as f64) / self.scale).ceil() - 1.0);
        last.max(self.position_at(pixel))
    }

    /// Gets the inclusive range of sequence positions drawn between two
    /// pixels, in either order.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::transform::Transform;
    ///
    /// let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;
    ///
    /// let span = transform.positions_between(55, 25);
    /// assert_eq!((span.start(), span.end()), (50, 111));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn positions_between(&self, from: Pixel, to: Pixel) -> Span {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };

        // Both conversions are monotonic in the pixel and `from <= to`.
        Span::new_unchecked(self.position_at(from), self.last_position_at(to))
    }

    /// Projects a span onto the closed pixel interval it is drawn across.
    pub fn project(&self, span: &Span) -> (Pixel, Pixel) {
        (self.to_pixel(span.start()), self.to_pixel(span.end()))
    }

    /// Projects a feature onto the closed pixel interval from the start of
    /// its first segment to the end of its last segment.
    pub fn project_feature<T>(&self, feature: &Feature<T>) -> (Pixel, Pixel) {
        (self.to_pixel(feature.start()), self.to_pixel(feature.end()))
    }

    /// Clamps a fractional position onto the sequence.
    fn clamp(&self, position: f64) -> Position {
        let last = (self.sequence_length - 1) as f64;
        position.clamp(0.0, last) as Position
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::Rng as _;
    use rand::SeedableRng as _;

    use super::*;

    #[test]
    fn test_example_projection() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;

        assert_eq!(transform.project(&Span::try_new(0, 100)?), (0, 50));
        assert_eq!(transform.project(&Span::try_new(150, 300)?), (75, 150));
        assert_eq!(transform.project(&Span::try_new(50, 200)?), (25, 100));

        Ok(())
    }

    #[test]
    fn test_margins_shift_pixels() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let transform = Transform::try_new(100, 120, 15, 5, 1.0)?;

        assert_eq!(transform.scale(), 1.0);
        assert_eq!(transform.to_pixel(0), 15);
        assert_eq!(transform.to_pixel(99), 114);
        assert_eq!(transform.position_at(15), 0);
        assert_eq!(transform.position_at(114), 99);

        Ok(())
    }

    #[test]
    fn test_out_of_range_pixels_are_clamped() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let transform = Transform::try_new(1000, 500, 10, 10, 1.0)?;

        assert_eq!(transform.position_at(-400), 0);
        assert_eq!(transform.position_at(0), 0);
        assert_eq!(transform.position_at(10_000), 999);
        assert_eq!(transform.last_position_at(10_000), 999);
        assert_eq!(transform.last_position_at(-400), 0);

        Ok(())
    }

    #[test]
    fn test_extreme_pixels_are_clamped() -> std::result::Result<(), Box<dyn std::error::Error>> {
        for margin in [0, 10] {
            let transform = Transform::try_new(1000, 500, margin, margin, 1.0)?;

            assert_eq!(transform.position_at(Pixel::MIN), 0);
            assert_eq!(transform.position_at(Pixel::MAX), 999);
            assert_eq!(transform.last_position_at(Pixel::MIN), 0);
            assert_eq!(transform.last_position_at(Pixel::MAX), 999);

            let span = transform.positions_between(Pixel::MAX, Pixel::MIN);
            assert_eq!((span.start(), span.end()), (0, 999));
        }

        Ok(())
    }

    #[test]
    fn test_zoom_scales_linearly() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;
        let zoomed = transform.with_zoom(4.0)?;

        assert_eq!(zoomed.scale(), 2.0);
        assert_eq!(zoomed.content_width(), 2000);
        assert_eq!(zoomed.to_pixel(150), 300);
        assert_eq!(zoomed.position_at(301), 150);
        assert_eq!(zoomed.last_position_at(301), 150);

        Ok(())
    }

    #[test]
    fn test_round_trip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        // 510 pixels less 10 pixels of margins keeps the scale at or above 0.5.
        for (length, zoom) in [(1000, 1.0), (1000, 4.0), (733, 5.3), (17, 1.0)] {
            let transform = Transform::try_new(length, 510, 7, 3, zoom)?;

            for position in 0..length {
                let back = transform.position_at(transform.to_pixel(position));
                assert!(
                    back.abs_diff(position) <= 1,
                    "{position} came back as {back} at scale {}",
                    transform.scale()
                );
            }
        }

        Ok(())
    }

    #[test]
    fn test_monotonicity() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..20 {
            let length = rng.gen_range(1..50_000u64);
            let width = rng.gen_range(50..3_000 as Pixel);
            let zoom = rng.gen_range(1.0..30.0);
            let transform = Transform::try_new(length, width, 5, 5, zoom)?;

            let mut previous_first = 0;
            let mut previous_last = 0;

            for pixel in -10..transform.content_width() + 10 {
                let first = transform.position_at(pixel);
                let last = transform.last_position_at(pixel);

                assert!(first >= previous_first);
                assert!(last >= previous_last);
                assert!(first <= last);

                previous_first = first;
                previous_last = last;
            }
        }

        Ok(())
    }
}
