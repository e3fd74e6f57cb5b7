//! An inclusive range of positions upon a linear sequence.
//!
//! ```text
//! | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! -----------------------------------------
//! |   |   | X | X | X | X | X |   |   |   |  <= 2-6
//! |   |   |   |   |   |   |   |   | X |   |  <= 8-8
//! ```
//!
//! Both ends of a [`Span`] are included, so a span whose start equals its end
//! covers exactly one position. Whether positions are zero- or one-based is up
//! to the caller; the layout engine only ever compares and scales them.

use std::str::FromStr;

/// A position upon a linear sequence.
pub type Position = u64;

/// An error related to a [`Span`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The start position is greater than the end position.
    StartGreaterThanEnd(Position, Position),

    /// Could not parse a span from the given value.
    ParseError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StartGreaterThanEnd(start, end) => write!(
                f,
                "start position ({start}) cannot be greater than the end position ({end})"
            ),
            Error::ParseError(value) => write!(f, "could not parse span from the value: {value}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// An inclusive range of sequence positions.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Span {
    /// The first position covered by the span.
    start: Position,

    /// The last position covered by the span.
    end: Position,
}

impl Span {
    /// Attempts to create a new [`Span`].
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::feature::Span;
    ///
    /// let span = Span::try_new(10, 20)?;
    /// assert_eq!(span.start(), 10);
    /// assert_eq!(span.end(), 20);
    ///
    /// assert!(Span::try_new(20, 10).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: Position, end: Position) -> Result<Self> {
        if start > end {
            return Err(Error::StartGreaterThanEnd(start, end));
        }

        Ok(Self { start, end })
    }

    /// Creates a new [`Span`] from positions already known to be ordered.
    pub(crate) fn new_unchecked(start: Position, end: Position) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Gets the first position of the span.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the last position of the span.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Gets the number of positions covered by the span.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::feature::Span;
    ///
    /// assert_eq!(Span::try_new(5, 5)?.len(), 1);
    /// assert_eq!(Span::try_new(0, 99)?.len(), 100);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Returns whether the span shares at least one position with `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::feature::Span;
    ///
    /// let a = Span::try_new(0, 100)?;
    ///
    /// assert!(a.intersects(&Span::try_new(100, 200)?));
    /// assert!(!a.intersects(&Span::try_new(101, 200)?));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn intersects(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns whether `position` falls within the span.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for Span {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| Error::ParseError(s.to_string()))?;

        let start = start
            .trim()
            .parse::<Position>()
            .map_err(|_| Error::ParseError(s.to_string()))?;
        let end = end
            .trim()
            .parse::<Position>()
            .map_err(|_| Error::ParseError(s.to_string()))?;

        Self::try_new(start, end)
    }
}
