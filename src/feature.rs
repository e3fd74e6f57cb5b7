//! Annotated features placed upon a linear sequence.
//!
//! A [`Feature`] is the unit the layout engine works with: a category key, a
//! [`Strand`], one or more [segments](Span), and an opaque payload owned by the
//! caller. Features with more than one segment describe discontinuous
//! annotations (for example, the exons of a spliced transcript).
//!
//! ```
//! use featuremap::feature::Feature;
//! use featuremap::feature::Span;
//! use featuremap::feature::Strand;
//!
//! let gene = Feature::new("gene", Strand::Plus, Span::try_new(0, 100)?, "abcA");
//! assert_eq!(gene.start(), 0);
//! assert_eq!(gene.end(), 100);
//!
//! let mrna = Feature::try_spliced(
//!     "mRNA",
//!     Strand::Minus,
//!     vec![Span::try_new(60, 100)?, Span::try_new(0, 20)?],
//!     "abcA-201",
//! )?;
//! assert_eq!(mrna.segments().len(), 2);
//! assert_eq!(mrna.start(), 0);
//! assert_eq!(mrna.end(), 100);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use nonempty::NonEmpty;

pub mod span;
pub mod strand;

pub use span::Position;
pub use span::Span;
pub use strand::Strand;

/// An error related to a [`Feature`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A feature was given no segments.
    NoSegments,

    /// Two segments of the same feature share at least one position.
    OverlappingSegments(Span, Span),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoSegments => write!(f, "a feature must have at least one segment"),
            Error::OverlappingSegments(a, b) => {
                write!(f, "feature segments must be disjoint: {a} and {b}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A stable identifier for a feature: its index within the list of features
/// handed to the layout engine.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FeatureId(pub usize);

impl FeatureId {
    /// Gets the index of the feature within the input list.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An annotated feature.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Feature<T> {
    /// The category key.
    category: String,

    /// The strand.
    strand: Strand,

    /// The segments in ascending order.
    segments: NonEmpty<Span>,

    /// The payload.
    payload: T,
}

impl<T> Feature<T> {
    /// Creates a new [`Feature`] with a single, contiguous segment.
    pub fn new(category: impl Into<String>, strand: Strand, span: Span, payload: T) -> Self {
        Self {
            category: category.into(),
            strand,
            segments: NonEmpty::new(span),
            payload,
        }
    }

    /// Attempts to create a new [`Feature`] from a list of disjoint segments.
    ///
    /// The segments may be provided in any order; they are stored in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::feature::Error;
    /// use featuremap::feature::Feature;
    /// use featuremap::feature::Span;
    /// use featuremap::feature::Strand;
    ///
    /// let result = Feature::try_spliced(
    ///     "mRNA",
    ///     Strand::Plus,
    ///     vec![Span::try_new(0, 10)?, Span::try_new(10, 20)?],
    ///     (),
    /// );
    /// assert!(matches!(result, Err(Error::OverlappingSegments(_, _))));
    ///
    /// let result = Feature::try_spliced("mRNA", Strand::Plus, Vec::new(), ());
    /// assert_eq!(result, Err(Error::NoSegments));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_spliced(
        category: impl Into<String>,
        strand: Strand,
        mut segments: Vec<Span>,
        payload: T,
    ) -> Result<Self> {
        segments.sort();

        for pair in segments.windows(2) {
            if pair[0].intersects(&pair[1]) {
                return Err(Error::OverlappingSegments(pair[0], pair[1]));
            }
        }

        let segments = NonEmpty::from_vec(segments).ok_or(Error::NoSegments)?;

        Ok(Self {
            category: category.into(),
            strand,
            segments,
            payload,
        })
    }

    /// Gets the category key.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Gets the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Gets the segments in ascending order.
    pub fn segments(&self) -> &NonEmpty<Span> {
        &self.segments
    }

    /// Gets the payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Gets the first position covered by the feature.
    pub fn start(&self) -> Position {
        self.segments.first().start()
    }

    /// Gets the last position covered by the feature.
    pub fn end(&self) -> Position {
        self.segments.last().end()
    }

    /// Gets the span from the first to the last position of the feature,
    /// including any gaps between segments.
    pub fn extent(&self) -> Span {
        // Segments are sorted and disjoint.
        Span::new_unchecked(self.start(), self.end())
    }

    /// Returns whether any segment of the feature shares a position with
    /// `span`.
    pub fn intersects(&self, span: &Span) -> bool {
        self.segments.iter().any(|segment| segment.intersects(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_are_sorted() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let feature = Feature::try_spliced(
            "CDS",
            Strand::Minus,
            vec![
                Span::try_new(500, 600)?,
                Span::try_new(0, 10)?,
                Span::try_new(200, 300)?,
            ],
            42u32,
        )?;

        let starts = feature
            .segments()
            .iter()
            .map(|segment| segment.start())
            .collect::<Vec<_>>();
        assert_eq!(starts, vec![0, 200, 500]);
        assert_eq!(feature.extent(), Span::try_new(0, 600)?);
        assert_eq!(feature.payload(), &42);
        assert_eq!(feature.strand(), Strand::Minus);

        Ok(())
    }

    #[test]
    fn test_intersects_skips_gaps() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let feature = Feature::try_spliced(
            "mRNA",
            Strand::Plus,
            vec![Span::try_new(0, 10)?, Span::try_new(50, 60)?],
            (),
        )?;

        assert!(feature.intersects(&Span::try_new(5, 20)?));
        assert!(!feature.intersects(&Span::try_new(11, 49)?));
        assert!(feature.intersects(&Span::try_new(49, 50)?));

        Ok(())
    }
}
