//! Selection state and the events that announce changes to it.
//!
//! Selections refer to features by [`FeatureId`] rather than by reference, so
//! they stay valid across layout passes and are resolved against the current
//! layout only when needed.

pub mod broadcaster;

pub use broadcaster::Broadcaster;
pub use broadcaster::SubscriberId;

use crate::feature::Feature;
use crate::feature::FeatureId;
use crate::feature::Position;
use crate::feature::Span;

/// An announcement that the selection changed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// Nothing is selected.
    Empty,

    /// A whole feature was selected.
    Object(FeatureId),

    /// A range of positions was selected over a feature.
    ObjectWithRange {
        /// The feature under the selected range.
        feature: FeatureId,

        /// The first selected position.
        from: Position,

        /// The last selected position.
        to: Position,
    },
}

/// The current selection.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Selection {
    /// Nothing is selected.
    #[default]
    Empty,

    /// A single feature, optionally narrowed to a range of positions.
    Single {
        /// The selected feature.
        feature: FeatureId,

        /// The selected range, if narrower than the whole feature.
        span: Option<Span>,
    },

    /// A feature made of several segments, each selected as its own range.
    Multiple {
        /// The selected feature.
        feature: FeatureId,

        /// The selected ranges in ascending order.
        spans: Vec<Span>,
    },
}

impl Selection {
    /// Creates the selection of a whole feature.
    ///
    /// Features with a single segment yield [`Selection::Single`]; features
    /// with several segments yield [`Selection::Multiple`] over them.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::feature::Feature;
    /// use featuremap::feature::FeatureId;
    /// use featuremap::feature::Span;
    /// use featuremap::feature::Strand;
    /// use featuremap::selection::Selection;
    ///
    /// let exons = vec![Span::try_new(0, 10)?, Span::try_new(20, 30)?];
    /// let mrna = Feature::try_spliced("mRNA", Strand::Plus, exons.clone(), ())?;
    ///
    /// assert_eq!(
    ///     Selection::of_feature(FeatureId(0), &mrna),
    ///     Selection::Multiple {
    ///         feature: FeatureId(0),
    ///         spans: exons
    ///     }
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn of_feature<T>(id: FeatureId, feature: &Feature<T>) -> Self {
        match feature.segments().len() {
            1 => Selection::Single {
                feature: id,
                span: None,
            },
            _ => Selection::Multiple {
                feature: id,
                spans: feature.segments().iter().copied().collect(),
            },
        }
    }

    /// Creates the selection of a range of positions over a feature.
    pub fn of_range(id: FeatureId, span: Span) -> Self {
        Selection::Single {
            feature: id,
            span: Some(span),
        }
    }

    /// Gets the selected feature, if any.
    pub fn feature(&self) -> Option<FeatureId> {
        match self {
            Selection::Empty => None,
            Selection::Single { feature, .. } | Selection::Multiple { feature, .. } => {
                Some(*feature)
            }
        }
    }

    /// Returns whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Gets the event announcing this selection.
    pub fn to_event(&self) -> Event {
        match self {
            Selection::Empty => Event::Empty,
            Selection::Single {
                feature,
                span: Some(span),
            } => Event::ObjectWithRange {
                feature: *feature,
                from: span.start(),
                to: span.end(),
            },
            Selection::Single { feature, span: None } | Selection::Multiple { feature, .. } => {
                Event::Object(*feature)
            }
        }
    }
}
