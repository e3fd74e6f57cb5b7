//! Packing categorized features into non-overlapping lanes.
//!
//! The entry point is the [`Organizer`], which splits features into
//! [categories](crate::category::Category) and hands each category to an
//! [`Allocator`]. The result of a layout pass is a [`Layout`]: the lanes of
//! every category in display order.
//!
//! ```
//! use featuremap::feature::Feature;
//! use featuremap::feature::Span;
//! use featuremap::feature::Strand;
//! use featuremap::layout;
//!
//! let features = vec![
//!     Feature::new("gene", Strand::Plus, Span::try_new(0, 100)?, ()),
//!     Feature::new("gene", Strand::Plus, Span::try_new(150, 300)?, ()),
//!     Feature::new("gene", Strand::Plus, Span::try_new(50, 200)?, ()),
//! ];
//!
//! let result = layout::organize(&features, 1000, 500, false, None)?;
//! assert_eq!(result.lanes().len(), 2);
//!
//! let result = layout::organize(&features, 1000, 500, true, None)?;
//! assert_eq!(result.lanes().len(), 1);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod allocator;
pub mod lane;
pub mod organizer;

pub use allocator::Abutting;
pub use allocator::Allocator;
pub use lane::Lane;
pub use organizer::Organizer;

use crate::feature::Feature;
use crate::feature::FeatureId;
use crate::transform;
use crate::transform::Pixel;
use crate::transform::Transform;

/// The outcome of a layout pass.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Layout {
    /// The lanes of every category, in display order.
    lanes: Vec<Lane>,

    /// The features that matched no category.
    unmatched: Vec<FeatureId>,
}

impl Layout {
    /// Creates a new [`Layout`].
    pub(crate) fn new(lanes: Vec<Lane>, unmatched: Vec<FeatureId>) -> Self {
        Self { lanes, unmatched }
    }

    /// Gets the lanes in display order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Gets the features that matched no category and so were not placed in
    /// any lane.
    pub fn unmatched(&self) -> &[FeatureId] {
        &self.unmatched
    }

    /// Returns whether the layout holds no lanes.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Gets the lanes that belong to the category named `name`.
    pub fn lanes_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Lane> + 'a {
        self.lanes.iter().filter(move |lane| lane.category() == name)
    }

    /// Finds the lane holding `feature`, returning the index of the lane and
    /// the index of the feature within it.
    pub fn locate(&self, feature: FeatureId) -> Option<(usize, usize)> {
        self.lanes.iter().enumerate().find_map(|(i, lane)| {
            lane.features()
                .iter()
                .position(|id| *id == feature)
                .map(|j| (i, j))
        })
    }
}

/// Lays out `features` across a drawing `display_width` pixels wide with no
/// margins, grouping them by their category keys.
///
/// When `category_order` is provided, the lanes of the named categories come
/// first, in that order.
///
/// # Errors
///
/// Fails if no [`Transform`] can be built for `sequence_length` and
/// `display_width` (for example, when the sequence is empty).
pub fn organize<T>(
    features: &[Feature<T>],
    sequence_length: u64,
    display_width: Pixel,
    force_one_lane_per_category: bool,
    category_order: Option<&[&str]>,
) -> transform::Result<Layout> {
    let transform = Transform::try_new(sequence_length, display_width, 0, 0, 1.0)?;

    let mut builder =
        organizer::Builder::default().force_one_lane_per_category(force_one_lane_per_category);

    if let Some(order) = category_order {
        builder = builder.display_order(order.iter().copied());
    }

    Ok(builder.build().organize(features, &transform))
}
