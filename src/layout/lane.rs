//! A horizontal row of features drawn without overlapping.

use crate::feature::Feature;
use crate::feature::FeatureId;
use crate::transform::Pixel;

/// A horizontal row holding features of a single category.
///
/// Features are stored by [`FeatureId`] in the order they were placed, which
/// is ascending start position. The _cursor_ is the rightmost pixel occupied
/// by the last feature placed in the lane.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lane {
    /// The name of the category the lane belongs to.
    category: String,

    /// The features placed in the lane.
    features: Vec<FeatureId>,

    /// The rightmost occupied pixel.
    cursor: Pixel,
}

impl Lane {
    /// Opens a new lane containing a single feature that ends at `cursor`.
    pub(crate) fn open(category: impl Into<String>, feature: FeatureId, cursor: Pixel) -> Self {
        Self {
            category: category.into(),
            features: vec![feature],
            cursor,
        }
    }

    /// Places a feature at the end of the lane and moves the cursor.
    pub(crate) fn place(&mut self, feature: FeatureId, cursor: Pixel) {
        self.features.push(feature);
        self.cursor = cursor;
    }

    /// Gets the name of the category the lane belongs to.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Gets the identifiers of the features in the lane, in placement order.
    pub fn features(&self) -> &[FeatureId] {
        &self.features
    }

    /// Gets the rightmost pixel occupied in the lane.
    pub fn cursor(&self) -> Pixel {
        self.cursor
    }

    /// Gets the number of features in the lane.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns whether the lane holds no features.
    ///
    /// Lanes produced by a layout always hold at least one feature.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Resolves the features in the lane against the list they were laid out
    /// from.
    ///
    /// # Panics
    ///
    /// Panics if `features` is not the list the lane was built from.
    pub fn resolve<'a, T>(
        &'a self,
        features: &'a [Feature<T>],
    ) -> impl Iterator<Item = (FeatureId, &'a Feature<T>)> + 'a {
        self.features.iter().map(move |id| (*id, &features[id.index()]))
    }
}
