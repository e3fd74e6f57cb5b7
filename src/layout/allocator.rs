//! Greedy packing of features into lanes.
//!
//! The allocator visits features in ascending start order and places each one
//! into the first lane whose cursor lies left of the feature's projected start
//! pixel, opening a new lane when none does. Because the input is sorted by
//! start, this is greedy coloring of an interval graph: the number of lanes it
//! opens equals the largest number of projected intervals that share a single
//! pixel, which is the fewest lanes any overlap-free packing can use.
//!
//! ```text
//! scale 0.5      0        50  75       150
//! lane 0         [=========]  [=========]     0-100, 150-300
//! lane 1              [==========]            50-200
//! ```

use tracing::trace;

use crate::feature::Feature;
use crate::feature::FeatureId;
use crate::layout::Lane;
use crate::transform::Pixel;
use crate::transform::Transform;

/// How features whose projections touch at a single pixel are treated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Abutting {
    /// A feature fits after the cursor only if its start pixel is strictly
    /// right of the cursor. Touching glyphs go to separate lanes.
    #[default]
    Separate,

    /// A feature fits after the cursor if its start pixel is at or right of
    /// the cursor. Touching glyphs may share a lane.
    Share,
}

impl Abutting {
    /// Returns whether a feature starting at `start` fits after `cursor`.
    pub fn fits(&self, cursor: Pixel, start: Pixel) -> bool {
        match self {
            Abutting::Separate => cursor < start,
            Abutting::Share => cursor <= start,
        }
    }
}

/// Packs the features of one category into lanes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Allocator {
    /// Whether every feature goes into a single lane regardless of overlap.
    force_one_lane: bool,

    /// The treatment of touching projections.
    abutting: Abutting,
}

impl Allocator {
    /// Creates a new [`Allocator`].
    ///
    /// When `force_one_lane` is set, all features are placed into one lane
    /// and may overlap.
    pub fn new(force_one_lane: bool, abutting: Abutting) -> Self {
        Self {
            force_one_lane,
            abutting,
        }
    }

    /// Gets whether every feature is forced into a single lane.
    pub fn force_one_lane(&self) -> bool {
        self.force_one_lane
    }

    /// Gets the treatment of touching projections.
    pub fn abutting(&self) -> Abutting {
        self.abutting
    }

    /// Allocates lanes for the features of `category`.
    ///
    /// `members` must be sorted by ascending start position and index into
    /// `features`. Lanes are returned in the order they were opened.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::feature::Feature;
    /// use featuremap::feature::FeatureId;
    /// use featuremap::feature::Span;
    /// use featuremap::feature::Strand;
    /// use featuremap::layout::Allocator;
    /// use featuremap::transform::Transform;
    ///
    /// let features = vec![
    ///     Feature::new("gene", Strand::Plus, Span::try_new(0, 100)?, ()),
    ///     Feature::new("gene", Strand::Plus, Span::try_new(50, 200)?, ()),
    ///     Feature::new("gene", Strand::Plus, Span::try_new(150, 300)?, ()),
    /// ];
    /// let members = [FeatureId(0), FeatureId(1), FeatureId(2)];
    /// let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;
    ///
    /// let lanes = Allocator::default().allocate("gene", &members, &features, &transform);
    ///
    /// assert_eq!(lanes.len(), 2);
    /// assert_eq!(lanes[0].features(), &[FeatureId(0), FeatureId(2)]);
    /// assert_eq!(lanes[1].features(), &[FeatureId(1)]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn allocate<T>(
        &self,
        category: &str,
        members: &[FeatureId],
        features: &[Feature<T>],
        transform: &Transform,
    ) -> Vec<Lane> {
        let mut lanes = Vec::<Lane>::new();

        for id in members {
            let (start, end) = transform.project_feature(&features[id.index()]);

            let slot = match self.force_one_lane {
                true => lanes.first_mut(),
                false => lanes
                    .iter_mut()
                    .find(|lane| self.abutting.fits(lane.cursor(), start)),
            };

            match slot {
                Some(lane) => lane.place(*id, end),
                None => {
                    trace!(
                        category,
                        lane = lanes.len(),
                        feature = id.index(),
                        "opening lane"
                    );
                    lanes.push(Lane::open(category, *id, end));
                }
            }
        }

        lanes
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::Rng as _;
    use rand::SeedableRng as _;

    use super::*;
    use crate::feature::Span;
    use crate::feature::Strand;

    fn features(spans: &[(u64, u64)]) -> Vec<Feature<()>> {
        spans
            .iter()
            .map(|(start, end)| {
                Feature::new("misc", Strand::Plus, Span::try_new(*start, *end).unwrap(), ())
            })
            .collect()
    }

    fn sorted_members(features: &[Feature<()>]) -> Vec<FeatureId> {
        let mut members = (0..features.len()).map(FeatureId).collect::<Vec<_>>();
        members.sort_by_key(|id| features[id.index()].start());
        members
    }

    /// The largest number of projected intervals covering a single pixel.
    fn clique_number(features: &[Feature<()>], transform: &Transform) -> usize {
        let projections = features
            .iter()
            .map(|feature| transform.project_feature(feature))
            .collect::<Vec<_>>();

        (0..=transform.content_width())
            .map(|pixel| {
                projections
                    .iter()
                    .filter(|(start, end)| *start <= pixel && pixel <= *end)
                    .count()
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_forced_single_lane() -> Result<(), Box<dyn std::error::Error>> {
        let features = features(&[(0, 100), (50, 200), (150, 300)]);
        let members = sorted_members(&features);
        let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;

        let lanes = Allocator::new(true, Abutting::Separate).allocate(
            "misc",
            &members,
            &features,
            &transform,
        );

        assert_eq!(lanes.len(), 1);
        assert_eq!(
            lanes[0].features(),
            &[FeatureId(0), FeatureId(1), FeatureId(2)]
        );
        assert_eq!(lanes[0].cursor(), 150);

        Ok(())
    }

    #[test]
    fn test_touching_projections() -> Result<(), Box<dyn std::error::Error>> {
        // At a scale of 0.5, 0-100 ends on pixel 50 and 100-140 starts on it.
        let features = features(&[(0, 100), (100, 140)]);
        let members = sorted_members(&features);
        let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;

        let separate = Allocator::new(false, Abutting::Separate).allocate(
            "misc",
            &members,
            &features,
            &transform,
        );
        assert_eq!(separate.len(), 2);

        let shared = Allocator::new(false, Abutting::Share).allocate(
            "misc",
            &members,
            &features,
            &transform,
        );
        assert_eq!(shared.len(), 1);

        Ok(())
    }

    #[test]
    fn test_zero_width_projections() -> Result<(), Box<dyn std::error::Error>> {
        // At a scale of 0.1, all three single positions land on pixel 10.
        let features = features(&[(100, 100), (101, 101), (102, 102)]);
        let members = sorted_members(&features);
        let transform = Transform::try_new(1000, 100, 0, 0, 1.0)?;

        let separate = Allocator::new(false, Abutting::Separate).allocate(
            "misc",
            &members,
            &features,
            &transform,
        );
        assert_eq!(separate.len(), 3);

        let shared = Allocator::new(false, Abutting::Share).allocate(
            "misc",
            &members,
            &features,
            &transform,
        );
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].cursor(), 10);

        Ok(())
    }

    #[test]
    fn test_no_overlap_and_minimality() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(20_240_917);

        for _ in 0..50 {
            let length = rng.gen_range(100..20_000u64);
            let width = rng.gen_range(100..1_200);
            let transform = Transform::try_new(length, width, 0, 0, 1.0)?;

            let count = rng.gen_range(0..120);
            let spans = (0..count)
                .map(|_| {
                    let start = rng.gen_range(0..length);
                    let end = (start + rng.gen_range(0..length / 4 + 1)).min(length - 1);
                    (start, end)
                })
                .collect::<Vec<_>>();
            let features = features(&spans);
            let members = sorted_members(&features);

            let lanes = Allocator::default().allocate("misc", &members, &features, &transform);

            for lane in &lanes {
                let projections = lane
                    .resolve(&features)
                    .map(|(_, feature)| transform.project_feature(feature))
                    .collect::<Vec<_>>();

                for pair in projections.windows(2) {
                    assert!(
                        pair[0].1 < pair[1].0,
                        "{:?} overlaps {:?} within a lane",
                        pair[0],
                        pair[1]
                    );
                }
            }

            assert_eq!(lanes.len(), clique_number(&features, &transform));
            assert_eq!(
                lanes.iter().map(|lane| lane.len()).sum::<usize>(),
                features.len()
            );
        }

        Ok(())
    }
}
