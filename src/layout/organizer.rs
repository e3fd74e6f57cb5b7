//! Splitting features into categories and laying each category out in lanes.

use tracing::debug;

use crate::category;
use crate::category::Category;
use crate::feature::Feature;
use crate::feature::FeatureId;
use crate::layout::Abutting;
use crate::layout::Allocator;
use crate::layout::Lane;
use crate::layout::Layout;
use crate::transform::Transform;

/// A builder for an [`Organizer`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// The explicit categories, tried in order.
    categories: Option<Vec<Category>>,

    /// The names of categories in the order their lanes are displayed.
    display_order: Option<Vec<String>>,

    /// Whether every category is forced into a single lane.
    force_one_lane_per_category: bool,

    /// The treatment of touching projections.
    abutting: Abutting,
}

impl Builder {
    /// Sets the categories features are sorted into.
    ///
    /// Categories are tried in the order given and a feature joins the first
    /// one that matches it. Without explicit categories, one category is
    /// discovered per distinct category key.
    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    /// Sets the order in which the lanes of each category are emitted.
    ///
    /// Categories missing from this list follow the listed ones, in the order
    /// the categories were defined or discovered. Names that match no
    /// category are ignored.
    pub fn display_order<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display_order = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets whether every category is packed into a single lane, allowing
    /// features within it to overlap.
    pub fn force_one_lane_per_category(mut self, value: bool) -> Self {
        self.force_one_lane_per_category = value;
        self
    }

    /// Sets the treatment of projections that touch at a single pixel.
    pub fn abutting(mut self, abutting: Abutting) -> Self {
        self.abutting = abutting;
        self
    }

    /// Consumes `self` to build an [`Organizer`].
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::category::Category;
    /// use featuremap::category::Matcher;
    /// use featuremap::layout::organizer::Builder;
    ///
    /// let organizer = Builder::default()
    ///     .categories([
    ///         Category::new("coding", Matcher::new("CDS,exon", true)),
    ///         Category::new("other", Matcher::new("CDS,exon", false)),
    ///     ])
    ///     .display_order(["other"])
    ///     .build();
    ///
    /// assert!(!organizer.allocator().force_one_lane());
    /// ```
    pub fn build(self) -> Organizer {
        Organizer {
            categories: self.categories,
            display_order: self.display_order.unwrap_or_default(),
            allocator: Allocator::new(self.force_one_lane_per_category, self.abutting),
        }
    }
}

/// Lays out features into categorized lanes.
#[derive(Clone, Debug, Default)]
pub struct Organizer {
    /// The explicit categories, if any.
    categories: Option<Vec<Category>>,

    /// The preferred display order of categories by name.
    display_order: Vec<String>,

    /// The lane allocator.
    allocator: Allocator,
}

impl Organizer {
    /// Gets the lane allocator.
    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    /// Gets the explicit categories, if any were provided.
    pub fn categories(&self) -> Option<&[Category]> {
        self.categories.as_deref()
    }

    /// Lays out `features` under `transform`.
    ///
    /// Every call is a full layout pass:
    ///
    /// 1. all features are sorted once by ascending start position,
    /// 2. the categories are taken from the builder or discovered from the
    ///    category keys in sorted order,
    /// 3. each feature joins the first category that matches it (features
    ///    matching none are reported by [`Layout::unmatched()`] and otherwise
    ///    left out),
    /// 4. each category is packed into lanes by the [`Allocator`], and
    /// 5. the lanes are emitted in display order.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::feature::Feature;
    /// use featuremap::feature::FeatureId;
    /// use featuremap::feature::Span;
    /// use featuremap::feature::Strand;
    /// use featuremap::layout::Organizer;
    /// use featuremap::transform::Transform;
    ///
    /// let features = vec![
    ///     Feature::new("gene", Strand::Plus, Span::try_new(150, 300)?, "b"),
    ///     Feature::new("repeat", Strand::Plus, Span::try_new(10, 20)?, "r"),
    ///     Feature::new("gene", Strand::Minus, Span::try_new(0, 100)?, "a"),
    /// ];
    /// let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;
    ///
    /// let layout = Organizer::default().organize(&features, &transform);
    ///
    /// assert_eq!(layout.lanes().len(), 2);
    /// assert_eq!(layout.lanes()[0].category(), "gene");
    /// assert_eq!(layout.lanes()[0].features(), &[FeatureId(2), FeatureId(0)]);
    /// assert_eq!(layout.lanes()[1].category(), "repeat");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn organize<T>(&self, features: &[Feature<T>], transform: &Transform) -> Layout {
        let mut sorted = (0..features.len()).map(FeatureId).collect::<Vec<_>>();
        sorted.sort_by_key(|id| features[id.index()].start());

        let discovered;
        let categories = match &self.categories {
            Some(categories) => categories.as_slice(),
            None => {
                discovered = category::discover(sorted.iter().map(|id| &features[id.index()]));
                discovered.as_slice()
            }
        };

        let mut members = vec![Vec::<FeatureId>::new(); categories.len()];
        let mut unmatched = Vec::new();

        for id in sorted {
            let feature = &features[id.index()];

            match categories
                .iter()
                .position(|category| category.matches(feature))
            {
                Some(i) => members[i].push(id),
                None => unmatched.push(id),
            }
        }

        if !unmatched.is_empty() {
            debug!(
                count = unmatched.len(),
                "dropping features that match no category"
            );
        }

        let mut lanes = Vec::<Lane>::new();

        for i in self.emission_order(categories) {
            let category = &categories[i];
            lanes.extend(self.allocator.allocate(
                category.name(),
                &members[i],
                features,
                transform,
            ));
        }

        debug!(
            features = features.len(),
            categories = categories.len(),
            lanes = lanes.len(),
            scale = transform.scale(),
            "laid out features"
        );

        Layout::new(lanes, unmatched)
    }

    /// Computes the order in which the categories' lanes are emitted, as
    /// indices into `categories`.
    fn emission_order(&self, categories: &[Category]) -> Vec<usize> {
        let mut order = Vec::with_capacity(categories.len());

        for name in &self.display_order {
            if let Some(i) = categories
                .iter()
                .position(|category| category.name() == name)
            {
                if !order.contains(&i) {
                    order.push(i);
                }
            }
        }

        for i in 0..categories.len() {
            if !order.contains(&i) {
                order.push(i);
            }
        }

        order
    }
}
