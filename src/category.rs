//! Named groups of features that share a pool of lanes.

pub mod matcher;

pub use matcher::Matcher;

use crate::feature::Feature;

/// A named category paired with the [`Matcher`] that decides membership.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Category {
    /// The display name.
    name: String,

    /// The membership predicate.
    matcher: Matcher,
}

impl Category {
    /// Creates a new [`Category`].
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::category::Category;
    /// use featuremap::category::Matcher;
    ///
    /// let category = Category::new("RNA", Matcher::new("tRNA,rRNA,ncRNA", true));
    /// assert_eq!(category.name(), "RNA");
    /// assert!(category.matcher().matches_key("rRNA"));
    /// ```
    pub fn new(name: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            name: name.into(),
            matcher,
        }
    }

    /// Creates a [`Category`] that accepts exactly the features whose
    /// category key equals `key`, named after that key.
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        let matcher = Matcher::single(key.clone());

        Self { name: key, matcher }
    }

    /// Gets the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the matcher.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Returns whether `feature` belongs to this category.
    pub fn matches<T>(&self, feature: &Feature<T>) -> bool {
        self.matcher.matches(feature)
    }
}

/// Discovers one [`Category`] per distinct category key, in the order the
/// keys are first seen.
///
/// # Examples
///
/// ```
/// use featuremap::category;
/// use featuremap::feature::Feature;
/// use featuremap::feature::Span;
/// use featuremap::feature::Strand;
///
/// let span = Span::try_new(0, 1)?;
/// let features = vec![
///     Feature::new("gene", Strand::Plus, span, ()),
///     Feature::new("CDS", Strand::Plus, span, ()),
///     Feature::new("gene", Strand::Minus, span, ()),
/// ];
///
/// let names = category::discover(features.iter())
///     .iter()
///     .map(|category| category.name().to_string())
///     .collect::<Vec<_>>();
/// assert_eq!(names, vec!["gene", "CDS"]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn discover<'a, T, I>(features: I) -> Vec<Category>
where
    T: 'a,
    I: IntoIterator<Item = &'a Feature<T>>,
{
    let mut categories = Vec::<Category>::new();

    for feature in features {
        if !categories
            .iter()
            .any(|category| category.name() == feature.category())
        {
            categories.push(Category::from_key(feature.category()));
        }
    }

    categories
}
