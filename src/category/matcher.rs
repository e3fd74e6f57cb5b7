//! A predicate deciding whether a feature belongs to a category.

use std::collections::HashSet;

use crate::feature::Feature;

/// The separator between keys in a key list.
const KEY_SEPARATOR: char = ',';

/// Decides category membership by a feature's category key.
///
/// A matcher holds a set of keys and a mode. In inclusive mode, a feature
/// matches if its key is in the set. In exclusive mode, the result is
/// inverted. An empty key set therefore matches nothing in inclusive mode and
/// everything in exclusive mode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matcher {
    /// The category keys.
    keys: HashSet<String>,

    /// Whether a key in the set is a match (`true`) or a rejection (`false`).
    match_if_in_category: bool,
}

impl Matcher {
    /// Creates a new [`Matcher`] from a comma-separated list of keys.
    ///
    /// Keys are trimmed of surrounding whitespace and empty keys are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::category::Matcher;
    /// use featuremap::feature::Feature;
    /// use featuremap::feature::Span;
    /// use featuremap::feature::Strand;
    ///
    /// let cds = Feature::new("CDS", Strand::Plus, Span::try_new(0, 9)?, ());
    /// let repeat = Feature::new("repeat", Strand::Plus, Span::try_new(0, 9)?, ());
    ///
    /// let coding = Matcher::new("CDS, exon", true);
    /// assert!(coding.matches(&cds));
    /// assert!(!coding.matches(&repeat));
    ///
    /// let everything_else = Matcher::new("CDS, exon", false);
    /// assert!(!everything_else.matches(&cds));
    /// assert!(everything_else.matches(&repeat));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(keys: &str, match_if_in_category: bool) -> Self {
        Self::from_keys(keys.split(KEY_SEPARATOR), match_if_in_category)
    }

    /// Creates a new [`Matcher`] from an iterator of keys.
    pub fn from_keys<I, S>(keys: I, match_if_in_category: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|key| key.as_ref().trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();

        Self {
            keys,
            match_if_in_category,
        }
    }

    /// Creates an inclusive [`Matcher`] accepting exactly one key.
    pub fn single(key: impl Into<String>) -> Self {
        let mut keys = HashSet::new();
        keys.insert(key.into());

        Self {
            keys,
            match_if_in_category: true,
        }
    }

    /// Gets the keys of the matcher.
    pub fn keys(&self) -> &HashSet<String> {
        &self.keys
    }

    /// Returns whether the matcher accepts features whose key is in the set.
    pub fn match_if_in_category(&self) -> bool {
        self.match_if_in_category
    }

    /// Returns whether the category key `key` is accepted.
    pub fn matches_key(&self, key: &str) -> bool {
        self.keys.contains(key) == self.match_if_in_category
    }

    /// Returns whether `feature` is accepted.
    pub fn matches<T>(&self, feature: &Feature<T>) -> bool {
        self.matches_key(feature.category())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_list_is_trimmed() {
        let matcher = Matcher::new(" gene ,, mRNA,", true);

        assert_eq!(matcher.keys().len(), 2);
        assert!(matcher.matches_key("gene"));
        assert!(matcher.matches_key("mRNA"));
        assert!(!matcher.matches_key(""));
        assert!(!matcher.matches_key(" gene "));
    }

    #[test]
    fn test_empty_key_set() {
        let inclusive = Matcher::new("", true);
        assert!(!inclusive.matches_key("gene"));
        assert!(!inclusive.matches_key(""));

        let exclusive = Matcher::new("", false);
        assert!(exclusive.matches_key("gene"));
        assert!(exclusive.matches_key(""));
    }

    #[test]
    fn test_single() {
        let matcher = Matcher::single("tRNA");
        assert!(matcher.match_if_in_category());
        assert!(matcher.matches_key("tRNA"));
        assert!(!matcher.matches_key("rRNA"));
    }
}
