//! Ordered label sets and label-name normalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::names;

/// An ordered-by-key mapping from label names to label values.
///
/// Backed by a `BTreeMap`, so iteration order is deterministic and two sets
/// holding the same pairs compare and hash identically regardless of the
/// order they were built in. This is what makes label sets usable as cache
/// identity: hashing the pairs in iteration order always produces the same
/// key for set-equal inputs.
///
/// ```rust
/// use muninn::LabelSet;
///
/// let a = LabelSet::new().with("http_method", "GET").with("host", "api-1");
/// let b = LabelSet::new().with("host", "api-1").with("http_method", "GET");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet {
    labels: BTreeMap<String, String>,
}

impl LabelSet {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    /// Insert a pair, returning the previous value for the name if any.
    ///
    /// Keys are unique: inserting an existing name replaces its value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.labels.insert(name.into(), value.into())
    }

    /// Look up the value for a label name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    /// Iterate pairs in label-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs in the set.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the set holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Substitute each label name that resolves to a well-known
    /// [`LabelName`](crate::LabelName) constant with its canonical form.
    ///
    /// Values are never substituted. Two raw names that resolve to the same
    /// constant collapse into one pair; that collision is intentional, the
    /// spellings denote the same label.
    pub fn normalized(&self) -> LabelSet {
        self.labels
            .iter()
            .map(|(name, value)| (names::canonical_label_name(name).into_owned(), value.clone()))
            .collect()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            labels: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}
