//! Sealed, read-only tag index.

use serde::Serialize;

use super::TagMap;
use crate::bitmap::IdSet;

/// Statistics for a sealed index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Number of distinct tags.
    pub tag_count: usize,
    /// Sum of all tag cardinalities (one item with two tags counts twice).
    pub total_postings: u64,
    /// Number of distinct item IDs across all tags.
    pub distinct_ids: u64,
    /// Bytes needed to serialize every bitmap.
    pub serialized_bytes: usize,
}

/// Immutable mapping from tag name to the set of item IDs carrying it.
///
/// Built by [`TagIndexBuilder::seal`](super::TagIndexBuilder::seal) or loaded
/// from a snapshot. Every query returns a newly owned [`IdSet`]; stored sets
/// are only ever borrowed.
#[derive(Debug, Default, Clone)]
pub struct TagIndex {
    pub(crate) tags: TagMap,
}

impl TagIndex {
    pub(crate) fn from_map(tags: TagMap) -> Self {
        Self { tags }
    }

    /// Checks whether `id` is tagged with `tag`. Absent tags return `false`.
    #[must_use]
    pub fn contains(&self, id: u32, tag: &str) -> bool {
        self.tags.get(tag).is_some_and(|set| set.contains(id))
    }

    /// Borrows the stored set for `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&IdSet> {
        self.tags.get(tag)
    }

    /// Cardinality of `tag`, zero when absent.
    #[must_use]
    pub fn cardinality(&self, tag: &str) -> u64 {
        self.tags.get(tag).map_or(0, IdSet::cardinality)
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if the index holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates over `(name, set)` pairs in unspecified order.
    pub fn tags(&self) -> impl Iterator<Item = (&str, &IdSet)> {
        self.tags.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Tag names sorted lexicographically.
    #[must_use]
    pub fn tag_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Computes index statistics.
    ///
    /// Walks every set once; not intended for hot paths.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let mut all = IdSet::new();
        let mut stats = IndexStats {
            tag_count: self.tags.len(),
            ..IndexStats::default()
        };
        for set in self.tags.values() {
            stats.total_postings += set.cardinality();
            stats.serialized_bytes += set.serialized_size();
            all.or_inplace(set);
        }
        stats.distinct_ids = all.cardinality();
        stats
    }
}
