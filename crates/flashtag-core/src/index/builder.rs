//! Load-phase mutation surface.

use std::time::Instant;

use tracing::{info, warn};

use super::{TagIndex, TagMap};
use crate::bitmap::IdSet;
use crate::config::IndexConfig;

/// Mutable index used while loading data.
///
/// # Example
///
/// ```
/// use flashtag_core::TagIndexBuilder;
///
/// let mut builder = TagIndexBuilder::new();
/// builder.add(1, "red");
/// builder.add_many(&[2, 3], "red");
///
/// let index = builder.seal();
/// assert!(index.contains(3, "red"));
/// assert!(!index.contains(3, "blue"));
/// ```
#[derive(Debug, Default)]
pub struct TagIndexBuilder {
    tags: TagMap,
}

impl TagIndexBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with room for `expected_tags` distinct tags.
    #[must_use]
    pub fn with_capacity(expected_tags: usize) -> Self {
        let mut tags = TagMap::default();
        tags.reserve(expected_tags);
        Self { tags }
    }

    /// Adds `id` to `tag`, creating the tag on first use.
    ///
    /// Re-adding an existing ID is a no-op. Returns `true` if the ID was new.
    /// Empty tag names are ignored and return `false`.
    pub fn add(&mut self, id: u32, tag: &str) -> bool {
        match self.set_for(tag) {
            Some(set) => set.add(id),
            None => false,
        }
    }

    /// Adds a batch of IDs to `tag` and returns how many were new.
    ///
    /// Equivalent to calling [`add`](Self::add) for each ID, but lets the
    /// bitmap append ascending runs in bulk.
    pub fn add_many(&mut self, ids: &[u32], tag: &str) -> u64 {
        match self.set_for(tag) {
            Some(set) => set.add_many(ids),
            None => 0,
        }
    }

    /// Checks whether `id` is tagged with `tag`. Absent tags return `false`.
    #[must_use]
    pub fn contains(&self, id: u32, tag: &str) -> bool {
        self.tags.get(tag).is_some_and(|set| set.contains(id))
    }

    /// Number of distinct tags loaded so far.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if no tag has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Ends the load phase with run optimization enabled.
    #[must_use]
    pub fn seal(self) -> TagIndex {
        self.seal_with(&IndexConfig::default())
    }

    /// Ends the load phase and returns the read-only index.
    #[must_use]
    pub fn seal_with(mut self, config: &IndexConfig) -> TagIndex {
        let start = Instant::now();
        let mut optimized = 0usize;
        if config.run_optimize_on_seal {
            for set in self.tags.values_mut() {
                if set.run_optimize() {
                    optimized += 1;
                }
            }
        }
        info!(
            tags = self.tags.len(),
            optimized,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Sealed tag index"
        );
        TagIndex::from_map(self.tags)
    }

    fn set_for(&mut self, tag: &str) -> Option<&mut IdSet> {
        if tag.is_empty() {
            warn!("Ignoring insert into empty tag name");
            return None;
        }
        if !self.tags.contains_key(tag) {
            self.tags.insert(tag.to_owned(), IdSet::new());
        }
        self.tags.get_mut(tag)
    }
}
