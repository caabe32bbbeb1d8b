//! Top-k tags by cardinality.
//!
//! Streaming selection with a min-heap bounded to k entries: O(T log k) for
//! T tags instead of O(T log T) for a full sort.

use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::index::TagIndex;

/// A tag name paired with its cardinality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSize {
    /// Tag name.
    pub name: String,
    /// Number of IDs carrying the tag.
    pub size: u64,
}

/// Borrowed ranking entry held in the heap while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate<'a> {
    name: &'a str,
    size: u64,
}

impl Ord for Candidate<'_> {
    // Larger size ranks higher; equal sizes rank the smaller name higher.
    fn cmp(&self, other: &Self) -> Ordering {
        self.size
            .cmp(&other.size)
            .then_with(|| other.name.cmp(self.name))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap that keeps the `capacity` highest-ranked candidates seen.
struct BoundedMinHeap<'a> {
    heap: BinaryHeap<Reverse<Candidate<'a>>>,
    capacity: usize,
}

impl<'a> BoundedMinHeap<'a> {
    fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
        }
    }

    fn offer(&mut self, candidate: Candidate<'a>) {
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(candidate));
            return;
        }
        if let Some(Reverse(min)) = self.heap.peek() {
            if candidate > *min {
                self.heap.pop();
                self.heap.push(Reverse(candidate));
            }
        }
    }

    /// Drains smallest first, then reverses into descending rank.
    fn into_descending(mut self) -> Vec<Candidate<'a>> {
        let mut ranked = Vec::with_capacity(self.heap.len());
        while let Some(Reverse(candidate)) = self.heap.pop() {
            ranked.push(candidate);
        }
        ranked.reverse();
        ranked
    }
}

impl TagIndex {
    /// Names of the `k` largest tags, largest first.
    ///
    /// Returns `min(k, tag_count)` names. Tags of equal cardinality are
    /// ordered by name, ascending.
    #[must_use]
    pub fn top_k_tags(&self, k: usize) -> Vec<String> {
        self.top_k_sizes(k)
            .into_iter()
            .map(|tag| tag.name)
            .collect()
    }

    /// Like [`top_k_tags`](Self::top_k_tags) but keeps the cardinalities.
    #[must_use]
    pub fn top_k_sizes(&self, k: usize) -> Vec<TagSize> {
        if k == 0 {
            return Vec::new();
        }

        let mut heap = BoundedMinHeap::new(k.min(self.tags.len()));
        for (name, set) in &self.tags {
            heap.offer(Candidate {
                name,
                size: set.cardinality(),
            });
        }

        heap.into_descending()
            .into_iter()
            .map(|c| TagSize {
                name: c.name.to_owned(),
                size: c.size,
            })
            .collect()
    }
}
