//! Set algebra over named tags.
//!
//! The bitmap operations run in place, so every method here clones a stored
//! operand before combining. Stored sets are never mutated by a query.

use tracing::debug;

use crate::bitmap::IdSet;
use crate::index::TagIndex;

impl TagIndex {
    /// Intersects the sets of all `tags`.
    ///
    /// Returns an empty set when `tags` is empty or any tag is absent.
    /// Operands are combined smallest first; the order does not affect the
    /// result.
    #[must_use]
    pub fn search_and<S: AsRef<str>>(&self, tags: &[S]) -> IdSet {
        let mut operands: Vec<&IdSet> = Vec::with_capacity(tags.len());
        for tag in tags {
            match self.tags.get(tag.as_ref()) {
                Some(set) => operands.push(set),
                None => {
                    debug!(tag = tag.as_ref(), "AND short-circuit on absent tag");
                    return IdSet::new();
                }
            }
        }
        operands.sort_by_key(|set| set.cardinality());

        let Some((smallest, rest)) = operands.split_first() else {
            return IdSet::new();
        };
        let mut result = (*smallest).clone();
        for other in rest {
            if result.is_empty() {
                break;
            }
            result.and_inplace(other);
        }

        debug!(
            operands = tags.len(),
            matches = result.cardinality(),
            "AND query"
        );
        result
    }

    /// Unions the sets of all `tags`. Absent tags contribute nothing.
    #[must_use]
    pub fn union<S: AsRef<str>>(&self, tags: &[S]) -> IdSet {
        let mut result = IdSet::new();
        for set in tags.iter().filter_map(|tag| self.tags.get(tag.as_ref())) {
            result.or_inplace(set);
        }

        debug!(
            operands = tags.len(),
            matches = result.cardinality(),
            "OR query"
        );
        result
    }

    /// IDs tagged `include` but not `exclude`.
    ///
    /// An absent `include` yields an empty set; an absent `exclude` yields
    /// an unchanged copy of `include`.
    #[must_use]
    pub fn difference(&self, include: &str, exclude: &str) -> IdSet {
        let Some(base) = self.tags.get(include) else {
            return IdSet::new();
        };
        let mut result = base.clone();
        if let Some(removed) = self.tags.get(exclude) {
            result.and_not_inplace(removed);
        }

        debug!(include, exclude, matches = result.cardinality(), "AND-NOT query");
        result
    }

    /// Binary intersection of `a` and `b`; empty if either is absent.
    #[must_use]
    pub fn intersect(&self, a: &str, b: &str) -> IdSet {
        let (Some(left), Some(right)) = (self.tags.get(a), self.tags.get(b)) else {
            return IdSet::new();
        };
        let mut result = left.clone();
        result.and_inplace(right);
        result
    }
}
