//! Compressed integer set backing every tag in the index.
//!
//! `IdSet` is a thin wrapper around [`RoaringBitmap`] that exposes only the
//! operations the query layer relies on:
//!
//! | Operation              | Method                          |
//! |------------------------|---------------------------------|
//! | Insert                 | [`IdSet::add`], [`IdSet::add_many`] |
//! | Membership / size      | [`IdSet::contains`], [`IdSet::cardinality`] |
//! | Boolean algebra        | `and_inplace`, `or_inplace`, `and_not_inplace` |
//! | Bounded ordered scan   | [`IdSet::many_iter`] + [`IdSetIter::next_many`] |
//! | Compaction             | [`IdSet::run_optimize`]         |
//! | Portable serialization | `serialize_into`, `deserialize_from`, `serialized_size` |
//!
//! The boolean operations mutate `self`. Callers that derive a new set from a
//! stored one must clone first.

use roaring::RoaringBitmap;
use std::io;

/// Ordered set of `u32` item identifiers.
#[derive(Debug, Clone, Default)]
pub struct IdSet(RoaringBitmap);

impl IdSet {
    /// Creates a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(RoaringBitmap::new())
    }

    /// Inserts an ID. Returns `true` if it was not already present.
    pub fn add(&mut self, id: u32) -> bool {
        self.0.insert(id)
    }

    /// Inserts a batch of IDs and returns how many were new.
    ///
    /// Strictly ascending input that starts above the current maximum is
    /// appended in one pass; anything else falls back to per-value insertion.
    pub fn add_many(&mut self, ids: &[u32]) -> u64 {
        let before = self.0.len();
        if is_append_only(self.0.max(), ids) {
            if self.0.append(ids.iter().copied()).is_err() {
                self.0.extend(ids.iter().copied());
            }
        } else {
            self.0.extend(ids.iter().copied());
        }
        self.0.len() - before
    }

    /// Checks whether the set contains `id`.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(id)
    }

    /// Returns the number of IDs in the set.
    #[must_use]
    pub fn cardinality(&self) -> u64 {
        self.0.len()
    }

    /// Returns true if the set holds no IDs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keeps only the IDs also present in `other`.
    pub fn and_inplace(&mut self, other: &IdSet) {
        self.0 &= &other.0;
    }

    /// Adds every ID of `other`.
    pub fn or_inplace(&mut self, other: &IdSet) {
        self.0 |= &other.0;
    }

    /// Removes every ID present in `other`.
    pub fn and_not_inplace(&mut self, other: &IdSet) {
        self.0 -= &other.0;
    }

    /// Returns a bounded ascending iterator over the set.
    #[must_use]
    pub fn many_iter(&self) -> IdSetIter<'_> {
        IdSetIter {
            inner: self.0.iter(),
        }
    }

    /// Iterates over all IDs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter()
    }

    /// Converts dense stretches of IDs into run containers.
    ///
    /// Meant to be called once after bulk loading. Returns `true` if the
    /// internal representation changed.
    pub fn run_optimize(&mut self) -> bool {
        self.0.optimize()
    }

    /// Number of bytes [`serialize_into`](Self::serialize_into) will write.
    #[must_use]
    pub fn serialized_size(&self) -> usize {
        self.0.serialized_size()
    }

    /// Writes the set in the portable roaring format.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the writer.
    pub fn serialize_into<W: io::Write>(&self, writer: W) -> io::Result<()> {
        self.0.serialize_into(writer)
    }

    /// Reads a set written by [`serialize_into`](Self::serialize_into).
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or the bytes are not a valid
    /// portable roaring bitmap.
    pub fn deserialize_from<R: io::Read>(reader: R) -> io::Result<Self> {
        RoaringBitmap::deserialize_from(reader).map(Self)
    }
}

// Compares contents, not container layout: a run-optimized set equals its
// unoptimized copy.
impl PartialEq for IdSet {
    fn eq(&self, other: &Self) -> bool {
        self.cardinality() == other.cardinality() && self.iter().eq(other.iter())
    }
}

impl Eq for IdSet {}

impl FromIterator<u32> for IdSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<u32> for IdSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

fn is_append_only(current_max: Option<u32>, ids: &[u32]) -> bool {
    let ascending = ids.windows(2).all(|w| w[0] < w[1]);
    match (current_max, ids.first()) {
        (Some(max), Some(&first)) => ascending && first > max,
        _ => ascending,
    }
}

/// Ascending iterator that hands out IDs in caller-sized batches.
pub struct IdSetIter<'a> {
    inner: roaring::bitmap::Iter<'a>,
}

impl IdSetIter<'_> {
    /// Fills `buf` with the next IDs in ascending order.
    ///
    /// Returns how many slots were written; fewer than `buf.len()` only when
    /// the set is exhausted.
    pub fn next_many(&mut self, buf: &mut [u32]) -> usize {
        let mut written = 0;
        for slot in buf.iter_mut() {
            match self.inner.next() {
                Some(id) => {
                    *slot = id;
                    written += 1;
                }
                None => break,
            }
        }
        written
    }
}

impl Iterator for IdSetIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
