//! Offset/limit pagination over a result set.
//!
//! A page is produced in two phases:
//!
//! 1. **Skip**: pull `offset` IDs through a small reusable discard buffer, so
//!    memory stays bounded however deep the page is.
//! 2. **Collect**: pull up to `page_size` IDs into the output.
//!
//! The set is never materialized as a whole, which matters for tags holding
//! millions of IDs.

use serde::Serialize;
use tracing::debug;

use crate::bitmap::IdSet;
use crate::config::{QueryConfig, DEFAULT_DISCARD_BUFFER_SIZE};

/// Returns up to `page_size` IDs in ascending order, starting at the
/// `offset`-th smallest.
///
/// Returns an empty vector when `page_size` is zero or `offset` is past the
/// end of the set.
///
/// # Example
///
/// ```
/// use flashtag_core::{fetch_page, IdSet};
///
/// let set: IdSet = [0, 10, 20, 30, 40, 50].into_iter().collect();
/// assert_eq!(fetch_page(&set, 2, 2), vec![20, 30]);
/// assert_eq!(fetch_page(&set, 4, 2), vec![40, 50]);
/// assert!(fetch_page(&set, 10, 2).is_empty());
/// ```
#[must_use]
pub fn fetch_page(set: &IdSet, offset: usize, page_size: usize) -> Vec<u32> {
    fetch_page_buffered(set, offset, page_size, DEFAULT_DISCARD_BUFFER_SIZE)
}

/// [`fetch_page`] with an explicit discard buffer size for the skip phase.
///
/// A `discard_buffer_size` of zero is treated as one.
#[must_use]
pub fn fetch_page_buffered(
    set: &IdSet,
    offset: usize,
    page_size: usize,
    discard_buffer_size: usize,
) -> Vec<u32> {
    let cardinality = set.cardinality();
    if page_size == 0 || offset as u64 >= cardinality {
        return Vec::new();
    }

    let mut it = set.many_iter();

    if offset > 0 {
        let mut discard = vec![0u32; discard_buffer_size.clamp(1, offset)];
        let mut discarded = 0;
        while discarded < offset {
            let to_read = (offset - discarded).min(discard.len());
            let count = it.next_many(&mut discard[..to_read]);
            if count == 0 {
                break;
            }
            discarded += count;
        }
    }

    // Never allocate more than what is left after the offset.
    let remaining = usize::try_from(cardinality - offset as u64).unwrap_or(usize::MAX);
    let mut page = vec![0u32; page_size.min(remaining)];
    let produced = it.next_many(&mut page);
    page.truncate(produced);
    page
}

/// Offset/limit pair describing one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of leading IDs to skip.
    pub offset: usize,
    /// Maximum number of IDs to return.
    pub limit: usize,
}

impl PageRequest {
    /// Creates a request for `limit` IDs after skipping `offset`.
    #[must_use]
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// The first page of `limit` IDs.
    #[must_use]
    pub fn first(limit: usize) -> Self {
        Self::new(0, limit)
    }

    /// The page immediately following this one.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::new(self.offset.saturating_add(self.limit), self.limit)
    }

    /// Fetches this page from `set` using the limits of `config`.
    ///
    /// A `limit` above `config.max_page_size` is clamped.
    #[must_use]
    pub fn fetch(&self, set: &IdSet, config: &QueryConfig) -> Page {
        let limit = if self.limit > config.max_page_size {
            debug!(
                requested = self.limit,
                max = config.max_page_size,
                "Clamping page size"
            );
            config.max_page_size
        } else {
            self.limit
        };
        let ids = fetch_page_buffered(set, self.offset, limit, config.discard_buffer_size);
        Page {
            ids,
            offset: self.offset,
            total: set.cardinality(),
        }
    }
}

/// One page of a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// IDs on this page, ascending.
    pub ids: Vec<u32>,
    /// Offset the page starts at.
    pub offset: usize,
    /// Cardinality of the whole result set.
    pub total: u64,
}

impl Page {
    /// Returns true if IDs remain after this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        (self.offset as u64).saturating_add(self.ids.len() as u64) < self.total
    }
}
