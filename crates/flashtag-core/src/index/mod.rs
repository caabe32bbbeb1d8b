//! Tag storage and lifecycle.
//!
//! An index goes through two phases:
//!
//! 1. **Load**: a [`TagIndexBuilder`] accepts `add`/`add_many` calls. It is
//!    the only type with a mutation surface.
//! 2. **Query**: [`TagIndexBuilder::seal`] consumes the builder, compacts every
//!    set, and returns an immutable [`TagIndex`]. A sealed index is
//!    `Send + Sync` and can be shared across reader threads behind an `Arc`.
//!
//! Query operations live next to their algorithms in [`crate::query`].

mod builder;
mod tag_index;

pub use builder::TagIndexBuilder;
pub use tag_index::{IndexStats, TagIndex};

use crate::bitmap::IdSet;
use rustc_hash::FxHashMap;

/// Tag name -> set of item IDs.
pub(crate) type TagMap = FxHashMap<String, IdSet>;

#[cfg(test)]
mod tests;
