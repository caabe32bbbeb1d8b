//! Synthetic demo data set.
//!
//! | Tag    | Members                    |
//! |--------|----------------------------|
//! | `all`  | every ID in `0..size`      |
//! | `even` | multiples of 2             |
//! | `tri`  | multiples of 3             |
//! | `rare` | the single ID `size - 1`   |

use tracing::debug;

use crate::config::IndexConfig;
use crate::index::{TagIndex, TagIndexBuilder};

/// Default number of IDs in the demo universe.
pub const DEFAULT_DEMO_SIZE: u32 = 5_000_000;

/// Tag names created by [`demo_index`].
pub const DEMO_TAGS: [&str; 4] = ["all", "even", "tri", "rare"];

/// Builds and seals the demo index over `0..size`.
#[must_use]
pub fn demo_index(size: u32) -> TagIndex {
    demo_builder(size).seal()
}

/// Same as [`demo_index`] with explicit sealing options.
#[must_use]
pub fn demo_index_with(size: u32, config: &IndexConfig) -> TagIndex {
    demo_builder(size).seal_with(config)
}

fn demo_builder(size: u32) -> TagIndexBuilder {
    let mut builder = TagIndexBuilder::with_capacity(DEMO_TAGS.len());

    let all: Vec<u32> = (0..size).collect();
    builder.add_many(&all, "all");
    drop(all);

    let even: Vec<u32> = (0..size).step_by(2).collect();
    builder.add_many(&even, "even");
    drop(even);

    let tri: Vec<u32> = (0..size).step_by(3).collect();
    builder.add_many(&tri, "tri");
    drop(tri);

    if let Some(last) = size.checked_sub(1) {
        builder.add(last, "rare");
    }

    debug!(size, tags = builder.tag_count(), "Built demo data");
    builder
}
