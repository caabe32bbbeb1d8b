//! Read-only queries over a sealed [`TagIndex`](crate::TagIndex).
//!
//! - [`algebra`]: AND / OR / AND-NOT over named tags, each producing a new set.
//! - [`page`]: offset/limit slices of a result set without materializing it.
//! - [`top_k`]: the k largest tags by cardinality.
//!
//! None of these operations fail. Unknown tags, empty inputs and out-of-range
//! pages all yield empty results.

pub mod algebra;
pub mod page;
pub mod top_k;

pub use page::{fetch_page, fetch_page_buffered, Page, PageRequest};
pub use top_k::TagSize;

#[cfg(test)]
mod algebra_tests;
#[cfg(test)]
mod top_k_tests;
