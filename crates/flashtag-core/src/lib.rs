//! # `FlashTag` Core
//!
//! In-memory inverted index from string tags to sets of `u32` item IDs.
//!
//! Each tag owns a compressed roaring bitmap. Queries combine tags with set
//! algebra, page through results without materializing them, and rank tags by
//! size.
//!
//! ## Features
//!
//! - **Compressed sets**: roaring bitmaps with run-length compaction on seal
//! - **Set algebra**: AND across any number of tags, OR, AND-NOT
//! - **Bounded paging**: offset/limit with constant scratch memory
//! - **Top-k tags**: bounded min-heap, `O(T log k)`
//! - **Snapshots**: single-file, CRC-checked persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use flashtag_core::{fetch_page, TagIndexBuilder};
//!
//! let mut builder = TagIndexBuilder::new();
//! builder.add_many(&[1, 2, 3, 4], "red");
//! builder.add_many(&[2, 4, 6], "large");
//! let index = builder.seal();
//!
//! let hits = index.search_and(&["red", "large"]);
//! assert_eq!(fetch_page(&hits, 0, 10), vec![2, 4]);
//! assert_eq!(index.top_k_tags(1), vec!["red"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::must_use_candidate)]

pub mod bitmap;
pub mod config;
pub mod demo;
pub mod error;
pub mod index;
pub mod query;
pub mod snapshot;

pub use bitmap::{IdSet, IdSetIter};
pub use config::{ConfigError, FlashConfig, IndexConfig, LoggingConfig, QueryConfig};
pub use error::{Error, Result};
pub use index::{IndexStats, TagIndex, TagIndexBuilder};
pub use query::{fetch_page, fetch_page_buffered, Page, PageRequest, TagSize};
