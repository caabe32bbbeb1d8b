//! Tests for tag storage and the load/seal lifecycle.

use super::*;
use crate::config::IndexConfig;
use std::sync::Arc;

fn sample() -> TagIndex {
    let mut builder = TagIndexBuilder::new();
    builder.add_many(&[1, 2, 3], "red");
    builder.add_many(&[2, 3, 4], "large");
    builder.seal()
}

#[test]
fn test_new_builder_is_empty() {
    let builder = TagIndexBuilder::new();
    assert!(builder.is_empty());
    assert_eq!(builder.tag_count(), 0);
}

#[test]
fn test_add_creates_tag_lazily() {
    let mut builder = TagIndexBuilder::with_capacity(4);
    assert!(!builder.contains(7, "fresh"));

    assert!(builder.add(7, "fresh"));

    assert_eq!(builder.tag_count(), 1);
    assert!(builder.contains(7, "fresh"));
}

#[test]
fn test_add_is_idempotent() {
    let mut builder = TagIndexBuilder::new();

    assert!(builder.add(5, "tag"));
    assert!(!builder.add(5, "tag"));

    let index = builder.seal();
    assert_eq!(index.cardinality("tag"), 1);
}

#[test]
fn test_add_empty_tag_is_ignored() {
    let mut builder = TagIndexBuilder::new();

    assert!(!builder.add(1, ""));
    assert_eq!(builder.add_many(&[1, 2], ""), 0);

    assert!(builder.is_empty());
    assert!(!builder.contains(1, ""));
}

#[test]
fn test_add_many_matches_repeated_add() {
    let ids = [9, 3, 3, 7, 1, 100_000, 7];

    let mut bulk = TagIndexBuilder::new();
    let added = bulk.add_many(&ids, "t");

    let mut single = TagIndexBuilder::new();
    for id in ids {
        single.add(id, "t");
    }

    assert_eq!(added, 5);
    let bulk = bulk.seal();
    let single = single.seal();
    assert_eq!(bulk.get("t"), single.get("t"));
}

#[test]
fn test_add_many_accumulates_across_calls() {
    let mut builder = TagIndexBuilder::new();
    builder.add_many(&[1, 2], "t");
    builder.add_many(&[2, 3], "t");

    let index = builder.seal();
    assert_eq!(index.get("t").unwrap().iter().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_contains_absent_is_false() {
    let index = sample();

    assert!(index.contains(1, "red"));
    assert!(!index.contains(4, "red"));
    assert!(!index.contains(1, "missing"));
}

#[test]
fn test_seal_with_and_without_optimization_keeps_contents() {
    let build = || {
        let mut builder = TagIndexBuilder::new();
        builder.add_many(&(0..50_000).collect::<Vec<_>>(), "dense");
        builder
    };

    let optimized = build().seal();
    let raw = build().seal_with(&IndexConfig {
        run_optimize_on_seal: false,
    });

    assert_eq!(optimized.get("dense"), raw.get("dense"));
    assert!(
        optimized.stats().serialized_bytes <= raw.stats().serialized_bytes,
        "run optimization must not grow a dense set"
    );
}

#[test]
fn test_cardinality_and_names() {
    let index = sample();

    assert_eq!(index.tag_count(), 2);
    assert!(!index.is_empty());
    assert_eq!(index.cardinality("red"), 3);
    assert_eq!(index.cardinality("missing"), 0);
    assert_eq!(index.tag_names(), vec!["large", "red"]);
    assert_eq!(index.tags().count(), 2);
}

#[test]
fn test_stats() {
    let index = sample();

    let stats = index.stats();

    assert_eq!(stats.tag_count, 2);
    assert_eq!(stats.total_postings, 6);
    assert_eq!(stats.distinct_ids, 4);
    assert!(stats.serialized_bytes > 0);
}

#[test]
fn test_empty_index_stats() {
    let index = TagIndexBuilder::new().seal();
    assert!(index.is_empty());
    assert_eq!(index.stats(), IndexStats::default());
}

#[test]
fn test_sealed_index_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TagIndex>();
}

#[test]
fn test_concurrent_readers_share_sealed_index() {
    let index = Arc::new(sample());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            std::thread::spawn(move || {
                let hits = index.search_and(&["red", "large"]);
                hits.iter().collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("reader thread"), vec![2, 3]);
    }
    assert_eq!(index.cardinality("red"), 3);
}
