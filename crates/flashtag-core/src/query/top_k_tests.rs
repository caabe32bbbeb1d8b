//! Tests for top-k tag ranking.

use crate::index::{TagIndex, TagIndexBuilder};
use proptest::prelude::*;

fn sized(sizes: &[(&str, u32)]) -> TagIndex {
    let mut builder = TagIndexBuilder::new();
    for &(name, size) in sizes {
        builder.add_many(&(0..size).collect::<Vec<_>>(), name);
    }
    builder.seal()
}

/// Reference ranking: full sort by size desc, then name asc.
fn brute_force(index: &TagIndex, k: usize) -> Vec<String> {
    let mut all: Vec<(u64, &str)> = index
        .tags()
        .map(|(name, set)| (set.cardinality(), name))
        .collect();
    all.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    all.into_iter()
        .take(k)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[test]
fn test_top_k_orders_by_cardinality() {
    let index = sized(&[("all", 100), ("even", 50), ("tri", 34), ("rare", 1)]);

    assert_eq!(index.top_k_tags(2), vec!["all", "even"]);
    assert_eq!(index.top_k_tags(4), vec!["all", "even", "tri", "rare"]);
}

#[test]
fn test_top_k_larger_than_tag_count() {
    let index = sized(&[("a", 3), ("b", 1)]);
    assert_eq!(index.top_k_tags(10), vec!["a", "b"]);
}

#[test]
fn test_top_k_zero_is_empty() {
    let index = sized(&[("a", 3)]);
    assert!(index.top_k_tags(0).is_empty());
}

#[test]
fn test_top_k_on_empty_index() {
    let index = TagIndexBuilder::new().seal();
    assert!(index.top_k_tags(5).is_empty());
}

#[test]
fn test_top_k_ties_break_by_name() {
    let index = sized(&[("delta", 5), ("alpha", 5), ("charlie", 5), ("bravo", 9)]);

    assert_eq!(index.top_k_tags(3), vec!["bravo", "alpha", "charlie"]);
    assert_eq!(index.top_k_tags(2), vec!["bravo", "alpha"]);
}

#[test]
fn test_top_k_sizes_carry_counts() {
    let index = sized(&[("big", 10), ("small", 2)]);

    let ranked = index.top_k_sizes(2);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].name, "big");
    assert_eq!(ranked[0].size, 10);
    assert_eq!(ranked[1].name, "small");
    assert_eq!(ranked[1].size, 2);
}

#[test]
fn test_top_k_counts_empty_tags() {
    let index = sized(&[("empty", 0), ("one", 1)]);
    assert_eq!(index.top_k_tags(2), vec!["one", "empty"]);
}

proptest! {
    #[test]
    fn prop_top_k_matches_full_sort(
        sizes in prop::collection::btree_map("[a-z]{1,6}", 0u32..40, 0..30),
        k in 0usize..35,
    ) {
        let pairs: Vec<(&str, u32)> = sizes.iter().map(|(n, s)| (n.as_str(), *s)).collect();
        let index = sized(&pairs);

        let top = index.top_k_tags(k);

        prop_assert_eq!(top.len(), k.min(index.tag_count()));
        prop_assert_eq!(&top, &brute_force(&index, k));

        let cardinalities: Vec<u64> = top.iter().map(|n| index.cardinality(n)).collect();
        prop_assert!(cardinalities.windows(2).all(|w| w[0] >= w[1]));
    }
}
