//! Tests for set algebra over named tags.

use crate::bitmap::IdSet;
use crate::index::{TagIndex, TagIndexBuilder};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn ids(set: &IdSet) -> Vec<u32> {
    set.iter().collect()
}

fn red_large() -> TagIndex {
    let mut builder = TagIndexBuilder::new();
    builder.add_many(&[1, 2, 3], "red");
    builder.add_many(&[2, 3, 4], "large");
    builder.add_many(&[100], "lonely");
    builder.seal()
}

fn index_from(sets: &[BTreeSet<u32>]) -> TagIndex {
    let mut builder = TagIndexBuilder::new();
    for (i, set) in sets.iter().enumerate() {
        let ids: Vec<u32> = set.iter().copied().collect();
        let name = format!("t{i}");
        // Empty sets still create the tag so it exists with cardinality 0.
        builder.add_many(&ids, &name);
    }
    builder.seal()
}

// ============================================================================
// Scenario tests
// ============================================================================

#[test]
fn test_red_large_scenario() {
    let index = red_large();

    assert_eq!(ids(&index.search_and(&["red", "large"])), vec![2, 3]);
    assert_eq!(ids(&index.union(&["red", "large"])), vec![1, 2, 3, 4]);
    assert_eq!(ids(&index.difference("red", "large")), vec![1]);
    assert_eq!(ids(&index.intersect("red", "large")), vec![2, 3]);
}

#[test]
fn test_search_and_no_tags_is_empty() {
    let index = red_large();
    let none: [&str; 0] = [];
    assert!(index.search_and(&none).is_empty());
}

#[test]
fn test_search_and_single_tag_is_copy() {
    let index = red_large();
    assert_eq!(ids(&index.search_and(&["red"])), vec![1, 2, 3]);
}

#[test]
fn test_search_and_absent_tag_short_circuits() {
    let index = red_large();

    assert!(index.search_and(&["red", "missing"]).is_empty());
    assert!(index.search_and(&["missing", "red"]).is_empty());
    assert!(index.search_and(&["missing"]).is_empty());
}

#[test]
fn test_search_and_disjoint_is_empty() {
    let index = red_large();
    assert!(index.search_and(&["red", "lonely", "large"]).is_empty());
}

#[test]
fn test_search_and_accepts_owned_strings() {
    let index = red_large();
    let tags = vec!["large".to_string(), "red".to_string()];
    assert_eq!(ids(&index.search_and(&tags)), vec![2, 3]);
}

#[test]
fn test_union_skips_absent_tags() {
    let index = red_large();

    assert_eq!(ids(&index.union(&["missing", "red"])), vec![1, 2, 3]);
    assert!(index.union(&["missing"]).is_empty());
    let none: [&str; 0] = [];
    assert!(index.union(&none).is_empty());
}

#[test]
fn test_difference_absent_include_is_empty() {
    let index = red_large();
    assert!(index.difference("missing", "red").is_empty());
}

#[test]
fn test_difference_absent_exclude_returns_include() {
    let index = red_large();
    assert_eq!(ids(&index.difference("red", "missing")), vec![1, 2, 3]);
}

#[test]
fn test_intersect_absent_operand_is_empty() {
    let index = red_large();
    assert!(index.intersect("red", "missing").is_empty());
    assert!(index.intersect("missing", "red").is_empty());
}

#[test]
fn test_queries_never_mutate_stored_sets() {
    let index = red_large();
    let red_before = index.get("red").cloned();
    let large_before = index.get("large").cloned();

    let mut and = index.search_and(&["red", "large"]);
    let mut or = index.union(&["red", "large"]);
    let mut diff = index.difference("red", "large");
    let mut both = index.intersect("red", "large");

    // Mutating results must not leak back into the index.
    and.add(999);
    or.add(999);
    diff.add(999);
    both.add(999);

    assert_eq!(index.get("red").cloned(), red_before);
    assert_eq!(index.get("large").cloned(), large_before);
    assert!(!index.contains(999, "red"));
    assert!(!index.contains(999, "large"));
}

// ============================================================================
// Property tests
// ============================================================================

fn tag_sets() -> impl Strategy<Value = Vec<BTreeSet<u32>>> {
    prop::collection::vec(prop::collection::btree_set(0u32..500, 0..80), 2..6)
}

proptest! {
    #[test]
    fn prop_and_is_commutative(sets in tag_sets()) {
        let index = index_from(&sets);
        let ab = index.search_and(&["t0", "t1"]);
        let ba = index.search_and(&["t1", "t0"]);
        let pair = index.intersect("t0", "t1");

        prop_assert_eq!(&ab, &ba);
        prop_assert_eq!(&ab, &pair);

        let expected: Vec<u32> = sets[0].intersection(&sets[1]).copied().collect();
        prop_assert_eq!(ids(&ab), expected);
    }

    #[test]
    fn prop_and_order_independent(sets in tag_sets()) {
        let index = index_from(&sets);
        let mut names: Vec<String> = (0..sets.len()).map(|i| format!("t{i}")).collect();
        let forward = index.search_and(&names);
        names.reverse();
        let backward = index.search_and(&names);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_difference_partitions_include(sets in tag_sets()) {
        let index = index_from(&sets);
        let diff = index.difference("t0", "t1");
        let common = index.intersect("t0", "t1");

        let mut rebuilt = diff.clone();
        rebuilt.or_inplace(&common);
        prop_assert_eq!(Some(&rebuilt), index.get("t0"));

        let mut overlap = diff.clone();
        overlap.and_inplace(index.get("t1").unwrap());
        prop_assert!(overlap.is_empty());
    }

    #[test]
    fn prop_union_bounded_by_sum(sets in tag_sets()) {
        let index = index_from(&sets);
        let names: Vec<String> = (0..sets.len()).map(|i| format!("t{i}")).collect();
        let union = index.union(&names);

        let sum: u64 = sets.iter().map(|s| s.len() as u64).sum();
        prop_assert!(union.cardinality() <= sum);

        let pairwise_disjoint = sets.iter().enumerate().all(|(i, a)| {
            sets.iter().skip(i + 1).all(|b| a.is_disjoint(b))
        });
        prop_assert_eq!(union.cardinality() == sum, pairwise_disjoint);
    }
}
