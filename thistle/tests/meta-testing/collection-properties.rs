//! Collection generator properties
//!
//! Collections stay within the size bound and every non-empty collection
//! can shrink to a smaller one.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::{arbitrary_draw, int_range, meta_config};
use thistle::*;

/// Every node down to `depth` levels below `tree` has a smaller candidate.
fn has_smaller<T, F>(tree: &Shrinkable<T>, len: F) -> bool
where
    T: Clone + 'static,
    F: Fn(&T) -> usize + Copy,
{
    has_smaller_within(tree, len, 2)
}

fn has_smaller_within<T, F>(tree: &Shrinkable<T>, len: F, depth: usize) -> bool
where
    T: Clone + 'static,
    F: Fn(&T) -> usize + Copy,
{
    let n = len(&tree.value);
    if n > 0 && !tree.candidates().iter().any(|candidate| len(candidate) < n) {
        return false;
    }
    depth == 0 || tree.shrink().all(|child| has_smaller_within(&child, len, depth - 1))
}

/// Property: every non-empty collection, and every node a couple of levels
/// below it, has a strictly smaller candidate
pub fn test_collections_make_progress() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let size = Size::new(size.get().min(6));
        let vec = Gen::vec_of(int_range(0, 5)).generate(&mut Random::from_seed(seed), size);
        let set = Gen::btree_set_of(int_range(0, 5)).generate(&mut Random::from_seed(seed), size);
        let hashed = Gen::hash_set_of(int_range(0, 5)).generate(&mut Random::from_seed(seed), size);
        let map = Gen::btree_map_of(int_range(0, 5), Gen::<bool>::bool())
            .generate(&mut Random::from_seed(seed), size);
        let string = Gen::<String>::ascii_alpha().generate(&mut Random::from_seed(seed), size);

        has_smaller(&vec, Vec::len)
            && has_smaller(&set, BTreeSet::len)
            && has_smaller(&hashed, HashSet::len)
            && has_smaller(&map, BTreeMap::len)
            && has_smaller(&string, |s: &String| s.chars().count())
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Collection progress property passed"),
        result => panic!("Collection progress property failed: {result}"),
    }
}

/// Property: collection lengths never exceed the size
pub fn test_lengths_bounded_by_size() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let vec = Gen::vec_of(Gen::<bool>::bool()).generate(&mut Random::from_seed(seed), size);
        let set = Gen::hash_set_of(int_range(-1000, 1000)).generate(&mut Random::from_seed(seed), size);
        vec.value.len() <= size.get() && set.value.len() <= size.get()
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Length bound property passed"),
        result => panic!("Length bound property failed: {result}"),
    }
}

/// Property: non-empty vectors and all their candidates keep an element
pub fn test_non_empty_vec_stays_non_empty() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let tree = Gen::non_empty_vec_of(int_range(0, 9)).generate(&mut Random::from_seed(seed), size);
        !tree.value.is_empty()
            && tree.value.len() <= size.get() + 1
            && tree.candidates().iter().all(|candidate| !candidate.is_empty())
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Non-empty vector property passed"),
        result => panic!("Non-empty vector property failed: {result}"),
    }
}

/// Property: map removal candidates drop exactly one key
pub fn test_map_removals_drop_one_key() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let tree = Gen::hash_map_of(int_range(0, 30), Gen::<String>::ascii_lowercase())
            .generate(&mut Random::from_seed(seed), size);
        let n = tree.value.len();
        tree.candidates()
            .iter()
            .take(n)
            .all(|candidate| candidate.len() + 1 == n && candidate.keys().all(|k| tree.value.contains_key(k)))
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Map removal property passed"),
        result => panic!("Map removal property failed: {result}"),
    }
}
