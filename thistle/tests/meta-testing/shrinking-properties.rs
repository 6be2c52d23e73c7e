//! Shrinking correctness properties
//!
//! Candidates are never more complex than their parent, and the search
//! settles on a locally minimal counterexample.

use crate::{arbitrary_draw, int_range, meta_config};
use thistle::*;

/// Property: integer candidates are never further from zero
pub fn test_integer_shrinking_towards_origin() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let tree = int_range(-100, 100).generate(&mut Random::from_seed(seed), size);
        tree.candidates()
            .iter()
            .all(|candidate| candidate.abs() < tree.value.abs())
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Integer shrinking property passed"),
        result => panic!("Integer shrinking property failed: {result}"),
    }
}

/// Property: a threshold property always shrinks to the threshold itself
pub fn test_shrink_search_finds_threshold() {
    let draws = Gen::tuple_of((int_range(1, 50), crate::arbitrary_seed()));
    let prop = for_all_named(draws, "(threshold, seed)", |&(threshold, seed)| {
        let tree = int_range(0, 1000).generate(&mut Random::from_seed(seed), Size::new(100));
        if tree.value < threshold {
            return true;
        }
        let outcome = shrink_search(|&n| n < threshold, tree);
        outcome.exhausted && outcome.minimal.value == threshold
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Threshold shrinking property passed"),
        result => panic!("Threshold shrinking property failed: {result}"),
    }
}

/// Property: shrinking the same failure twice gives the same answer
pub fn test_shrink_search_is_idempotent() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let tree = Gen::vec_of(int_range(0, 40)).generate(&mut Random::from_seed(seed), size);
        let holds = |xs: &Vec<i32>| xs.iter().sum::<i32>() < 30;
        if holds(&tree.value) {
            return true;
        }
        let first = shrink_search(holds, tree.clone());
        let second = shrink_search(holds, tree);
        first.minimal.value == second.minimal.value && first.shrinks == second.shrinks
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Shrink idempotence property passed"),
        result => panic!("Shrink idempotence property failed: {result}"),
    }
}

/// Property: no candidate of the minimal value still fails
pub fn test_minimal_is_locally_minimal() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let tree = Gen::vec_of(int_range(-20, 20)).generate(&mut Random::from_seed(seed), size);
        let holds = |xs: &Vec<i32>| xs.iter().filter(|&&x| x < 0).count() < 2;
        if holds(&tree.value) {
            return true;
        }
        let outcome = shrink_search(holds, tree);
        !holds(&outcome.minimal.value)
            && outcome.minimal.value.len() == 2
            && outcome.minimal.candidates().iter().all(holds)
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Local minimality property passed"),
        result => panic!("Local minimality property failed: {result}"),
    }
}

/// Property: always taking the first candidate eventually runs out
pub fn test_first_candidate_chain_terminates() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let mut current = Gen::vec_of(int_range(0, 50)).generate(&mut Random::from_seed(seed), size);
        let mut steps = 0;
        while let Some(next) = current.shrink().next() {
            current = next;
            steps += 1;
            if steps > 1_000 {
                return false;
            }
        }
        current.value.is_empty()
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Shrink termination property passed"),
        result => panic!("Shrink termination property failed: {result}"),
    }
}
