//! Generator invariant properties
//!
//! Generators are pure functions of the randomness state and size, and
//! respect the bounds they are constructed with.

use crate::{arbitrary_draw, int_range, meta_config};
use thistle::*;

/// Property: mapping commutes with sampling
pub fn test_map_determinism() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let base = Gen::vec_of(int_range(-100, 100));
        let mapped = base.clone().map(|xs| xs.iter().map(|&x| i64::from(x) * 3).sum::<i64>());

        let expected: i64 = sample(&base, &mut Random::from_seed(seed), size)
            .value
            .iter()
            .map(|&x| i64::from(x) * 3)
            .sum();
        sample(&mapped, &mut Random::from_seed(seed), size).value == expected
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Map determinism property passed"),
        result => panic!("Map determinism property failed: {result}"),
    }
}

/// Property: choose only reaches its first entry at size zero
pub fn test_choose_at_size_zero() {
    let choice = Gen::choose(vec!['a', 'b', 'c']).expect("distinct values");
    let prop = for_all_named(crate::arbitrary_seed(), "seed", move |&seed| {
        sample(&choice, &mut Random::from_seed(seed), Size::new(0)).value == 'a'
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Choose at size zero property passed"),
        result => panic!("Choose at size zero property failed: {result}"),
    }
}

/// Property: range generators and all their candidates stay in range
pub fn test_range_bounds_hold_for_candidates() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let tree = int_range(-7, 23).generate(&mut Random::from_seed(seed), size);
        let in_range = |n: &i32| (-7..=23).contains(n);
        in_range(&tree.value) && tree.candidates().iter().all(in_range)
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Range bounds property passed"),
        result => panic!("Range bounds property failed: {result}"),
    }
}

/// Property: combining constants gives a constant
pub fn test_constant_combination() {
    let prop = for_all_named(arbitrary_draw(), "(size, seed)", |&(size, seed)| {
        let gen = combine((Gen::always(1), Gen::always("x")), |(a, b)| (a, b));
        let tree = sample(&gen, &mut Random::from_seed(seed), size);
        tree.value == (1, "x") && !tree.has_shrinks()
    });

    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Constant combination property passed"),
        result => panic!("Constant combination property failed: {result}"),
    }
}
