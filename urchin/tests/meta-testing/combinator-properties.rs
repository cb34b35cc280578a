//! Combinator law properties
//!
//! Mapping, pairing, binding and filtering must keep the shrink tree consistent
//! with the values it produces.

use crate::{arbitrary_seed, arbitrary_size, expect_pass};
use urchin::*;

fn size_and_seed() -> Gen<(Size, Seed)> {
    Gen::tuple_of(arbitrary_size(), arbitrary_seed())
}

/// Property: map(f).map(g) builds the same tree as map(g . f)
pub fn test_map_composition() {
    let prop = for_all_named(size_and_seed(), "(size, seed)", |&(size, seed)| {
        let base = || Gen::integral(Range::linear(-500i32, 500));
        let f = |x: i32| x * 3;
        let g = |x: i32| x - 1;
        let chained = base().map(f).map(g).generate(size, seed);
        let composed = base().map(move |x| g(f(x))).generate(size, seed);
        match (chained, composed) {
            (Some(a), Some(b)) => a.expand(2) == b.expand(2),
            _ => false,
        }
    });

    expect_pass("map composition", prop.report(&Config::default().with_tests(60)));
}

/// Property: each shrink of a pair changes exactly one component
pub fn test_map2_shrinks_one_side_at_a_time() {
    let prop = for_all_named(size_and_seed(), "(size, seed)", |&(size, seed)| {
        let gen = Gen::tuple_of(
            Gen::integral(Range::linear(0u32, 1000)),
            Gen::vec(Range::linear(0usize, 5), Gen::bool()),
        );
        let Some(tree) = gen.generate(size, seed) else {
            return false;
        };
        let (a, b) = tree.value.clone();
        tree.shrinks()
            .into_iter()
            .all(|(x, y)| (x != a) != (y != b))
    });

    expect_pass("map2 independence", prop.report(&Config::default().with_tests(60)));
}

/// Property: bound generators see the value they depend on, in every shrink
pub fn test_bind_respects_dependency() {
    let prop = for_all_named(size_and_seed(), "(size, seed)", |&(size, seed)| {
        let gen = Gen::integral(Range::linear(0usize, 8)).bind(|n| {
            Gen::vec(Range::singleton(n), Gen::integral(Range::linear(0i32, 9)))
                .map(move |xs| (n, xs))
        });
        gen.generate(size, seed)
            .is_some_and(|tree| tree.expand(3).iter().all(|(n, xs)| xs.len() == *n))
    });

    expect_pass("bind dependency", prop.report(&Config::default().with_tests(60)));
}

/// Property: filtered generators never produce or shrink to rejected values
pub fn test_filter_holds_through_shrinks() {
    let prop = for_all_named(size_and_seed(), "(size, seed)", |&(size, seed)| {
        let gen = Gen::integral(Range::linear(-1000i32, 1000)).filter(|x| x % 3 == 0);
        match gen.generate(size, seed) {
            Some(tree) => tree.expand(3).iter().all(|x| x % 3 == 0),
            // Discarding is allowed, but a third of all values pass, so it never happens here.
            None => false,
        }
    });

    expect_pass("filter soundness", prop.report(&Config::default().with_tests(60)));
}
