//! Generator invariant properties
//!
//! These properties check that generators respect their ranges and are
//! deterministic for a given size and seed.

use crate::{arbitrary_seed, arbitrary_size, expect_pass};
use urchin::*;

/// Property: integral generators stay within range.bounds(size), shrinks included
pub fn test_integral_respects_bounds() {
    let range = Range::linear_from(5i32, -1000, 1000).expect("origin is in range");
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        "(size, seed)",
        move |&(size, seed)| {
            let (lo, hi) = range.bounds(size);
            match Gen::integral(range.clone()).generate(size, seed) {
                Some(tree) => tree.expand(2).iter().all(|&x| lo <= x && x <= hi),
                None => false,
            }
        },
    );

    expect_pass("integral bounds", prop.report(&Config::default()));
}

/// Property: the same size and seed always give the same tree
pub fn test_generation_is_deterministic() {
    let gen = Gen::vec(
        Range::linear(0usize, 10),
        Gen::integral(Range::linear(-50i32, 50)),
    );
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        "(size, seed)",
        move |&(size, seed)| {
            let first = gen.generate(size, seed).map(|tree| tree.expand(2));
            let second = gen.generate(size, seed).map(|tree| tree.expand(2));
            first.is_some() && first == second
        },
    );

    expect_pass("generation determinism", prop.report(&Config::default().with_tests(50)));
}

/// Property: vec lengths follow the length range at every size
pub fn test_vec_length_respects_bounds() {
    let lengths = Range::linear(1usize, 30);
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        "(size, seed)",
        move |&(size, seed)| {
            let (lo, hi) = lengths.bounds(size);
            Gen::vec(lengths.clone(), Gen::bool())
                .generate(size, seed)
                .is_some_and(|tree| lo <= tree.value.len() && tree.value.len() <= hi)
        },
    );

    expect_pass("vec length bounds", prop.report(&Config::default()));
}
