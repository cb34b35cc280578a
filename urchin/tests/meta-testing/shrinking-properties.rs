//! Shrinking correctness properties
//!
//! These properties ensure that shrinking behaves correctly - that it always
//! produces smaller failures and converges to minimal counterexamples.

use crate::{arbitrary_seed, arbitrary_size, expect_pass};
use urchin::*;

/// Property: any path through an integral shrink tree ends at the origin,
/// moving strictly closer at every step
pub fn test_integral_shrink_paths_reach_origin() {
    let origin = 7i64;
    let gen = Gen::integral(Range::linear_from(origin, -1000, 1000).expect("valid"));
    let picks = Gen::vec(Range::constant(1usize, 64), Gen::integral(Range::constant(0usize, 100)));
    let prop = for_all_named(
        Gen::tuple_of(Gen::tuple_of(arbitrary_size(), arbitrary_seed()), picks),
        "((size, seed), picks)",
        move |&((size, seed), ref picks)| {
            let Some(mut current) = gen.generate(size, seed) else {
                return false;
            };
            let mut picks = picks.iter().cycle();
            // Every step moves at least one closer, so the distance bounds the path.
            for _ in 0..=1010 {
                let children: Vec<_> = current.children().collect();
                if children.is_empty() {
                    return current.value == origin;
                }
                let pick = picks.next().copied().unwrap_or(0) % children.len();
                let next = children[pick].clone();
                if (next.value - origin).abs() >= (current.value - origin).abs() {
                    return false;
                }
                current = next;
            }
            false
        },
    );

    expect_pass("integral shrink convergence", prop.report(&Config::default().with_tests(100)));
}

/// Property: at the extremes of i64 the origin is still the first shrink
pub fn test_extreme_values_shrink_to_origin_first() {
    let gen = Gen::integral(Range::exponential_from(7i64, i64::MIN, i64::MAX).expect("valid"));
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        "(size, seed)",
        move |&(size, seed)| {
            gen.generate(size, seed).is_some_and(|tree| {
                tree.value == 7 || tree.shrinks().first() == Some(&7)
            })
        },
    );

    expect_pass("extreme shrink origin", prop.report(&Config::default()));
}

/// Property: no list shrink has more elements than its parent, and the empty
/// list is always the first candidate when the range allows it
pub fn test_vec_shrinks_never_grow() {
    let gen = Gen::vec(Range::linear(0usize, 20), Gen::integral(Range::linear(-100i32, 100)));
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        "(size, seed)",
        move |&(size, seed)| {
            let Some(tree) = gen.generate(size, seed) else {
                return false;
            };
            let first_is_empty = tree.value.is_empty() || tree.shrinks().first() == Some(&Vec::new());
            first_is_empty
                && tree.children().all(|child| {
                    child.value.len() <= tree.value.len()
                        && child.shrinks().iter().all(|xs| xs.len() <= child.value.len())
                })
        },
    );

    expect_pass("vec shrink monotonicity", prop.report(&Config::default().with_tests(60)));
}

/// Property: list shrinks never go below the range's lower bound
pub fn test_vec_shrinks_respect_min_length() {
    let gen = Gen::vec(Range::constant(3usize, 12), Gen::ascii_lower());
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        "(size, seed)",
        move |&(size, seed)| {
            gen.generate(size, seed)
                .is_some_and(|tree| tree.expand(3).iter().all(|xs| xs.len() >= 3))
        },
    );

    expect_pass("vec minimum length", prop.report(&Config::default().with_tests(40)));
}

/// Property: for `x < t`, greedy shrinking lands exactly on `t`
pub fn test_threshold_is_found_exactly() {
    let prop = for_all_named(
        Gen::tuple_of(Gen::integral(Range::constant(1i32, 1000)), arbitrary_seed()),
        "(threshold, seed)",
        |&(threshold, seed)| {
            let inner = for_all(Gen::integral(Range::constant(0i32, 1000)), move |&x| x < threshold);
            let report = inner.report(&Config::default().with_seed(seed));
            match report.failure() {
                Some(failure) => failure.shrunk == threshold && !failure.truncated,
                None => report.is_success(),
            }
        },
    );

    expect_pass("threshold shrinking", prop.report(&Config::default().with_tests(30)));
}

/// Property: a length threshold on lists shrinks to a list of origins of that length
pub fn test_list_shrinks_to_minimal_length() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let gen = Gen::vec(Range::linear(0usize, 30), Gen::integral(Range::linear(0i32, 100)));
        let report = for_all(gen, |xs: &Vec<i32>| xs.len() < 3).report(&Config::default().with_seed(seed));
        report
            .failure()
            .is_some_and(|failure| failure.shrunk == vec![0, 0, 0])
    });

    expect_pass("list shrinking", prop.report(&Config::default().with_tests(20)));
}
