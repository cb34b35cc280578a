//! Seed properties
//!
//! Reproducibility rests on seeds being pure values: the same input always
//! gives the same output, and splitting never hands out the same stream twice.

use crate::{arbitrary_seed, expect_pass};
use urchin::*;

fn any_u64() -> Gen<u64> {
    Gen::integral(Range::constant(0u64, u64::MAX))
}

/// Property: from_u64 and next_u64 are pure functions of their input
pub fn test_from_u64_is_deterministic() {
    let prop = for_all_named(any_u64(), "n", |&n| {
        let (a, next_a) = Seed::from_u64(n).next_u64();
        let (b, next_b) = Seed::from_u64(n).next_u64();
        Seed::from_u64(n) == Seed::from_u64(n) && a == b && next_a == next_b
    });

    expect_pass("from_u64 determinism", prop.report(&Config::default().with_tests(200)));
}

/// Property: split halves differ from each other and from their parent
pub fn test_split_yields_distinct_seeds() {
    let prop = for_all_named(any_u64().map(Seed::from_u64), "seed", |&seed| {
        let (left, right) = seed.split();
        left != right && left != seed && right != seed && seed.split() == (left, right)
    });

    expect_pass("split distinctness", prop.report(&Config::default().with_tests(200)));
}

/// Property: bounded sampling never exceeds its (inclusive) bound
pub fn test_bounded_values_stay_in_bounds() {
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_seed(), Gen::integral(Range::exponential(0u64, u64::MAX))),
        "(seed, bound)",
        |&(seed, bound)| {
            let (value, _) = seed.next_bounded(bound);
            let (signed, _) = seed.next_i128_in(-(bound as i128), bound as i128);
            value <= bound && signed.unsigned_abs() <= bound as u128
        },
    );

    expect_pass("bounded sampling", prop.report(&Config::default()));
}

/// Property: the text form of a seed parses back to the same seed
pub fn test_text_form_round_trips() {
    let prop = for_all_named(any_u64().map(Seed::from_u64), "seed", |&seed| {
        seed.to_string().parse::<Seed>() == Ok(seed)
    });

    expect_pass("seed text form", prop.report(&Config::default().with_tests(50)));
}
