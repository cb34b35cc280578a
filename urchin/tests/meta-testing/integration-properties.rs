//! Integration properties
//!
//! End-to-end runs of the property engine: failing, replaying, giving up and
//! reporting generator faults.

use crate::{arbitrary_seed, expect_pass};
use urchin::*;

fn below_fifty() -> Property<i32> {
    for_all(Gen::integral(Range::linear(0, 100)), |&x| x < 50)
}

/// Property: `x < 50` over linear(0, 100) always fails and shrinks to exactly 50
pub fn test_simple_failing_property_workflow() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let report = below_fifty().report(&Config::default().with_seed(seed));
        match report.failure() {
            Some(failure) => {
                failure.original >= 50
                    && failure.shrunk == 50
                    && failure.shrinks == failure.progression.len() - 1
                    && failure.shrinks == failure.token.path.len()
                    && failure.progression.windows(2).all(|w| w[1] < w[0])
            }
            None => false,
        }
    });

    expect_pass("failing workflow", prop.report(&Config::default().with_tests(50)));
}

/// Property: rechecking a failure replays the same counterexample without shrinking
pub fn test_recheck_round_trip() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let property = for_all(
            Gen::vec(Range::linear(0usize, 20), Gen::integral(Range::linear(0i32, 50))),
            |xs: &Vec<i32>| xs.iter().sum::<i32>() < 100,
        );
        let report = property.report(&Config::default().with_seed(seed));
        let Some(failure) = report.failure() else {
            return report.is_success();
        };
        match property.recheck(&failure.token.to_string()) {
            Ok(replay) => replay.failure().is_some_and(|again| {
                again.original == failure.original
                    && again.shrunk == failure.shrunk
                    && again.shrinks == 0
            }),
            Err(_) => false,
        }
    });

    expect_pass("recheck round trip", prop.report(&Config::default().with_tests(30)));
}

/// Property: check turns a failure into an error carrying the same token
pub fn test_check_error_carries_token() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let config = Config::default().with_seed(seed);
        let report = below_fifty().report(&config);
        match (below_fifty().check(&config), report.recheck_token()) {
            (Err(Error::PropertyFailed { recheck, counterexample, .. }), Some(token)) => {
                recheck == token.to_string() && counterexample == "50"
            }
            _ => false,
        }
    });

    expect_pass("check error", prop.report(&Config::default().with_tests(20)));
}

/// Property: discards never count as tests, and generator faults are never shrunk
pub fn test_discards_and_generator_errors() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let config = Config::default().with_seed(seed).with_tests(20);

        let odd_only = for_all(Gen::integral(Range::linear(0i32, 100)), |&x| x >= 0)
            .classify("odd", |x| x % 2 != 0);
        let filtered = Property::new(Gen::integral(Range::linear(0i32, 100)), |&x, _journal| {
            if x % 2 == 0 {
                Outcome::Discard
            } else {
                Outcome::Success
            }
        });
        let filtered = filtered.report(&config);
        let discards_ok = match filtered.status {
            Status::Passed => filtered.tests == 20,
            Status::GaveUp => filtered.discards == config.discard_limit(),
            _ => false,
        };

        let faulty = for_all(
            Gen::integral(Range::linear(0i32, 100)).map(|x| {
                assert!(x < 30, "generator cannot handle {x}");
                x
            }),
            |_| true,
        );
        let faulty = faulty.report(&config);
        let fault_ok = match &faulty.status {
            Status::GeneratorError { message, .. } => message.starts_with("generator cannot handle"),
            Status::Passed => true,
            _ => false,
        };

        discards_ok && fault_ok && odd_only.report(&config).is_success()
    });

    expect_pass("discards and faults", prop.report(&Config::default().with_tests(20)));
}
