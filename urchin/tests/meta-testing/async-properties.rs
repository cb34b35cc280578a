//! Async property properties
//!
//! An async body must give exactly the same report as the equivalent sync body,
//! since generation and seed splitting are shared.

use crate::{arbitrary_seed, expect_pass};
use futures::executor::block_on;
use urchin::*;

fn ints() -> Gen<i32> {
    Gen::integral(Range::linear(-1000, 1000))
}

/// Property: async and sync runs agree for the same seed
pub fn test_async_matches_sync() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let config = Config::default().with_seed(seed);
        let sync = for_all(ints(), |&x| x.abs() < 700).report(&config);
        let async_prop = AsyncProperty::for_all(ints(), |x| async move {
            futures::future::ready(()).await;
            x.abs() < 700
        });
        let asynchronous = block_on(async_prop.report(&config));
        sync == asynchronous
    });

    expect_pass("async parity", prop.report(&Config::default().with_tests(25)));
}

/// Property: async rechecks replay the shrunk counterexample
pub fn test_async_recheck_round_trip() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let async_prop = AsyncProperty::new(ints(), |x, journal: Journal| async move {
            journal.annotate(format!("x = {x}"));
            x < 300
        });
        let report = block_on(async_prop.report(&Config::default().with_seed(seed)));
        let Some(failure) = report.failure() else {
            return false;
        };
        block_on(async_prop.recheck(&failure.token.to_string())).is_ok_and(|replay| {
            replay.failure().is_some_and(|again| {
                again.shrunk == 300 && again.journal == failure.journal && again.shrinks == 0
            })
        })
    });

    expect_pass("async recheck", prop.report(&Config::default().with_tests(20)));
}
