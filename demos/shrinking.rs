//! Shrinking walkthrough
//!
//! Shows how integrated shrinking narrows a failing value down, step by step.
//! Run with `RUST_LOG=urchin_core=trace` to see every accepted shrink.

use tracing_subscriber::EnvFilter;
use urchin_core::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Shrinking Demonstration ===\n");

    println!("1. Halving towards the origin");
    let candidates: Vec<i32> = shrink::towards(0, 73).collect();
    println!("   shrinks of 73: {candidates:?}\n");

    println!("2. A threshold property");
    let gen = Gen::create(|&x: &i32| shrink::towards(0, x), |_size, _seed| 73);
    let report = for_all_named(gen, "x", |&x| x < 50)
        .with_name("below_fifty")
        .report(&Config::default().with_seed(Seed::from_u64(0)));
    println!("{report}\n");

    println!("3. Lists shrink by removing elements first");
    let lists = Gen::vec(Range::linear(0usize, 20), Gen::integral(Range::linear(0i32, 100)));
    let report = for_all_named(lists, "xs", |xs: &Vec<i32>| xs.iter().sum::<i32>() < 150)
        .with_name("small_sum")
        .report(&Config::default().with_seed(Seed::from_u64(7)));
    println!("{report}");
}
