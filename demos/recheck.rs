//! Replaying a counterexample
//!
//! A failing run prints a recheck token. Passing that token back replays the
//! shrunk counterexample directly, without searching or shrinking again.
//! Usage: `cargo run --example recheck [TOKEN]`

use urchin::*;

fn main() -> Result<()> {
    let pairs = Gen::tuple_of(
        Gen::integral(Range::linear(0u32, 1000)),
        Gen::integral(Range::linear(0u32, 1000)),
    );
    let prop = for_all_named(pairs, "(a, b)", |&(a, b)| a.saturating_add(b) < 1200)
        .with_name("sum_stays_small");

    let token = match std::env::args().nth(1) {
        Some(token) => token,
        None => {
            let report = prop.report(&Config::from_env()?);
            println!("{report}\n");
            match report.recheck_token() {
                Some(token) => token.to_string(),
                None => return Ok(()),
            }
        }
    };

    println!("Rechecking {token}");
    let replay = prop.recheck(&token)?;
    println!("{replay}");
    Ok(())
}
