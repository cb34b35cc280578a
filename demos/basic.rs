//! Basic usage
//!
//! Defines a few properties, checks them, and prints their reports.

use urchin::*;

fn reverse<T: Clone>(xs: &[T]) -> Vec<T> {
    xs.iter().rev().cloned().collect()
}

/// A deliberately broken run-length encoder: it drops the final run.
fn run_lengths(s: &str) -> Vec<(char, usize)> {
    let mut runs: Vec<(char, usize)> = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        let mut count = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            count += 1;
        }
        if chars.peek().is_some() {
            runs.push((c, count));
        }
    }
    runs
}

fn main() -> Result<()> {
    let config = Config::from_env()?;

    let ints = Gen::vec(Range::linear(0usize, 50), Gen::integral(Range::linear(-1000i32, 1000)));
    let report = for_all_named(ints, "xs", |xs: &Vec<i32>| reverse(&reverse(xs)) == *xs)
        .with_name("reverse_involutive")
        .classify("empty", |xs| xs.is_empty())
        .classify("long", |xs| xs.len() > 30)
        .check(&config)?;
    println!("{report}\n");

    let words = Gen::string(Range::linear(0usize, 20), Gen::char_range('a', 'c'));
    let prop = property(words, |s: &String, journal: &Journal| {
        let runs = run_lengths(s);
        journal.annotate(format!("runs = {runs:?}"));
        let total: usize = runs.iter().map(|(_, n)| n).sum();
        if total == s.chars().count() {
            Ok(())
        } else {
            Err(format!("encoded {total} of {} chars", s.chars().count()))
        }
    })
    .with_name("run_lengths_cover_input");
    println!("{}", prop.report(&config));

    Ok(())
}
