//! Shrink tree rendering
//!
//! Prints a few generated values together with the shrinks the runner would try.

use urchin_core::*;

fn main() {
    let seed = Seed::from_u64(2024);

    println!("Integer in [0, 20]:");
    let ints = Gen::integral(Range::constant(0, 20));
    if let Some(tree) = ints.generate(Size::new(10), seed) {
        println!("{}", tree.render_depth(2));
        println!("compact: {}\n", tree.render_compact(2));
    }

    println!("Pair of booleans:");
    print!("{}", Gen::tuple_of(Gen::bool(), Gen::bool()).render_sample(Size::MAX, seed));

    println!("\nShort lowercase string:");
    let strings = Gen::string(Range::linear(1usize, 4), Gen::ascii_lower());
    print!("{}", strings.render_sample(Size::new(50), seed));

    println!("\nSamples of an optional digit:");
    for value in Gen::option_of(Gen::ascii_digit()).sample(Size::new(30), 8, seed) {
        println!("  {value:?}");
    }
}
