//! String and character generator properties

use crate::{arbitrary_seed, arbitrary_size, expect_pass};
use urchin::*;

/// Property: character generators stay within their classes
pub fn test_character_generator_ranges() {
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        "(size, seed)",
        |&(size, seed)| {
            let in_class = |gen: Gen<char>, class: fn(&char) -> bool| {
                gen.generate(size, seed)
                    .is_some_and(|tree| tree.expand(2).iter().all(class))
            };
            in_class(Gen::ascii_lower(), char::is_ascii_lowercase)
                && in_class(Gen::ascii_digit(), char::is_ascii_digit)
                && in_class(Gen::ascii_alpha(), char::is_ascii_alphabetic)
                && in_class(Gen::ascii_alphanumeric(), char::is_ascii_alphanumeric)
                && in_class(Gen::ascii_printable(), |c| (' '..='~').contains(c))
                && in_class(Gen::char_range('α', 'ω'), |c| ('α'..='ω').contains(c))
        },
    );

    expect_pass("character classes", prop.report(&Config::default()));
}

/// Property: string lengths (in chars) follow the length range
pub fn test_string_length_in_range() {
    let lengths = Range::linear(2usize, 40);
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        "(size, seed)",
        move |&(size, seed)| {
            let (lo, hi) = lengths.bounds(size);
            Gen::string(lengths.clone(), Gen::unicode())
                .generate(size, seed)
                .is_some_and(|tree| {
                    let len = tree.value.chars().count();
                    lo <= len && len <= hi && tree.shrinks().iter().all(|s| s.chars().count() >= lo)
                })
        },
    );

    expect_pass("string length", prop.report(&Config::default()));
}
