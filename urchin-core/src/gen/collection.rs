//! Characters, strings and collections.

use super::Gen;
use crate::data::{Seed, Size};
use crate::range::Range;
use crate::tree::Tree;

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_COUNT: u32 = 0x800;

/// Map a char to a dense index with the surrogate gap removed.
fn char_index(c: char) -> u32 {
    let code = c as u32;
    if code >= SURROGATE_START {
        code - SURROGATE_COUNT
    } else {
        code
    }
}

fn index_char(index: u32) -> Option<char> {
    if index >= SURROGATE_START {
        char::from_u32(index + SURROGATE_COUNT)
    } else {
        char::from_u32(index)
    }
}

impl Gen<char> {
    /// Generate a char in `[lo, hi]`, shrinking towards `lo`.
    ///
    /// Surrogate code points are never produced.
    pub fn char_range(lo: char, hi: char) -> Self {
        let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
        let range = Range::constant_from(char_index(lo), char_index(lo), char_index(hi))
            .unwrap_or_else(|_| Range::singleton(char_index(lo)));
        Gen::integral(range).map(move |index| index_char(index).unwrap_or(lo))
    }

    fn from_alphabet(alphabet: &'static str) -> Self {
        let chars: Vec<char> = alphabet.chars().collect();
        let last = chars.len().saturating_sub(1);
        Gen::integral(Range::constant(0, last)).map(move |index| chars[index])
    }

    pub fn ascii_lower() -> Self {
        Gen::char_range('a', 'z')
    }

    pub fn ascii_digit() -> Self {
        Gen::char_range('0', '9')
    }

    pub fn ascii_alpha() -> Self {
        Gen::from_alphabet("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ")
    }

    pub fn ascii_alphanumeric() -> Self {
        Gen::from_alphabet("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789")
    }

    /// Printable ASCII, from space to tilde.
    pub fn ascii_printable() -> Self {
        Gen::char_range(' ', '~')
    }

    /// Any Unicode scalar value, shrinking towards `'\0'`.
    pub fn unicode() -> Self {
        Gen::char_range('\0', char::MAX)
    }
}

impl<T: Clone + 'static> Gen<Vec<T>> {
    /// Generate a vector whose length is drawn from `range`.
    ///
    /// Shrinks by removing chunks of elements before shrinking the elements
    /// themselves, and never below the range's lower bound for the size.
    /// The whole vector is discarded if any element generator discards.
    pub fn vec(range: Range<usize>, item: Gen<T>) -> Self {
        Gen::try_new(move |size: Size, seed: Seed| {
            let (lo, hi) = range.bounds(size);
            let (length_seed, mut item_seed) = seed.split();
            let (length, _) = length_seed.next_i128_in(lo as i128, hi as i128);

            let mut trees: Vec<Tree<T>> = Vec::with_capacity(length as usize);
            for _ in 0..length {
                let (current, next) = item_seed.split();
                item_seed = next;
                trees.push(item.generate(size, current)?);
            }
            Some(Tree::interleave(trees, lo))
        })
    }
}

impl Gen<String> {
    /// Generate a string whose length in chars is drawn from `range`.
    pub fn string(range: Range<usize>, chars: Gen<char>) -> Self {
        Gen::vec(range, chars).map(|chars| chars.into_iter().collect())
    }
}
