//! Numeric and boolean primitives.

use super::Gen;
use crate::data::{Seed, Size};
use crate::range::{Integral, Range};
use crate::shrink;
use crate::tree::Tree;

impl Gen<bool> {
    /// Generate a boolean that shrinks to `false`.
    pub fn bool() -> Self {
        Gen::new(|_size, seed: Seed| {
            let (value, _) = seed.next_bool();
            Tree::unfold(value, |&b| if b { vec![false] } else { Vec::new() })
        })
    }
}

impl<T: Integral> Gen<T> {
    /// Generate an integer within `range`, shrinking towards its origin.
    pub fn integral(range: Range<T>) -> Self {
        Gen::new(move |size: Size, seed: Seed| {
            let (lo, hi) = range.bounds(size);
            let (value, _) = seed.next_i128_in(lo.to_i128(), hi.to_i128());
            let origin = range.origin();
            Tree::unfold(T::from_i128(value), move |&x| shrink::towards(origin, x))
        })
    }
}

impl Gen<f64> {
    /// Generate a float within `range`, shrinking towards its origin.
    pub fn double(range: Range<f64>) -> Self {
        Gen::new(move |size: Size, seed: Seed| {
            let (lo, hi) = range.bounds(size);
            let (value, _) = seed.next_f64_in(lo, hi);
            let origin = range.origin();
            Tree::unfold(value, move |&x| shrink::towards_float(origin, x))
        })
    }
}
