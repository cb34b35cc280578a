//! Shrink functions: the candidate sequences used to build shrink trees.

use crate::range::Integral;

/// `n`, `n / 2`, `n / 4`, ... down to (but excluding) zero.
pub fn halves(n: i128) -> impl Iterator<Item = i128> {
    std::iter::successors(Some(n), |&h| Some(h / 2)).take_while(|&h| h != 0)
}

/// Shrink `value` towards `destination`.
///
/// The destination itself comes first, followed by values that close in on
/// `value` by halving the remaining distance. Every candidate is strictly
/// closer to the destination than `value`, and no candidate repeats.
/// Arithmetic happens in `i128`, so values at the extremes of any 64-bit
/// type never overflow.
pub fn towards<T: Integral>(destination: T, value: T) -> impl Iterator<Item = T> {
    let x = value.to_i128();
    let diff = x - destination.to_i128();
    halves(diff).map(move |h| T::from_i128(x - h))
}

/// Shrink a float towards `destination`.
///
/// Stops as soon as halving the distance no longer changes the value.
pub fn towards_float(destination: f64, value: f64) -> impl Iterator<Item = f64> {
    let diff = value - destination;
    let valid = destination != value && diff.is_finite();
    std::iter::successors(valid.then_some(diff), |&h| Some(h / 2.0))
        .map(move |h| value - h)
        .take_while(move |&candidate| candidate != value && candidate.is_finite())
}

/// Every way of removing a contiguous chunk of `k` elements from `xs`.
///
/// Chunks start at multiples of `k`; a trailing partial chunk is kept.
pub fn removes<T: Clone>(k: usize, xs: &[T]) -> Vec<Vec<T>> {
    if k == 0 {
        return Vec::new();
    }
    (0..xs.len())
        .step_by(k)
        .take_while(|&start| start + k <= xs.len())
        .map(|start| {
            let mut shrunk = Vec::with_capacity(xs.len() - k);
            shrunk.extend_from_slice(&xs[..start]);
            shrunk.extend_from_slice(&xs[start + k..]);
            shrunk
        })
        .collect()
}

/// Shrink a list by removing chunks of halving size, largest first.
///
/// The empty list is the first candidate of any non-empty list.
pub fn list<T: Clone>(xs: &[T]) -> Vec<Vec<T>> {
    halves(xs.len() as i128)
        .flat_map(|k| removes(k as usize, xs))
        .collect()
}
