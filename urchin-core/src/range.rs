//! Size-dependent ranges that control sampling bounds and the shrink origin.

use crate::data::Size;
use crate::error::{Error, Result};
use std::fmt;
use std::rc::Rc;

/// Integer types that can be sampled through a [`Range`].
///
/// All arithmetic on ranges happens in `i128`, so scaling and shrinking
/// never overflow, even at the extremes of the 64-bit types.
pub trait Integral: Copy + PartialOrd + fmt::Debug + 'static {
    fn to_i128(self) -> i128;

    /// Convert back, saturating at the bounds of `Self`.
    fn from_i128(value: i128) -> Self;
}

macro_rules! impl_integral {
    ($($t:ty),*) => {
        $(
            impl Integral for $t {
                fn to_i128(self) -> i128 {
                    self as i128
                }

                fn from_i128(value: i128) -> Self {
                    value.clamp(<$t>::MIN as i128, <$t>::MAX as i128) as $t
                }
            }
        )*
    };
}

impl_integral!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A range of values whose bounds depend on the current [`Size`].
///
/// The origin is the value shrinking moves towards. For every size,
/// `lower_bound(size) <= origin <= upper_bound(size)`.
pub struct Range<T> {
    origin: T,
    bounds: Rc<dyn Fn(Size) -> (T, T)>,
}

impl<T: Copy> Clone for Range<T> {
    fn clone(&self) -> Self {
        Range {
            origin: self.origin,
            bounds: Rc::clone(&self.bounds),
        }
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range")
            .field("origin", &self.origin)
            .field("bounds_at_0", &(self.bounds)(Size::new(0)))
            .field("bounds_at_99", &(self.bounds)(Size::MAX))
            .finish()
    }
}

impl<T: Copy + 'static> Range<T> {
    /// Create a range from an origin and a bounds function.
    ///
    /// Unlike the `*_from` constructors this does not check the origin: callers
    /// must keep it within the bounds for every size, or shrinking may leave them.
    pub fn new<F>(origin: T, bounds: F) -> Self
    where
        F: Fn(Size) -> (T, T) + 'static,
    {
        Range {
            origin,
            bounds: Rc::new(bounds),
        }
    }

    /// The value shrinking moves towards.
    pub fn origin(&self) -> T {
        self.origin
    }

    /// The `(lower, upper)` bounds for the given size.
    pub fn bounds(&self, size: Size) -> (T, T) {
        (self.bounds)(size)
    }

    pub fn lower_bound(&self, size: Size) -> T {
        self.bounds(size).0
    }

    pub fn upper_bound(&self, size: Size) -> T {
        self.bounds(size).1
    }

    /// Map a monotonically increasing function over the origin and bounds.
    pub fn map<U, F>(self, f: F) -> Range<U>
    where
        U: Copy + 'static,
        F: Fn(T) -> U + 'static,
    {
        let origin = f(self.origin);
        let bounds = self.bounds;
        Range::new(origin, move |size| {
            let (lo, hi) = bounds(size);
            (f(lo), f(hi))
        })
    }
}

impl<T: Integral> Range<T> {
    /// A range containing a single value.
    pub fn singleton(value: T) -> Self {
        Range::new(value, move |_| (value, value))
    }

    /// A range whose bounds ignore the size.
    ///
    /// The origin is zero when the range contains it, otherwise the bound
    /// closest to zero.
    pub fn constant(lo: T, hi: T) -> Self {
        let (lo, hi) = ordered(lo.to_i128(), hi.to_i128());
        Range::from_parts(nearest_zero(lo, hi), lo, hi, Scaling::Constant)
    }

    /// A constant range shrinking towards an explicit origin.
    pub fn constant_from(origin: T, lo: T, hi: T) -> Result<Self> {
        Range::checked(origin, lo, hi, Scaling::Constant)
    }

    /// A range that grows linearly from the origin at size 0 to `[lo, hi]` at size 99.
    pub fn linear(lo: T, hi: T) -> Self {
        let (lo, hi) = ordered(lo.to_i128(), hi.to_i128());
        Range::from_parts(nearest_zero(lo, hi), lo, hi, Scaling::Linear)
    }

    pub fn linear_from(origin: T, lo: T, hi: T) -> Result<Self> {
        Range::checked(origin, lo, hi, Scaling::Linear)
    }

    /// A range that grows exponentially from the origin at size 0 to `[lo, hi]` at size 99.
    ///
    /// Middle sizes stay close to the origin, while the largest sizes reach
    /// the extremes of the range.
    pub fn exponential(lo: T, hi: T) -> Self {
        let (lo, hi) = ordered(lo.to_i128(), hi.to_i128());
        Range::from_parts(nearest_zero(lo, hi), lo, hi, Scaling::Exponential)
    }

    pub fn exponential_from(origin: T, lo: T, hi: T) -> Result<Self> {
        Range::checked(origin, lo, hi, Scaling::Exponential)
    }

    fn checked(origin: T, lo: T, hi: T, scaling: Scaling) -> Result<Self> {
        let (lo, hi) = ordered(lo.to_i128(), hi.to_i128());
        let z = origin.to_i128();
        if z < lo || z > hi {
            return Err(Error::InvalidRange {
                message: format!("origin {z} is outside [{lo}, {hi}]"),
            });
        }
        Ok(Range::from_parts(z, lo, hi, scaling))
    }

    fn from_parts(z: i128, lo: i128, hi: i128, scaling: Scaling) -> Self {
        Range::new(T::from_i128(z), move |size| {
            let scale = |n: i128| match scaling {
                Scaling::Constant => n,
                Scaling::Linear => scale_linear(size, z, n),
                Scaling::Exponential => scale_exponential(size, z, n),
            };
            (
                T::from_i128(scale(lo).clamp(lo, hi)),
                T::from_i128(scale(hi).clamp(lo, hi)),
            )
        })
    }
}

impl Range<f64> {
    /// A fractional range whose bounds ignore the size.
    pub fn constant_frac(lo: f64, hi: f64) -> Self {
        let (lo, hi) = ordered(lo, hi);
        Range::from_frac_parts(nearest_zero_frac(lo, hi), lo, hi, Scaling::Constant)
    }

    pub fn constant_frac_from(origin: f64, lo: f64, hi: f64) -> Result<Self> {
        Range::checked_frac(origin, lo, hi, Scaling::Constant)
    }

    pub fn linear_frac(lo: f64, hi: f64) -> Self {
        let (lo, hi) = ordered(lo, hi);
        Range::from_frac_parts(nearest_zero_frac(lo, hi), lo, hi, Scaling::Linear)
    }

    pub fn linear_frac_from(origin: f64, lo: f64, hi: f64) -> Result<Self> {
        Range::checked_frac(origin, lo, hi, Scaling::Linear)
    }

    pub fn exponential_frac(lo: f64, hi: f64) -> Self {
        let (lo, hi) = ordered(lo, hi);
        Range::from_frac_parts(nearest_zero_frac(lo, hi), lo, hi, Scaling::Exponential)
    }

    pub fn exponential_frac_from(origin: f64, lo: f64, hi: f64) -> Result<Self> {
        Range::checked_frac(origin, lo, hi, Scaling::Exponential)
    }

    fn checked_frac(origin: f64, lo: f64, hi: f64, scaling: Scaling) -> Result<Self> {
        let (lo, hi) = ordered(lo, hi);
        if !(lo <= origin && origin <= hi) {
            return Err(Error::InvalidRange {
                message: format!("origin {origin} is outside [{lo}, {hi}]"),
            });
        }
        Ok(Range::from_frac_parts(origin, lo, hi, scaling))
    }

    fn from_frac_parts(z: f64, lo: f64, hi: f64, scaling: Scaling) -> Self {
        Range::new(z, move |size| {
            let scale = |n: f64| match scaling {
                Scaling::Constant => n,
                Scaling::Linear => scale_linear_frac(size, z, n),
                Scaling::Exponential => scale_exponential_frac(size, z, n),
            };
            (clamp_frac(scale(lo), lo, hi), clamp_frac(scale(hi), lo, hi))
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Scaling {
    Constant,
    Linear,
    Exponential,
}

fn ordered<T: PartialOrd>(lo: T, hi: T) -> (T, T) {
    if hi < lo {
        (hi, lo)
    } else {
        (lo, hi)
    }
}

fn nearest_zero(lo: i128, hi: i128) -> i128 {
    0.clamp(lo, hi)
}

fn nearest_zero_frac(lo: f64, hi: f64) -> f64 {
    clamp_frac(0.0, lo, hi)
}

/// Unlike `f64::clamp` this never panics on NaN bounds.
fn clamp_frac(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

fn size_ratio(size: Size) -> f64 {
    size.get() as f64 / Size::MAX.get() as f64
}

/// Move from `z` towards `n` in proportion to `size / 99`, truncating towards `z`.
fn scale_linear(size: Size, z: i128, n: i128) -> i128 {
    let size = size.get() as i128;
    z + (n - z) * size / Size::MAX.get() as i128
}

/// Move from `z` towards `n` by `(|n - z| + 1) ^ (size / 99) - 1`.
fn scale_exponential(size: Size, z: i128, n: i128) -> i128 {
    if size >= Size::MAX {
        return n;
    }
    let distance = (n - z).unsigned_abs() as f64;
    let diff = ((distance + 1.0).powf(size_ratio(size)) - 1.0).round() as i128;
    if n < z {
        z - diff
    } else {
        z + diff
    }
}

fn scale_linear_frac(size: Size, z: f64, n: f64) -> f64 {
    z + (n - z) * size_ratio(size)
}

fn scale_exponential_frac(size: Size, z: f64, n: f64) -> f64 {
    if size >= Size::MAX {
        return n;
    }
    let diff = ((n - z).abs() + 1.0).powf(size_ratio(size)) - 1.0;
    if n < z {
        z - diff
    } else {
        z + diff
    }
}
