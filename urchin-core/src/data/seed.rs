//! Splittable random seed.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Splittable random seed for deterministic test generation.
///
/// A seed is a SplitMix64 state word plus an odd increment (gamma). It is
/// never mutated: every operation returns the advanced seed, and seeds can
/// be split into two independent streams wherever a generator needs to hand
/// randomness to more than one sub-generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed {
    state: u64,
    gamma: u64,
}

impl Seed {
    /// Create a seed from raw parts. The gamma is forced odd.
    pub fn new(state: u64, gamma: u64) -> Self {
        Seed {
            state,
            gamma: gamma | 1,
        }
    }

    /// Create a new seed from a single value.
    ///
    /// The result is bit-identical on every platform for the same input.
    pub fn from_u64(value: u64) -> Self {
        Seed {
            state: mix64(value),
            gamma: mix_gamma(value.wrapping_add(GOLDEN_GAMMA)),
        }
    }

    /// Generate a seed from system entropy.
    pub fn random() -> Self {
        use rand::Rng;
        Seed::from_u64(rand::thread_rng().gen())
    }

    /// The current state word.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// The odd increment added to the state on every step.
    pub fn gamma(&self) -> u64 {
        self.gamma
    }

    /// Split a seed into two independent seeds.
    pub fn split(self) -> (Self, Self) {
        let first = self.state.wrapping_add(self.gamma);
        let second = first.wrapping_add(self.gamma);
        (
            Seed {
                state: second,
                gamma: self.gamma,
            },
            Seed {
                state: mix64(first),
                gamma: mix_gamma(second),
            },
        )
    }

    /// Generate the next random value and advance the seed.
    pub fn next_u64(self) -> (u64, Self) {
        let state = self.state.wrapping_add(self.gamma);
        (
            mix64(state),
            Seed {
                state,
                gamma: self.gamma,
            },
        )
    }

    /// Generate a value uniformly in `[0, bound]` (inclusive).
    ///
    /// Uses a widening multiply with rejection so no value is favoured.
    pub fn next_bounded(self, bound: u64) -> (u64, Self) {
        if bound == u64::MAX {
            return self.next_u64();
        }
        let range = bound + 1;
        let threshold = range.wrapping_neg() % range;
        let mut seed = self;
        loop {
            let (value, next) = seed.next_u64();
            seed = next;
            let wide = value as u128 * range as u128;
            if (wide as u64) >= threshold {
                return ((wide >> 64) as u64, seed);
            }
        }
    }

    /// Generate a value uniformly in `[lo, hi]`; the bounds may come in either order.
    pub fn next_i128_in(self, lo: i128, hi: i128) -> (i128, Self) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let span = hi.abs_diff(lo);
        match u64::try_from(span) {
            Ok(bound) => {
                let (offset, seed) = self.next_bounded(bound);
                (lo + offset as i128, seed)
            }
            Err(_) => {
                let (high, seed) = self.next_u64();
                let (low, seed) = seed.next_u64();
                let raw = (high as u128) << 64 | low as u128;
                let offset = match span.checked_add(1) {
                    Some(modulus) => raw % modulus,
                    None => raw,
                };
                (lo.wrapping_add(offset as i128), seed)
            }
        }
    }

    /// Generate a random bool.
    pub fn next_bool(self) -> (bool, Self) {
        let (value, seed) = self.next_u64();
        (value >> 63 == 1, seed)
    }

    /// Generate a float in `[0, 1)` from the top 53 bits of the next value.
    pub fn next_f64(self) -> (f64, Self) {
        let (value, seed) = self.next_u64();
        ((value >> 11) as f64 * (1.0 / (1u64 << 53) as f64), seed)
    }

    /// Generate a float in `[lo, hi]`; the bounds may come in either order.
    pub fn next_f64_in(self, lo: f64, hi: f64) -> (f64, Self) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let (unit, seed) = self.next_f64();
        // Interpolating this way cannot overflow for finite bounds.
        let value = lo * (1.0 - unit) + hi * unit;
        (value.clamp(lo, hi), seed)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.state, self.gamma)
    }
}

impl FromStr for Seed {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSeed {
            input: input.to_string(),
        };
        let (state, gamma) = input.split_once('_').ok_or_else(invalid)?;
        let state = state.parse().map_err(|_| invalid())?;
        let gamma: u64 = gamma.parse().map_err(|_| invalid())?;
        if gamma % 2 == 0 {
            return Err(invalid());
        }
        Ok(Seed { state, gamma })
    }
}

/// Stafford's variant 13 finaliser, used for every output.
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Derive an odd gamma with enough bit transitions to avoid weak increments.
fn mix_gamma(mut z: u64) -> u64 {
    z = (z ^ (z >> 33)).wrapping_mul(0xff51_afd7_ed55_8ccd);
    z = (z ^ (z >> 33)).wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    z = (z ^ (z >> 33)) | 1;
    if (z ^ (z >> 1)).count_ones() < 24 {
        z ^ 0xaaaa_aaaa_aaaa_aaaa
    } else {
        z
    }
}
