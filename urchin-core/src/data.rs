//! Core data types for urchin property-based testing.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod seed;

pub use seed::Seed;

/// Size parameter for controlling test data generation.
///
/// Size ranges from 0 to 99, where larger values generate larger
/// magnitudes and longer collections. Values above 99 are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size(usize);

impl Size {
    /// The largest size a generator ever sees.
    pub const MAX: Size = Size(99);

    /// Create a new size value, clamped to [`Size::MAX`].
    pub fn new(value: usize) -> Self {
        Size(value.min(Self::MAX.0))
    }

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Scale size by a factor.
    pub fn scale(&self, factor: f64) -> Self {
        Size::new((self.0 as f64 * factor.max(0.0)) as usize)
    }

    /// Half the size, used when descending into recursive structures.
    pub fn halve(&self) -> Self {
        Size(self.0 / 2)
    }
}

impl From<usize> for Size {
    fn from(value: usize) -> Self {
        Size::new(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// Shared flag used to stop a running property between trials or shrink steps.
///
/// The predicate evaluation in flight always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that has not been cancelled.
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Request cancellation. Every clone of this token observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether any clone of this token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Configuration for property testing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of passing tests required.
    pub test_limit: usize,

    /// Maximum number of shrinks to perform.
    pub shrink_limit: usize,

    /// Sizes ramp from the start size up to this limit (capped at 99).
    pub size_limit: usize,

    /// Discards allowed per requested test before giving up.
    pub max_discard_ratio: usize,

    /// Starting seed. A fresh random seed is used when absent.
    pub seed: Option<Seed>,

    /// Size of the first trial.
    pub start_size: Option<Size>,

    /// Checked between trials and between shrink steps.
    pub cancel: Option<CancelToken>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 1000,
            size_limit: 100,
            max_discard_ratio: 10,
            seed: None,
            start_size: None,
            cancel: None,
        }
    }
}

impl Config {
    pub const TESTS_VAR: &'static str = "URCHIN_TESTS";
    pub const SHRINKS_VAR: &'static str = "URCHIN_SHRINKS";
    pub const SIZE_VAR: &'static str = "URCHIN_SIZE";
    pub const DISCARD_RATIO_VAR: &'static str = "URCHIN_DISCARD_RATIO";
    pub const SEED_VAR: &'static str = "URCHIN_SEED";

    /// Create a new config with the given number of tests.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Create a new config with the given shrink limit.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Create a new config with the given size limit.
    pub fn with_size_limit(mut self, size: usize) -> Self {
        self.size_limit = size;
        self
    }

    /// Allow this many discards per requested test before giving up.
    pub fn with_discard_ratio(mut self, ratio: usize) -> Self {
        self.max_discard_ratio = ratio;
        self
    }

    /// Pin the starting seed, making the whole run reproducible.
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start the size ramp at the given size instead of 0.
    pub fn with_start_size(mut self, size: Size) -> Self {
        self.start_size = Some(size);
        self
    }

    /// Attach a token that can stop the run between trials and shrink steps.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Build a config from the defaults overridden by `URCHIN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from the defaults overridden by whatever `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(tests) = parse_var(&lookup, Self::TESTS_VAR)? {
            config.test_limit = tests;
        }
        if let Some(shrinks) = parse_var(&lookup, Self::SHRINKS_VAR)? {
            config.shrink_limit = shrinks;
        }
        if let Some(size) = parse_var::<usize, _>(&lookup, Self::SIZE_VAR)? {
            config.start_size = Some(Size::new(size));
        }
        if let Some(ratio) = parse_var(&lookup, Self::DISCARD_RATIO_VAR)? {
            config.max_discard_ratio = ratio;
        }
        if let Some(seed) = parse_var::<u64, _>(&lookup, Self::SEED_VAR)? {
            config.seed = Some(Seed::from_u64(seed));
        }
        Ok(config)
    }

    /// The size used for the given (zero based) test.
    pub fn size_for(&self, test_num: usize) -> Size {
        let start = self.start_size.map_or(0, |size| size.get());
        if self.test_limit == 0 {
            return Size::new(start);
        }
        let span = self.size_limit.saturating_sub(start);
        let step = test_num % self.test_limit;
        Size::new(start + step.saturating_mul(span) / self.test_limit)
    }

    /// Number of discards after which the run gives up.
    pub fn discard_limit(&self) -> usize {
        self.test_limit.saturating_mul(self.max_discard_ratio).max(1)
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|err: T::Err| Error::InvalidConfig {
                message: format!("{name}={raw:?}: {err}"),
            }),
    }
}
