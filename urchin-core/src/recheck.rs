//! Recheck tokens: the text form of a reproducible counterexample.

use crate::data::{Seed, Size};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Everything needed to regenerate one counterexample deterministically.
///
/// The text form is `<size>_<state>_<gamma>_<path>`, where `path` lists the
/// index of the failing child taken at each shrink step, separated by `:`.
/// The path is empty when no shrink step was taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecheckToken {
    pub size: Size,
    pub seed: Seed,
    pub path: Vec<usize>,
}

impl RecheckToken {
    pub fn new(size: Size, seed: Seed) -> Self {
        RecheckToken {
            size,
            seed,
            path: Vec::new(),
        }
    }
}

impl fmt::Display for RecheckToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_", self.size.get(), self.seed)?;
        for (i, index) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

impl FromStr for RecheckToken {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidRecheckToken {
            token: token.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = token.trim().splitn(4, '_');
        let (Some(size), Some(state), Some(gamma), Some(path)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected <size>_<state>_<gamma>_<path>"));
        };

        let size: usize = size.parse().map_err(|_| invalid("size is not a number"))?;
        if size > Size::MAX.get() {
            return Err(invalid("size is above 99"));
        }
        let seed: Seed = format!("{state}_{gamma}")
            .parse()
            .map_err(|_| invalid("seed is not <state>_<gamma> with an odd gamma"))?;
        let path = if path.is_empty() {
            Vec::new()
        } else {
            path.split(':')
                .map(|index| index.parse::<usize>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| invalid("shrink path is not a list of indices"))?
        };

        Ok(RecheckToken {
            size: Size::new(size),
            seed,
            path,
        })
    }
}
