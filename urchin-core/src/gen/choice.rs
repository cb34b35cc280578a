//! Choosing between values and generators.

use super::Gen;
use crate::error::{Error, Result};
use crate::range::Range;
use std::rc::Rc;

/// A generator paired with its relative weight, for [`Gen::frequency`].
pub struct WeightedChoice<T> {
    pub weight: u64,
    pub gen: Gen<T>,
}

impl<T> WeightedChoice<T> {
    pub fn new(weight: u64, gen: Gen<T>) -> Self {
        WeightedChoice { weight, gen }
    }
}

impl<T> Clone for WeightedChoice<T> {
    fn clone(&self) -> Self {
        WeightedChoice {
            weight: self.weight,
            gen: self.gen.clone(),
        }
    }
}

impl<T: 'static> Gen<T> {
    /// Pick one of the given values, shrinking towards the first.
    pub fn element(values: Vec<T>) -> Result<Self>
    where
        T: Clone,
    {
        if values.is_empty() {
            return Err(Error::InvalidGenerator {
                message: "element requires at least one value".to_string(),
            });
        }
        let last = values.len() - 1;
        let values = Rc::new(values);
        Ok(Gen::integral(Range::constant(0, last)).map(move |index| values[index].clone()))
    }

    /// Pick one of the given generators uniformly, shrinking towards the first.
    pub fn choice(gens: Vec<Gen<T>>) -> Result<Self> {
        if gens.is_empty() {
            return Err(Error::InvalidGenerator {
                message: "choice requires at least one generator".to_string(),
            });
        }
        Ok(Gen::choice_unchecked(gens))
    }

    fn choice_unchecked(gens: Vec<Gen<T>>) -> Self {
        let last = gens.len() - 1;
        let gens = Rc::new(gens);
        Gen::integral(Range::constant(0, last)).bind(move |index| gens[index].clone())
    }

    /// Pick a generator with probability proportional to its weight.
    ///
    /// Shrinks towards the first choice in the list, whatever its weight.
    pub fn frequency(choices: Vec<WeightedChoice<T>>) -> Result<Self> {
        let total = choices
            .iter()
            .try_fold(0u64, |total, choice| total.checked_add(choice.weight))
            .ok_or_else(|| Error::InvalidGenerator {
                message: "frequency weights overflow u64".to_string(),
            })?;
        if total == 0 {
            return Err(Error::InvalidGenerator {
                message: "frequency requires a choice with a positive weight".to_string(),
            });
        }
        Ok(Gen::frequency_unchecked(choices, total))
    }

    fn frequency_unchecked(choices: Vec<WeightedChoice<T>>, total: u64) -> Self {
        let choices = Rc::new(choices);
        Gen::integral(Range::constant(1, total)).bind(move |mut n| {
            for choice in choices.iter() {
                if n <= choice.weight {
                    return choice.gen.clone();
                }
                n -= choice.weight;
            }
            Gen::discard()
        })
    }

    /// Choose between non-recursive and recursive generators.
    ///
    /// Recursive generators run at half the current size, and once the size
    /// reaches 1 only the non-recursive generators are used, so recursive
    /// structures always terminate.
    pub fn choice_rec<F>(non_recursive: Vec<Gen<T>>, recursive: F) -> Result<Self>
    where
        F: Fn() -> Vec<Gen<T>> + 'static,
    {
        if non_recursive.is_empty() {
            return Err(Error::InvalidGenerator {
                message: "choice_rec requires at least one non-recursive generator".to_string(),
            });
        }
        Ok(Gen::sized(move |size| {
            if size.get() <= 1 {
                Gen::choice_unchecked(non_recursive.clone())
            } else {
                let mut gens = non_recursive.clone();
                gens.extend(recursive().into_iter().map(Gen::small));
                Gen::choice_unchecked(gens)
            }
        }))
    }
}

impl<T: Clone + 'static> Gen<Option<T>> {
    /// Generate `None` or `Some`, favouring `Some` as the size grows.
    ///
    /// Shrinks towards `None`.
    pub fn option_of(gen: Gen<T>) -> Self {
        Gen::sized(move |size| {
            let some = WeightedChoice::new(1 + size.get() as u64, gen.clone().map(Some));
            let none = WeightedChoice::new(2, Gen::constant(None));
            Gen::frequency_unchecked(vec![none, some], 3 + size.get() as u64)
        })
    }
}
