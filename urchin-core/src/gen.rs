//! Generator combinators for property-based testing.

use crate::{data::*, tree::*};
use std::fmt::Debug;
use std::rc::Rc;

mod choice;
mod collection;
mod numeric;

pub use choice::WeightedChoice;

/// How many times [`Gen::filter`] resamples before discarding.
pub const FILTER_RETRIES: usize = 100;

type GenFn<T> = Rc<dyn Fn(Size, Seed) -> Option<Tree<T>>>;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed
/// using combinator functions. Generating with the same size and seed
/// always yields the same tree. A generator may discard, producing no
/// tree at all (see [`Gen::filter`] and [`Gen::discard`]).
pub struct Gen<T> {
    generator: GenFn<T>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Rc::clone(&self.generator),
        }
    }
}

impl<T: 'static> Gen<T> {
    /// Create a new generator from a function producing a shrink tree.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> Tree<T> + 'static,
    {
        Gen::try_new(move |size, seed| Some(f(size, seed)))
    }

    /// Create a generator that may discard by returning `None`.
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> Option<Tree<T>> + 'static,
    {
        Gen {
            generator: Rc::new(f),
        }
    }

    /// Generate a tree using the given size and seed, or `None` on discard.
    pub fn generate(&self, size: Size, seed: Seed) -> Option<Tree<T>> {
        (self.generator)(size, seed)
    }

    /// Pair a random sampler with an explicit shrink function.
    pub fn create<S, I, R>(shrink: S, random: R) -> Self
    where
        T: Clone,
        S: Fn(&T) -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
        R: Fn(Size, Seed) -> T + 'static,
    {
        let shrink = Rc::new(shrink);
        Gen::new(move |size, seed| {
            let shrink = Rc::clone(&shrink);
            Tree::unfold(random(size, seed), move |value| shrink(value))
        })
    }

    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Gen::new(move |_size, _seed| Tree::singleton(value.clone()))
    }

    /// A generator that never produces a value.
    pub fn discard() -> Self {
        Gen::try_new(|_size, _seed| None)
    }

    /// Choose a generator once the size is known.
    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(Size) -> Gen<T> + 'static,
    {
        Gen::try_new(move |size, seed| f(size).generate(size, seed))
    }

    /// Defer building a generator until it is used, for recursive definitions.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Gen<T> + 'static,
    {
        Gen::try_new(move |size, seed| f().generate(size, seed))
    }

    /// Run this generator with a fixed size.
    pub fn resize(self, size: Size) -> Self {
        Gen::try_new(move |_size, seed| self.generate(size, seed))
    }

    /// Run this generator with a size derived from the current one.
    pub fn scale<F>(self, f: F) -> Self
    where
        F: Fn(Size) -> Size + 'static,
    {
        Gen::try_new(move |size, seed| self.generate(f(size), seed))
    }

    /// Run this generator at half the current size.
    pub fn small(self) -> Self {
        self.scale(|size| size.halve())
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        let f = Rc::new(f);
        Gen::try_new(move |size, seed| {
            let f = Rc::clone(&f);
            Some(self.generate(size, seed)?.map(move |value| f(value)))
        })
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The seed is split between this generator and the one `f` returns,
    /// and shrinking tries this generator's shrinks before the inner ones.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> Gen<U> + 'static,
        U: 'static,
    {
        let f = Rc::new(f);
        Gen::try_new(move |size, seed| {
            let (outer_seed, inner_seed) = seed.split();
            let f = Rc::clone(&f);
            self.generate(size, outer_seed)?
                .try_bind(move |value| f(value).generate(size, inner_seed))
        })
    }

    /// Filter generated values by a predicate.
    ///
    /// Each retry uses a fresh split seed and a slightly larger size. After
    /// [`FILTER_RETRIES`] failed attempts the generator discards. Shrinks that
    /// fail the predicate are pruned.
    pub fn filter<F>(self, predicate: F) -> Gen<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        Gen::try_new(move |size, seed| {
            let mut seed = seed;
            for attempt in 0..FILTER_RETRIES {
                let (attempt_seed, next_seed) = seed.split();
                seed = next_seed;
                let attempt_size = Size::new(size.get() + 2 * attempt);
                let Some(tree) = self.generate(attempt_size, attempt_seed) else {
                    continue;
                };
                let predicate = Rc::clone(&predicate);
                if let Some(tree) = tree.filter(move |value| predicate(value)) {
                    return Some(tree);
                }
            }
            None
        })
    }

    /// Generate values without any shrinks.
    pub fn no_shrink(self) -> Self {
        Gen::try_new(move |size, seed| self.generate(size, seed).map(Tree::prune))
    }

    /// Combine two generators with independently split seeds.
    ///
    /// Both arguments shrink independently: first the left, then the right.
    pub fn map2<A, B, F>(first: Gen<A>, second: Gen<B>, f: F) -> Gen<T>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A, B) -> T + 'static,
    {
        let f = Rc::new(f);
        Gen::try_new(move |size, seed| {
            let (first_seed, second_seed) = seed.split();
            let a = first.generate(size, first_seed)?;
            let b = second.generate(size, second_seed)?;
            let f = Rc::clone(&f);
            Some(a.zip(b).map(move |(a, b)| f(a, b)))
        })
    }

    pub fn map3<A, B, C, F>(first: Gen<A>, second: Gen<B>, third: Gen<C>, f: F) -> Gen<T>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        C: Clone + 'static,
        F: Fn(A, B, C) -> T + 'static,
    {
        Gen::map2(Gen::tuple_of(first, second), third, move |(a, b), c| {
            f(a, b, c)
        })
    }

    pub fn map4<A, B, C, D, F>(
        first: Gen<A>,
        second: Gen<B>,
        third: Gen<C>,
        fourth: Gen<D>,
        f: F,
    ) -> Gen<T>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        C: Clone + 'static,
        D: Clone + 'static,
        F: Fn(A, B, C, D) -> T + 'static,
    {
        Gen::map2(
            Gen::tuple_of(first, second),
            Gen::tuple_of(third, fourth),
            move |(a, b), (c, d)| f(a, b, c, d),
        )
    }

    /// Apply generated functions to generated arguments.
    pub fn apply<A, F>(functions: Gen<F>, arguments: Gen<A>) -> Gen<T>
    where
        A: Clone + 'static,
        F: Fn(A) -> T + Clone + 'static,
    {
        Gen::map2(functions, arguments, |f, a| f(a))
    }

    /// Generate `count` values, skipping discards.
    pub fn sample(&self, size: Size, count: usize, seed: Seed) -> Vec<T> {
        let mut seed = seed;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            let (sample_seed, next_seed) = seed.split();
            seed = next_seed;
            if let Some(tree) = self.generate(size, sample_seed) {
                values.push(tree.value);
            }
        }
        values
    }

    /// Generate a single tree, resampling with fresh seeds past discards.
    pub fn sample_tree(&self, size: Size, seed: Seed) -> Option<Tree<T>> {
        let mut seed = seed;
        for _ in 0..FILTER_RETRIES {
            let (sample_seed, next_seed) = seed.split();
            seed = next_seed;
            if let Some(tree) = self.generate(size, sample_seed) {
                return Some(tree);
            }
        }
        None
    }

    /// Render one generated value and its immediate shrinks.
    pub fn render_sample(&self, size: Size, seed: Seed) -> String
    where
        T: Debug,
    {
        match self.sample_tree(size, seed) {
            Some(tree) => tree.render(),
            None => "<discarded>\n".to_string(),
        }
    }
}

impl<A, B> Gen<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    /// Generate pairs from two generators.
    pub fn tuple_of(first: Gen<A>, second: Gen<B>) -> Self {
        Gen::map2(first, second, |a, b| (a, b))
    }
}
