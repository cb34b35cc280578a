//! Choice, frequency and recursive generator properties

use crate::{arbitrary_seed, arbitrary_size, expect_pass};
use urchin::*;

#[derive(Debug, Clone, PartialEq)]
enum BinTree {
    Leaf(u8),
    Node(Box<BinTree>, Box<BinTree>),
}

impl BinTree {
    fn depth(&self) -> usize {
        match self {
            BinTree::Leaf(_) => 0,
            BinTree::Node(l, r) => 1 + l.depth().max(r.depth()),
        }
    }
}

fn binary_tree() -> Gen<BinTree> {
    Gen::choice_rec(
        vec![Gen::integral(Range::constant(0u8, 9)).map(BinTree::Leaf)],
        || {
            vec![Gen::map2(Gen::lazy(binary_tree), Gen::lazy(binary_tree), |l, r| {
                BinTree::Node(Box::new(l), Box::new(r))
            })]
        },
    )
    .expect("non-recursive choices are present")
}

/// Property: option_of yields both variants and always shrinks Some to None first
pub fn test_option_generation_distribution() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let gen = Gen::option_of(Gen::integral(Range::linear(0i32, 100)));
        let values = gen.sample(Size::new(20), 300, seed);
        let nones = values.iter().filter(|v| v.is_none()).count();
        // P(None) is 2 / 23 at size 20.
        let plausible = nones > 0 && nones < 80;
        let shrinks_to_none = (0..20u64).all(|i| {
            let (sample_seed, _) = Seed::from_u64(i).split();
            match gen.generate(Size::new(20), sample_seed) {
                Some(tree) if tree.value.is_some() => tree.shrinks().first() == Some(&None),
                Some(_) => true,
                None => false,
            }
        });
        plausible && shrinks_to_none
    });

    expect_pass("option distribution", prop.report(&Config::default().with_tests(20)));
}

/// Property: frequency picks in proportion to weight and shrinks to the first choice
pub fn test_frequency_weights() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let gen = Gen::frequency(vec![
            WeightedChoice::new(3, Gen::constant('a')),
            WeightedChoice::new(1, Gen::constant('b')),
        ])
        .expect("positive weights");
        let values = gen.sample(Size::MAX, 400, seed);
        let a = values.iter().filter(|&&c| c == 'a').count();
        // Expect about 300; the window is more than six standard deviations wide.
        (240..=360).contains(&a)
    });

    expect_pass("frequency weights", prop.report(&Config::default().with_tests(20)));
}

/// Property: recursive generators terminate and shrink towards leaves
pub fn test_recursive_generation_terminates() {
    let prop = for_all_named(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        "(size, seed)",
        |&(size, seed)| {
            binary_tree().generate(size, seed).is_some_and(|tree| {
                let bounded = tree.value.depth() <= 7;
                let leaf_first = match tree.value {
                    BinTree::Leaf(_) => true,
                    BinTree::Node(..) => matches!(tree.shrinks().first(), Some(BinTree::Leaf(_))),
                };
                bounded && leaf_first
            })
        },
    );

    expect_pass("recursive termination", prop.report(&Config::default()));
}
