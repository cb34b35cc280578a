//! Lazy rose tree implementation for shrinking test values.

use crate::shrink;
use std::fmt;
use std::rc::Rc;

pub mod render;

type Children<T> = Rc<dyn Fn() -> Box<dyn Iterator<Item = Tree<T>>>>;

fn lazy<T, F>(children: F) -> Children<T>
where
    F: Fn() -> Box<dyn Iterator<Item = Tree<T>>> + 'static,
{
    Rc::new(children)
}

/// A rose tree containing a value and its shrink possibilities.
///
/// Children are produced on demand: each call to [`Tree::children`] builds a
/// fresh lazy iterator, and no child is constructed until it is pulled. This
/// keeps trees for collections and recursive generators cheap, however large
/// their conceptual shrink space is.
pub struct Tree<T> {
    pub value: T,
    children: Children<T>,
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree {
            value: self.value.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Tree<T> {
    /// Create a tree from a value and a function producing its children.
    pub fn new<F, I>(value: T, children: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = Tree<T>>,
        I::IntoIter: 'static,
    {
        Tree {
            value,
            children: lazy(move || Box::new(children().into_iter())),
        }
    }

    /// Create a new tree with the given value and no children.
    pub fn singleton(value: T) -> Self {
        Tree {
            value,
            children: lazy(|| Box::new(std::iter::empty())),
        }
    }

    /// Build a tree by repeatedly applying a shrink function.
    ///
    /// Only the first level is described up front; deeper levels are
    /// unfolded as they are visited.
    pub fn unfold<F, I>(value: T, shrink: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Tree::unfold_shared(value, Rc::new(shrink))
    }

    fn unfold_shared<F, I>(value: T, shrink: Rc<F>) -> Self
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let root = value.clone();
        Tree {
            value,
            children: lazy(move || {
                let next = Rc::clone(&shrink);
                Box::new(
                    shrink(&root)
                        .into_iter()
                        .map(move |candidate| Tree::unfold_shared(candidate, Rc::clone(&next))),
                )
            }),
        }
    }

    /// A fresh iterator over the immediate shrinks of this tree.
    pub fn children(&self) -> Box<dyn Iterator<Item = Tree<T>>> {
        (self.children)()
    }

    /// Get the value from the tree.
    pub fn outcome(&self) -> &T {
        &self.value
    }

    /// Check if the tree has any children (shrinks).
    pub fn has_shrinks(&self) -> bool {
        self.children().next().is_some()
    }

    /// Map a function over the tree values.
    pub fn map<U, F>(self, f: F) -> Tree<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_shared(Rc::new(f))
    }

    fn map_shared<U: 'static>(self, f: Rc<dyn Fn(T) -> U>) -> Tree<U> {
        let children = self.children;
        let value = f(self.value);
        Tree {
            value,
            children: lazy(move || {
                let f = Rc::clone(&f);
                Box::new(children().map(move |child| child.map_shared(Rc::clone(&f))))
            }),
        }
    }

    /// Substitute each value with the tree `f` produces for it.
    ///
    /// The shrinks of the result are the shrinks of this tree, each bound
    /// through `f`, followed by the shrinks of the tree `f` produced for the
    /// root value.
    pub fn bind<U, F>(self, f: F) -> Tree<U>
    where
        U: 'static,
        F: Fn(T) -> Tree<U> + 'static,
    {
        self.bind_total(Rc::new(f))
    }

    fn bind_total<U: 'static>(self, f: Rc<dyn Fn(T) -> Tree<U>>) -> Tree<U> {
        let outer = self.children;
        let Tree {
            value,
            children: inner,
        } = f(self.value);
        Tree {
            value,
            children: lazy(move || {
                let f = Rc::clone(&f);
                let rebound = outer().map(move |child| child.bind_total(Rc::clone(&f)));
                Box::new(rebound.chain(inner()))
            }),
        }
    }

    /// Like [`Tree::bind`], but `f` may fail to produce a tree.
    ///
    /// Returns `None` when `f` fails on the root; children for which `f`
    /// fails are pruned.
    pub fn try_bind<U, F>(self, f: F) -> Option<Tree<U>>
    where
        U: 'static,
        F: Fn(T) -> Option<Tree<U>> + 'static,
    {
        Tree::bind_shared(self, Rc::new(f))
    }

    fn bind_shared<U: 'static>(self, f: Rc<dyn Fn(T) -> Option<Tree<U>>>) -> Option<Tree<U>> {
        let outer = self.children;
        let Tree {
            value,
            children: inner,
        } = f(self.value)?;
        Some(Tree {
            value,
            children: lazy(move || {
                let f = Rc::clone(&f);
                let rebound = outer().filter_map(move |child| child.bind_shared(Rc::clone(&f)));
                Box::new(rebound.chain(inner()))
            }),
        })
    }

    /// Filter the tree, keeping only values that satisfy the predicate.
    ///
    /// Returns `None` when the root itself fails; failing children are
    /// pruned along with their subtrees.
    pub fn filter<F>(self, predicate: F) -> Option<Tree<T>>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.filter_shared(Rc::new(predicate))
    }

    fn filter_shared(self, predicate: Rc<dyn Fn(&T) -> bool>) -> Option<Tree<T>> {
        if !predicate(&self.value) {
            return None;
        }
        let children = self.children;
        Some(Tree {
            value: self.value,
            children: lazy(move || {
                let predicate = Rc::clone(&predicate);
                Box::new(children().filter_map(move |child| child.filter_shared(Rc::clone(&predicate))))
            }),
        })
    }

    /// Drop every shrink, keeping only the root value.
    pub fn prune(self) -> Self {
        Tree::singleton(self.value)
    }
}

impl<T: Clone + 'static> Tree<T> {
    /// Create a new tree with the given value and eagerly built children.
    pub fn with_children(value: T, children: Vec<Tree<T>>) -> Self {
        Tree::new(value, move || children.clone())
    }

    /// The values of the immediate shrinks, in order.
    pub fn shrinks(&self) -> Vec<T> {
        self.children().map(|child| child.value).collect()
    }

    /// Expand the tree to a given depth, collecting values depth first.
    pub fn expand(&self, max_depth: usize) -> Vec<T> {
        let mut result = vec![self.value.clone()];
        self.expand_recursive(&mut result, max_depth, 0);
        result
    }

    fn expand_recursive(&self, result: &mut Vec<T>, max_depth: usize, current_depth: usize) {
        if current_depth >= max_depth {
            return;
        }

        for child in self.children() {
            result.push(child.value.clone());
            child.expand_recursive(result, max_depth, current_depth + 1);
        }
    }

    /// Pair two trees, shrinking the left component first and then the right.
    pub fn zip<U: Clone + 'static>(self, other: Tree<U>) -> Tree<(T, U)> {
        let value = (self.value.clone(), other.value.clone());
        Tree::new(value, move || {
            let right = other.clone();
            let left = self.clone();
            let lefts = self.children().map(move |child| child.zip(right.clone()));
            let rights = other.children().map(move |child| left.clone().zip(child));
            lefts.chain(rights)
        })
    }

    /// Combine element trees into a tree of lists.
    ///
    /// Shrinks first remove chunks of elements (largest chunks first, never
    /// going below `min_len` elements), then shrink single elements in place,
    /// left to right.
    pub fn interleave(trees: Vec<Tree<T>>, min_len: usize) -> Tree<Vec<T>> {
        let value = trees.iter().map(|tree| tree.value.clone()).collect();
        let trees = Rc::new(trees);
        Tree::new(value, move || {
            let len = trees.len();

            let removing = Rc::clone(&trees);
            let removals = shrink::halves(len as i128)
                .map(|k| k as usize)
                .filter(move |&k| len - k >= min_len)
                .flat_map(move |k| {
                    let trees = Rc::clone(&removing);
                    (0..len)
                        .step_by(k)
                        .take_while(move |&start| start + k <= len)
                        .map(move |start| {
                            let mut kept = Vec::with_capacity(len - k);
                            kept.extend_from_slice(&trees[..start]);
                            kept.extend_from_slice(&trees[start + k..]);
                            Tree::interleave(kept, min_len)
                        })
                });

            let shrinking = Rc::clone(&trees);
            let elements = (0..len).flat_map(move |index| {
                let trees = Rc::clone(&shrinking);
                trees[index].children().map(move |child| {
                    let mut replaced = trees.as_ref().clone();
                    replaced[index] = child;
                    Tree::interleave(replaced, min_len)
                })
            });

            removals.chain(elements)
        })
    }
}

impl<T: 'static> From<T> for Tree<T> {
    fn from(value: T) -> Self {
        Tree::singleton(value)
    }
}
