//! Lazy rose trees pairing a generated value with its shrink candidates.

use std::fmt;
use std::iter;
use std::rc::Rc;

pub mod render;

/// A lazily computed sequence of shrink candidates.
pub type Candidates<T> = Box<dyn Iterator<Item = Shrinkable<T>>>;

type Expand<T> = Rc<dyn Fn() -> Candidates<T>>;
type Step<T> = Rc<dyn Fn(&T) -> Vec<T>>;
type Combiner<C, R> = Rc<dyn Fn(&[C]) -> R>;
type KeyFn<T, K> = Rc<dyn Fn(&T) -> K>;

/// A value together with the candidates that are "one step simpler".
///
/// Candidates are only computed when [`shrink`](Shrinkable::shrink) is
/// called, and only as far as the caller pulls the returned iterator, so
/// trees may be arbitrarily deep. Every call starts the sequence from
/// scratch.
///
/// Each candidate must be no more complex than its parent. Nothing checks
/// this at runtime; a generator that breaks it can make shrinking loop.
pub struct Shrinkable<T> {
    pub value: T,
    expand: Expand<T>,
}

impl<T: Clone> Clone for Shrinkable<T> {
    fn clone(&self) -> Self {
        Shrinkable {
            value: self.value.clone(),
            expand: Rc::clone(&self.expand),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shrinkable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shrinkable")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Shrinkable<T> {
    /// Create a shrinkable from a value and a function producing its candidates.
    pub fn new<F>(value: T, candidates: F) -> Self
    where
        F: Fn() -> Candidates<T> + 'static,
    {
        Shrinkable {
            value,
            expand: Rc::new(candidates),
        }
    }

    /// Create a shrinkable that is already as simple as it gets.
    pub fn singleton(value: T) -> Self {
        Shrinkable::new(value, || Box::new(iter::empty()))
    }

    /// The candidates one step simpler than this value, in preference order.
    pub fn shrink(&self) -> Candidates<T> {
        (self.expand)()
    }

    /// Check whether at least one candidate exists.
    pub fn has_shrinks(&self) -> bool {
        self.shrink().next().is_some()
    }

    /// Get the value.
    pub fn outcome(&self) -> &T {
        &self.value
    }

    /// Map a function over the value and every candidate below it.
    ///
    /// The candidate count and order are those of `self`.
    pub fn map<U, F>(self, f: F) -> Shrinkable<U>
    where
        F: Fn(T) -> U + Clone + 'static,
        U: 'static,
    {
        let expand = self.expand;
        let value = f(self.value);
        Shrinkable::new(value, move || {
            let f = f.clone();
            Box::new(expand().map(move |candidate| candidate.map(f.clone())))
        })
    }
}

impl<T: Clone + 'static> Shrinkable<T> {
    /// Lift a one-step shrink function into a full tree.
    ///
    /// `step` is applied again to each value it returns, so callers only
    /// describe a single step and get multi-step chains for free.
    pub fn unfold<F>(value: T, step: F) -> Self
    where
        F: Fn(&T) -> Vec<T> + 'static,
    {
        unfold_shared(value, Rc::new(step))
    }

    /// Values of the immediate candidates, in order.
    pub fn candidates(&self) -> Vec<T> {
        self.shrink().map(|candidate| candidate.value).collect()
    }
}

fn unfold_shared<T: Clone + 'static>(value: T, step: Step<T>) -> Shrinkable<T> {
    let origin = value.clone();
    Shrinkable::new(value, move || {
        let next = step(&origin);
        let step = Rc::clone(&step);
        Box::new(
            next.into_iter()
                .map(move |value| unfold_shared(value, Rc::clone(&step))),
        )
    })
}

/// Build a combination node from component shrinkables and a combiner.
///
/// Each candidate replaces exactly one component with one of its own
/// candidates and keeps every other component as it was. Components are
/// visited in position order.
pub fn combination<C, R, F>(parts: Vec<Shrinkable<C>>, combiner: F) -> Shrinkable<R>
where
    C: Clone + 'static,
    R: 'static,
    F: Fn(&[C]) -> R + 'static,
{
    combination_shared(Rc::from(parts), Rc::new(combiner))
}

fn combination_shared<C, R>(parts: Rc<[Shrinkable<C>]>, combiner: Combiner<C, R>) -> Shrinkable<R>
where
    C: Clone + 'static,
    R: 'static,
{
    let values: Vec<C> = parts.iter().map(|part| part.value.clone()).collect();
    let value = combiner(values.as_slice());
    Shrinkable::new(value, move || {
        let combiner = Rc::clone(&combiner);
        Box::new(
            replacements(Rc::clone(&parts))
                .map(move |parts| combination_shared(parts, Rc::clone(&combiner))),
        )
    })
}

/// Build the tree for a collection of element shrinkables.
///
/// Structural candidates come first: each element removed in turn, as long
/// as more than `min_len` elements remain. Element-wise candidates follow.
pub fn sequence<T>(items: Vec<Shrinkable<T>>, min_len: usize) -> Shrinkable<Vec<T>>
where
    T: Clone + 'static,
{
    sequence_shared(Rc::from(items), min_len)
}

fn sequence_shared<T>(items: Rc<[Shrinkable<T>]>, min_len: usize) -> Shrinkable<Vec<T>>
where
    T: Clone + 'static,
{
    let value: Vec<T> = items.iter().map(|item| item.value.clone()).collect();
    Shrinkable::new(value, move || {
        let removable = if items.len() > min_len { items.len() } else { 0 };
        let source = Rc::clone(&items);
        let removals = (0..removable).map(move |index| {
            let mut next = source.to_vec();
            next.remove(index);
            Rc::from(next)
        });
        Box::new(
            removals
                .chain(replacements(Rc::clone(&items)))
                .map(move |items| sequence_shared(items, min_len)),
        )
    })
}

/// Build the tree for a collection whose items must keep distinct keys.
///
/// Like [`sequence`] with no minimum length, except that an element-wise
/// candidate is skipped when its key matches another item's key. Every
/// node below therefore holds the same number of distinct keys as its
/// item count.
pub fn sequence_by<T, K, F>(items: Vec<Shrinkable<T>>, key: F) -> Shrinkable<Vec<T>>
where
    T: Clone + 'static,
    K: PartialEq + 'static,
    F: Fn(&T) -> K + 'static,
{
    sequence_by_shared(Rc::from(items), Rc::new(key))
}

fn sequence_by_shared<T, K>(items: Rc<[Shrinkable<T>]>, key: KeyFn<T, K>) -> Shrinkable<Vec<T>>
where
    T: Clone + 'static,
    K: PartialEq + 'static,
{
    let value: Vec<T> = items.iter().map(|item| item.value.clone()).collect();
    Shrinkable::new(value, move || {
        let source = Rc::clone(&items);
        let removals = (0..items.len()).map(move |index| {
            let mut next = source.to_vec();
            next.remove(index);
            Rc::from(next)
        });
        let parts = Rc::clone(&items);
        let filter_key = Rc::clone(&key);
        let swaps = (0..items.len()).flat_map(move |index| {
            let candidates = parts[index].shrink();
            let parts = Rc::clone(&parts);
            let key = Rc::clone(&filter_key);
            candidates.filter_map(move |candidate| {
                let taken = key(&candidate.value);
                let clash = parts
                    .iter()
                    .enumerate()
                    .any(|(other, item)| other != index && key(&item.value) == taken);
                if clash {
                    return None;
                }
                let mut next = parts.to_vec();
                next[index] = candidate;
                Some(Rc::from(next))
            })
        });
        let key = Rc::clone(&key);
        Box::new(
            removals
                .chain(swaps)
                .map(move |items| sequence_by_shared(items, Rc::clone(&key))),
        )
    })
}

/// Every way of swapping one part for one of its candidates.
fn replacements<C>(parts: Rc<[Shrinkable<C>]>) -> Box<dyn Iterator<Item = Rc<[Shrinkable<C>]>>>
where
    C: Clone + 'static,
{
    Box::new((0..parts.len()).flat_map(move |index| {
        let candidates = parts[index].shrink();
        let parts = Rc::clone(&parts);
        candidates.map(move |candidate| {
            let mut next = parts.to_vec();
            next[index] = candidate;
            Rc::from(next)
        })
    }))
}

impl<T: 'static> From<T> for Shrinkable<T> {
    fn from(value: T) -> Self {
        Shrinkable::singleton(value)
    }
}
