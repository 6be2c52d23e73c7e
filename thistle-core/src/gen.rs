//! Generator combinators for property-based testing.

use std::sync::Arc;

use crate::{data::*, shrinkable::*};

mod choice;
mod collections;
mod combine;
mod primitives;

pub use combine::{combine, combine_all, Components, Dynamic};
pub use primitives::Range;

type Generate<T> = Arc<dyn Fn(&mut Random, Size) -> Shrinkable<T> + Send + Sync>;
type Binder<T, U> = Arc<dyn Fn(T) -> Gen<U> + Send + Sync>;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed
/// using combinator functions. Cloning is cheap and shares the underlying
/// function, and generators are `Send + Sync` so they can live in the
/// process-wide default registry.
///
/// Running a generator twice with the same [`Random`] state and [`Size`]
/// yields the same tree.
pub struct Gen<T> {
    generator: Generate<T>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<T> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Random, Size) -> Shrinkable<T> + Send + Sync + 'static,
    {
        Gen {
            generator: Arc::new(f),
        }
    }

    /// Generate a value using the given randomness and size.
    pub fn generate(&self, rng: &mut Random, size: Size) -> Shrinkable<T> {
        (self.generator)(rng, size)
    }

    /// Check whether two handles share the same generator function.
    pub fn ptr_eq(&self, other: &Gen<T>) -> bool {
        Arc::ptr_eq(&self.generator, &other.generator)
    }
}

/// Draw one sample from `gen`.
pub fn sample<T>(gen: &Gen<T>, rng: &mut Random, size: Size) -> Shrinkable<T> {
    gen.generate(rng, size)
}

impl<T> Gen<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a generator that always produces the same value.
    ///
    /// The value has no shrink candidates.
    pub fn constant(value: T) -> Self {
        Gen::new(move |_rng, _size| Shrinkable::singleton(value.clone()))
    }

    /// Alias for [`Gen::constant`].
    pub fn always(value: T) -> Self {
        Gen::constant(value)
    }
}

impl<T> Gen<T>
where
    T: Clone + 'static,
{
    /// Define a primitive generator from a sampling function and a
    /// one-step shrink function over plain values.
    ///
    /// Every value `shrink` returns is shrunk again with `shrink`, so a
    /// function that only moves one step toward the simplest value is
    /// enough to give full shrink chains.
    pub fn simple<G, S>(generate: G, shrink: S) -> Self
    where
        G: Fn(&mut Random, Size) -> T + Send + Sync + 'static,
        S: Fn(&T) -> Vec<T> + Send + Sync + 'static,
    {
        let shrink = Arc::new(shrink);
        Gen::new(move |rng, size| {
            let shrink = Arc::clone(&shrink);
            Shrinkable::unfold(generate(rng, size), move |value| shrink(value))
        })
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        U: 'static,
    {
        let f = Arc::new(f);
        Gen::new(move |rng, size| {
            let f = Arc::clone(&f);
            self.generate(rng, size).map(move |value| f(value))
        })
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The outer value is drawn first and picks the inner generator. The
    /// randomness state right after the outer draw is remembered, and each
    /// outer shrink candidate gets its inner value re-drawn from a copy of
    /// that state, so an inner generator of the same shape lands on the same
    /// draws. Outer candidates are offered before inner ones.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> Gen<U> + Send + Sync + 'static,
        U: Clone + 'static,
    {
        let f: Binder<T, U> = Arc::new(f);
        Gen::new(move |rng, size| {
            let outer = self.generate(rng, size);
            let snapshot = rng.clone();
            let inner = f(outer.value.clone()).generate(rng, size);
            bound(outer, inner, Arc::clone(&f), snapshot, size)
        })
    }

    /// Run this generator with a size derived from the current one.
    pub fn scale<F>(self, f: F) -> Gen<T>
    where
        F: Fn(Size) -> Size + Send + Sync + 'static,
    {
        Gen::new(move |rng, size| self.generate(rng, f(size)))
    }

    /// Build a generator that depends on the current size.
    pub fn sized<F>(f: F) -> Gen<T>
    where
        F: Fn(Size) -> Gen<T> + Send + Sync + 'static,
    {
        Gen::new(move |rng, size| f(size).generate(rng, size))
    }
}

fn bound<T, U>(
    outer: Shrinkable<T>,
    inner: Shrinkable<U>,
    f: Binder<T, U>,
    snapshot: Random,
    size: Size,
) -> Shrinkable<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
{
    let value = inner.value.clone();
    Shrinkable::new(value, move || {
        let (rederive, replay_from) = (Arc::clone(&f), snapshot.clone());
        let outer_candidates = outer.shrink().map(move |candidate| {
            let mut replay = replay_from.clone();
            let inner = rederive(candidate.value.clone()).generate(&mut replay, size);
            bound(
                candidate,
                inner,
                Arc::clone(&rederive),
                replay_from.clone(),
                size,
            )
        });

        let (held, keep, keep_from) = (outer.clone(), Arc::clone(&f), snapshot.clone());
        let inner_candidates = inner.shrink().map(move |candidate| {
            bound(
                held.clone(),
                candidate,
                Arc::clone(&keep),
                keep_from.clone(),
                size,
            )
        });

        Box::new(outer_candidates.chain(inner_candidates))
    })
}
