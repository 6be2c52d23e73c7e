//! Choosing among values and among generators.

use std::sync::Arc;

use rand::Rng;

use super::Gen;
use crate::error::{Error, Result};
use crate::shrinkable::Shrinkable;

impl<T> Gen<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Choose one of `values`, treating earlier entries as simpler.
    ///
    /// Only the first `size + 1` entries are reachable at a given size, and
    /// a chosen entry shrinks to the one right before it. Fails immediately
    /// if `values` is empty or holds two equal entries.
    pub fn choose(values: Vec<T>) -> Result<Gen<T>> {
        if values.is_empty() {
            return Err(Error::EmptyChoice);
        }
        for (second, value) in values.iter().enumerate() {
            if let Some(first) = values[..second].iter().position(|earlier| earlier == value) {
                return Err(Error::DuplicateChoice { first, second });
            }
        }
        Ok(Gen::from_choices(values))
    }
}

impl<T> Gen<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// `choose` without the checks, for lists known to be non-empty and
    /// duplicate-free.
    pub(crate) fn from_choices(values: Vec<T>) -> Gen<T> {
        let values: Arc<[T]> = values.into();
        Gen::index_within(values.len()).map(move |index| values[index].clone())
    }
}

impl<T> Gen<T>
where
    T: Clone + 'static,
{
    /// Delegate to `first` or `second`, preferring `first` when shrinking.
    pub fn either(first: Gen<T>, second: Gen<T>) -> Gen<T> {
        Gen::from_alternatives(vec![first, second])
    }

    /// Delegate to one of `gens`.
    ///
    /// Shrinking first tries the earlier generators, then shrinks within the
    /// chosen one.
    pub fn one_of(gens: Vec<Gen<T>>) -> Result<Gen<T>> {
        if gens.is_empty() {
            return Err(Error::EmptyChoice);
        }
        Ok(Gen::from_alternatives(gens))
    }

    fn from_alternatives(gens: Vec<Gen<T>>) -> Gen<T> {
        let gens: Arc<[Gen<T>]> = gens.into();
        Gen::index_within(gens.len()).bind(move |index| gens[index].clone())
    }
}

impl Gen<usize> {
    /// An index into a list of `len` entries, bounded by the size and
    /// shrinking one position at a time toward zero.
    fn index_within(len: usize) -> Gen<usize> {
        let last = len.saturating_sub(1);
        Gen::new(move |rng, size| {
            let index = rng.gen_range(0..=size.get().min(last));
            Shrinkable::unfold(index, |&index: &usize| index.checked_sub(1).into_iter().collect())
        })
    }
}

impl<T> Gen<Option<T>>
where
    T: Clone + Send + Sync + 'static,
{
    /// Generate `None` or `Some` of a value; `Some` shrinks to `None` first.
    pub fn option_of(gen: Gen<T>) -> Gen<Option<T>> {
        Gen::either(Gen::constant(None), gen.map(Some))
    }
}

impl<T, E> Gen<std::result::Result<T, E>>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Generate `Ok` or `Err` values; `Err` shrinks toward `Ok` first.
    pub fn result_of(ok: Gen<T>, err: Gen<E>) -> Gen<std::result::Result<T, E>> {
        Gen::either(ok.map(Ok), err.map(Err))
    }
}
