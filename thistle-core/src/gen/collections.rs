//! Collection generators built from element generators.
//!
//! Lengths are bounded by the size. Shrinking removes elements before it
//! simplifies the ones that are left.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use rand::Rng;

use super::combine::pair;
use super::Gen;
use crate::data::{Random, Size};
use crate::shrinkable::{sequence, sequence_by, Shrinkable};

impl<T> Gen<Vec<T>>
where
    T: Clone + 'static,
{
    /// Generate a vector of up to `size` elements.
    pub fn vec_of(element: Gen<T>) -> Self {
        list(element, 0)
    }

    /// Generate a vector of one to `size + 1` elements; it never shrinks
    /// to empty.
    pub fn non_empty_vec_of(element: Gen<T>) -> Self {
        list(element, 1)
    }
}

fn list<T: Clone + 'static>(element: Gen<T>, min_len: usize) -> Gen<Vec<T>> {
    Gen::new(move |rng, size| {
        let len = min_len + rng.gen_range(0..=size.get());
        let items = (0..len).map(|_| element.generate(rng, size)).collect();
        sequence(items, min_len)
    })
}

/// Draw up to `size` items, keeping the first of any that share a key.
fn distinct<T, K, F>(rng: &mut Random, size: Size, mut draw: F) -> Vec<Shrinkable<T>>
where
    F: FnMut(&mut Random) -> (K, Shrinkable<T>),
    K: Ord,
{
    let len = rng.gen_range(0..=size.get());
    let mut seen = BTreeSet::new();
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        let (key, item) = draw(rng);
        if seen.insert(key) {
            items.push(item);
        }
    }
    items
}

/// Same as [`distinct`] for keys that are only hashable.
fn distinct_hashed<T, K, F>(rng: &mut Random, size: Size, mut draw: F) -> Vec<Shrinkable<T>>
where
    F: FnMut(&mut Random) -> (K, Shrinkable<T>),
    K: Hash + Eq,
{
    let len = rng.gen_range(0..=size.get());
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        let (key, item) = draw(rng);
        if seen.insert(key) {
            items.push(item);
        }
    }
    items
}

impl<T> Gen<BTreeSet<T>>
where
    T: Clone + Ord + 'static,
{
    /// Generate an ordered set of up to `size` elements.
    pub fn btree_set_of(element: Gen<T>) -> Self {
        Gen::new(move |rng, size| {
            let items = distinct(rng, size, |rng| {
                let item = element.generate(rng, size);
                (item.value.clone(), item)
            });
            sequence_by(items, T::clone).map(|values| values.into_iter().collect())
        })
    }
}

impl<T> Gen<HashSet<T>>
where
    T: Clone + Hash + Eq + 'static,
{
    /// Generate a hash set of up to `size` elements.
    pub fn hash_set_of(element: Gen<T>) -> Self {
        Gen::new(move |rng, size| {
            let items = distinct_hashed(rng, size, |rng| {
                let item = element.generate(rng, size);
                (item.value.clone(), item)
            });
            sequence_by(items, T::clone).map(|values| values.into_iter().collect())
        })
    }
}

impl<K, V> Gen<BTreeMap<K, V>>
where
    K: Clone + Ord + 'static,
    V: Clone + 'static,
{
    /// Generate an ordered map of up to `size` entries.
    ///
    /// Each entry shrinks its key and its value independently.
    pub fn btree_map_of(keys: Gen<K>, values: Gen<V>) -> Self {
        Gen::new(move |rng, size| {
            let entries = distinct(rng, size, |rng| {
                let key = keys.generate(rng, size);
                let value = values.generate(rng, size);
                (key.value.clone(), pair(key, value))
            });
            sequence_by(entries, |(key, _): &(K, V)| key.clone())
                .map(|entries| entries.into_iter().collect())
        })
    }
}

impl<K, V> Gen<HashMap<K, V>>
where
    K: Clone + Hash + Eq + 'static,
    V: Clone + 'static,
{
    /// Generate a hash map of up to `size` entries.
    pub fn hash_map_of(keys: Gen<K>, values: Gen<V>) -> Self {
        Gen::new(move |rng, size| {
            let entries = distinct_hashed(rng, size, |rng| {
                let key = keys.generate(rng, size);
                let value = values.generate(rng, size);
                (key.value.clone(), pair(key, value))
            });
            sequence_by(entries, |(key, _): &(K, V)| key.clone())
                .map(|entries| entries.into_iter().collect())
        })
    }
}

impl Gen<String> {
    /// Generate a string of up to `size` characters.
    pub fn string_of(chars: Gen<char>) -> Self {
        Gen::vec_of(chars).map(|chars| chars.into_iter().collect())
    }

    /// Generate a non-empty string.
    pub fn non_empty_string_of(chars: Gen<char>) -> Self {
        Gen::non_empty_vec_of(chars).map(|chars| chars.into_iter().collect())
    }

    /// Generate a string of ASCII letters.
    pub fn ascii_alpha() -> Self {
        Gen::string_of(Gen::<char>::ascii_alpha())
    }

    /// Generate a string of lowercase ASCII letters.
    pub fn ascii_lowercase() -> Self {
        Gen::string_of(Gen::<char>::ascii_lowercase())
    }
}
