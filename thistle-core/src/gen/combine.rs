//! N-ary combination of generators.
//!
//! There is exactly one combinator underneath: [`combine_all`], over a
//! runtime-length list of generators sharing one component type. Mixed
//! component types go through [`Dynamic`] values, and the tuple impls of
//! [`Components`] erase on the way in and downcast at the combiner boundary.

use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;

use super::Gen;
use crate::shrinkable::{combination, Shrinkable};

/// A type-erased component value.
pub type Dynamic = Rc<dyn Any>;

/// Combine generators for positions `0..n` with a combiner over their values.
///
/// Components are drawn in position order from the same randomness and
/// size. The result shrinks one position at a time (see
/// [`combination`]).
pub fn combine_all<C, R, F>(gens: Vec<Gen<C>>, combiner: F) -> Gen<R>
where
    C: Clone + 'static,
    R: 'static,
    F: Fn(&[C]) -> R + Send + Sync + 'static,
{
    let combiner = Arc::new(combiner);
    Gen::new(move |rng, size| {
        let parts = gens.iter().map(|gen| gen.generate(rng, size)).collect();
        let combiner = Arc::clone(&combiner);
        combination(parts, move |values: &[C]| combiner(values))
    })
}

/// A tuple of generators that can be combined into a tuple of values.
pub trait Components {
    /// The tuple of generated values.
    type Output: Clone + 'static;

    /// Number of positions.
    const ARITY: usize;

    /// Erase each generator, in position order.
    fn erase(self) -> Vec<Gen<Dynamic>>;

    /// Rebuild the typed tuple from erased values in position order.
    fn restore(values: &[Dynamic]) -> Self::Output;
}

/// Combine a tuple of generators with a function over the tuple of values.
pub fn combine<G, R, F>(gens: G, f: F) -> Gen<R>
where
    G: Components + 'static,
    R: 'static,
    F: Fn(G::Output) -> R + Send + Sync + 'static,
{
    combine_all(gens.erase(), move |values: &[Dynamic]| f(G::restore(values)))
}

impl<T> Gen<T>
where
    T: Clone + 'static,
{
    /// Erase the value type so the generator fits in a mixed component list.
    pub fn erase(self) -> Gen<Dynamic> {
        self.map(|value| Rc::new(value) as Dynamic)
    }

    /// Generate tuples from a tuple of generators.
    pub fn tuple_of<G>(gens: G) -> Gen<T>
    where
        G: Components<Output = T> + 'static,
    {
        combine(gens, |tuple| tuple)
    }

    /// Pair this generator with another.
    pub fn zip<U>(self, other: Gen<U>) -> Gen<(T, U)>
    where
        U: Clone + 'static,
    {
        combine((self, other), |pair| pair)
    }
}

fn downcast<T: Clone + 'static>(value: &Dynamic) -> T {
    match value.downcast_ref::<T>() {
        Some(value) => value.clone(),
        None => unreachable!(
            "component is not a {}; erased values always match their position",
            std::any::type_name::<T>()
        ),
    }
}

/// Combine two already drawn shrinkables into a pair.
pub(crate) fn pair<A, B>(first: Shrinkable<A>, second: Shrinkable<B>) -> Shrinkable<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    let parts = vec![
        first.map(|value| Rc::new(value) as Dynamic),
        second.map(|value| Rc::new(value) as Dynamic),
    ];
    combination(parts, |values: &[Dynamic]| {
        (downcast::<A>(&values[0]), downcast::<B>(&values[1]))
    })
}

macro_rules! impl_components {
    ($arity:expr; $($name:ident : $index:tt),+) => {
        impl<$($name: Clone + 'static),+> Components for ($(Gen<$name>,)+) {
            type Output = ($($name,)+);
            const ARITY: usize = $arity;

            fn erase(self) -> Vec<Gen<Dynamic>> {
                vec![$(self.$index.erase()),+]
            }

            fn restore(values: &[Dynamic]) -> Self::Output {
                ($(downcast::<$name>(&values[$index]),)+)
            }
        }
    };
}

impl_components!(1; A: 0);
impl_components!(2; A: 0, B: 1);
impl_components!(3; A: 0, B: 1, C: 2);
impl_components!(4; A: 0, B: 1, C: 2, D: 3);
impl_components!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
impl_components!(6; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_components!(7; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_components!(8; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
impl_components!(9; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
impl_components!(10; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
impl_components!(11; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
impl_components!(12; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);
