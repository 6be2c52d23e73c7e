//! Type-indexed default generators.
//!
//! A [`Registry`] maps one exact type instantiation to the generator used
//! when a property asks for "any value of this type". The process-wide
//! registry is seeded with built-in defaults on first use and can be
//! overridden during test setup with [`register_default`].

use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{OnceLock, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use num_bigint::BigInt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::gen::Gen;

/// Identifies one exact type instantiation; `Vec<i32>` and `Vec<bool>`
/// are different tags.
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// The tag for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeTag {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Readable type name, for messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Table of default generators keyed by [`TypeTag`].
pub struct Registry {
    generators: HashMap<TypeTag, Box<dyn Any + Send + Sync>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry {
            generators: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in defaults.
    pub fn with_defaults() -> Self {
        let mut registry = Registry::new();
        registry.set_default(Gen::<bool>::bool());
        registry.set_default(Gen::<i8>::int());
        registry.set_default(Gen::<i16>::int());
        registry.set_default(Gen::<i32>::int());
        registry.set_default(Gen::<i64>::int());
        registry.set_default(Gen::<isize>::int());
        registry.set_default(Gen::<u8>::int());
        registry.set_default(Gen::<u16>::int());
        registry.set_default(Gen::<u32>::int());
        registry.set_default(Gen::<u64>::int());
        registry.set_default(Gen::<usize>::int());
        registry.set_default(Gen::<f32>::float());
        registry.set_default(Gen::<f64>::float());
        registry.set_default(Gen::<char>::ascii_alphanumeric());
        registry.set_default(Gen::<String>::string_of(Gen::<char>::ascii_alphanumeric()));
        registry.set_default(Gen::<BigInt>::big_int());
        registry.set_default(Gen::<DateTime<Utc>>::date_time());
        registry.set_default(Gen::<TimeDelta>::time_delta());
        registry.set_default(Gen::<Duration>::duration());

        registry.set_default::<Vec<i32>>(Gen::vec_of(Gen::int()));
        registry.set_default::<Vec<i64>>(Gen::vec_of(Gen::int()));
        registry.set_default::<Vec<bool>>(Gen::vec_of(Gen::bool()));
        registry.set_default::<Vec<String>>(Gen::vec_of(Gen::string_of(Gen::<char>::ascii_alphanumeric())));
        registry.set_default::<Option<i32>>(Gen::option_of(Gen::int()));
        registry.set_default::<BTreeSet<i32>>(Gen::btree_set_of(Gen::int()));
        registry.set_default::<HashSet<i32>>(Gen::hash_set_of(Gen::int()));
        registry.set_default::<HashMap<i32, bool>>(Gen::hash_map_of(Gen::int(), Gen::bool()));
        registry.set_default::<BTreeMap<i32, bool>>(Gen::btree_map_of(Gen::int(), Gen::bool()));
        registry
    }

    /// Register `gen` as the default for `T`, replacing any earlier entry.
    ///
    /// Returns `true` when an earlier entry was replaced.
    pub fn set_default<T: 'static>(&mut self, gen: Gen<T>) -> bool {
        let tag = TypeTag::of::<T>();
        let replaced = self.generators.insert(tag, Box::new(gen)).is_some();
        if replaced {
            debug!(type_name = tag.name(), "overriding default generator");
        }
        replaced
    }

    /// The default generator for `T`.
    pub fn default_for<T: 'static>(&self) -> Result<Gen<T>> {
        let tag = TypeTag::of::<T>();
        self.generators
            .get(&tag)
            .and_then(|entry| entry.downcast_ref::<Gen<T>>())
            .cloned()
            .ok_or(Error::MissingGenerator {
                type_name: tag.name(),
            })
    }

    /// Check if `T` has a default generator.
    pub fn contains<T: 'static>(&self) -> bool {
        self.generators.contains_key(&TypeTag::of::<T>())
    }

    /// Remove the default for `T`, returning whether one was present.
    pub fn remove<T: 'static>(&mut self) -> bool {
        self.generators.remove(&TypeTag::of::<T>()).is_some()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn global() -> &'static RwLock<Registry> {
    static DEFAULTS: OnceLock<RwLock<Registry>> = OnceLock::new();
    DEFAULTS.get_or_init(|| RwLock::new(Registry::with_defaults()))
}

/// Register `gen` as the process-wide default for `T`.
///
/// Intended for test setup; later lookups see the new generator.
pub fn register_default<T: 'static>(gen: Gen<T>) {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .set_default(gen);
}

/// The process-wide default generator for `T`.
pub fn lookup_default<T: 'static>() -> Result<Gen<T>> {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .default_for::<T>()
}

/// The default generator for argument `index` of a property taking
/// `arity` arguments.
pub fn lookup_argument<T: 'static>(index: usize, arity: usize) -> Result<Gen<T>> {
    lookup_default::<T>().map_err(|error| match error {
        Error::MissingGenerator { type_name } => Error::MissingArgumentGenerator {
            index,
            arity,
            type_name,
        },
        other => other,
    })
}

impl<T: 'static> Gen<T> {
    /// The process-wide default generator for `T`.
    pub fn any() -> Result<Gen<T>> {
        lookup_default::<T>()
    }
}

/// Argument tuples whose positions all have default generators.
pub trait Defaults: Sized {
    /// Number of arguments.
    const ARITY: usize;

    /// A generator for the whole tuple, built from each position's default.
    fn defaults() -> Result<Gen<Self>>;
}

macro_rules! impl_defaults {
    ($arity:expr; $($name:ident : $index:tt),+) => {
        impl<$($name: Clone + 'static),+> Defaults for ($($name,)+) {
            const ARITY: usize = $arity;

            fn defaults() -> Result<Gen<Self>> {
                Ok(Gen::tuple_of(($(lookup_argument::<$name>($index, $arity)?,)+)))
            }
        }
    };
}

impl_defaults!(1; A: 0);
impl_defaults!(2; A: 0, B: 1);
impl_defaults!(3; A: 0, B: 1, C: 2);
impl_defaults!(4; A: 0, B: 1, C: 2, D: 3);
impl_defaults!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
impl_defaults!(6; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
