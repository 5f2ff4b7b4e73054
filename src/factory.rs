use core::hash::BuildHasher;
use core::hash::Hash;
use std::collections::BTreeMap;
use std::collections::HashMap;

use indexmap::IndexMap;

use crate::AssociativeMap;

/// Builds the map an [`AdaptiveMap`] migrates its entries into once they no longer fit inline.
///
/// The factory is called once per migration with the number of entries about to be moved, which implementations
/// may use as a sizing hint. It is not a bound on how many entries the returned map will eventually hold.
///
/// Any `Fn(usize) -> M` closure where `M` is an [`AssociativeMap`] is a factory:
///
/// ```
/// use std::collections::BTreeMap;
///
/// use adaptive_map::AdaptiveMap;
///
/// let mut map = AdaptiveMap::with_capacity_and_factory(1, |_: usize| BTreeMap::new());
/// map.put(2, "two").unwrap();
/// map.put(1, "one").unwrap();
///
/// // the delegate is a BTreeMap, so iteration is now sorted by key
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2]);
/// ```
///
/// [`AdaptiveMap`]: crate::AdaptiveMap
pub trait MapFactory<K, V> {
    /// The map type produced by this factory.
    type Map: AssociativeMap<K, V>;

    /// Creates an empty map ready to receive about `expected_size` entries.
    fn create(&self, expected_size: usize) -> Self::Map;
}

impl<K, V, M, F> MapFactory<K, V> for F
where
    F: Fn(usize) -> M,
    M: AssociativeMap<K, V>,
{
    type Map = M;

    #[inline]
    fn create(&self, expected_size: usize) -> M {
        self(expected_size)
    }
}

/// Creates a [`HashMap`] using the crate's default [`foldhash`] hasher. Used by [`AdaptiveMap::new`].
///
/// [`AdaptiveMap::new`]: crate::AdaptiveMap::new
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultMapFactory;

impl<K: Eq + Hash, V> MapFactory<K, V> for DefaultMapFactory {
    type Map = HashMap<K, V, crate::BuildHasher>;

    #[inline]
    fn create(&self, expected_size: usize) -> Self::Map {
        HashMap::with_capacity_and_hasher(expected_size, crate::BuildHasher::default())
    }
}

/// Creates an [`IndexMap`], so that a migrated map keeps iterating in the order its entries were laid out
/// before migration, followed by later insertions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrderedMapFactory;

impl<K: Eq + Hash, V> MapFactory<K, V> for OrderedMapFactory {
    type Map = IndexMap<K, V, crate::BuildHasher>;

    #[inline]
    fn create(&self, expected_size: usize) -> Self::Map {
        IndexMap::with_capacity_and_hasher(expected_size, crate::BuildHasher::default())
    }
}

/// Creates a [`BTreeMap`]. The size hint is ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SortedMapFactory;

impl<K: Ord, V> MapFactory<K, V> for SortedMapFactory {
    type Map = BTreeMap<K, V>;

    #[inline]
    fn create(&self, _expected_size: usize) -> Self::Map {
        BTreeMap::new()
    }
}

/// Creates a [`HashMap`] hashed with [`BuildPrimitiveHasher`], which is faster for small keys made only of
/// primitive types.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveMapFactory;

impl<K: Eq + Hash, V> MapFactory<K, V> for PrimitiveMapFactory {
    type Map = HashMap<K, V, BuildPrimitiveHasher>;

    #[inline]
    fn create(&self, expected_size: usize) -> Self::Map {
        HashMap::with_capacity_and_hasher(expected_size, BuildPrimitiveHasher)
    }
}

/// A [`BuildHasher`] that builds a hasher specialized in hashing small keys containing
/// only primitive types. The exact hasher implementation provided by this [`BuildHasher`]
/// may change over time if better algorithms are discovered or implemented.
#[allow(missing_debug_implementations)]
#[derive(Default, Clone, Copy)]
pub struct BuildPrimitiveHasher;

impl BuildHasher for BuildPrimitiveHasher {
    type Hasher = rustc_hash::FxHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        rustc_hash::FxHasher::default()
    }
}
