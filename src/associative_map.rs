use core::hash::BuildHasher;
use core::hash::Hash;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::btree_map;
use std::collections::hash_map;

use indexmap::IndexMap;

/// Read access to a key-value map.
///
/// This is the capability [`AdaptiveMap`] compares itself against in [`AdaptiveMap::eq_map`]: any type
/// implementing it can stand on the other side of an equality check, regardless of how it stores its entries.
///
/// [`AdaptiveMap`]: crate::AdaptiveMap
/// [`AdaptiveMap::eq_map`]: crate::AdaptiveMap::eq_map
pub trait MapView<K, V> {
    /// Iterator over `(&K, &V)` pairs, in whatever order the map keeps them.
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Returns the number of entries in the map.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the value stored for `key`, if any.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns `true` if the map contains an entry for `key`.
    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if any entry of the map holds a value equal to `value`.
    ///
    /// This is a linear scan for all of the maps provided by this crate.
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    /// Iterates over all entries of the map.
    fn iter(&self) -> Self::Iter<'_>;
}

/// A mutable key-value map that [`AdaptiveMap`] can migrate its entries into once they no longer fit inline.
///
/// Implemented for [`HashMap`], [`BTreeMap`] and [`IndexMap`]. Implement it for your own map type and hand out
/// instances of it through a [`MapFactory`] to choose what an [`AdaptiveMap`] turns into when it grows.
///
/// [`AdaptiveMap`]: crate::AdaptiveMap
/// [`MapFactory`]: crate::MapFactory
pub trait AssociativeMap<K, V>: MapView<K, V> {
    /// Consuming iterator over `(K, V)` pairs.
    type IntoIter: Iterator<Item = (K, V)>;

    /// Inserts `value` for `key`, returning the value previously stored for `key`, if any.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Removes the entry for `key`, returning its value, if any.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes all entries.
    fn clear(&mut self);

    /// Consumes the map, yielding all of its entries.
    fn into_entries(self) -> Self::IntoIter
    where
        Self: Sized;

    /// Inserts every pair of `entries`, later pairs overwriting earlier ones with an equal key.
    fn insert_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        Self: Sized,
    {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> MapView<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Iter<'a>
        = hash_map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        HashMap::iter(self)
    }
}

impl<K, V, S> AssociativeMap<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type IntoIter = hash_map::IntoIter<K, V>;

    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    #[inline]
    fn clear(&mut self) {
        HashMap::clear(self);
    }

    #[inline]
    fn into_entries(self) -> Self::IntoIter {
        self.into_iter()
    }

    #[inline]
    fn insert_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.extend(entries);
    }
}

impl<K: Ord, V> MapView<K, V> for BTreeMap<K, V> {
    type Iter<'a>
        = btree_map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }
}

impl<K: Ord, V> AssociativeMap<K, V> for BTreeMap<K, V> {
    type IntoIter = btree_map::IntoIter<K, V>;

    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }

    #[inline]
    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    #[inline]
    fn into_entries(self) -> Self::IntoIter {
        self.into_iter()
    }
}

impl<K, V, S> MapView<K, V> for IndexMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Iter<'a>
        = indexmap::map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    #[inline]
    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        IndexMap::get(self, key)
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        IndexMap::contains_key(self, key)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        IndexMap::iter(self)
    }
}

/// Removal shifts later entries down so that the order of the remaining entries is kept.
impl<K, V, S> AssociativeMap<K, V> for IndexMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type IntoIter = indexmap::map::IntoIter<K, V>;

    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        IndexMap::insert(self, key, value)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        IndexMap::shift_remove(self, key)
    }

    #[inline]
    fn clear(&mut self) {
        IndexMap::clear(self);
    }

    #[inline]
    fn into_entries(self) -> Self::IntoIter {
        self.into_iter()
    }

    #[inline]
    fn insert_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.extend(entries);
    }
}
