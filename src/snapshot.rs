//! Detached, read-only copies of an [`AdaptiveMap`]'s keys, values, and entries.
//!
//! None of these types expose a way to change their contents, and none of them observe changes made to the map
//! after they were taken. Their order is the map's iteration order at the time of the snapshot.
//!
//! [`AdaptiveMap`]: crate::AdaptiveMap

use core::fmt;
use core::hash::Hash;
use core::ops::Deref;

use indexmap::IndexSet;

use crate::ImmutableEntry;

/// Snapshot of the keys of a map. See [`AdaptiveMap::key_set`].
///
/// Equality is set equality and ignores order.
///
/// [`AdaptiveMap::key_set`]: crate::AdaptiveMap::key_set
#[derive(Clone)]
pub struct KeySet<K> {
    inner: IndexSet<K, crate::BuildHasher>,
}

impl<K: Hash + Eq> KeySet<K> {
    pub(crate) fn from_keys<I: IntoIterator<Item = K>>(keys: I, len: usize) -> Self {
        let mut inner = IndexSet::with_capacity_and_hasher(len, crate::BuildHasher::default());
        inner.extend(keys);
        Self { inner }
    }

    /// Returns `true` if the snapshot contains `key`.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }
}

impl<K> KeySet<K> {
    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over the keys in snapshot order.
    #[inline]
    pub fn iter(&self) -> indexmap::set::Iter<'_, K> {
        self.inner.iter()
    }

    /// View the keys as a slice, in snapshot order.
    #[inline]
    pub fn as_slice(&self) -> &indexmap::set::Slice<K> {
        self.inner.as_slice()
    }
}

impl<K: Hash + Eq> PartialEq for KeySet<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Hash + Eq> Eq for KeySet<K> {}

impl<K: fmt::Debug> fmt::Debug for KeySet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inner.iter()).finish()
    }
}

impl<K> IntoIterator for KeySet<K> {
    type Item = K;
    type IntoIter = indexmap::set::IntoIter<K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a KeySet<K> {
    type Item = &'a K;
    type IntoIter = indexmap::set::Iter<'a, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Snapshot of the values of a map. See [`AdaptiveMap::value_list`].
///
/// Dereferences to a read-only slice. Unlike keys, values may repeat.
///
/// [`AdaptiveMap::value_list`]: crate::AdaptiveMap::value_list
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ValueList<V> {
    inner: Box<[V]>,
}

impl<V> ValueList<V> {
    pub(crate) fn from_values<I: IntoIterator<Item = V>>(values: I) -> Self {
        Self {
            inner: values.into_iter().collect(),
        }
    }

    /// View the values as a slice, in snapshot order.
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        &self.inner
    }
}

impl<V> Deref for ValueList<V> {
    type Target = [V];

    #[inline]
    fn deref(&self) -> &[V] {
        &self.inner
    }
}

impl<V: fmt::Debug> fmt::Debug for ValueList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.iter()).finish()
    }
}

impl<V> IntoIterator for ValueList<V> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_vec().into_iter()
    }
}

impl<'a, V> IntoIterator for &'a ValueList<V> {
    type Item = &'a V;
    type IntoIter = core::slice::Iter<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Snapshot of the entries of a map. See [`AdaptiveMap::entry_set`].
///
/// Equality is set equality and ignores order.
///
/// [`AdaptiveMap::entry_set`]: crate::AdaptiveMap::entry_set
#[derive(Clone)]
pub struct EntrySet<K, V> {
    inner: IndexSet<ImmutableEntry<K, V>, crate::BuildHasher>,
}

impl<K: Hash + Eq, V: Hash + Eq> EntrySet<K, V> {
    pub(crate) fn from_entries<I: IntoIterator<Item = ImmutableEntry<K, V>>>(
        entries: I,
        len: usize,
    ) -> Self {
        let mut inner = IndexSet::with_capacity_and_hasher(len, crate::BuildHasher::default());
        inner.extend(entries);
        Self { inner }
    }

    /// Returns `true` if the snapshot contains `entry`.
    #[inline]
    pub fn contains(&self, entry: &ImmutableEntry<K, V>) -> bool {
        self.inner.contains(entry)
    }
}

impl<K, V> EntrySet<K, V> {
    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over the entries in snapshot order.
    #[inline]
    pub fn iter(&self) -> indexmap::set::Iter<'_, ImmutableEntry<K, V>> {
        self.inner.iter()
    }
}

impl<K: Hash + Eq, V: Hash + Eq> PartialEq for EntrySet<K, V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Hash + Eq, V: Hash + Eq> Eq for EntrySet<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for EntrySet<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inner.iter()).finish()
    }
}

impl<K, V> IntoIterator for EntrySet<K, V> {
    type Item = ImmutableEntry<K, V>;
    type IntoIter = indexmap::set::IntoIter<ImmutableEntry<K, V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a EntrySet<K, V> {
    type Item = &'a ImmutableEntry<K, V>;
    type IntoIter = indexmap::set::Iter<'a, ImmutableEntry<K, V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
