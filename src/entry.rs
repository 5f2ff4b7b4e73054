use core::fmt;

use crate::Error;

/// An owned, read-only `(key, value)` pair, as collected by [`AdaptiveMap::entry_set`].
///
/// This is a snapshot, not a view into the map it was taken from: later changes to the map are not reflected here,
/// and the pair itself cannot be changed. Two entries are equal and hash the same when both their keys and their
/// values are equal.
///
/// [`AdaptiveMap::entry_set`]: crate::AdaptiveMap::entry_set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImmutableEntry<K, V> {
    key: K,
    value: V,
}

impl<K, V> ImmutableEntry<K, V> {
    /// Creates a new entry from `key` and `value`.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key of the entry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value of the entry.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Always fails with [`Error::Unsupported`], dropping `value`.
    ///
    /// The entry is a disconnected copy, so there is nothing a new value could be written through to.
    #[allow(clippy::unused_self)]
    #[inline]
    pub fn set_value(&mut self, _value: V) -> Result<V, Error> {
        Err(Error::Unsupported {
            operation: "set_value",
        })
    }

    /// Splits the entry into its key and value.
    #[inline]
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for ImmutableEntry<K, V> {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for ImmutableEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
