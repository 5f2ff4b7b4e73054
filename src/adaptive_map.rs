#![deny(missing_docs)]

use core::fmt;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter;
use core::mem;
use core::ops;
use core::panic::AssertUnwindSafe;
use core::slice;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::panic;
use std::vec;

use crate::AbsenceMarker;
use crate::AssociativeMap;
use crate::DefaultMapFactory;
use crate::Error;
use crate::ImmutableEntry;
use crate::MapFactory;
use crate::MapView;
use crate::hash_one_fixed;
use crate::snapshot::EntrySet;
use crate::snapshot::KeySet;
use crate::snapshot::ValueList;

/// Number of entries an [`AdaptiveMap`] created through [`AdaptiveMap::new`] holds inline.
pub const DEFAULT_CAPACITY: usize = 5;

/// Which storage strategy an [`AdaptiveMap`] is currently using. See [`AdaptiveMap::mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Entries live in two inline arrays that are searched linearly.
    Small,
    /// Entries live in a map created by the [`MapFactory`], and every operation is forwarded to it.
    Big,
}

/// A key-value map that stores up to `capacity` entries in two parallel inline arrays, and moves them all into
/// a general-purpose map the first time an insertion would not fit.
///
/// While the map is small, every lookup is a linear scan over the live keys using [`Eq`], which is cheaper than
/// hashing for a handful of entries and needs no allocation beyond the two arrays, which are sized to `capacity`
/// once at construction and never grow. When a new key arrives and all `capacity` slots are taken, the map asks
/// its [`MapFactory`] for a delegate map, moves every entry into it, and from then on forwards every operation
/// to it. The map does not shrink back on removal; only [`clear`] returns it to inline storage.
///
/// Keys and values may never be *absent* as defined by [`AbsenceMarker`] (e.g. `None` or a null pointer).
/// Every operation that takes a key or value rejects an absent one with [`Error::InvalidArgument`] before
/// touching the map.
///
/// Implements `PartialEq`, `Eq`, and `Hash` such that two maps are equal and hash to the same value if they have
/// the same `(k, v)` element pairs regardless of order or of which storage either of them uses. However, the
/// `Hash` implementation is not fully cryptographically secure.
///
/// This type does no synchronization. Sharing one between threads requires wrapping it in a lock.
///
/// # Ordering
///
/// While small, iteration follows insertion order up until the first removal. Removal moves the last entry into
/// the removed slot (see [`Vec::swap_remove`]), so after any removal the order is well-defined but not
/// the insertion order. After migration the order is whatever the delegate map provides.
///
/// # Example
///
/// ```
/// use adaptive_map::AdaptiveMap;
/// use adaptive_map::Mode;
///
/// let mut attributes = AdaptiveMap::with_capacity(2);
///
/// attributes.put("xyz", 123).unwrap();
/// attributes.put("abc", 155).unwrap();
/// assert_eq!(attributes.mode(), Mode::Small);
/// assert_eq!(attributes.to_string(), "[Small]{xyz=123, abc=155}");
///
/// // a third key does not fit inline anymore
/// attributes.put("def", 456).unwrap();
/// assert_eq!(attributes.mode(), Mode::Big);
/// assert_eq!(attributes.len(), 3);
/// assert_eq!(attributes.get(&"def").unwrap(), Some(&456));
///
/// // absent values are rejected
/// let mut optional = AdaptiveMap::new();
/// assert!(optional.put("abc", None::<u32>).is_err());
/// assert!(optional.is_empty());
/// ```
///
/// [`clear`]: AdaptiveMap::clear
pub struct AdaptiveMap<K, V, F = DefaultMapFactory>
where
    F: MapFactory<K, V>,
{
    capacity: usize,
    storage: Storage<K, V, F::Map>,
    factory: F,
}

enum Storage<K, V, M> {
    // `keys[i]` and `values[i]` form one entry. Both are allocated to `capacity` and never pushed past it.
    Inline { keys: Vec<K>, values: Vec<V> },
    Delegated(M),
}

impl<K, V, M> Storage<K, V, M> {
    #[inline]
    fn inline(capacity: usize) -> Self {
        Self::Inline {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }
}

#[inline]
fn position<K: Eq>(keys: &[K], key: &K) -> Option<usize> {
    keys.iter().position(|k| k == key)
}

#[inline]
fn check_key<K: AbsenceMarker>(key: &K) -> Result<(), Error> {
    if key.is_absent() {
        return Err(Error::absent_key());
    }
    Ok(())
}

#[inline]
fn check_value<V: AbsenceMarker>(value: &V) -> Result<(), Error> {
    if value.is_absent() {
        return Err(Error::absent_value());
    }
    Ok(())
}

impl<K, V> AdaptiveMap<K, V, DefaultMapFactory>
where
    DefaultMapFactory: MapFactory<K, V>,
{
    /// Creates an empty map holding up to [`DEFAULT_CAPACITY`] entries inline, which migrates into a
    /// [`HashMap`] when it outgrows them.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty map holding up to `capacity` entries inline, which migrates into a [`HashMap`] when
    /// it outgrows them.
    ///
    /// A `capacity` of zero is allowed and makes the very first insertion migrate.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_factory(capacity, DefaultMapFactory)
    }
}

impl<K, V, F> AdaptiveMap<K, V, F>
where
    F: MapFactory<K, V>,
{
    /// Creates an empty map holding up to [`DEFAULT_CAPACITY`] entries inline, which migrates into a map
    /// created by `factory` when it outgrows them.
    #[inline]
    pub fn with_factory(factory: F) -> Self {
        Self::with_capacity_and_factory(DEFAULT_CAPACITY, factory)
    }

    /// Creates an empty map holding up to `capacity` entries inline, which migrates into a map created by
    /// `factory` when it outgrows them.
    #[inline]
    pub fn with_capacity_and_factory(capacity: usize, factory: F) -> Self {
        Self {
            capacity,
            storage: Storage::inline(capacity),
            factory,
        }
    }

    /// Returns the number of entries the map holds inline before migrating. Fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the storage strategy currently in use.
    #[inline]
    pub fn mode(&self) -> Mode {
        match self.storage {
            Storage::Inline { .. } => Mode::Small,
            Storage::Delegated(_) => Mode::Big,
        }
    }

    /// Returns the factory used to create the delegate map on migration.
    #[inline]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Returns the delegate map if the map has migrated.
    #[inline]
    pub fn delegate(&self) -> Option<&F::Map> {
        match &self.storage {
            Storage::Inline { .. } => None,
            Storage::Delegated(map) => Some(map),
        }
    }

    /// Returns the number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Inline { keys, .. } => keys.len(),
            Storage::Delegated(map) => map.len(),
        }
    }

    /// Returns true if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        match &self.storage {
            Storage::Inline { keys, .. } => keys.is_empty(),
            Storage::Delegated(map) => map.is_empty(),
        }
    }

    /// Clears the map, removing all elements.
    ///
    /// If the map had migrated, the delegate is cleared and dropped and the map goes back to inline storage
    /// of its original capacity, so it can migrate again later.
    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Inline { keys, values } => {
                keys.clear();
                values.clear();
            }
            Storage::Delegated(map) => {
                map.clear();
                log::trace!(
                    "dropped delegate, back to inline storage of capacity {}",
                    self.capacity
                );
                self.storage = Storage::inline(self.capacity);
            }
        }
    }

    /// Returns an iterator yielding references to the map's keys and their corresponding values.
    ///
    /// The iterator's item type is `(&K, &V)`.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V, F> {
        let inner = match &self.storage {
            Storage::Inline { keys, values } => IterInner::Inline(keys.iter().zip(values.iter())),
            Storage::Delegated(map) => IterInner::Delegated(map.iter()),
        };
        Iter { inner }
    }

    /// Returns an iterator yielding references to the map's keys.
    ///
    /// The iterator's item type is `&K`.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V, F> {
        Keys { iter: self.iter() }
    }

    /// Returns an iterator yielding references to the map's values.
    ///
    /// The iterator's item type is `&V`.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V, F> {
        Values { iter: self.iter() }
    }

    /// Computes the order-independent content hash that the [`Hash`] implementation writes.
    ///
    /// This is the wrapping sum, over all entries, of the key's hash xor the value's hash, both computed with
    /// a fixed-seed hasher. It only depends on the `(k, v)` pairs, never on the storage strategy or order.
    pub fn content_hash(&self) -> u64
    where
        K: Hash,
        V: Hash,
    {
        self.iter().fold(0u64, |hash, (key, value)| {
            hash.wrapping_add(hash_one_fixed(key) ^ hash_one_fixed(value))
        })
    }

    // Moves every inline entry into a freshly created delegate. If filling the delegate panics (a user `Hash` or
    // `Eq`, or the delegate itself), the entries it already holds and the ones not yet moved go back inline before
    // the panic resumes. Only the entry being inserted at the time of the panic is lost.
    fn build_delegate(factory: &F, keys: &mut Vec<K>, values: &mut Vec<V>) -> F::Map {
        let capacity = keys.capacity();
        let mut map = factory.create(keys.len());
        let mut pending = mem::take(keys).into_iter().zip(mem::take(values));

        let filled = panic::catch_unwind(AssertUnwindSafe(|| map.insert_all(&mut pending)));
        if let Err(payload) = filled {
            keys.reserve_exact(capacity);
            values.reserve_exact(capacity);
            for (key, value) in map.into_entries().chain(pending) {
                keys.push(key);
                values.push(value);
            }
            log::debug!(
                "migration panicked, kept {} entries in inline storage",
                keys.len()
            );
            panic::resume_unwind(payload);
        }
        map
    }
}

impl<K, V, F> AdaptiveMap<K, V, F>
where
    K: Eq + AbsenceMarker,
    V: AbsenceMarker,
    F: MapFactory<K, V>,
{
    /// Checks if the map contains a key that is equal to the given key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is absent.
    #[inline]
    pub fn contains_key(&self, key: &K) -> Result<bool, Error> {
        check_key(key)?;
        Ok(match &self.storage {
            Storage::Inline { keys, .. } => position(keys, key).is_some(),
            Storage::Delegated(map) => map.contains_key(key),
        })
    }

    /// Checks if any entry of the map holds a value equal to the given value. This is a linear scan in both
    /// modes for the delegates provided by this crate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `value` is absent.
    pub fn contains_value(&self, value: &V) -> Result<bool, Error>
    where
        V: PartialEq,
    {
        check_value(value)?;
        Ok(match &self.storage {
            Storage::Inline { values, .. } => values.contains(value),
            Storage::Delegated(map) => map.contains_value(value),
        })
    }

    /// Returns a reference to the value in the map whose key is equal to the given key.
    ///
    /// Returns `Ok(None)` if the map contains no such key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is absent.
    #[inline]
    pub fn get(&self, key: &K) -> Result<Option<&V>, Error> {
        check_key(key)?;
        Ok(self.find(key))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Returns `Ok(None)` if the map did not contain a key that is equal to the given key. If it did, the
    /// corresponding value is replaced and the old value is returned. The key is not updated.
    ///
    /// If the key is new and all inline slots are taken, this migrates the map into a delegate created by
    /// its factory before inserting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` or `value` is absent. The map is left untouched.
    ///
    /// # Panics
    ///
    /// Propagates panics from the factory and from `K`'s `Hash` or `Eq` implementations. If one happens while
    /// entries are being moved into the delegate, the map stays small and keeps every entry except the one that
    /// was being moved when the panic happened.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        check_key(&key)?;
        check_value(&value)?;
        Ok(self.insert_checked(key, value))
    }

    /// Removes (by swap) the key in the map that is equal to the given key and returns its corresponding
    /// value.
    ///
    /// Returns `Ok(None)` if the map contained no such key. While the map is small, the last entry takes the
    /// place of the removed one, see the [ordering notes](AdaptiveMap#ordering).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is absent.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>, Error> {
        check_key(key)?;
        Ok(match &mut self.storage {
            Storage::Inline { keys, values } => position(keys, key).map(|index| {
                keys.swap_remove(index);
                values.swap_remove(index)
            }),
            Storage::Delegated(map) => map.remove(key),
        })
    }

    /// Inserts every pair of `entries`, as if by [`put`](AdaptiveMap::put) in order.
    ///
    /// If the number of incoming pairs exceeds the free inline slots, the map migrates up front and the
    /// whole batch goes to the delegate. This happens even if some incoming keys are already present and the
    /// merged result would have fit inline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any key or value is absent. All pairs are checked before the
    /// first one is inserted, so a rejected batch leaves the map untouched.
    ///
    /// # Panics
    ///
    /// Same as [`put`](AdaptiveMap::put): a panic while migrating keeps the map small, minus the entry that
    /// was being moved.
    pub fn put_all<I>(&mut self, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries = entries.into_iter().collect::<Vec<_>>();
        for (key, value) in &entries {
            check_key(key)?;
            check_value(value)?;
        }

        if let Storage::Inline { keys, values } = &mut self.storage {
            if entries.len() > self.capacity - keys.len() {
                let migrated = keys.len();
                let map = Self::build_delegate(&self.factory, keys, values);
                self.storage = Storage::Delegated(map);
                log::debug!(
                    "migrated {migrated} entries out of inline storage of capacity {} for a batch of {}",
                    self.capacity,
                    entries.len(),
                );
            }
        }

        if let Storage::Delegated(map) = &mut self.storage {
            map.insert_all(entries);
        } else {
            for (key, value) in entries {
                self.insert_checked(key, value);
            }
        }
        Ok(())
    }

    /// Inserts a copy of every entry of `other`. See [`put_all`](AdaptiveMap::put_all).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any key or value of `other` is absent.
    #[inline]
    pub fn put_all_from<M>(&mut self, other: &M) -> Result<(), Error>
    where
        M: MapView<K, V>,
        K: Clone,
        V: Clone,
    {
        self.put_all(other.iter().map(|(key, value)| (key.clone(), value.clone())))
    }

    /// Takes a detached, read-only snapshot of the keys, in iteration order.
    pub fn key_set(&self) -> KeySet<K>
    where
        K: Hash + Clone,
    {
        KeySet::from_keys(self.keys().cloned(), self.len())
    }

    /// Takes a detached, read-only snapshot of the values, in iteration order.
    pub fn value_list(&self) -> ValueList<V>
    where
        V: Clone,
    {
        ValueList::from_values(self.values().cloned())
    }

    /// Takes a detached, read-only snapshot of the entries, in iteration order.
    pub fn entry_set(&self) -> EntrySet<K, V>
    where
        K: Hash + Clone,
        V: Hash + Eq + Clone,
    {
        let entries = self
            .iter()
            .map(|(key, value)| ImmutableEntry::new(key.clone(), value.clone()));
        EntrySet::from_entries(entries, self.len())
    }

    /// Compares against any other map by content only.
    ///
    /// The maps are equal if they have the same length and, for every entry `(k, v)` of `self`, `other` holds
    /// a value for `k` that is equal to `v`. A value of `other` that is absent never counts as equal.
    pub fn eq_map<M>(&self, other: &M) -> bool
    where
        M: MapView<K, V> + ?Sized,
        V: PartialEq,
    {
        if self.len() != other.len() {
            return false;
        }

        self.iter().all(|(key, value)| match other.get(key) {
            Some(theirs) => !theirs.is_absent() && theirs == value,
            None => false,
        })
    }

    fn find(&self, key: &K) -> Option<&V> {
        match &self.storage {
            Storage::Inline { keys, values } => position(keys, key).map(|index| &values[index]),
            Storage::Delegated(map) => map.get(key),
        }
    }

    fn insert_checked(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.storage {
            Storage::Delegated(map) => map.insert(key, value),
            Storage::Inline { keys, values } => {
                if let Some(index) = position(keys, &key) {
                    return Some(mem::replace(&mut values[index], value));
                }
                if keys.len() < self.capacity {
                    keys.push(key);
                    values.push(value);
                    return None;
                }

                let migrated = keys.len();
                let map = Self::build_delegate(&self.factory, keys, values);
                self.storage = Storage::Delegated(map);
                log::debug!(
                    "migrated {migrated} entries out of inline storage after exceeding capacity {}",
                    self.capacity
                );
                self.insert_checked(key, value)
            }
        }
    }
}

impl<K, V, F> Clone for AdaptiveMap<K, V, F>
where
    K: Clone,
    V: Clone,
    F: MapFactory<K, V> + Clone,
    F::Map: Clone,
{
    fn clone(&self) -> Self {
        let storage = match &self.storage {
            Storage::Inline { keys, values } => {
                // `Vec::clone` would only allocate for the live entries
                let mut cloned_keys = Vec::with_capacity(self.capacity);
                cloned_keys.extend_from_slice(keys);
                let mut cloned_values = Vec::with_capacity(self.capacity);
                cloned_values.extend_from_slice(values);
                Storage::Inline {
                    keys: cloned_keys,
                    values: cloned_values,
                }
            }
            Storage::Delegated(map) => Storage::Delegated(map.clone()),
        };
        Self {
            capacity: self.capacity,
            storage,
            factory: self.factory.clone(),
        }
    }
}

impl<K, V, F> Default for AdaptiveMap<K, V, F>
where
    F: MapFactory<K, V> + Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_factory(F::default())
    }
}

impl<K, V, F> fmt::Debug for AdaptiveMap<K, V, F>
where
    K: fmt::Debug,
    V: fmt::Debug,
    F: MapFactory<K, V>,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders as `[Small]{k1=v1, k2=v2}` or `[Big]{k1=v1, k2=v2}` depending on [`AdaptiveMap::mode`], with
/// entries in iteration order.
impl<K, V, F> fmt::Display for AdaptiveMap<K, V, F>
where
    K: fmt::Display,
    V: fmt::Display,
    F: MapFactory<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode() {
            Mode::Small => f.write_str("[Small]{")?,
            Mode::Big => f.write_str("[Big]{")?,
        }
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl<K, V, F> Extend<(K, V)> for AdaptiveMap<K, V, F>
where
    K: Eq + AbsenceMarker,
    V: AbsenceMarker,
    F: MapFactory<K, V>,
{
    /// # Panics
    ///
    /// Panics if any key or value is absent, in which case nothing is inserted.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, key_values: I) {
        if let Err(error) = self.put_all(key_values) {
            crate::panic_rejected_argument(error);
        }
    }
}

impl<K, V, F> iter::FromIterator<(K, V)> for AdaptiveMap<K, V, F>
where
    K: Eq + AbsenceMarker,
    V: AbsenceMarker,
    F: MapFactory<K, V> + Default,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(key_values: I) -> Self {
        let mut map = Self::default();
        map.extend(key_values);
        map
    }
}

impl<K, V, F> ops::Index<&K> for AdaptiveMap<K, V, F>
where
    K: Eq + AbsenceMarker,
    V: AbsenceMarker,
    F: MapFactory<K, V>,
{
    type Output = V;

    #[inline]
    fn index(&self, key: &K) -> &V {
        self.find(key).expect("key not found")
    }
}

impl<K, V, F, G> PartialEq<AdaptiveMap<K, V, G>> for AdaptiveMap<K, V, F>
where
    K: Eq + AbsenceMarker,
    V: PartialEq + AbsenceMarker,
    F: MapFactory<K, V>,
    G: MapFactory<K, V>,
{
    #[inline]
    fn eq(&self, other: &AdaptiveMap<K, V, G>) -> bool {
        self.eq_map(other)
    }
}

impl<K, V, F> Eq for AdaptiveMap<K, V, F>
where
    K: Eq + AbsenceMarker,
    V: Eq + AbsenceMarker,
    F: MapFactory<K, V>,
{
}

impl<K, V, F, S> PartialEq<HashMap<K, V, S>> for AdaptiveMap<K, V, F>
where
    K: Eq + Hash + AbsenceMarker,
    V: PartialEq + AbsenceMarker,
    F: MapFactory<K, V>,
    S: core::hash::BuildHasher,
{
    #[inline]
    fn eq(&self, other: &HashMap<K, V, S>) -> bool {
        self.eq_map(other)
    }
}

impl<K, V, F> PartialEq<BTreeMap<K, V>> for AdaptiveMap<K, V, F>
where
    K: Ord + AbsenceMarker,
    V: PartialEq + AbsenceMarker,
    F: MapFactory<K, V>,
{
    #[inline]
    fn eq(&self, other: &BTreeMap<K, V>) -> bool {
        self.eq_map(other)
    }
}

impl<K, V, F> Hash for AdaptiveMap<K, V, F>
where
    K: Hash,
    V: Hash,
    F: MapFactory<K, V>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        // the content hash is a sum over entries, so it doesn't depend on order or on the storage strategy,
        // which keeps it consistent with `PartialEq` across small and migrated maps.
        state.write_u64(self.content_hash());
    }
}

/// Lookups through this trait skip the absence check: an absent key is never stored, so it is simply not found.
impl<K, V, F> MapView<K, V> for AdaptiveMap<K, V, F>
where
    K: Eq + AbsenceMarker,
    V: AbsenceMarker,
    F: MapFactory<K, V>,
{
    type Iter<'a>
        = Iter<'a, K, V, F>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    #[inline]
    fn len(&self) -> usize {
        AdaptiveMap::len(self)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        self.find(key)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        AdaptiveMap::iter(self)
    }
}

/// An iterator yielding references to an `AdaptiveMap`'s keys and their corresponding values.
///
/// See [`AdaptiveMap::iter`] for details.
#[allow(missing_debug_implementations)]
pub struct Iter<'a, K, V, F = DefaultMapFactory>
where
    F: MapFactory<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    inner: IterInner<'a, K, V, F>,
}

enum IterInner<'a, K, V, F>
where
    F: MapFactory<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    Inline(iter::Zip<slice::Iter<'a, K>, slice::Iter<'a, V>>),
    Delegated(<F::Map as MapView<K, V>>::Iter<'a>),
}

impl<'a, K, V, F> Iterator for Iter<'a, K, V, F>
where
    F: MapFactory<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Inline(iter) => iter.next(),
            IterInner::Delegated(iter) => iter.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterInner::Inline(iter) => iter.size_hint(),
            IterInner::Delegated(iter) => iter.size_hint(),
        }
    }
}

/// A consuming iterator over an `AdaptiveMap`.
///
/// Acquire through [`IntoIterator`].
#[allow(missing_debug_implementations)]
pub struct IntoIter<K, V, F = DefaultMapFactory>
where
    F: MapFactory<K, V>,
{
    inner: IntoIterInner<K, V, F>,
}

enum IntoIterInner<K, V, F>
where
    F: MapFactory<K, V>,
{
    Inline(iter::Zip<vec::IntoIter<K>, vec::IntoIter<V>>),
    Delegated(<F::Map as AssociativeMap<K, V>>::IntoIter),
}

impl<K, V, F> Iterator for IntoIter<K, V, F>
where
    F: MapFactory<K, V>,
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        match &mut self.inner {
            IntoIterInner::Inline(iter) => iter.next(),
            IntoIterInner::Delegated(iter) => iter.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IntoIterInner::Inline(iter) => iter.size_hint(),
            IntoIterInner::Delegated(iter) => iter.size_hint(),
        }
    }
}

/// An iterator yielding references to an `AdaptiveMap`'s keys.
///
/// See [`AdaptiveMap::keys`] for details.
#[allow(missing_debug_implementations)]
pub struct Keys<'a, K, V, F = DefaultMapFactory>
where
    F: MapFactory<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    iter: Iter<'a, K, V, F>,
}

impl<'a, K, V, F> Iterator for Keys<'a, K, V, F>
where
    F: MapFactory<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.iter.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// An iterator yielding references to an `AdaptiveMap`'s values.
///
/// See [`AdaptiveMap::values`] for details.
#[allow(missing_debug_implementations)]
pub struct Values<'a, K, V, F = DefaultMapFactory>
where
    F: MapFactory<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    iter: Iter<'a, K, V, F>,
}

impl<'a, K, V, F> Iterator for Values<'a, K, V, F>
where
    F: MapFactory<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.iter.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V, F> IntoIterator for AdaptiveMap<K, V, F>
where
    F: MapFactory<K, V>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, F>;

    #[inline]
    fn into_iter(self) -> IntoIter<K, V, F> {
        let inner = match self.storage {
            Storage::Inline { keys, values } => {
                IntoIterInner::Inline(keys.into_iter().zip(values))
            }
            Storage::Delegated(map) => IntoIterInner::Delegated(map.into_entries()),
        };
        IntoIter { inner }
    }
}

impl<'a, K, V, F> IntoIterator for &'a AdaptiveMap<K, V, F>
where
    F: MapFactory<K, V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, F>;

    #[inline]
    fn into_iter(self) -> Iter<'a, K, V, F> {
        self.iter()
    }
}

/// You can use this with the `#[serde(with = "module")]` [field attribute] to make an [`AdaptiveMap`]
/// serialize/deserialize as a sequence of `(k, v)` elements, rather than as a map in the serde data model.
/// This can be helpful when serializing to JSON because true JSON maps are only allowed to be keyed by strings,
/// and thus the key types of Rust maps serialized to JSON maps are quite limited. Worse, this limitation only shows up
/// as a runtime panic! With this adapter to serialize as sequence, you should be able to use any key type that impls `Serialize`.
///
/// [field attribute]: https://serde.rs/field-attrs.html#with
#[cfg(feature = "serde")]
pub mod serde_as_seq {
    use serde::Deserialize;

    use super::*;

    /// You can use this with the `#[serde(serialize_with = "function")]` [field attribute] to make an [`AdaptiveMap`]
    /// serialize as a sequence of `(k, v)` pairs, rather than a map in the serde data model. See the module-level docs for more.
    ///
    /// [field attribute]: https://serde.rs/field-attrs.html#serialize_with
    #[inline]
    pub fn serialize<K, V, F, S>(map: &AdaptiveMap<K, V, F>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: serde::Serialize,
        V: serde::Serialize,
        F: MapFactory<K, V>,
        S: serde::Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    /// You can use this with the `#[serde(deserialize_with = "function")]` [field attribute] to deserialize an [`AdaptiveMap`]
    /// from a sequence of `(k, v)` pairs, rather than a map in the serde data model. See the module-level docs for more.
    ///
    /// [field attribute]: https://serde.rs/field-attrs.html#serialize_with
    #[inline]
    pub fn deserialize<'de, K, V, F, D>(deserializer: D) -> Result<AdaptiveMap<K, V, F>, D::Error>
    where
        K: serde::Deserialize<'de> + Eq + AbsenceMarker,
        V: serde::Deserialize<'de> + AbsenceMarker,
        F: MapFactory<K, V> + Default,
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let entries = Vec::<(K, V)>::deserialize(deserializer)?;
        let mut map = AdaptiveMap::default();
        map.put_all(entries).map_err(D::Error::custom)?;
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<K, V, F> serde::Serialize for AdaptiveMap<K, V, F>
where
    K: serde::Serialize,
    V: serde::Serialize,
    F: MapFactory<K, V>,
{
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut ser_map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            ser_map.serialize_entry(k, v)?;
        }
        ser_map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, F> serde::Deserialize<'de> for AdaptiveMap<K, V, F>
where
    K: serde::Deserialize<'de> + Eq + AbsenceMarker,
    V: serde::Deserialize<'de> + AbsenceMarker,
    F: MapFactory<K, V> + Default,
{
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::marker::PhantomData;
        use serde::de::Error as _;
        use serde::de::MapAccess;
        use serde::de::Visitor;

        struct AdaptiveMapVisitor<K, V, F>(PhantomData<(K, V, F)>);

        impl<'de, K, V, F> Visitor<'de> for AdaptiveMapVisitor<K, V, F>
        where
            K: serde::Deserialize<'de> + Eq + AbsenceMarker,
            V: serde::Deserialize<'de> + AbsenceMarker,
            F: MapFactory<K, V> + Default,
        {
            type Value = AdaptiveMap<K, V, F>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of (k, v) pairs")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = AdaptiveMap::default();

                while let Some((k, v)) = access.next_entry::<K, V>()? {
                    map.put(k, v).map_err(A::Error::custom)?;
                }

                Ok(map)
            }
        }

        deserializer.deserialize_map(AdaptiveMapVisitor::<K, V, F>(PhantomData))
    }
}

#[cfg(feature = "speedy")]
impl<'a, C, K, V, F> speedy::Readable<'a, C> for AdaptiveMap<K, V, F>
where
    C: speedy::Context,
    K: speedy::Readable<'a, C> + Eq + AbsenceMarker,
    V: speedy::Readable<'a, C> + AbsenceMarker,
    F: MapFactory<K, V> + Default,
{
    #[inline]
    fn read_from<R: speedy::Reader<'a, C>>(reader: &mut R) -> Result<Self, C::Error> {
        let entries = Vec::<(K, V)>::read_from(reader)?;
        let mut map = Self::default();
        map.put_all(entries)
            .map_err(|error| C::Error::from(speedy::Error::custom(error)))?;
        Ok(map)
    }

    #[inline]
    fn minimum_bytes_needed() -> usize {
        Vec::<(K, V)>::minimum_bytes_needed()
    }
}

// Written in the same layout as a `Vec<(K, V)>`: a `u32` length followed by the pairs.
#[cfg(feature = "speedy")]
impl<C, K, V, F> speedy::Writable<C> for AdaptiveMap<K, V, F>
where
    C: speedy::Context,
    K: speedy::Writable<C>,
    V: speedy::Writable<C>,
    F: MapFactory<K, V>,
{
    #[inline]
    fn write_to<T: ?Sized + speedy::Writer<C>>(
        &self,
        writer: &mut T,
    ) -> Result<(), <C as speedy::Context>::Error> {
        let len = u32::try_from(self.len())
            .map_err(|error| C::Error::from(speedy::Error::custom(error)))?;
        writer.write_u32(len)?;
        for (key, value) in self {
            key.write_to(writer)?;
            value.write_to(writer)?;
        }
        Ok(())
    }

    #[inline]
    fn bytes_needed(&self) -> Result<usize, <C as speedy::Context>::Error> {
        let mut bytes = 4;
        for (key, value) in self {
            bytes += key.bytes_needed()? + value.bytes_needed()?;
        }
        Ok(bytes)
    }
}
